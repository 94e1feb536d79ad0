pub mod auth;
pub mod authors;
pub mod health;
pub mod metrics;
pub mod pitches;
pub mod playlists;
pub mod swagger;
