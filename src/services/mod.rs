pub mod auth_service;
pub mod author_service;
pub mod pitch_service;

pub use author_service::*;
pub use pitch_service::*;
