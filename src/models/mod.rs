pub mod author;
pub mod pitch;
pub mod playlist;

pub use author::*;
pub use pitch::*;
pub use playlist::*;
