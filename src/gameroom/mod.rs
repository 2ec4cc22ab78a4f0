mod event;
mod outcome;
mod player;
mod room;

pub use event::*;
pub use outcome::*;
pub use player::*;
pub use room::*;
