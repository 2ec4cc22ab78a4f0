mod lobby;
mod message;
mod server;
mod session;

pub use lobby::*;
pub use message::*;
pub use server::*;
pub use session::*;
