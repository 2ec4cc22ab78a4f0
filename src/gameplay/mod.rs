mod matcher;
mod tableau;

pub use matcher::*;
pub use tableau::*;
