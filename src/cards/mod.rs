mod card;
mod color;
mod deck;
mod number;
mod shading;
mod shape;

pub use card::*;
pub use color::*;
pub use deck::*;
pub use number::*;
pub use shading::*;
pub use shape::*;
