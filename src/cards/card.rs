#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
pub struct Card {
    id: u8,
    number: Number,
    shape: Shape,
    color: Color,
    shading: Shading,
}

impl Card {
    pub fn id(&self) -> u8 {
        self.id
    }
    pub fn number(&self) -> Number {
        self.number
    }
    pub fn shape(&self) -> Shape {
        self.shape
    }
    pub fn color(&self) -> Color {
        self.color
    }
    pub fn shading(&self) -> Shading {
        self.shading
    }
}

/// u8 isomorphism
/// each card is mapped to its index in the 81-card universe,
/// base-3 digits read number, shape, color, shading
/// 2dgt
/// 49
/// 0b00110001
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.id
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        assert!(n < crate::DECK_SIZE as u8);
        Self {
            id: n,
            number: Number::from(n / 27),
            shape: Shape::from(n / 9 % 3),
            color: Color::from(n / 3 % 3),
            shading: Shading::from(n % 3),
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}{}{}{}",
            self.number, self.shape, self.color, self.shading
        )
    }
}

use super::{color::Color, number::Number, shading::Shading, shape::Shape};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};
