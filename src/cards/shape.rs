#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Oval = 0,
    Squiggle = 1,
    Diamond = 2,
}

impl Shape {
    pub const ALL: [Self; 3] = [Shape::Oval, Shape::Squiggle, Shape::Diamond];
}

impl From<u8> for Shape {
    fn from(n: u8) -> Shape {
        match n {
            0 => Shape::Oval,
            1 => Shape::Squiggle,
            2 => Shape::Diamond,
            _ => panic!("Invalid shape"),
        }
    }
}
impl From<Shape> for u8 {
    fn from(s: Shape) -> u8 {
        s as u8
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Shape::Oval => "o",
                Shape::Squiggle => "s",
                Shape::Diamond => "d",
            }
        )
    }
}

use serde::Serialize;
