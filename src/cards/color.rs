#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Red = 0,
    Green = 1,
    Purple = 2,
}

impl Color {
    pub const ALL: [Self; 3] = [Color::Red, Color::Green, Color::Purple];
}

impl From<u8> for Color {
    fn from(n: u8) -> Color {
        match n {
            0 => Color::Red,
            1 => Color::Green,
            2 => Color::Purple,
            _ => panic!("Invalid color"),
        }
    }
}
impl From<Color> for u8 {
    fn from(c: Color) -> u8 {
        c as u8
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Color::Red => "r",
                Color::Green => "g",
                Color::Purple => "p",
            }
        )
    }
}

use serde::Serialize;
