#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    #[default]
    One = 0,
    Two = 1,
    Three = 2,
}

impl Number {
    pub const ALL: [Self; 3] = [Number::One, Number::Two, Number::Three];
}

impl From<u8> for Number {
    fn from(n: u8) -> Number {
        match n {
            0 => Number::One,
            1 => Number::Two,
            2 => Number::Three,
            _ => panic!("Invalid number"),
        }
    }
}
impl From<Number> for u8 {
    fn from(n: Number) -> u8 {
        n as u8
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Number::One => "1",
                Number::Two => "2",
                Number::Three => "3",
            }
        )
    }
}

use serde::Serialize;
