#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shading {
    #[default]
    Solid = 0,
    Striped = 1,
    Outline = 2,
}

impl Shading {
    pub const ALL: [Self; 3] = [Shading::Solid, Shading::Striped, Shading::Outline];
}

impl From<u8> for Shading {
    fn from(n: u8) -> Shading {
        match n {
            0 => Shading::Solid,
            1 => Shading::Striped,
            2 => Shading::Outline,
            _ => panic!("Invalid shading"),
        }
    }
}
impl From<Shading> for u8 {
    fn from(s: Shading) -> u8 {
        s as u8
    }
}

impl std::fmt::Display for Shading {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Shading::Solid => "f",
                Shading::Striped => "t",
                Shading::Outline => "l",
            }
        )
    }
}

use serde::Serialize;
