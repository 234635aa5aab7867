use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ttt_common::Mark;
use ttt_common::config::Validate;

/// `#RRGGBB` color as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const HOVER: Rgb = Rgb(0xDD, 0xDD, 0xDD);
    pub const WIN_FLASH: Rgb = Rgb(0xFF, 0xFF, 0x00);
    pub const DRAW_FLASH: Rgb = Rgb(0xAA, 0xAA, 0xAA);
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value
            .strip_prefix('#')
            .ok_or_else(|| format!("Color {:?} must start with '#'", value))?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Color {:?} must have six hex digits", value));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| format!("Color {:?} is not valid hex", value))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub x: Rgb,
    pub o: Rgb,
    pub empty: Rgb,
    pub background: Rgb,
}

impl Theme {
    pub fn cell_color(&self, mark: Mark) -> Rgb {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
            Mark::Empty => self.empty,
        }
    }
}

impl Validate for Theme {
    fn validate(&self) -> Result<(), String> {
        if self.x == self.o {
            return Err("X and O must use different colors".to_string());
        }
        Ok(())
    }
}

pub const DEFAULT_THEME: &str = "Classic";

pub fn default_themes() -> BTreeMap<String, Theme> {
    let background = Rgb(0x33, 0x33, 0x33);
    BTreeMap::from([
        (
            "Classic".to_string(),
            Theme {
                x: Rgb(0xFF, 0x66, 0x66),
                o: Rgb(0x66, 0x66, 0xFF),
                empty: Rgb(0xFF, 0xFF, 0xFF),
                background,
            },
        ),
        (
            "Dark".to_string(),
            Theme {
                x: Rgb(0xFF, 0xAA, 0xAA),
                o: Rgb(0xAA, 0xAA, 0xFF),
                empty: Rgb(0x33, 0x33, 0x33),
                background: Rgb(0x22, 0x22, 0x22),
            },
        ),
        (
            "Pastel".to_string(),
            Theme {
                x: Rgb(0xFF, 0xB3, 0xBA),
                o: Rgb(0xBA, 0xE1, 0xFF),
                empty: Rgb(0xFF, 0xFF, 0xBA),
                background,
            },
        ),
    ])
}
