use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{StyleError, StyleResult};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    /// Lenient parse: malformed input yields opaque black.
    pub fn from_hex(hex: &str) -> Self {
        match Self::parse_hex(hex) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{e}; falling back to black");
                Color::BLACK
            }
        }
    }

    pub fn parse_hex(hex: &str) -> StyleResult<Self> {
        let s = hex.trim().trim_start_matches('#');
        let channel = |i: usize| {
            s.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| StyleError::InvalidHex(hex.to_string()))
        };
        match s.len() {
            6 => Ok(Color(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Ok(Color(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(StyleError::InvalidHex(hex.to_string())),
        }
    }

    pub fn to_hex(self) -> String {
        if self.3 == 255 {
            format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.0, self.1, self.2, self.3)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse_hex(s)
    }
}

// Colors travel as hex strings in theme files.
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}
