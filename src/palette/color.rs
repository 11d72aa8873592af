use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),
}

/// 8-bit RGB color. Text form is `#RRGGBB`.
///
/// Ordering is by (r, g, b), which matches ordering by hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Euclidean distance over the three channels.
    pub fn distance(self, other: Color) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Black or white, whichever reads better on top of `self` (YIQ luminance).
    pub fn contrast_text(self) -> Color {
        let yiq = (self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114) as f64 / 1000.0;
        if yiq >= 150.0 {
            BLACK
        } else {
            WHITE
        }
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

pub fn contrast_color(hex: &str) -> Result<Color, ColorError> {
    Ok(hex.parse::<Color>()?.contrast_text())
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidColorFormat(s.to_string());
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |hi: u8, lo: u8| -> Result<u8, ColorError> {
            let hi = (hi as char).to_digit(16).ok_or_else(invalid)? as u8;
            let lo = (lo as char).to_digit(16).ok_or_else(invalid)? as u8;
            Ok((hi << 4) | lo)
        };

        let b = digits.as_bytes();
        match b.len() {
            3 => Ok(Self::new(channel(b[0], b[0])?, channel(b[1], b[1])?, channel(b[2], b[2])?)),
            6 => Ok(Self::new(channel(b[0], b[1])?, channel(b[2], b[3])?, channel(b[4], b[5])?)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}
