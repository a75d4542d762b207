pub mod palette;
pub mod quantize;
pub mod resolver;

use std::fmt;
use std::str::FromStr;

use crate::FontError;

/// A color stored on the RGB565 lattice.
///
/// Construction always goes through [`quantize::rgb888_to_rgb565`], so two
/// colors compare equal exactly when they would look the same on a 16-bit
/// display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xffff);

    pub fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self(quantize::rgb888_to_rgb565(r, g, b))
    }

    pub fn rgb565(self) -> u16 {
        self.0
    }

    /// Quantized RGB888 value used for painting.
    pub fn rgb(self) -> [u8; 3] {
        quantize::rgb565_to_rgb888(self.0)
    }

    pub fn pixel(self) -> image::Rgb<u8> {
        image::Rgb(self.rgb())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Parses `#RRGGBB` (the leading `#` is optional).
impl FromStr for Color {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FontError::InvalidColor(s.to_owned()));
        }

        let invalid = |_: std::num::ParseIntError| FontError::InvalidColor(s.to_owned());
        let channel =
            |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).map_err(invalid);
        Ok(Self::from_rgb888(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_notation() {
        assert_eq!("#ff0000".parse::<Color>().unwrap().rgb(), [255, 0, 0]);
        assert_eq!("00FF00".parse::<Color>().unwrap().rgb(), [0, 255, 0]);
        assert_eq!("#808080".parse::<Color>().unwrap().rgb(), [123, 125, 123]);
    }

    #[test]
    fn rejects_malformed_hex() {
        for input in ["", "#fff", "#gg0000", "#ff00001", "red"] {
            assert!(input.parse::<Color>().is_err(), "{input:?}");
        }
    }

    #[test]
    fn displays_quantized_value() {
        assert_eq!(Color::from_rgb888(255, 165, 0).to_string(), "#ffa100");
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn equal_after_quantization() {
        assert_eq!(Color::from_rgb888(255, 165, 0), Color::from_rgb888(255, 162, 3));
        assert_ne!(Color::from_rgb888(255, 165, 0), Color::from_rgb888(255, 170, 0));
    }
}
