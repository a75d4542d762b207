use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::FontError;

/// Glyph cell size in pixels. Each glyph row is one byte, MSB first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphFormat {
    width: u32,
    height: u32,
}

impl GlyphFormat {
    /// Formats commonly found in BIOS and VGA ROM dumps.
    pub const SUPPORTED: [GlyphFormat; 6] = [
        GlyphFormat { width: 8, height: 8 },
        GlyphFormat { width: 8, height: 12 },
        GlyphFormat { width: 8, height: 14 },
        GlyphFormat { width: 8, height: 16 },
        GlyphFormat { width: 8, height: 18 },
        GlyphFormat { width: 8, height: 20 },
    ];

    pub fn new(width: u32, height: u32) -> Result<Self, FontError> {
        if !(1..=8).contains(&width) || height == 0 {
            return Err(FontError::InvalidFormat(format!("{width}x{height}")));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes occupied by one glyph.
    pub fn bytes_per_glyph(&self) -> usize {
        self.height as usize
    }
}

impl Default for GlyphFormat {
    fn default() -> Self {
        Self { width: 8, height: 16 }
    }
}

impl fmt::Display for GlyphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for GlyphFormat {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FontError::InvalidFormat(s.to_owned());
        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = width.trim().parse().map_err(|_| invalid())?;
        let height = height.trim().parse().map_err(|_| invalid())?;
        Self::new(width, height).map_err(|_| invalid())
    }
}

impl<'de> Deserialize<'de> for GlyphFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
