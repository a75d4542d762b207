use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::Color;
use crate::FontError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    White,
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Pink,
    Gray,
    Cyan,
    Purple,
    LightGray,
    Navy,
}

impl Preset {
    pub const ALL: [Preset; 13] = [
        Preset::White,
        Preset::Black,
        Preset::Red,
        Preset::Green,
        Preset::Blue,
        Preset::Yellow,
        Preset::Orange,
        Preset::Pink,
        Preset::Gray,
        Preset::Cyan,
        Preset::Purple,
        Preset::LightGray,
        Preset::Navy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::White => "White",
            Preset::Black => "Black",
            Preset::Red => "Red",
            Preset::Green => "Green",
            Preset::Blue => "Blue",
            Preset::Yellow => "Yellow",
            Preset::Orange => "Orange",
            Preset::Pink => "Pink",
            Preset::Gray => "Gray",
            Preset::Cyan => "Cyan",
            Preset::Purple => "Purple",
            Preset::LightGray => "LightGray",
            Preset::Navy => "Navy",
        }
    }

    /// Unquantized table value.
    pub fn rgb888(self) -> [u8; 3] {
        match self {
            Preset::White => [255, 255, 255],
            Preset::Black => [0, 0, 0],
            Preset::Red => [255, 0, 0],
            Preset::Green => [0, 255, 0],
            Preset::Blue => [0, 0, 255],
            Preset::Yellow => [255, 255, 0],
            Preset::Orange => [255, 165, 0],
            Preset::Pink => [255, 105, 180],
            Preset::Gray => [128, 128, 128],
            Preset::Cyan => [0, 255, 255],
            Preset::Purple => [128, 0, 128],
            Preset::LightGray => [200, 200, 200],
            Preset::Navy => [0, 0, 128],
        }
    }

    pub fn color(self) -> Color {
        let [r, g, b] = self.rgb888();
        Color::from_rgb888(r, g, b)
    }

    /// Case-insensitive lookup; `-`, `_` and spaces are ignored so that
    /// `light-gray` finds [`Preset::LightGray`].
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL.into_iter().find(|preset| preset.name().eq_ignore_ascii_case(&wanted))
    }

    /// Finds the preset whose quantized value is exactly `color`.
    pub fn matching(color: Color) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.color() == color)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A color picked either by preset name or as a custom `#RRGGBB` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorChoice {
    pub color: Color,
    /// Preset whose quantized value equals `color`, if any.
    pub preset: Option<Preset>,
}

impl ColorChoice {
    pub fn preset(preset: Preset) -> Self {
        Self { color: preset.color(), preset: Some(preset) }
    }

    /// Custom pick; reverse-matched against the preset table.
    pub fn custom(r: u8, g: u8, b: u8) -> Self {
        Self::from_color(Color::from_rgb888(r, g, b))
    }

    pub fn from_color(color: Color) -> Self {
        Self { color, preset: Preset::matching(color) }
    }

    pub fn label(&self) -> String {
        match self.preset {
            Some(preset) => preset.name().to_owned(),
            None => self.color.to_string(),
        }
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::preset(Preset::White)
    }
}

impl FromStr for ColorChoice {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(preset) = Preset::from_name(s.trim()) {
            return Ok(Self::preset(preset));
        }

        s.parse::<Color>().map(Self::from_color)
    }
}

impl<'de> Deserialize<'de> for ColorChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_names_are_case_insensitive() {
        assert_eq!(Preset::from_name("white"), Some(Preset::White));
        assert_eq!(Preset::from_name("LIGHTGRAY"), Some(Preset::LightGray));
        assert_eq!(Preset::from_name("light-gray"), Some(Preset::LightGray));
        assert_eq!(Preset::from_name("magenta"), None);
    }

    #[test]
    fn preset_colors_are_quantized() {
        assert_eq!(Preset::Orange.color().rgb(), [255, 161, 0]);
        assert_eq!(Preset::Navy.color().rgb(), [0, 0, 123]);
        assert_eq!(Preset::Red.color().rgb(), [255, 0, 0]);
    }

    #[test]
    fn custom_pick_matches_preset_after_quantization() {
        // Both land on the same RGB565 value as the orange preset.
        assert_eq!(ColorChoice::custom(255, 165, 0).preset, Some(Preset::Orange));
        assert_eq!(ColorChoice::custom(255, 162, 3).preset, Some(Preset::Orange));
        assert_eq!(ColorChoice::custom(10, 200, 30).preset, None);
    }

    #[test]
    fn parses_names_and_hex() {
        let choice: ColorChoice = "Cyan".parse().unwrap();
        assert_eq!(choice, ColorChoice::preset(Preset::Cyan));

        let choice: ColorChoice = "#ff0000".parse().unwrap();
        assert_eq!(choice.preset, Some(Preset::Red));
        assert_eq!(choice.label(), "Red");

        let choice: ColorChoice = "#123456".parse().unwrap();
        assert_eq!(choice.preset, None);
        assert_eq!(choice.label(), choice.color.to_string());

        assert!("not-a-color".parse::<ColorChoice>().is_err());
    }
}
