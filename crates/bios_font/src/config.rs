use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::color::palette::ColorChoice;
use crate::glyph::format::GlyphFormat;
use crate::render::grid::{GridGeometry, GridOptions};
use crate::render::text::TextOptions;
use crate::FontError;

/// Display parameters shared by both render pipelines.
///
/// `width` and `height` bound the glyph table view only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub scale: u32,
    pub width: u32,
    pub height: u32,
    pub format: GlyphFormat,
    pub padding: u32,
    pub text_color: ColorChoice,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 4,
            width: 512,
            height: 256,
            format: GlyphFormat::default(),
            padding: 2,
            text_color: ColorChoice::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_toml(source: &str) -> Result<Self, FontError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, FontError> {
        debug!("loading render config from {}", path.display());
        Self::from_toml(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), FontError> {
        if self.scale == 0 {
            return Err(FontError::InvalidScale(self.scale));
        }
        // Padding and canvas bounds must produce a glyph table that fits.
        GridGeometry::derive(&self.grid_options()).map(|_| ())
    }

    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            format: self.format,
            scale: self.scale,
            canvas_width: self.width,
            canvas_height: self.height,
            padding: self.padding,
            color: self.text_color.color,
        }
    }

    pub fn text_options(&self) -> TextOptions {
        TextOptions { format: self.format, scale: self.scale, default_color: self.text_color.color }
    }
}
