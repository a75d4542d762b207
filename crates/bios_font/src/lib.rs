//! Bitmap font rendering for raw BIOS/ROM glyph tables.
//!
//! Two pipelines share one glyph decoder: [`render_grid`] tiles every glyph
//! of a buffer into a table image, and [`render_text`] lays out colored text
//! using the buffer as a code-point indexed font. [`Session`] ties both to the
//! mutable state of an editing session.

mod color;
mod config;
mod glyph;
mod render;
mod session;

use std::path::PathBuf;

pub use color::{
    palette::{ColorChoice, Preset},
    quantize::{quantize, rgb565_to_rgb888, rgb888_to_rgb565},
    resolver::{ColorKey, ColorTable},
    Color,
};
pub use config::RenderConfig;
pub use glyph::{
    format::GlyphFormat,
    hex,
    table::{Glyph, GlyphTable},
};
pub use render::{
    export,
    grid::{render_grid, GridGeometry, GridOptions, GridOutput},
    text::{layout, render_text, tokenize, PlacedToken, TextLayout, TextOptions, TextOutput, Token},
    upscale,
};
pub use session::{Session, SourceKind, View};

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("invalid glyph format {0:?}, expected WxH with a width of 1 to 8")]
    InvalidFormat(String),
    #[error("invalid scale {0}")]
    InvalidScale(u32),
    #[error("invalid color {0:?}, expected a preset name or #RRGGBB")]
    InvalidColor(String),
    #[error("invalid color key {0:?}, expected WORD or WORD[N]")]
    InvalidKey(String),
    #[error("no text to render")]
    EmptyText,
    #[error("no glyph data loaded")]
    EmptyGlyphData,
    #[error("rendered image would be too large")]
    ImageTooLarge,
    #[error("no image to save")]
    NothingToExport,
    #[error("unsupported image format for {0:?}, use .png or .bmp")]
    UnsupportedExport(PathBuf),
    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}
