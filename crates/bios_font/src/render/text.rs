//! Multi-line text rendering with per-word colors.

use std::collections::HashMap;

use image::RgbImage;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{check_image_size, plot_glyph, upscale};
use crate::color::resolver::{ColorKey, ColorTable};
use crate::color::Color;
use crate::glyph::format::GlyphFormat;
use crate::glyph::table::GlyphTable;
use crate::FontError;

/// A run of non-whitespace, non-bracket characters with an optional
/// `[digits]` suffix.
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\[\]\s]+)(?:\[([0-9]+)\])?").expect("token pattern is valid"));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    /// Index written in the source text as `word[n]`.
    pub explicit_index: Option<u64>,
}

/// Splits one line into tokens. Whitespace and stray brackets separate
/// tokens and are never part of one.
pub fn tokenize(line: &str) -> Vec<Token> {
    TOKEN
        .captures_iter(line)
        .map(|captures| Token {
            word: captures[1].to_owned(),
            // An index too large for u64 is treated as absent.
            explicit_index: captures.get(2).and_then(|index| index.as_str().parse().ok()),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedToken {
    pub token: Token,
    /// 1-based occurrence of the word across the whole text. Equal to the
    /// explicit index when one was given.
    pub occurrence: u64,
    /// Unscaled pixel position of the first character.
    pub x: u32,
    pub y: u32,
}

impl PlacedToken {
    /// Key used for color lookup.
    ///
    /// Only explicitly indexed tokens produce an indexed key; the implicit
    /// occurrence count never does.
    pub fn key(&self) -> ColorKey {
        match self.token.explicit_index {
            Some(index) => ColorKey::indexed(self.token.word.clone(), index),
            None => ColorKey::word(self.token.word.clone()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TextLayout {
    /// Unscaled canvas size.
    pub width: u32,
    pub height: u32,
    /// Horizontal distance between character cells.
    pub advance: u32,
    pub line_count: usize,
    pub tokens: Vec<PlacedToken>,
}

/// Lays out `text` in cells of `format.width() + 1` pixels, one 1-pixel
/// gutter between lines. Trailing line breaks are ignored.
pub fn layout(text: &str, format: GlyphFormat) -> Result<TextLayout, FontError> {
    let text = text.trim_end_matches(['\n', '\r']);
    if text.is_empty() {
        return Err(FontError::EmptyText);
    }

    let lines: Vec<&str> =
        text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)).collect();
    let advance = format.width() + 1;
    let line_height = format.height() + 1;

    let longest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let line_count = u32::try_from(lines.len()).map_err(|_| FontError::ImageTooLarge)?;
    let width = u32::try_from(longest)
        .ok()
        .and_then(|longest| advance.checked_mul(longest))
        .ok_or(FontError::ImageTooLarge)?;
    let height = format
        .height()
        .checked_mul(line_count)
        .and_then(|height| height.checked_add(line_count - 1))
        .ok_or(FontError::ImageTooLarge)?;

    let mut occurrences: HashMap<String, u64> = HashMap::new();
    let mut tokens = Vec::new();
    let mut y = 0u32;
    for line in &lines {
        let mut x = 0u32;
        for token in tokenize(line) {
            let occurrence = match token.explicit_index {
                Some(index) => index,
                None => {
                    let count = occurrences.entry(token.word.clone()).or_insert(0);
                    *count += 1;
                    *count
                },
            };

            let chars = token.word.chars().count() as u32;
            let placed = PlacedToken { token, occurrence, x, y };
            tokens.push(placed);

            // Every character cell plus one blank cell between tokens.
            x = x.saturating_add(advance.saturating_mul(chars.saturating_add(1)));
        }
        y = y.saturating_add(line_height);
    }

    Ok(TextLayout { width, height, advance, line_count: lines.len(), tokens })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextOptions {
    pub format: GlyphFormat,
    pub scale: u32,
    /// Color of tokens without an assignment.
    pub default_color: Color,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self { format: GlyphFormat::default(), scale: 4, default_color: Color::WHITE }
    }
}

#[derive(Clone, Debug)]
pub struct TextOutput {
    pub image: RgbImage,
    pub layout: TextLayout,
    /// Characters skipped because the glyph table has no glyph for them.
    pub skipped: usize,
}

/// Renders `text` with glyphs from `bytes`, addressed by code point.
///
/// Spaces and characters beyond the end of the glyph table advance the
/// cursor without drawing.
pub fn render_text(
    text: &str,
    bytes: &[u8],
    options: &TextOptions,
    colors: &ColorTable,
) -> Result<TextOutput, FontError> {
    if options.scale == 0 {
        return Err(FontError::InvalidScale(options.scale));
    }
    let layout = layout(text, options.format)?;
    if bytes.is_empty() {
        return Err(FontError::EmptyGlyphData);
    }
    check_image_size(layout.width, layout.height, options.scale)?;

    let table = GlyphTable::new(bytes, options.format);
    debug!(
        "text {} lines into {}x{} px with {} glyphs available",
        layout.line_count,
        layout.width,
        layout.height,
        table.len()
    );

    let mut canvas = RgbImage::new(layout.width, layout.height);
    let mut skipped = 0;
    for placed in &layout.tokens {
        let color = colors.resolve(&placed.key(), options.default_color);
        let mut x = placed.x;
        for ch in placed.token.word.chars() {
            if ch != ' ' {
                match table.glyph_for(ch) {
                    Some(glyph) => plot_glyph(&mut canvas, glyph, x, placed.y, color),
                    None => {
                        trace!("no glyph for {ch:?} (U+{:04X})", u32::from(ch));
                        skipped += 1;
                    },
                }
            }
            x = x.saturating_add(layout.advance);
        }
    }

    Ok(TextOutput { image: upscale(&canvas, options.scale), layout, skipped })
}
