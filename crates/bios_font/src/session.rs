use std::fs;
use std::path::Path;

use image::RgbImage;
use log::{debug, info};

use crate::color::palette::ColorChoice;
use crate::color::resolver::{ColorKey, ColorTable};
use crate::glyph::hex;
use crate::render::export;
use crate::render::grid::{render_grid, GridOptions, GridOutput};
use crate::render::text::{render_text, TextOptions, TextOutput};
use crate::FontError;

/// How a glyph buffer was loaded from disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Raw ROM bytes, read verbatim.
    Binary,
    /// Text holding hex byte tokens.
    HexText,
}

impl SourceKind {
    /// `.bin`, `.rom` and `.bios` files are binary; everything else is hex text.
    pub fn for_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "bin" | "rom" | "bios" => SourceKind::Binary,
            _ => SourceKind::HexText,
        }
    }
}

/// What the last produced image shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    GlyphTable,
    Text,
}

/// Mutable state of one viewing session.
///
/// Every operation either completes or returns an error with the session
/// left exactly as it was.
#[derive(Debug, Default)]
pub struct Session {
    glyphs: Vec<u8>,
    text_color: ColorChoice,
    colors: ColorTable,
    image: Option<RgbImage>,
    view: Option<View>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyphs(&self) -> &[u8] {
        &self.glyphs
    }

    /// Current glyph buffer as editable `0xXX, ...` text.
    pub fn hex_text(&self) -> String {
        hex::dump(&self.glyphs)
    }

    /// Replaces the glyph buffer with the bytes parsed from hex text.
    pub fn load_hex_text(&mut self, text: &str) -> usize {
        self.glyphs = hex::parse_bytes(text);
        debug!("loaded {} bytes from hex text", self.glyphs.len());
        self.glyphs.len()
    }

    /// Replaces the glyph buffer with raw bytes.
    pub fn load_binary(&mut self, bytes: Vec<u8>) -> usize {
        self.glyphs = bytes;
        debug!("loaded {} binary bytes", self.glyphs.len());
        self.glyphs.len()
    }

    pub fn load_file(&mut self, path: &Path) -> Result<SourceKind, FontError> {
        let kind = SourceKind::for_path(path);
        match kind {
            SourceKind::Binary => {
                let bytes = fs::read(path)?;
                self.load_binary(bytes);
            },
            SourceKind::HexText => {
                let text = fs::read_to_string(path)?;
                self.load_hex_text(text.trim());
            },
        }
        info!("loaded {} bytes from {}", self.glyphs.len(), path.display());
        Ok(kind)
    }

    pub fn text_color(&self) -> ColorChoice {
        self.text_color
    }

    pub fn set_text_color(&mut self, choice: ColorChoice) {
        self.text_color = choice;
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    /// Assigns a color to a key typed as `WORD` or `WORD[N]`.
    pub fn assign_color(&mut self, key: &str, choice: ColorChoice) -> Result<ColorKey, FontError> {
        let key: ColorKey = key.parse()?;
        debug!("color for {key} set to {}", choice.label());
        self.colors.assign(key.clone(), choice.color);
        Ok(key)
    }

    pub fn image(&self) -> Option<&RgbImage> {
        self.image.as_ref()
    }

    pub fn view(&self) -> Option<View> {
        self.view
    }

    /// Renders the glyph table in the current text color. `options.color` is
    /// ignored.
    pub fn render_grid(&mut self, options: &GridOptions) -> Result<GridOutput, FontError> {
        let options = GridOptions { color: self.text_color.color, ..*options };
        let output = render_grid(&self.glyphs, &options)?;
        self.image = Some(output.image.clone());
        self.view = Some(View::GlyphTable);
        Ok(output)
    }

    /// Renders `text` with the session's color assignments. Tokens without
    /// an assignment use the current text color; `options.default_color` is
    /// ignored.
    pub fn render_text(
        &mut self,
        text: &str,
        options: &TextOptions,
    ) -> Result<TextOutput, FontError> {
        let options = TextOptions { default_color: self.text_color.color, ..*options };
        let output = render_text(text, &self.glyphs, &options, &self.colors)?;
        self.image = Some(output.image.clone());
        self.view = Some(View::Text);
        Ok(output)
    }

    pub fn save_image(&self, path: &Path) -> Result<(), FontError> {
        let image = self.image.as_ref().ok_or(FontError::NothingToExport)?;
        export::save(image, path)?;
        info!("image saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette::Preset;
    use crate::color::Color;
    use crate::glyph::format::GlyphFormat;

    fn grid_options() -> GridOptions {
        GridOptions { scale: 1, ..GridOptions::default() }
    }

    fn text_options() -> TextOptions {
        TextOptions { format: GlyphFormat::new(8, 8).unwrap(), scale: 1, ..TextOptions::default() }
    }

    #[test]
    fn loads_replace_buffer_wholesale() {
        let mut session = Session::new();
        assert_eq!(session.load_hex_text("0x01, 0x02, 0x03"), 3);
        assert_eq!(session.load_binary(vec![9]), 1);
        assert_eq!(session.glyphs(), &[9]);
        assert_eq!(session.load_hex_text("nothing valid"), 0);
        assert!(session.glyphs().is_empty());
    }

    #[test]
    fn binary_file_round_trips_through_hex_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.rom");
        let bytes: Vec<u8> = (0..=255).rev().collect();
        fs::write(&path, &bytes).unwrap();

        let mut session = Session::new();
        assert_eq!(session.load_file(&path).unwrap(), SourceKind::Binary);
        let text = session.hex_text();

        let mut reloaded = Session::new();
        reloaded.load_hex_text(&text);
        assert_eq!(reloaded.glyphs(), bytes.as_slice());
    }

    #[test]
    fn text_files_are_parsed_as_hex() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.txt");
        fs::write(&path, "0x3C, 0x42,\n0x81\n").unwrap();

        let mut session = Session::new();
        assert_eq!(session.load_file(&path).unwrap(), SourceKind::HexText);
        assert_eq!(session.glyphs(), &[0x3c, 0x42, 0x81]);
    }

    #[test]
    fn missing_file_leaves_buffer_untouched() {
        let mut session = Session::new();
        session.load_binary(vec![1, 2]);
        let result = session.load_file(Path::new("/nonexistent/font.bin"));
        assert!(matches!(result, Err(FontError::Io(_))));
        assert_eq!(session.glyphs(), &[1, 2]);
    }

    #[test]
    fn failed_render_keeps_previous_image() {
        let mut session = Session::new();
        session.load_binary(vec![0xff; 16]);
        session.render_grid(&grid_options()).unwrap();
        let previous = session.image().cloned();

        let bad = GridOptions { scale: 0, ..grid_options() };
        assert!(session.render_grid(&bad).is_err());
        assert!(session.render_text("", &text_options()).is_err());
        assert_eq!(session.image().cloned(), previous);
        assert_eq!(session.view(), Some(View::GlyphTable));
    }

    #[test]
    fn text_render_needs_glyph_data() {
        let mut session = Session::new();
        let result = session.render_text("AB", &text_options());
        assert!(matches!(result, Err(FontError::EmptyGlyphData)));
        assert!(session.image().is_none());
    }

    #[test]
    fn grid_uses_session_text_color() {
        let mut session = Session::new();
        session.load_binary(vec![0x80; 16]);
        session.set_text_color(ColorChoice::preset(Preset::Green));
        let output = session.render_grid(&grid_options()).unwrap();
        assert_eq!(output.image.get_pixel(0, 0), &Preset::Green.color().pixel());
    }

    #[test]
    fn assignments_color_text_tokens() {
        let mut session = Session::new();
        session.load_binary(vec![0xff; 256 * 8]);
        let key = session.assign_color("AB[2]", ColorChoice::preset(Preset::Red)).unwrap();
        assert_eq!(key, ColorKey::indexed("AB", 2));
        assert!(session.assign_color("  ", ColorChoice::default()).is_err());

        let output = session.render_text("AB AB[2]", &text_options()).unwrap();
        assert_eq!(output.image.get_pixel(0, 0), &Color::WHITE.pixel());
        assert_eq!(output.image.get_pixel(27, 0), &Preset::Red.color().pixel());
        assert_eq!(session.view(), Some(View::Text));
    }

    #[test]
    fn save_requires_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new();
        assert!(matches!(
            session.save_image(&dir.path().join("out.png")),
            Err(FontError::NothingToExport)
        ));

        session.load_binary(vec![0xff; 16]);
        session.render_grid(&grid_options()).unwrap();
        assert!(matches!(
            session.save_image(&dir.path().join("out.gif")),
            Err(FontError::UnsupportedExport(_))
        ));
        session.save_image(&dir.path().join("out.bmp")).unwrap();
        assert!(dir.path().join("out.bmp").exists());
    }
}
