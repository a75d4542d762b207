use image::RgbImage;
use log::{debug, warn};

use super::{check_image_size, plot_glyph, upscale};
use crate::color::Color;
use crate::glyph::format::GlyphFormat;
use crate::glyph::table::GlyphTable;
use crate::FontError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridOptions {
    pub format: GlyphFormat,
    /// Integer upscale factor, at least 1.
    pub scale: u32,
    /// Output bound in pixels, after scaling.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Empty pixels added to the right and bottom of every glyph cell.
    pub padding: u32,
    pub color: Color,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            format: GlyphFormat::default(),
            scale: 4,
            canvas_width: 512,
            canvas_height: 256,
            padding: 2,
            color: Color::WHITE,
        }
    }
}

/// Cell geometry of a glyph table image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridGeometry {
    pub fn derive(options: &GridOptions) -> Result<Self, FontError> {
        if options.scale == 0 {
            return Err(FontError::InvalidScale(options.scale));
        }

        let cell_width =
            options.format.width().checked_add(options.padding).ok_or(FontError::ImageTooLarge)?;
        let cell_height =
            options.format.height().checked_add(options.padding).ok_or(FontError::ImageTooLarge)?;
        let scaled_width =
            cell_width.checked_mul(options.scale).ok_or(FontError::InvalidScale(options.scale))?;
        let scaled_height =
            cell_height.checked_mul(options.scale).ok_or(FontError::InvalidScale(options.scale))?;

        let columns = (options.canvas_width / scaled_width).max(1);
        let rows = (options.canvas_height / scaled_height).max(1);
        let width = columns.checked_mul(cell_width).ok_or(FontError::ImageTooLarge)?;
        let height = rows.checked_mul(cell_height).ok_or(FontError::ImageTooLarge)?;
        check_image_size(width, height, options.scale)?;

        Ok(Self { columns, rows, cell_width, cell_height })
    }

    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Unscaled image size.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.columns * self.cell_width, self.rows * self.cell_height)
    }

    /// Top-left corner of cell `index`, laid out row-major.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let columns = self.columns as usize;
        let x = (index % columns) as u32 * self.cell_width;
        let y = (index / columns) as u32 * self.cell_height;
        (x, y)
    }
}

#[derive(Clone, Debug)]
pub struct GridOutput {
    pub image: RgbImage,
    pub geometry: GridGeometry,
    /// Glyphs actually drawn.
    pub drawn: usize,
    /// Whole glyphs present in the buffer.
    pub available: usize,
}

/// Tiles every glyph of `bytes` into a table image on a black background.
///
/// Glyphs that do not fit into the canvas bound are left out.
pub fn render_grid(bytes: &[u8], options: &GridOptions) -> Result<GridOutput, FontError> {
    let geometry = GridGeometry::derive(options)?;
    let table = GlyphTable::new(bytes, options.format);

    if table.trailing_bytes() != 0 {
        warn!("ignoring {} trailing bytes after the last full glyph", table.trailing_bytes());
    }

    let available = table.len();
    let drawn = available.min(geometry.capacity());
    if drawn < available {
        warn!("canvas fits {drawn} of {available} glyphs, truncating");
    }

    let (width, height) = geometry.dimensions();
    debug!(
        "grid {}x{} cells of {}x{} px, {drawn} glyphs, scale {}",
        geometry.columns, geometry.rows, geometry.cell_width, geometry.cell_height, options.scale
    );

    let mut canvas = RgbImage::new(width, height);
    for (index, glyph) in table.glyphs().take(drawn).enumerate() {
        let (x0, y0) = geometry.cell_origin(index);
        plot_glyph(&mut canvas, glyph, x0, y0, options.color);
    }

    Ok(GridOutput { image: upscale(&canvas, options.scale), geometry, drawn, available })
}
