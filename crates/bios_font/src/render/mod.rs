pub mod export;
pub mod grid;
pub mod text;

use image::{ImageBuffer, RgbImage};

use crate::color::Color;
use crate::glyph::table::Glyph;
use crate::FontError;

/// Largest output image, in pixels after scaling.
pub const MAX_IMAGE_PIXELS: u64 = 1 << 28;

/// Checks that a `width` x `height` canvas upscaled by `scale` fits in `u32`
/// dimensions and stays under [`MAX_IMAGE_PIXELS`].
pub(crate) fn check_image_size(width: u32, height: u32, scale: u32) -> Result<(), FontError> {
    let scaled_width = u64::from(width) * u64::from(scale);
    let scaled_height = u64::from(height) * u64::from(scale);
    let fits = u32::try_from(scaled_width).is_ok()
        && u32::try_from(scaled_height).is_ok()
        && scaled_width * scaled_height <= MAX_IMAGE_PIXELS;
    if fits {
        Ok(())
    } else {
        Err(FontError::ImageTooLarge)
    }
}

/// Nearest-neighbor integer upscale. Every source pixel becomes a
/// `scale` x `scale` block, so glyph edges stay hard.
pub fn upscale(image: &RgbImage, scale: u32) -> RgbImage {
    if scale == 1 {
        return image.clone();
    }
    ImageBuffer::from_fn(image.width() * scale, image.height() * scale, |x, y| {
        *image.get_pixel(x / scale, y / scale)
    })
}

/// Paints the lit pixels of `glyph` with its top-left corner at `(x0, y0)`.
/// Pixels falling outside the canvas are dropped; unset bits are untouched.
pub(crate) fn plot_glyph(canvas: &mut RgbImage, glyph: Glyph<'_>, x0: u32, y0: u32, color: Color) {
    let pixel = color.pixel();
    for (x, y) in glyph.lit_pixels() {
        let (px, py) = (x0 + x, y0 + y);
        if px < canvas.width() && py < canvas.height() {
            canvas.put_pixel(px, py, pixel);
        }
    }
}
