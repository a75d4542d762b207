use std::path::Path;

use image::{ImageFormat, RgbImage};
use log::debug;

use crate::FontError;

/// Picks PNG or BMP from the file extension.
pub fn format_for_path(path: &Path) -> Result<ImageFormat, FontError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => Ok(ImageFormat::Png),
        "bmp" => Ok(ImageFormat::Bmp),
        _ => Err(FontError::UnsupportedExport(path.to_path_buf())),
    }
}

pub fn save(image: &RgbImage, path: &Path) -> Result<(), FontError> {
    let format = format_for_path(path)?;
    debug!("saving {}x{} image to {}", image.width(), image.height(), path.display());
    image.save_with_format(path, format)?;
    Ok(())
}
