//! RGB888 <-> RGB565 conversion.
//!
//! Both directions truncate each channel with integer division, so the 888
//! value handed back for a 565 color is never brighter than the exact ratio.

/// Packs an RGB888 triple into RGB565. Each channel is truncated independently.
pub fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = u16::from(r) * 31 / 255;
    let g6 = u16::from(g) * 63 / 255;
    let b5 = u16::from(b) * 31 / 255;
    (r5 << 11) | (g6 << 5) | b5
}

/// Expands an RGB565 value back to RGB888.
pub fn rgb565_to_rgb888(color: u16) -> [u8; 3] {
    let r5 = u32::from((color >> 11) & 0x1f);
    let g6 = u32::from((color >> 5) & 0x3f);
    let b5 = u32::from(color & 0x1f);
    [(r5 * 255 / 31) as u8, (g6 * 255 / 63) as u8, (b5 * 255 / 31) as u8]
}

pub fn quantize(r: u8, g: u8, b: u8) -> [u8; 3] {
    rgb565_to_rgb888(rgb888_to_rgb565(r, g, b))
}
