use super::format::GlyphFormat;

/// A borrowed view of a glyph buffer, split into fixed-size glyphs.
///
/// Trailing bytes that do not fill a whole glyph are ignored.
#[derive(Clone, Copy, Debug)]
pub struct GlyphTable<'a> {
    bytes: &'a [u8],
    format: GlyphFormat,
}

impl<'a> GlyphTable<'a> {
    pub fn new(bytes: &'a [u8], format: GlyphFormat) -> Self {
        Self { bytes, format }
    }

    pub fn len(&self) -> usize {
        self.bytes.len() / self.format.bytes_per_glyph()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left over after the last whole glyph.
    pub fn trailing_bytes(&self) -> usize {
        self.bytes.len() % self.format.bytes_per_glyph()
    }

    pub fn glyph(&self, index: usize) -> Option<Glyph<'a>> {
        if index >= self.len() {
            return None;
        }
        let size = self.format.bytes_per_glyph();
        let start = index * size;
        Some(Glyph { rows: &self.bytes[start..start + size], width: self.format.width() })
    }

    /// Glyph addressed by a character's code point.
    pub fn glyph_for(&self, ch: char) -> Option<Glyph<'a>> {
        usize::try_from(u32::from(ch)).ok().and_then(|index| self.glyph(index))
    }

    pub fn glyphs(&self) -> impl Iterator<Item = Glyph<'a>> + '_ {
        (0..self.len()).filter_map(move |index| self.glyph(index))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph<'a> {
    rows: &'a [u8],
    width: u32,
}

impl<'a> Glyph<'a> {
    /// Coordinates of every lit pixel, row by row. Bit `7 - x` of each row
    /// byte holds column `x`.
    pub fn lit_pixels(&self) -> impl Iterator<Item = (u32, u32)> + 'a {
        let width = self.width;
        self.rows.iter().enumerate().flat_map(move |(y, &row)| {
            (0..width).filter(move |x| (row >> (7 - x)) & 1 == 1).map(move |x| (x, y as u32))
        })
    }
}
