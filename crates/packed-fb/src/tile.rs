//! Square blocks of pre-packed pixel data.

use crate::format::{PixelFormat, read_pixel};

/// Tile copy errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TileError {
    /// Output buffer cannot hold the tile.
    BufferTooSmall,
    /// Source data is shorter than the tile geometry requires.
    DataTooShort,
}

/// Borrowed square tile.
///
/// Rows start on byte boundaries; pad bits at the end of a row are ignored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tile<'a> {
    side_length: u8,
    format: PixelFormat,
    data: &'a [u8],
}

impl<'a> Tile<'a> {
    pub const fn new(side_length: u8, format: PixelFormat, data: &'a [u8]) -> Self {
        Self {
            side_length,
            format,
            data,
        }
    }

    #[inline]
    pub const fn side_length(&self) -> usize {
        self.side_length as usize
    }

    #[inline]
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes per tile row, including pad bits.
    #[inline]
    pub const fn row_bytes(&self) -> usize {
        self.format.row_bytes(self.side_length as usize)
    }

    /// Bytes the tile geometry covers.
    #[inline]
    pub const fn byte_len(&self) -> usize {
        self.row_bytes() * self.side_length as usize
    }

    /// Whether `data` covers the whole tile.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.data.len() >= self.byte_len()
    }

    /// Row stride in pixels, padding included.
    #[inline]
    pub(crate) const fn stride_pixels(&self) -> usize {
        self.row_bytes() * 8 / self.format.bits_per_pixel()
    }

    /// Reads one tile pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        let side = self.side_length();
        if x >= side || y >= side || !self.is_complete() {
            return None;
        }

        Some(read_pixel(self.data, self.format, self.stride_pixels(), x, y))
    }

    /// Copies the tile bytes into `out` and returns a tile over the copy.
    pub fn copy_into<'o>(&self, out: &'o mut [u8]) -> Result<Tile<'o>, TileError> {
        let len = self.checked_len(out.len())?;
        out[..len].copy_from_slice(&self.data[..len]);

        Ok(Tile::new(self.side_length, self.format, &out[..len]))
    }

    /// Copies the tile into `out`, turning every pixel equal to `pattern` into
    /// `replacement`.
    ///
    /// Both values are masked to the tile's bit width. Equal values make this
    /// a plain copy.
    pub fn copy_with_replacement<'o>(
        &self,
        out: &'o mut [u8],
        pattern: u32,
        replacement: u32,
    ) -> Result<Tile<'o>, TileError> {
        let mask = self.format.value_mask();
        let pattern = pattern & mask;
        let replacement = replacement & mask;

        if pattern == replacement {
            return self.copy_into(out);
        }

        let len = self.checked_len(out.len())?;
        let src = &self.data[..len];
        let dst = &mut out[..len];

        match self.format {
            // Two distinct 1-bit values: every pixel ends up as `replacement`.
            PixelFormat::Grey1 => dst.fill(PixelFormat::Grey1.expand(replacement)),
            PixelFormat::Grey2 | PixelFormat::Grey4 => {
                replace_packed(self.format, src, dst, pattern, replacement)
            }
            PixelFormat::Indexed8 => replace_8bpp(src, dst, pattern as u8, replacement as u8),
            PixelFormat::Rgb565 => replace_16bpp(src, dst, pattern as u16, replacement as u16),
        }

        Ok(Tile::new(self.side_length, self.format, &out[..len]))
    }

    fn checked_len(&self, capacity: usize) -> Result<usize, TileError> {
        let len = self.byte_len();
        if !self.is_complete() {
            return Err(TileError::DataTooShort);
        }
        if capacity < len {
            return Err(TileError::BufferTooSmall);
        }
        Ok(len)
    }
}

fn replace_packed(
    format: PixelFormat,
    src: &[u8],
    dst: &mut [u8],
    pattern: u32,
    replacement: u32,
) {
    let bits = format.bits_per_pixel();
    let slot_mask = format.value_mask() as u8;
    let pattern_byte = format.expand(pattern);
    let replacement_byte = format.expand(replacement);

    for (out, &byte) in dst.iter_mut().zip(src) {
        let cmp = byte ^ pattern_byte;
        if cmp == 0 {
            *out = replacement_byte;
            continue;
        }

        let mut result = byte;
        let mut shift = 0;
        while shift < 8 {
            if (cmp >> shift) & slot_mask == 0 {
                result = (result & !(slot_mask << shift)) | ((replacement as u8) << shift);
            }
            shift += bits;
        }
        *out = result;
    }
}

fn replace_8bpp(src: &[u8], dst: &mut [u8], pattern: u8, replacement: u8) {
    for (out, &byte) in dst.iter_mut().zip(src) {
        *out = if byte == pattern { replacement } else { byte };
    }
}

fn replace_16bpp(src: &[u8], dst: &mut [u8], pattern: u16, replacement: u16) {
    for (out, word) in dst.chunks_exact_mut(2).zip(src.chunks_exact(2)) {
        if u16::from_le_bytes([word[0], word[1]]) == pattern {
            out.copy_from_slice(&replacement.to_le_bytes());
        } else {
            out.copy_from_slice(word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::write_pixel;

    fn pack(format: PixelFormat, side: usize, values: impl Fn(usize, usize) -> u32) -> [u8; 64] {
        let mut data = [0u8; 64];
        let stride = format.row_bytes(side) * 8 / format.bits_per_pixel();
        for y in 0..side {
            for x in 0..side {
                write_pixel(&mut data, format, stride, x, y, values(x, y));
            }
        }
        data
    }

    #[test]
    fn geometry_pads_rows_to_bytes() {
        let data = [0u8; 32];

        assert_eq!(Tile::new(3, PixelFormat::Grey4, &data).row_bytes(), 2);
        assert_eq!(Tile::new(5, PixelFormat::Grey1, &data).byte_len(), 5);
        assert_eq!(Tile::new(3, PixelFormat::Rgb565, &data).byte_len(), 18);
        assert!(!Tile::new(4, PixelFormat::Indexed8, &data[..15]).is_complete());
    }

    #[test]
    fn pixel_reads_skip_row_padding() {
        let data = [0b1010_0000, 0b0100_0000, 0b0010_0000];
        let tile = Tile::new(3, PixelFormat::Grey1, &data);

        assert_eq!(tile.pixel(0, 0), Some(1));
        assert_eq!(tile.pixel(1, 0), Some(0));
        assert_eq!(tile.pixel(1, 1), Some(1));
        assert_eq!(tile.pixel(2, 2), Some(1));
        assert_eq!(tile.pixel(3, 0), None);
    }

    #[test]
    fn equal_pattern_and_replacement_is_a_plain_copy() {
        for format in PixelFormat::ALL {
            let data = pack(format, 3, |x, y| (x + 2 * y) as u32 & format.value_mask());
            let tile = Tile::new(3, format, &data);

            let mut plain = [0u8; 64];
            let mut replaced = [0u8; 64];
            let a = tile.copy_into(&mut plain).unwrap().data().to_owned();
            let b = tile
                .copy_with_replacement(&mut replaced, 1, 1)
                .unwrap()
                .data()
                .to_owned();

            assert_eq!(a, b, "{format:?}");
        }
    }

    #[test]
    fn replacement_rewrites_only_matching_pixels() {
        for format in PixelFormat::ALL {
            let mask = format.value_mask();
            let side = 5;
            let data = pack(format, side, |x, y| ((x * 7 + y * 3) as u32) & mask);
            let tile = Tile::new(side as u8, format, &data);

            let pattern = 1 & mask;
            let replacement = 0xBEEF & mask;
            let replacement = if replacement == pattern { 0 } else { replacement };

            let mut out = [0u8; 64];
            let copy = tile.copy_with_replacement(&mut out, pattern, replacement).unwrap();

            for y in 0..side {
                for x in 0..side {
                    let before = tile.pixel(x, y).unwrap();
                    let expected = if before == pattern { replacement } else { before };
                    assert_eq!(copy.pixel(x, y), Some(expected), "{format:?} ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn sub_byte_replacement_works_per_slot() {
        let data = [0x31, 0x13];
        let tile = Tile::new(2, PixelFormat::Grey4, &data);
        let mut out = [0u8; 2];
        let copy = tile.copy_with_replacement(&mut out, 0x1, 0xA).unwrap();
        assert_eq!(copy.data(), &[0x3A, 0xA3]);

        let data = [0b0101_0101, 0b0110_0100, 0, 0b0001_0000];
        let tile = Tile::new(4, PixelFormat::Grey2, &data);
        let mut out = [0u8; 4];
        let copy = tile.copy_with_replacement(&mut out, 0b01, 0b11).unwrap();
        assert_eq!(copy.data(), &[0xFF, 0b1110_1100, 0, 0b0011_0000]);
    }

    #[test]
    fn rgb565_replacement_keeps_word_order() {
        let data = [0x1F, 0x00, 0x00, 0xF8];
        let tile = Tile::new(1, PixelFormat::Rgb565, &data[..2]);

        let mut out = [0u8; 2];
        let copy = tile.copy_with_replacement(&mut out, 0x001F, 0x07E0).unwrap();
        assert_eq!(copy.data(), &[0xE0, 0x07]);
    }

    #[test]
    fn copies_report_short_buffers() {
        let data = [0u8; 8];
        let tile = Tile::new(4, PixelFormat::Indexed8, &data);
        let mut out = [0u8; 32];
        assert_eq!(tile.copy_into(&mut out), Err(TileError::DataTooShort));

        let tile = Tile::new(2, PixelFormat::Indexed8, &data);
        let mut small = [0u8; 3];
        assert_eq!(
            tile.copy_with_replacement(&mut small, 0, 1),
            Err(TileError::BufferTooSmall)
        );
    }
}
