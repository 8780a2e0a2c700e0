//! Panel geometry and pixel encodings.

/// Panel width in pixels.
pub const WIDTH: usize = 240;
/// Panel height in pixels.
pub const HEIGHT: usize = 320;
/// Widest supported encoding.
pub const MAX_BITS_PER_PIXEL: usize = 16;
/// Total framebuffer size in bytes.
///
/// Sized for the widest encoding at full resolution; narrower encodings
/// alias the same bytes.
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT * MAX_BITS_PER_PIXEL / 8;

/// Pixel encodings sharing the framebuffer.
///
/// Sub-byte encodings pack pixels left to right with pixel 0 in the most
/// significant bits. `Rgb565` stores each pixel as a little-endian word.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelFormat {
    Grey1,
    Grey2,
    Grey4,
    /// One CLUT index per byte.
    Indexed8,
    Rgb565,
}

impl PixelFormat {
    pub const ALL: [Self; 5] = [
        Self::Grey1,
        Self::Grey2,
        Self::Grey4,
        Self::Indexed8,
        Self::Rgb565,
    ];

    #[inline]
    pub const fn bits_per_pixel(self) -> usize {
        match self {
            Self::Grey1 => 1,
            Self::Grey2 => 2,
            Self::Grey4 => 4,
            Self::Indexed8 => 8,
            Self::Rgb565 => 16,
        }
    }

    /// Mask selecting the meaningful bits of a raw pixel value.
    #[inline]
    pub const fn value_mask(self) -> u32 {
        (1u32 << self.bits_per_pixel()) - 1
    }

    /// Bytes needed to hold `width` pixels starting on a byte boundary.
    #[inline]
    pub const fn row_bytes(self, width: usize) -> usize {
        (width * self.bits_per_pixel()).div_ceil(8)
    }

    /// Rows of `WIDTH` pixels that fit in the framebuffer in this encoding.
    #[inline]
    pub const fn buffer_rows(self) -> usize {
        BUFFER_SIZE * 8 / (WIDTH * self.bits_per_pixel())
    }

    /// Repeats a sub-byte or 8-bit value across a whole byte.
    ///
    /// For `Rgb565` the low byte of the word is returned.
    pub const fn expand(self, value: u32) -> u8 {
        let bits = self.bits_per_pixel();
        if bits >= 8 {
            return value as u8;
        }

        let value = value & self.value_mask();
        let mut byte = 0u32;
        let mut shift = 0;
        while shift < 8 {
            byte |= value << shift;
            shift += bits;
        }
        byte as u8
    }
}

/// Location of one pixel inside a packed raster.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PixelAddress {
    /// Byte holding the pixel (the low byte for `Rgb565`).
    pub(crate) byte: usize,
    /// Right shift bringing the pixel down to bit 0; zero for whole-byte
    /// encodings.
    pub(crate) shift: u32,
}

/// Computes where pixel `(x, y)` lives in a raster `stride` pixels wide.
#[inline]
pub(crate) const fn address(
    format: PixelFormat,
    stride: usize,
    x: usize,
    y: usize,
) -> PixelAddress {
    let bits = format.bits_per_pixel();
    let bit = (y * stride + x) * bits;

    let shift = if bits < 8 {
        (8 - bits - bit % 8) as u32
    } else {
        0
    };

    PixelAddress {
        byte: bit / 8,
        shift,
    }
}

/// Reads a raw pixel value.
#[inline]
pub(crate) fn read_pixel(
    buffer: &[u8],
    format: PixelFormat,
    stride: usize,
    x: usize,
    y: usize,
) -> u32 {
    let at = address(format, stride, x, y);

    match format {
        PixelFormat::Rgb565 => u16::from_le_bytes([buffer[at.byte], buffer[at.byte + 1]]) as u32,
        PixelFormat::Indexed8 => buffer[at.byte] as u32,
        _ => ((buffer[at.byte] as u32) >> at.shift) & format.value_mask(),
    }
}

/// Writes a raw pixel value, preserving neighbouring pixels in the same byte.
#[inline]
pub(crate) fn write_pixel(
    buffer: &mut [u8],
    format: PixelFormat,
    stride: usize,
    x: usize,
    y: usize,
    value: u32,
) {
    let at = address(format, stride, x, y);

    match format {
        PixelFormat::Rgb565 => {
            let [lo, hi] = (value as u16).to_le_bytes();
            buffer[at.byte] = lo;
            buffer[at.byte + 1] = hi;
        }
        PixelFormat::Indexed8 => buffer[at.byte] = value as u8,
        _ => {
            let mask = (format.value_mask() << at.shift) as u8;
            let bits = ((value & format.value_mask()) << at.shift) as u8;
            buffer[at.byte] = (buffer[at.byte] & !mask) | bits;
        }
    }
}
