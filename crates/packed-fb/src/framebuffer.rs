//! In-memory framebuffer shared by every pixel encoding.

use crate::format::{BUFFER_SIZE, PixelFormat, WIDTH};

/// Fixed-capacity pixel store.
///
/// Sized for 16 bpp at full panel resolution. Narrower encodings reinterpret
/// the same bytes as a raster `WIDTH` pixels wide with more rows; switching
/// encodings never moves or reallocates anything.
#[derive(Clone)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Creates a zeroed framebuffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_SIZE],
        }
    }

    /// Returns the underlying framebuffer bytes.
    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// Returns mutable framebuffer bytes.
    pub fn bytes_mut(&mut self) -> &mut [u8; BUFFER_SIZE] {
        &mut self.bytes
    }

    /// Sets every byte to `raw`.
    pub fn fill(&mut self, raw: u8) {
        self.bytes.fill(raw);
    }

    /// Returns the packed bytes of raster row `row` under `format`.
    pub fn row(&self, format: PixelFormat, row: usize) -> Option<&[u8]> {
        if row >= format.buffer_rows() {
            return None;
        }

        let len = format.row_bytes(WIDTH);
        let start = row * len;
        Some(&self.bytes[start..start + len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::HEIGHT;

    #[test]
    fn rows_follow_format_pitch() {
        let mut fb = FrameBuffer::new();
        fb.bytes_mut()[30] = 0xAA;
        fb.bytes_mut()[480] = 0x55;

        assert_eq!(fb.row(PixelFormat::Grey1, 1).unwrap()[0], 0xAA);
        assert_eq!(fb.row(PixelFormat::Rgb565, 1).unwrap()[0], 0x55);
        assert_eq!(fb.row(PixelFormat::Grey1, 0).unwrap().len(), 30);
    }

    #[test]
    fn rows_past_extent_are_rejected() {
        let fb = FrameBuffer::new();

        assert!(fb.row(PixelFormat::Rgb565, HEIGHT - 1).is_some());
        assert!(fb.row(PixelFormat::Rgb565, HEIGHT).is_none());
        assert!(fb.row(PixelFormat::Grey1, HEIGHT).is_some());
    }

    #[test]
    fn fill_sets_every_byte() {
        let mut fb = FrameBuffer::new();
        fb.fill(0x5A);

        assert!(fb.bytes().iter().all(|&b| b == 0x5A));
    }
}
