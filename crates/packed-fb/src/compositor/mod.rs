//! Format-aware drawing over the shared framebuffer.

use log::{debug, warn};

use crate::{
    FrameBuffer, blit,
    clut::{Clut, ClutEntry, ClutError},
    format::{HEIGHT, PixelFormat, WIDTH, read_pixel, write_pixel},
    geometry::{Dimensions, Position, VirtualScreen},
    tile::Tile,
};


/// Compositor configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Encoding active after construction.
    pub format: PixelFormat,
    /// Raw pixel value written by `clear` and revealed by scrolling.
    pub background: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: PixelFormat::Grey1,
            background: 0,
        }
    }
}

/// Drawing errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DrawError {
    /// Tile encoding differs from the active format.
    FormatMismatch,
    /// Request reaches outside the virtual screen or the buffer extent.
    OutOfBounds,
    /// Tile data does not cover its declared geometry.
    TileTooShort,
}

/// Drawing context bound to the framebuffer.
///
/// All coordinates are relative to the virtual screen. Holding the
/// compositor means holding the only writer to the framebuffer.
pub struct Compositor<'fb> {
    frame: &'fb mut FrameBuffer,
    format: PixelFormat,
    screen: VirtualScreen,
    background: u32,
    clut: Clut,
}

impl<'fb> Compositor<'fb> {
    /// Binds the framebuffer; the virtual screen starts as the whole panel.
    pub fn new(frame: &'fb mut FrameBuffer, config: Config) -> Self {
        Self {
            frame,
            format: config.format,
            screen: VirtualScreen::PHYSICAL,
            background: config.background,
            clut: Clut::new(),
        }
    }

    /// Panel size; fixed at build time.
    pub const fn physical_screen() -> Dimensions {
        Dimensions::new(WIDTH, HEIGHT)
    }

    /// Returns the active pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Reinterprets the framebuffer under `format`.
    ///
    /// Pixel bytes are left as they are. A virtual screen that no longer fits
    /// the new extent falls back to the whole panel.
    pub fn set_format(&mut self, format: PixelFormat) {
        if format == self.format {
            return;
        }

        self.format = format;
        if !self.screen.fits(format) {
            warn!(
                "fb: virtual screen {:?} does not fit {:?}; using full panel",
                self.screen, format
            );
            self.screen = VirtualScreen::PHYSICAL;
        }
        debug!("fb: format -> {:?}", format);
    }

    /// Returns the window drawing calls address.
    pub fn virtual_screen(&self) -> VirtualScreen {
        self.screen
    }

    /// Moves or resizes the virtual screen.
    ///
    /// Rejected when the window leaves the active format's pixel extent.
    pub fn set_virtual_screen(
        &mut self,
        offset: Position,
        size: Dimensions,
    ) -> Result<(), DrawError> {
        let screen = VirtualScreen::new(offset, size);
        if !screen.fits(self.format) {
            warn!("fb: rejected virtual screen {:?} for {:?}", screen, self.format);
            return Err(DrawError::OutOfBounds);
        }

        self.screen = screen;
        debug!("fb: virtual screen -> {:?}", screen);
        Ok(())
    }

    /// Returns the raw value used by `clear` and scrolling.
    pub fn background(&self) -> u32 {
        self.background
    }

    /// Sets the raw value used by `clear` and scrolling.
    pub fn set_background(&mut self, value: u32) {
        self.background = value;
    }

    /// Returns the underlying framebuffer.
    pub fn frame(&self) -> &FrameBuffer {
        &*self.frame
    }

    /// Returns the raw framebuffer bytes.
    pub fn bytes(&self) -> &[u8] {
        self.frame.bytes()
    }

    /// Returns the installed palette.
    pub fn clut(&self) -> &Clut {
        &self.clut
    }

    /// Replaces the whole palette.
    pub fn init_clut(&mut self, entries: &[ClutEntry]) -> Result<(), ClutError> {
        self.clut.replace(entries)?;
        debug!("fb: clut loaded, {} entries", entries.len());
        Ok(())
    }

    /// Blits `tile` with its top-left pixel at `(x, y)`.
    ///
    /// Nothing is written unless the tile matches the active format and fits
    /// entirely inside the virtual screen.
    pub fn draw_tile(&mut self, x: usize, y: usize, tile: &Tile<'_>) -> Result<(), DrawError> {
        if tile.format() != self.format {
            return Err(DrawError::FormatMismatch);
        }
        if !tile.is_complete() {
            return Err(DrawError::TileTooShort);
        }

        let side = tile.side_length();
        if !self.screen.contains_block(x, y, side, side) {
            return Err(DrawError::OutOfBounds);
        }

        let (px, py) = self.physical(x, y);
        blit::blit(self.frame.bytes_mut(), WIDTH, px, py, tile);
        Ok(())
    }

    /// Writes the background value to every pixel of the buffer.
    pub fn clear(&mut self) {
        match self.format {
            PixelFormat::Rgb565 => {
                let word = (self.background as u16).to_le_bytes();
                for pixel in self.frame.bytes_mut().chunks_exact_mut(2) {
                    pixel.copy_from_slice(&word);
                }
            }
            format => self.frame.fill(format.expand(self.background)),
        }
    }

    /// Writes `raw` to every byte regardless of format.
    pub fn fill(&mut self, raw: u8) {
        self.frame.fill(raw);
    }

    /// Sets one pixel. Returns `false` when `(x, y)` is off screen.
    pub fn poke(&mut self, x: usize, y: usize, value: u32) -> bool {
        if !self.screen.contains(x, y) {
            return false;
        }

        let (px, py) = self.physical(x, y);
        write_pixel(self.frame.bytes_mut(), self.format, WIDTH, px, py, value);
        true
    }

    /// Reads one raw pixel value.
    pub fn peek(&self, x: usize, y: usize) -> Option<u32> {
        if !self.screen.contains(x, y) {
            return None;
        }

        let (px, py) = self.physical(x, y);
        Some(read_pixel(self.frame.bytes(), self.format, WIDTH, px, py))
    }

    /// Reads one pixel converted to RGB565.
    pub fn pixel_rgb565(&self, x: usize, y: usize) -> Option<u16> {
        let value = self.peek(x, y)?;

        let rgb = match self.format {
            PixelFormat::Grey1 => grey_rgb565(if value != 0 { 0xFF } else { 0 }),
            PixelFormat::Grey2 => grey_rgb565((value * 0x55) as u8),
            PixelFormat::Grey4 => grey_rgb565((value * 0x11) as u8),
            PixelFormat::Indexed8 => self.clut.rgb565(value as u8),
            PixelFormat::Rgb565 => value as u16,
        };
        Some(rgb)
    }

    /// Fills a `width` x `height` block, clipped to the virtual screen.
    pub fn fill_rows(&mut self, value: u32, y: usize, height: usize, x: usize, width: usize) {
        let x_end = x.saturating_add(width).min(self.screen.size.width);
        let y_end = y.saturating_add(height).min(self.screen.size.height);

        for row in y..y_end {
            self.fill_span(x, x_end, row, value);
        }
    }

    /// Fills pixels `x0..x1` of row `y`. Inputs must already be on screen.
    pub(crate) fn fill_span(&mut self, x0: usize, x1: usize, y: usize, value: u32) {
        if x0 >= x1 {
            return;
        }

        let format = self.format;
        let (start, row) = self.physical(x0, y);
        let end = start + (x1 - x0);
        let bytes = self.frame.bytes_mut();
        let line = row * WIDTH;

        match format {
            PixelFormat::Indexed8 => bytes[line + start..line + end].fill(value as u8),
            PixelFormat::Rgb565 => {
                let word = (value as u16).to_le_bytes();
                for pixel in bytes[(line + start) * 2..(line + end) * 2].chunks_exact_mut(2) {
                    pixel.copy_from_slice(&word);
                }
            }
            _ => {
                let per_byte = 8 / format.bits_per_pixel();
                let mut head = start;
                let mut tail = end;

                while head < tail && (line + head) % per_byte != 0 {
                    write_pixel(bytes, format, WIDTH, head, row, value);
                    head += 1;
                }
                while tail > head && (line + tail) % per_byte != 0 {
                    tail -= 1;
                    write_pixel(bytes, format, WIDTH, tail, row, value);
                }
                if head < tail {
                    let first = (line + head) / per_byte;
                    let last = (line + tail) / per_byte;
                    bytes[first..last].fill(format.expand(value));
                }
            }
        }
    }

    /// Copies pixel `(from_x, from_y)` onto `(to_x, to_y)`, virtual coordinates.
    pub(crate) fn copy_pixel(&mut self, from_x: usize, from_y: usize, to_x: usize, to_y: usize) {
        let (fx, fy) = self.physical(from_x, from_y);
        let (tx, ty) = self.physical(to_x, to_y);
        let bytes = self.frame.bytes_mut();

        let value = read_pixel(bytes, self.format, WIDTH, fx, fy);
        write_pixel(bytes, self.format, WIDTH, tx, ty, value);
    }

    /// Applies an already validated format and window in one step.
    pub(crate) fn configure(&mut self, format: PixelFormat, screen: VirtualScreen) {
        self.format = format;
        self.screen = screen;
        debug!("fb: {:?} in {:?}", format, screen);
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        self.frame.bytes_mut()
    }

    /// Translates virtual-screen coordinates to raster coordinates.
    #[inline]
    pub(crate) fn physical(&self, x: usize, y: usize) -> (usize, usize) {
        (self.screen.offset.column + x, self.screen.offset.row + y)
    }
}

fn grey_rgb565(level: u8) -> u16 {
    ClutEntry::new(level, level, level).to_rgb565()
}
