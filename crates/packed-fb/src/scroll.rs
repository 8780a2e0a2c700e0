//! Row and column scrolling over the virtual screen.
//!
//! Only the 1 bpp console encoding scrolls; other encodings ignore requests.

use log::debug;

use crate::{
    compositor::Compositor,
    format::{PixelFormat, WIDTH},
};

const PIXELS_PER_BYTE: usize = 8;

impl Compositor<'_> {
    /// Moves content up by `count` pixel rows and fills the revealed rows at
    /// the bottom with the background.
    ///
    /// A `count` covering the whole screen clears the buffer.
    pub fn scroll_rows(&mut self, count: usize) {
        if !self.can_scroll() || count == 0 {
            return;
        }

        let screen = self.virtual_screen();
        let (width, height) = (screen.size.width, screen.size.height);
        if count >= height {
            self.clear();
            return;
        }

        let pitch = WIDTH / PIXELS_PER_BYTE;
        let (column, top) = (screen.offset.column, screen.offset.row);
        let kept = height - count;

        if column == 0 && width == WIDTH {
            let from = (top + count) * pitch;
            self.bytes_mut()
                .copy_within(from..from + kept * pitch, top * pitch);
        } else if byte_aligned(column, width) {
            let first = column / PIXELS_PER_BYTE;
            let len = width / PIXELS_PER_BYTE;
            let bytes = self.bytes_mut();
            for row in top..top + kept {
                let from = (row + count) * pitch + first;
                bytes.copy_within(from..from + len, row * pitch + first);
            }
        } else {
            for y in 0..kept {
                for x in 0..width {
                    self.copy_pixel(x, y + count, x, y);
                }
            }
        }

        let background = self.background();
        self.fill_rows(background, kept, count, 0, width);
    }

    /// Moves every row left by `count` pixels and fills the trailing
    /// `count` columns with the background.
    pub fn scroll_columns(&mut self, count: usize) {
        if !self.can_scroll() || count == 0 {
            return;
        }

        let screen = self.virtual_screen();
        let (width, height) = (screen.size.width, screen.size.height);
        let background = self.background();
        if count >= width {
            self.fill_rows(background, 0, height, 0, width);
            return;
        }

        let pitch = WIDTH / PIXELS_PER_BYTE;
        let (column, top) = (screen.offset.column, screen.offset.row);
        let kept = width - count;

        if byte_aligned(column, width) && count % PIXELS_PER_BYTE == 0 {
            let first = column / PIXELS_PER_BYTE;
            let shift = count / PIXELS_PER_BYTE;
            let len = kept / PIXELS_PER_BYTE;
            let bytes = self.bytes_mut();
            for row in top..top + height {
                let start = row * pitch + first;
                bytes.copy_within(start + shift..start + shift + len, start);
            }
        } else {
            for y in 0..height {
                for x in 0..kept {
                    self.copy_pixel(x + count, y, x, y);
                }
            }
        }

        for y in 0..height {
            self.fill_span(kept, width, y, background);
        }
    }

    fn can_scroll(&self) -> bool {
        if self.format() == PixelFormat::Grey1 {
            return true;
        }

        debug!("fb: scroll ignored in {:?}", self.format());
        false
    }
}

fn byte_aligned(column: usize, width: usize) -> bool {
    column % PIXELS_PER_BYTE == 0 && width % PIXELS_PER_BYTE == 0
}
