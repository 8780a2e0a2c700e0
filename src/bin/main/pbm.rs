use std::io::{self, Write};

use log::debug;

use packed_fb::{Compositor, DisplayTransport, PixelFormat, VirtualScreen};

/// Presents frames as binary PBM (P4) images.
///
/// Lit pixels are written as ink. Non-1 bpp frames are thresholded on their
/// RGB565 value.
pub struct PbmTransport<W> {
    out: W,
    frames: u32,
}

impl<W: Write> PbmTransport<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Returns how many frames have been written.
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl<W: Write> DisplayTransport for PbmTransport<W> {
    type Error = io::Error;

    fn bring_up(&mut self, format: PixelFormat, screen: VirtualScreen) -> Result<(), Self::Error> {
        debug!("pbm: bring up {:?} {:?}", format, screen);
        Ok(())
    }

    fn present(&mut self, frame: &Compositor<'_>) -> Result<(), Self::Error> {
        let size = frame.virtual_screen().size;
        write!(self.out, "P4\n{} {}\n", size.width, size.height)?;

        let mut row = vec![0u8; size.width.div_ceil(8)];
        for y in 0..size.height {
            row.fill(0);
            for x in 0..size.width {
                if lit(frame, x, y) {
                    row[x / 8] |= 0x80 >> (x % 8);
                }
            }
            self.out.write_all(&row)?;
        }

        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }
}

fn lit(frame: &Compositor<'_>, x: usize, y: usize) -> bool {
    match frame.format() {
        PixelFormat::Grey1 => frame.peek(x, y) == Some(1),
        _ => frame.pixel_rgb565(x, y).is_some_and(|rgb| rgb > 0x7BEF),
    }
}
