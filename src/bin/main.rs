//! Host preview: renders stdin through the glyph console and writes the
//! resulting frame to stdout as a PBM image.
//!
//! `RUST_LOG=debug` shows compositor state changes on stderr.

use std::io::{self, Read};

use heapless::Vec as HeaplessVec;
use log::{info, warn};
use packed_fb::{Config, Dimensions, Display, FrameBuffer, Point, Rect};
use static_cell::StaticCell;
use tilescreen_core::{Console, ConsoleConfig};

use pbm::PbmTransport;

#[path = "main/pbm.rs"]
mod pbm;

const LINE_BYTES: usize = 128;

static FRAME: StaticCell<FrameBuffer> = StaticCell::new();

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let border = std::env::args().skip(1).any(|arg| arg == "--border");

    let frame = FRAME.init(FrameBuffer::new());
    let transport = PbmTransport::new(io::stdout().lock());
    let mut display = Display::new(frame, transport, Config::default());
    let mut console = Console::new(ConsoleConfig::default());

    if let Err(err) = console.set_console_mode(&mut display) {
        warn!("console: mode switch failed: {:?}", err);
        return Err(io::Error::other("display init failed"));
    }

    let mut line: HeaplessVec<u8, LINE_BYTES> = HeaplessVec::new();
    let mut lines = 0usize;
    for byte in io::stdin().lock().bytes() {
        let byte = byte?;
        if line.is_full() {
            console.print(display.compositor_mut(), &line);
            line.clear();
        }
        let _ = line.push(byte);

        if byte == b'\n' {
            console.print(display.compositor_mut(), &line);
            line.clear();
            lines += 1;
        }
    }
    console.print(display.compositor_mut(), &line);

    if border {
        let screen = display.compositor().virtual_screen().size;
        let outline = Rect::new(Point::new(0, 0), Dimensions::new(screen.width, screen.height));
        display.compositor_mut().draw_rect(outline, 1, 1);
    }

    if let Err(err) = display.present() {
        warn!("display: present failed: {:?}", err);
        return Err(io::Error::other("present failed"));
    }

    info!(
        "preview: {} lines, {} frame(s), cursor {:?}",
        lines,
        display.transport().frames(),
        console.cursor()
    );
    Ok(())
}
