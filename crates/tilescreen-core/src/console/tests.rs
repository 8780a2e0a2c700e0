use core::fmt::Write;

use packed_fb::{
    Config, FrameBuffer, Tile,
    transport::mock::MockTransport,
};

use super::*;

fn cell_matches(fb: &Compositor<'_>, column: usize, row: usize, tile: &Tile<'_>) -> bool {
    (0..8).all(|y| (0..8).all(|x| fb.peek(column * 8 + x, row * 8 + y) == tile.pixel(x, y)))
}

fn glyph(c: u8) -> Tile<'static> {
    static FONT: Font8x8 = Font8x8;
    FONT.glyph(c).unwrap()
}

fn console_on(frame: &mut FrameBuffer) -> (Console, Compositor<'_>) {
    let fb = Compositor::new(frame, Config::default());
    (Console::default(), fb)
}

#[test]
fn grid_is_screen_over_cell() {
    let mut frame = FrameBuffer::new();
    let (console, fb) = console_on(&mut frame);

    assert_eq!(console.dimensions(&fb), Dimensions::new(30, 40));
}

#[test]
fn printable_advances_and_draws_cursor() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);

    console.putc(&mut fb, b'A');

    assert_eq!(console.cursor(), Cursor { column: 1, row: 0 });
    assert!(cell_matches(&fb, 0, 0, &glyph(b'A')));
    assert!(cell_matches(&fb, 1, 0, &glyph(b'_')));
}

#[test]
fn backspace_stops_at_explicit_line_start() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);

    console.print(&mut fb, b"ab\n\x08");

    assert_eq!(console.cursor(), Cursor { column: 0, row: 1 });
    assert!(cell_matches(&fb, 0, 0, &glyph(b'a')));
    assert!(cell_matches(&fb, 1, 0, &glyph(b'b')));
    assert!(cell_matches(&fb, 2, 0, &glyph(b' ')));
    assert!(cell_matches(&fb, 0, 1, &glyph(b'_')));
    for column in 1..30 {
        assert!(cell_matches(&fb, column, 1, &glyph(b' ')), "column {column}");
    }
}

#[test]
fn backspace_erases_previous_cell() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);

    console.print(&mut fb, b"xy\x08");

    assert_eq!(console.cursor(), Cursor { column: 1, row: 0 });
    assert!(cell_matches(&fb, 0, 0, &glyph(b'x')));
    assert!(cell_matches(&fb, 1, 0, &glyph(b'_')));
    assert!(cell_matches(&fb, 2, 0, &glyph(b' ')));
}

#[test]
fn backspace_at_origin_stays_put() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);

    console.putc(&mut fb, BACKSPACE);

    assert_eq!(console.cursor(), Cursor::default());
    assert!(cell_matches(&fb, 0, 0, &glyph(b'_')));
}

#[test]
fn long_lines_wrap_and_unwrap() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);

    for _ in 0..30 {
        console.putc(&mut fb, b'w');
    }
    assert_eq!(console.cursor(), Cursor { column: 0, row: 1 });

    console.putc(&mut fb, BACKSPACE);
    assert_eq!(console.cursor(), Cursor { column: 29, row: 0 });
    assert!(cell_matches(&fb, 29, 0, &glyph(b'_')));
}

#[test]
fn tab_advances_configured_width() {
    let mut frame = FrameBuffer::new();
    let mut fb = Compositor::new(&mut frame, Config::default());
    let mut console = Console::new(ConsoleConfig {
        tab_width: 4,
        ..ConsoleConfig::default()
    });

    console.print(&mut fb, b"a\tb");

    assert_eq!(console.cursor(), Cursor { column: 6, row: 0 });
    assert!(cell_matches(&fb, 5, 0, &glyph(b'b')));
    assert!(cell_matches(&fb, 3, 0, &glyph(b' ')));
}

#[test]
fn last_row_newline_scrolls_one_cell() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);

    console.putc(&mut fb, b'T');
    for _ in 0..39 {
        console.putc(&mut fb, b'\n');
    }
    assert_eq!(console.cursor(), Cursor { column: 0, row: 39 });
    assert!(cell_matches(&fb, 0, 0, &glyph(b'T')));

    console.putc(&mut fb, b'\n');

    assert_eq!(console.cursor(), Cursor { column: 0, row: 39 });
    assert!(cell_matches(&fb, 0, 0, &glyph(b' ')));
    assert!(cell_matches(&fb, 0, 39, &glyph(b'_')));
}

#[test]
fn wrap_flags_follow_scroll() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);

    for _ in 0..39 {
        console.putc(&mut fb, b'\n');
    }
    for _ in 0..30 {
        console.putc(&mut fb, b'z');
    }
    assert_eq!(console.cursor(), Cursor { column: 0, row: 39 });

    console.putc(&mut fb, BACKSPACE);
    assert_eq!(console.cursor(), Cursor { column: 29, row: 38 });
}

#[test]
fn control_bytes_are_ignored() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);
    let before = fb.frame().clone();

    console.print(&mut fb, &[0x01, 0x1B, 0x7F]);

    assert_eq!(console.cursor(), Cursor::default());
    assert_eq!(fb.bytes(), &before.bytes()[..]);
}

#[test]
fn print_stops_at_nul() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);

    console.print(&mut fb, b"ok\0more");

    assert_eq!(console.cursor(), Cursor { column: 2, row: 0 });
}

#[test]
fn other_formats_ignore_text() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);
    fb.set_format(PixelFormat::Indexed8);

    console.putc(&mut fb, b'Q');

    assert_eq!(console.cursor(), Cursor::default());
    assert!(fb.bytes().iter().all(|&b| b == 0));
}

#[test]
fn draw_letter_leaves_cursor_alone() {
    let mut frame = FrameBuffer::new();
    let (console, mut fb) = console_on(&mut frame);

    console.draw_letter(&mut fb, 29, 39, b'#').unwrap();
    assert_eq!(
        console.draw_letter(&mut fb, 30, 0, b'#'),
        Err(DrawError::OutOfBounds)
    );

    assert!(cell_matches(&fb, 29, 39, &glyph(b'#')));
    assert_eq!(console.cursor(), Cursor::default());
}

#[test]
fn console_mode_resets_display() {
    let mut frame = FrameBuffer::new();
    frame.fill(0xFF);
    let mut display = Display::new(
        &mut frame,
        MockTransport::new(),
        Config {
            format: PixelFormat::Rgb565,
            background: 0,
        },
    );
    let mut console = Console::default();

    console.set_console_mode(&mut display).unwrap();
    console.set_console_mode(&mut display).unwrap();

    assert_eq!(display.transport().bring_ups, 1);
    assert_eq!(display.compositor().format(), PixelFormat::Grey1);
    assert!(display.compositor().bytes().iter().all(|&b| b == 0));
    assert_eq!(console.cursor(), Cursor::default());
}

#[test]
fn shrunk_screen_pulls_cursor_inside() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);

    console.print(&mut fb, b"0123456789abcdefghij");
    assert_eq!(console.cursor(), Cursor { column: 20, row: 0 });

    fb.set_virtual_screen(Position::ORIGIN, Dimensions::new(64, 64))
        .unwrap();
    console.putc(&mut fb, b'x');

    assert_eq!(console.dimensions(&fb), Dimensions::new(8, 8));
    assert_eq!(console.cursor(), Cursor { column: 0, row: 1 });
    assert!(cell_matches(&fb, 7, 0, &glyph(b'x')));
    assert!(cell_matches(&fb, 0, 1, &glyph(b'_')));
}

#[test]
fn writer_formats_into_cells() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);

    write!(console.writer(&mut fb), "{}+{}", 4, 2).unwrap();

    assert_eq!(console.cursor(), Cursor { column: 3, row: 0 });
    assert!(cell_matches(&fb, 1, 0, &glyph(b'+')));
}

#[test]
fn clear_homes_cursor() {
    let mut frame = FrameBuffer::new();
    let (mut console, mut fb) = console_on(&mut frame);

    console.print(&mut fb, b"hello\nworld");
    console.clear(&mut fb);

    assert_eq!(console.cursor(), Cursor::default());
    assert!(fb.bytes().iter().all(|&b| b == 0));
}
