//! Built-in console font.

use packed_fb::{Dimensions, PixelFormat, Tile};

/// Source of 1 bpp glyph tiles for the console.
pub trait GlyphSet {
    /// Side of every glyph tile in pixels.
    fn cell_side(&self) -> usize;

    /// Tile for printable ASCII `c`, if the set has one.
    fn glyph(&self, c: u8) -> Option<Tile<'_>>;

    fn cell_size(&self) -> Dimensions {
        Dimensions::new(self.cell_side(), self.cell_side())
    }
}

const FIRST: u8 = b' ';
const LAST: u8 = b'~';
const GLYPH_COUNT: usize = (LAST - FIRST + 1) as usize;
const SIDE: usize = 8;

/// 8x8 cells holding a 5x7 face one pixel in from the left, with row 7
/// reserved for descenders and the cursor underscore.
#[derive(Clone, Copy, Debug, Default)]
pub struct Font8x8;

static GLYPHS: [[u8; SIDE]; GLYPH_COUNT] = build_glyphs();

impl GlyphSet for Font8x8 {
    fn cell_side(&self) -> usize {
        SIDE
    }

    fn glyph(&self, c: u8) -> Option<Tile<'_>> {
        if !(FIRST..=LAST).contains(&c) {
            return None;
        }

        let rows = &GLYPHS[(c - FIRST) as usize];
        Some(Tile::new(SIDE as u8, PixelFormat::Grey1, rows))
    }
}

const fn build_glyphs() -> [[u8; SIDE]; GLYPH_COUNT] {
    let mut glyphs = [[0u8; SIDE]; GLYPH_COUNT];
    let mut i = 0;
    while i < GLYPH_COUNT {
        glyphs[i] = rows_from_columns(glyph_5x7(FIRST + i as u8));
        i += 1;
    }
    glyphs
}

/// Turns column bitmaps (bit n = row n) into MSB-first row bytes.
const fn rows_from_columns(columns: [u8; 5]) -> [u8; SIDE] {
    let mut rows = [0u8; SIDE];
    let mut col = 0;
    while col < columns.len() {
        let mut row = 0;
        while row < SIDE {
            if columns[col] & (1 << row) != 0 {
                rows[row] |= 0x80 >> (col + 1);
            }
            row += 1;
        }
        col += 1;
    }
    rows
}

const fn glyph_5x7(c: u8) -> [u8; 5] {
    match c {
        b'A' => [0x7E, 0x11, 0x11, 0x11, 0x7E],
        b'B' => [0x7F, 0x49, 0x49, 0x49, 0x36],
        b'C' => [0x3E, 0x41, 0x41, 0x41, 0x22],
        b'D' => [0x7F, 0x41, 0x41, 0x22, 0x1C],
        b'E' => [0x7F, 0x49, 0x49, 0x49, 0x41],
        b'F' => [0x7F, 0x09, 0x09, 0x09, 0x01],
        b'G' => [0x3E, 0x41, 0x49, 0x49, 0x7A],
        b'H' => [0x7F, 0x08, 0x08, 0x08, 0x7F],
        b'I' => [0x00, 0x41, 0x7F, 0x41, 0x00],
        b'J' => [0x20, 0x40, 0x41, 0x3F, 0x01],
        b'K' => [0x7F, 0x08, 0x14, 0x22, 0x41],
        b'L' => [0x7F, 0x40, 0x40, 0x40, 0x40],
        b'M' => [0x7F, 0x02, 0x0C, 0x02, 0x7F],
        b'N' => [0x7F, 0x04, 0x08, 0x10, 0x7F],
        b'O' => [0x3E, 0x41, 0x41, 0x41, 0x3E],
        b'P' => [0x7F, 0x09, 0x09, 0x09, 0x06],
        b'Q' => [0x3E, 0x41, 0x51, 0x21, 0x5E],
        b'R' => [0x7F, 0x09, 0x19, 0x29, 0x46],
        b'S' => [0x46, 0x49, 0x49, 0x49, 0x31],
        b'T' => [0x01, 0x01, 0x7F, 0x01, 0x01],
        b'U' => [0x3F, 0x40, 0x40, 0x40, 0x3F],
        b'V' => [0x1F, 0x20, 0x40, 0x20, 0x1F],
        b'W' => [0x7F, 0x20, 0x18, 0x20, 0x7F],
        b'X' => [0x63, 0x14, 0x08, 0x14, 0x63],
        b'Y' => [0x03, 0x04, 0x78, 0x04, 0x03],
        b'Z' => [0x61, 0x51, 0x49, 0x45, 0x43],
        b'a' => [0x20, 0x54, 0x54, 0x54, 0x78],
        b'b' => [0x7F, 0x48, 0x44, 0x44, 0x38],
        b'c' => [0x38, 0x44, 0x44, 0x44, 0x20],
        b'd' => [0x38, 0x44, 0x44, 0x48, 0x7F],
        b'e' => [0x38, 0x54, 0x54, 0x54, 0x18],
        b'f' => [0x08, 0x7E, 0x09, 0x01, 0x02],
        b'g' => [0x18, 0xA4, 0xA4, 0xA4, 0x7C],
        b'h' => [0x7F, 0x08, 0x04, 0x04, 0x78],
        b'i' => [0x00, 0x44, 0x7D, 0x40, 0x00],
        b'j' => [0x40, 0x80, 0x84, 0x7D, 0x00],
        b'k' => [0x7F, 0x10, 0x28, 0x44, 0x00],
        b'l' => [0x00, 0x41, 0x7F, 0x40, 0x00],
        b'm' => [0x7C, 0x04, 0x18, 0x04, 0x78],
        b'n' => [0x7C, 0x08, 0x04, 0x04, 0x78],
        b'o' => [0x38, 0x44, 0x44, 0x44, 0x38],
        b'p' => [0xFC, 0x24, 0x24, 0x24, 0x18],
        b'q' => [0x18, 0x24, 0x24, 0x28, 0xFC],
        b'r' => [0x7C, 0x08, 0x04, 0x04, 0x08],
        b's' => [0x48, 0x54, 0x54, 0x54, 0x20],
        b't' => [0x04, 0x3F, 0x44, 0x40, 0x20],
        b'u' => [0x3C, 0x40, 0x40, 0x20, 0x7C],
        b'v' => [0x1C, 0x20, 0x40, 0x20, 0x1C],
        b'w' => [0x3C, 0x40, 0x30, 0x40, 0x3C],
        b'x' => [0x44, 0x28, 0x10, 0x28, 0x44],
        b'y' => [0x1C, 0xA0, 0xA0, 0xA0, 0x7C],
        b'z' => [0x44, 0x64, 0x54, 0x4C, 0x44],
        b'0' => [0x3E, 0x51, 0x49, 0x45, 0x3E],
        b'1' => [0x00, 0x42, 0x7F, 0x40, 0x00],
        b'2' => [0x42, 0x61, 0x51, 0x49, 0x46],
        b'3' => [0x21, 0x41, 0x45, 0x4B, 0x31],
        b'4' => [0x18, 0x14, 0x12, 0x7F, 0x10],
        b'5' => [0x27, 0x45, 0x45, 0x45, 0x39],
        b'6' => [0x3C, 0x4A, 0x49, 0x49, 0x30],
        b'7' => [0x01, 0x71, 0x09, 0x05, 0x03],
        b'8' => [0x36, 0x49, 0x49, 0x49, 0x36],
        b'9' => [0x06, 0x49, 0x49, 0x29, 0x1E],
        b'.' => [0x00, 0x60, 0x60, 0x00, 0x00],
        b',' => [0x00, 0x80, 0x60, 0x00, 0x00],
        b';' => [0x00, 0x80, 0x66, 0x00, 0x00],
        b':' => [0x00, 0x36, 0x36, 0x00, 0x00],
        b'/' => [0x20, 0x10, 0x08, 0x04, 0x02],
        b'\\' => [0x02, 0x04, 0x08, 0x10, 0x20],
        b'<' => [0x08, 0x14, 0x22, 0x41, 0x00],
        b'>' => [0x00, 0x41, 0x22, 0x14, 0x08],
        b'[' => [0x00, 0x7F, 0x41, 0x41, 0x00],
        b']' => [0x00, 0x41, 0x41, 0x7F, 0x00],
        b'(' => [0x00, 0x1C, 0x22, 0x41, 0x00],
        b')' => [0x00, 0x41, 0x22, 0x1C, 0x00],
        b'{' => [0x00, 0x08, 0x36, 0x41, 0x00],
        b'}' => [0x00, 0x41, 0x36, 0x08, 0x00],
        b'-' => [0x08, 0x08, 0x08, 0x08, 0x08],
        b'+' => [0x08, 0x08, 0x3E, 0x08, 0x08],
        b'=' => [0x14, 0x14, 0x14, 0x14, 0x14],
        b'*' => [0x14, 0x08, 0x3E, 0x08, 0x14],
        b'!' => [0x00, 0x00, 0x5F, 0x00, 0x00],
        b'?' => [0x02, 0x01, 0x51, 0x09, 0x06],
        b'\'' => [0x00, 0x05, 0x03, 0x00, 0x00],
        b'"' => [0x00, 0x07, 0x00, 0x07, 0x00],
        b'`' => [0x00, 0x01, 0x02, 0x04, 0x00],
        b'#' => [0x14, 0x7F, 0x14, 0x7F, 0x14],
        b'$' => [0x24, 0x2A, 0x7F, 0x2A, 0x12],
        b'%' => [0x23, 0x13, 0x08, 0x64, 0x62],
        b'&' => [0x36, 0x49, 0x55, 0x22, 0x50],
        b'@' => [0x32, 0x49, 0x79, 0x41, 0x3E],
        b'^' => [0x04, 0x02, 0x01, 0x02, 0x04],
        b'|' => [0x00, 0x00, 0x7F, 0x00, 0x00],
        b'~' => [0x08, 0x04, 0x08, 0x10, 0x08],
        b'_' => [0x80, 0x80, 0x80, 0x80, 0x80],
        _ => [0x00; 5],
    }
}
