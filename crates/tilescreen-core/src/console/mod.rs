//! Character console on top of the 1 bpp compositor format.

use core::fmt;

use log::debug;
use packed_fb::{
    Compositor, Dimensions, Display, DisplayResult, DisplayTransport, DrawError, PixelFormat,
    Position,
};

use crate::font::{Font8x8, GlyphSet};

#[cfg(test)]
mod tests;

const BACKSPACE: u8 = 0x08;
/// Rows tracked for soft-wrap continuation.
const MAX_ROWS: usize = u64::BITS as usize;

/// Console configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConsoleConfig {
    /// Glyph drawn at the insertion point.
    pub cursor: u8,
    /// Glyph used to erase a cell.
    pub blank: u8,
    /// Cells advanced by a tab.
    pub tab_width: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            cursor: b'_',
            blank: b' ',
            tab_width: 2,
        }
    }
}

/// Cell coordinates of the insertion point.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Cursor {
    pub column: usize,
    pub row: usize,
}

/// Cursor-tracked text grid.
///
/// The console keeps no pixels of its own; every call takes the compositor
/// it draws into.
pub struct Console<G = Font8x8> {
    glyphs: G,
    config: ConsoleConfig,
    cursor: Cursor,
    /// Bit `n` set when row `n` was entered by wrapping off the previous row.
    continued: u64,
}

impl Console<Font8x8> {
    pub fn new(config: ConsoleConfig) -> Self {
        Self::with_glyphs(Font8x8, config)
    }
}

impl Default for Console<Font8x8> {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl<G> Console<G>
where
    G: GlyphSet,
{
    /// Console drawing with a custom glyph set.
    pub fn with_glyphs(glyphs: G, config: ConsoleConfig) -> Self {
        Self {
            glyphs,
            config,
            cursor: Cursor::default(),
            continued: 0,
        }
    }

    /// Returns the insertion point.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns current configuration.
    pub fn config(&self) -> ConsoleConfig {
        self.config
    }

    /// Puts the display into 1 bpp over the whole panel and clears it.
    pub fn set_console_mode<T>(&mut self, display: &mut Display<'_, T>) -> DisplayResult<T::Error>
    where
        T: DisplayTransport,
    {
        display.init(
            Position::ORIGIN,
            Compositor::physical_screen(),
            PixelFormat::Grey1,
        )?;
        self.clear(display.compositor_mut());
        debug!("console: {:?} cells", self.dimensions(display.compositor()));
        Ok(())
    }

    /// Blanks every cell and homes the cursor.
    pub fn clear(&mut self, fb: &mut Compositor<'_>) {
        fb.clear();
        self.cursor = Cursor::default();
        self.continued = 0;
    }

    /// Grid size in cells for the current virtual screen.
    pub fn dimensions(&self, fb: &Compositor<'_>) -> Dimensions {
        let side = self.glyphs.cell_side().max(1);
        let size = fb.virtual_screen().size;
        Dimensions::new(size.width / side, (size.height / side).min(MAX_ROWS))
    }

    /// Draws `c` in cell `(column, row)` without touching the cursor.
    ///
    /// Characters without a glyph draw as blanks.
    pub fn draw_letter(
        &self,
        fb: &mut Compositor<'_>,
        column: usize,
        row: usize,
        c: u8,
    ) -> Result<(), DrawError> {
        let Some(tile) = self
            .glyphs
            .glyph(c)
            .or_else(|| self.glyphs.glyph(self.config.blank))
        else {
            return Ok(());
        };

        let side = self.glyphs.cell_side();
        let x = column.checked_mul(side).ok_or(DrawError::OutOfBounds)?;
        let y = row.checked_mul(side).ok_or(DrawError::OutOfBounds)?;
        fb.draw_tile(x, y, &tile)
    }

    /// Feeds one byte to the console.
    ///
    /// Printable ASCII, newline, carriage return, tab and backspace are
    /// interpreted; everything else is dropped. Nothing happens outside the
    /// 1 bpp format.
    pub fn putc(&mut self, fb: &mut Compositor<'_>, c: u8) {
        if fb.format() != PixelFormat::Grey1 {
            return;
        }

        let grid = self.dimensions(fb);
        if grid.width == 0 || grid.height == 0 {
            return;
        }
        // The virtual screen may have shrunk since the last call.
        self.cursor.column = self.cursor.column.min(grid.width - 1);
        self.cursor.row = self.cursor.row.min(grid.height - 1);

        match c {
            b' '..=b'~' => {
                self.draw_at_cursor(fb, c);
                self.advance(fb, grid);
            }
            b'\n' | b'\r' => {
                self.draw_at_cursor(fb, self.config.blank);
                self.new_row(fb, grid, false);
            }
            b'\t' => {
                for _ in 0..self.config.tab_width {
                    self.draw_at_cursor(fb, self.config.blank);
                    self.advance(fb, grid);
                }
            }
            BACKSPACE => {
                self.draw_at_cursor(fb, self.config.blank);
                self.retreat(grid);
            }
            _ => return,
        }

        self.draw_at_cursor(fb, self.config.cursor);
    }

    /// Feeds bytes up to the first NUL.
    pub fn print(&mut self, fb: &mut Compositor<'_>, text: &[u8]) {
        for &c in text.iter().take_while(|&&c| c != 0) {
            self.putc(fb, c);
        }
    }

    /// Borrows the console and compositor as a `fmt::Write` sink.
    pub fn writer<'a, 'fb>(&'a mut self, fb: &'a mut Compositor<'fb>) -> ConsoleWriter<'a, 'fb, G> {
        ConsoleWriter { console: self, fb }
    }

    fn draw_at_cursor(&self, fb: &mut Compositor<'_>, c: u8) {
        let drawn = self.draw_letter(fb, self.cursor.column, self.cursor.row, c);
        // The cursor is clamped to the grid before any drawing.
        debug_assert!(drawn.is_ok(), "console: cursor cell off grid: {drawn:?}");
    }

    fn advance(&mut self, fb: &mut Compositor<'_>, grid: Dimensions) {
        if self.cursor.column + 1 < grid.width {
            self.cursor.column += 1;
        } else {
            self.new_row(fb, grid, true);
        }
    }

    fn retreat(&mut self, grid: Dimensions) {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.row > 0 && self.is_continued(self.cursor.row) {
            self.cursor.row -= 1;
            self.cursor.column = grid.width - 1;
        }
    }

    fn new_row(&mut self, fb: &mut Compositor<'_>, grid: Dimensions, wrapped: bool) {
        self.cursor.column = 0;

        if self.cursor.row + 1 < grid.height {
            self.cursor.row += 1;
        } else {
            fb.scroll_rows(self.glyphs.cell_side());
            self.continued >>= 1;
        }

        let bit = 1u64 << self.cursor.row;
        if wrapped {
            self.continued |= bit;
        } else {
            self.continued &= !bit;
        }
    }

    fn is_continued(&self, row: usize) -> bool {
        row < MAX_ROWS && self.continued & (1u64 << row) != 0
    }
}

/// `fmt::Write` adapter returned by [`Console::writer`].
pub struct ConsoleWriter<'a, 'fb, G> {
    console: &'a mut Console<G>,
    fb: &'a mut Compositor<'fb>,
}

impl<G> fmt::Write for ConsoleWriter<'_, '_, G>
where
    G: GlyphSet,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.bytes() {
            self.console.putc(self.fb, c);
        }
        Ok(())
    }
}
