//! Lines and rectangles.

use core::ops::Range;

use crate::{
    compositor::Compositor,
    geometry::{Point, Rect},
};

impl Compositor<'_> {
    /// Draws a line between two inclusive endpoints.
    ///
    /// Thick horizontal lines grow into rows centred on the line, vertical
    /// ones into columns. Other lines replicate along their minor axis.
    /// Pixels off the virtual screen are dropped.
    pub fn draw_line(&mut self, p1: Point, p2: Point, value: u32, thickness: usize) {
        let thickness = thickness.max(1);

        if p1.y == p2.y {
            self.horizontal(p1.x.min(p2.x), p1.x.max(p2.x), p1.y, value, thickness);
        } else if p1.x == p2.x {
            self.vertical(p1.x, p1.y.min(p2.y), p1.y.max(p2.y), value, thickness);
        } else {
            self.bresenham(p1, p2, value, thickness);
        }
    }

    /// Draws `rect`; a zero `thickness` fills it.
    pub fn draw_rect(&mut self, rect: Rect, value: u32, thickness: usize) {
        if rect.is_empty() {
            return;
        }

        if thickness == 0 {
            self.fill_rows(
                value,
                rect.top_left.y,
                rect.size.height,
                rect.top_left.x,
                rect.size.width,
            );
            return;
        }

        let top_left = rect.top_left;
        let bottom_right = rect.bottom_right();
        let top_right = Point::new(bottom_right.x, top_left.y);
        let bottom_left = Point::new(top_left.x, bottom_right.y);

        self.draw_line(top_left, top_right, value, thickness);
        self.draw_line(bottom_left, bottom_right, value, thickness);
        self.draw_line(top_left, bottom_left, value, thickness);
        self.draw_line(top_right, bottom_right, value, thickness);
    }

    fn horizontal(&mut self, x0: usize, x1: usize, y: usize, value: u32, thickness: usize) {
        let size = self.virtual_screen().size;
        let x_end = x1.saturating_add(1).min(size.width);
        let (first, last) = band(y, thickness);

        for row in first..last.min(size.height) {
            self.fill_span(x0, x_end, row, value);
        }
    }

    fn vertical(&mut self, x: usize, y0: usize, y1: usize, value: u32, thickness: usize) {
        let width = self.virtual_screen().size.width;
        let (first, last) = band(x, thickness);

        for column in first..last.min(width) {
            for row in y0..=y1 {
                if !self.poke(column, row, value) {
                    break;
                }
            }
        }
    }

    /// Only the on-screen part of the major axis is walked. `i128` holds any
    /// difference of two `usize` coordinates.
    fn bresenham(&mut self, p1: Point, p2: Point, value: u32, thickness: usize) {
        let size = self.virtual_screen().size;
        let (width, height) = (size.width as i128, size.height as i128);
        let (x1, y1) = (p1.x as i128, p1.y as i128);
        let (x2, y2) = (p2.x as i128, p2.y as i128);
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let spread = thickness as i128;

        if dx >= dy {
            let ((ax, ay), (bx, by)) = if x1 <= x2 {
                ((x1, y1), (x2, y2))
            } else {
                ((x2, y2), (x1, y1))
            };
            let step = (by - ay).signum();
            let mut err = 2 * dy - dx;
            let mut y = ay;

            for x in ax..=bx.min(width - 1) {
                for row in clipped(y, spread, height) {
                    self.poke(x as usize, row as usize, value);
                }
                if err > 0 {
                    y += step;
                    err -= 2 * dx;
                }
                err += 2 * dy;
            }
        } else {
            let ((ax, ay), (bx, by)) = if y1 <= y2 {
                ((x1, y1), (x2, y2))
            } else {
                ((x2, y2), (x1, y1))
            };
            let step = (bx - ax).signum();
            let mut err = 2 * dx - dy;
            let mut x = ax;

            for y in ay..=by.min(height - 1) {
                for column in clipped(x, spread, width) {
                    self.poke(column as usize, y as usize, value);
                }
                if err > 0 {
                    x += step;
                    err -= 2 * dy;
                }
                err += 2 * dx;
            }
        }
    }
}

/// Minor-axis band of `spread` pixels centred on `at`, clipped to `0..limit`.
fn clipped(at: i128, spread: i128, limit: i128) -> Range<i128> {
    let first = at - spread / 2;
    first.max(0)..(first + spread).min(limit)
}

/// Span of `thickness` lines centred on `at`, clipped at zero.
fn band(at: usize, thickness: usize) -> (usize, usize) {
    let first = at.saturating_sub(thickness / 2);
    let last = at.saturating_add(thickness - thickness / 2);
    (first, last)
}
