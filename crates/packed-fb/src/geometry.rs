//! Screen-space coordinates.

use crate::format::{HEIGHT, PixelFormat, WIDTH};

/// Row/column location in framebuffer pixels.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const ORIGIN: Self = Self { row: 0, column: 0 };

    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Window of the framebuffer addressed by drawing calls.
///
/// Drawing coordinates are relative to `offset`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VirtualScreen {
    pub offset: Position,
    pub size: Dimensions,
}

impl VirtualScreen {
    /// The whole panel, anchored at the origin.
    pub const PHYSICAL: Self = Self {
        offset: Position::ORIGIN,
        size: Dimensions::new(WIDTH, HEIGHT),
    };

    pub const fn new(offset: Position, size: Dimensions) -> Self {
        Self { offset, size }
    }

    /// Whether the window lies inside the pixel extent of `format`.
    pub const fn fits(&self, format: PixelFormat) -> bool {
        let right = self.offset.column.checked_add(self.size.width);
        let bottom = self.offset.row.checked_add(self.size.height);

        match (right, bottom) {
            (Some(right), Some(bottom)) => right <= WIDTH && bottom <= format.buffer_rows(),
            _ => false,
        }
    }

    /// Whether a `width` x `height` block at `(x, y)` stays inside the window.
    pub const fn contains_block(&self, x: usize, y: usize, width: usize, height: usize) -> bool {
        match (x.checked_add(width), y.checked_add(height)) {
            (Some(right), Some(bottom)) => right <= self.size.width && bottom <= self.size.height,
            _ => false,
        }
    }

    /// Whether `(x, y)` is on the window.
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.size.width && y < self.size.height
    }
}

impl Default for VirtualScreen {
    fn default() -> Self {
        Self::PHYSICAL
    }
}

/// Point in virtual-screen pixels.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Rect {
    pub top_left: Point,
    pub size: Dimensions,
}

impl Rect {
    pub const fn new(top_left: Point, size: Dimensions) -> Self {
        Self { top_left, size }
    }

    /// Whether either side is zero.
    pub const fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    /// Inclusive bottom-right corner, saturating at `usize::MAX`.
    ///
    /// Empty rectangles collapse onto `top_left`.
    pub const fn bottom_right(&self) -> Point {
        Point::new(
            self.top_left.x.saturating_add(self.size.width.saturating_sub(1)),
            self.top_left.y.saturating_add(self.size.height.saturating_sub(1)),
        )
    }
}
