#![cfg_attr(not(test), no_std)]

//! Pixel-packed framebuffer shared by 1, 2, 4, 8 and 16 bpp encodings.
//!
//! The [`Compositor`] owns all byte-level addressing: tile blits for every
//! sub-byte alignment, scrolling, lines, rectangles and single pixels.
//! [`Display`] pairs it with a [`DisplayTransport`].

pub mod blit;
pub mod clut;
mod compositor;
mod display;
pub mod format;
mod framebuffer;
pub mod geometry;
mod scroll;
mod shapes;
pub mod tile;
pub mod transport;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use clut::{Clut, ClutEntry, ClutError};
pub use compositor::{Compositor, Config, DrawError};
pub use display::{Display, DisplayError, DisplayResult};
pub use format::PixelFormat;
pub use framebuffer::FrameBuffer;
pub use geometry::{Dimensions, Point, Position, Rect, VirtualScreen};
#[cfg(feature = "embedded-graphics")]
pub use graphics::PackedColor;
pub use tile::{Tile, TileError};
pub use transport::DisplayTransport;
