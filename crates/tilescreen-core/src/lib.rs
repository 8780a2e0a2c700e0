#![cfg_attr(not(test), no_std)]

//! Glyph console drawn through the packed framebuffer compositor.

pub mod console;
pub mod font;

pub use console::{Console, ConsoleConfig, ConsoleWriter, Cursor};
pub use font::{Font8x8, GlyphSet};
