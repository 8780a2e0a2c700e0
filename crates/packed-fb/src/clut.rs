//! Colour look-up table for `Indexed8`.

use heapless::Vec;

/// Largest palette an 8-bit index can address.
pub const CLUT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ClutError {
    /// More entries than an 8-bit index can address.
    TooManyEntries,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClutEntry {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ClutEntry {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Truncates to the panel's native 5-6-5 encoding.
    pub const fn to_rgb565(self) -> u16 {
        (((self.r as u16) >> 3) << 11) | (((self.g as u16) >> 2) << 5) | ((self.b as u16) >> 3)
    }
}

/// Installed palette. Replaced wholesale, never edited in place.
#[derive(Clone, Debug, Default)]
pub struct Clut {
    entries: Vec<ClutEntry, CLUT_CAPACITY>,
}

impl Clut {
    /// Creates an empty palette.
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Installs `entries`, keeping the old palette if they do not fit.
    pub fn replace(&mut self, entries: &[ClutEntry]) -> Result<(), ClutError> {
        let mut next = Vec::new();
        next.extend_from_slice(entries).map_err(|_| ClutError::TooManyEntries)?;

        self.entries = next;
        Ok(())
    }

    /// Returns the installed entries.
    pub fn entries(&self) -> &[ClutEntry] {
        &self.entries
    }

    /// Returns the entry at `index`, if installed.
    pub fn get(&self, index: u8) -> Option<ClutEntry> {
        self.entries.get(index as usize).copied()
    }

    /// Resolves an index to RGB565; unknown indices map to black.
    pub fn rgb565(&self, index: u8) -> u16 {
        self.get(index).map_or(0, ClutEntry::to_rgb565)
    }
}
