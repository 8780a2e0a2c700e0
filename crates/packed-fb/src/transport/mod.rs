//! Panel-side collaborators of the compositor.

pub mod mock;

use crate::{
    clut::ClutEntry, compositor::Compositor, format::PixelFormat, geometry::VirtualScreen,
};

/// Moves framebuffer contents to a physical panel (or anything standing in
/// for one).
pub trait DisplayTransport {
    type Error;

    /// One-time hardware bring-up.
    fn bring_up(&mut self, format: PixelFormat, screen: VirtualScreen) -> Result<(), Self::Error>;

    /// Called when format or virtual screen change after bring-up.
    fn reconfigure(
        &mut self,
        format: PixelFormat,
        screen: VirtualScreen,
    ) -> Result<(), Self::Error> {
        let _ = (format, screen);
        Ok(())
    }

    /// Installs a palette on the panel.
    fn load_clut(&mut self, entries: &[ClutEntry]) -> Result<(), Self::Error> {
        let _ = entries;
        Ok(())
    }

    /// Pushes the current frame out.
    fn present(&mut self, frame: &Compositor<'_>) -> Result<(), Self::Error>;
}
