use super::DisplayTransport;
use crate::{
    clut::ClutEntry, compositor::Compositor, format::PixelFormat, geometry::VirtualScreen,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MockTransportError {
    BringUpFailed,
}

/// No-hardware transport that only records what it was asked to do.
#[derive(Default, Debug, Clone)]
pub struct MockTransport {
    pub bring_ups: u32,
    pub reconfigures: u32,
    pub clut_loads: u32,
    pub presents: u32,
    /// Makes the next `bring_up` fail.
    pub fail_bring_up: bool,
    pub format: Option<PixelFormat>,
    pub screen: Option<VirtualScreen>,
    /// Sum of every presented byte, enough to tell frames apart.
    pub last_checksum: u32,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose first bring-up fails.
    pub fn failing() -> Self {
        Self {
            fail_bring_up: true,
            ..Self::default()
        }
    }
}

impl DisplayTransport for MockTransport {
    type Error = MockTransportError;

    fn bring_up(&mut self, format: PixelFormat, screen: VirtualScreen) -> Result<(), Self::Error> {
        if self.fail_bring_up {
            self.fail_bring_up = false;
            return Err(MockTransportError::BringUpFailed);
        }

        self.bring_ups += 1;
        self.format = Some(format);
        self.screen = Some(screen);
        Ok(())
    }

    fn reconfigure(
        &mut self,
        format: PixelFormat,
        screen: VirtualScreen,
    ) -> Result<(), Self::Error> {
        self.reconfigures += 1;
        self.format = Some(format);
        self.screen = Some(screen);
        Ok(())
    }

    fn load_clut(&mut self, _entries: &[ClutEntry]) -> Result<(), Self::Error> {
        self.clut_loads += 1;
        Ok(())
    }

    fn present(&mut self, frame: &Compositor<'_>) -> Result<(), Self::Error> {
        self.presents += 1;
        self.last_checksum = frame
            .bytes()
            .iter()
            .fold(0u32, |sum, &b| sum.wrapping_add(b as u32));
        Ok(())
    }
}
