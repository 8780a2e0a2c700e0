//! Compositor paired with the transport that shows it.

use log::{debug, info};

use crate::{
    FrameBuffer,
    clut::{ClutEntry, ClutError},
    compositor::{Compositor, Config, DrawError},
    format::PixelFormat,
    geometry::{Dimensions, Position, VirtualScreen},
    transport::DisplayTransport,
};

/// Display errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DisplayError<E> {
    /// Transport operation failed.
    Transport(E),
    /// Requested geometry is outside the framebuffer.
    Draw(DrawError),
    /// Palette does not fit.
    Clut(ClutError),
}

impl<E> From<DrawError> for DisplayError<E> {
    fn from(err: DrawError) -> Self {
        Self::Draw(err)
    }
}

impl<E> From<ClutError> for DisplayError<E> {
    fn from(err: ClutError) -> Self {
        Self::Clut(err)
    }
}

pub type DisplayResult<E> = Result<(), DisplayError<E>>;

/// Owns the drawing context and the panel transport.
pub struct Display<'fb, T> {
    compositor: Compositor<'fb>,
    transport: T,
    brought_up: bool,
}

impl<'fb, T> Display<'fb, T>
where
    T: DisplayTransport,
{
    /// Creates a display; the transport is untouched until `init`.
    pub fn new(frame: &'fb mut FrameBuffer, transport: T, config: Config) -> Self {
        Self {
            compositor: Compositor::new(frame, config),
            transport,
            brought_up: false,
        }
    }

    /// Selects format and virtual screen.
    ///
    /// The first successful call brings the transport up. Later calls only
    /// reconfigure it. The compositor keeps its previous state unless both
    /// the geometry check and the transport call succeed.
    pub fn init(
        &mut self,
        offset: Position,
        size: Dimensions,
        format: PixelFormat,
    ) -> DisplayResult<T::Error> {
        let screen = VirtualScreen::new(offset, size);
        if !screen.fits(format) {
            return Err(DrawError::OutOfBounds.into());
        }

        if self.brought_up {
            debug!("display: reconfigure {:?} {:?}", format, screen);
            self.transport
                .reconfigure(format, screen)
                .map_err(DisplayError::Transport)?;
        } else {
            self.transport
                .bring_up(format, screen)
                .map_err(DisplayError::Transport)?;
            self.brought_up = true;
            info!("display: up in {:?}, {}x{}", format, size.width, size.height);
        }

        self.compositor.configure(format, screen);
        Ok(())
    }

    /// Returns whether the transport has been brought up.
    pub fn is_initialized(&self) -> bool {
        self.brought_up
    }

    /// Switches the active format and tells the transport.
    pub fn set_format(&mut self, format: PixelFormat) -> DisplayResult<T::Error> {
        self.compositor.set_format(format);
        self.reconfigure()
    }

    /// Moves or resizes the virtual screen and tells the transport.
    pub fn set_virtual_screen(
        &mut self,
        offset: Position,
        size: Dimensions,
    ) -> DisplayResult<T::Error> {
        self.compositor.set_virtual_screen(offset, size)?;
        self.reconfigure()
    }

    /// Installs a palette in the compositor and on the panel.
    pub fn init_clut(&mut self, entries: &[ClutEntry]) -> DisplayResult<T::Error> {
        self.compositor.init_clut(entries)?;
        self.transport
            .load_clut(entries)
            .map_err(DisplayError::Transport)
    }

    /// Flushes the framebuffer through the transport.
    pub fn present(&mut self) -> DisplayResult<T::Error> {
        self.transport
            .present(&self.compositor)
            .map_err(DisplayError::Transport)
    }

    /// Returns the drawing context.
    pub fn compositor(&self) -> &Compositor<'fb> {
        &self.compositor
    }

    /// Returns the drawing context for drawing.
    pub fn compositor_mut(&mut self) -> &mut Compositor<'fb> {
        &mut self.compositor
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the transport for direct access.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Releases the transport.
    pub fn release(self) -> T {
        self.transport
    }

    fn reconfigure(&mut self) -> DisplayResult<T::Error> {
        if !self.brought_up {
            return Ok(());
        }

        let format = self.compositor.format();
        let screen = self.compositor.virtual_screen();
        self.transport
            .reconfigure(format, screen)
            .map_err(DisplayError::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        format::{HEIGHT, WIDTH},
        transport::mock::{MockTransport, MockTransportError},
    };

    const FULL: Dimensions = Dimensions::new(WIDTH, HEIGHT);

    #[test]
    fn init_brings_up_once() {
        let mut frame = FrameBuffer::new();
        let mut display = Display::new(&mut frame, MockTransport::new(), Config::default());

        display
            .init(Position::ORIGIN, FULL, PixelFormat::Grey1)
            .unwrap();
        display
            .init(Position::new(8, 0), Dimensions::new(WIDTH, 100), PixelFormat::Rgb565)
            .unwrap();

        let transport = display.transport();
        assert_eq!(transport.bring_ups, 1);
        assert_eq!(transport.reconfigures, 1);
        assert_eq!(transport.format, Some(PixelFormat::Rgb565));
        assert_eq!(display.compositor().format(), PixelFormat::Rgb565);
        assert_eq!(display.compositor().virtual_screen().offset, Position::new(8, 0));
    }

    #[test]
    fn failed_bring_up_is_retried() {
        let mut frame = FrameBuffer::new();
        let mut display = Display::new(&mut frame, MockTransport::failing(), Config::default());

        assert_eq!(
            display.init(Position::ORIGIN, FULL, PixelFormat::Grey1),
            Err(DisplayError::Transport(MockTransportError::BringUpFailed))
        );
        assert!(!display.is_initialized());

        display
            .init(Position::ORIGIN, FULL, PixelFormat::Grey1)
            .unwrap();
        assert!(display.is_initialized());
        assert_eq!(display.transport().bring_ups, 1);
    }

    #[test]
    fn failed_bring_up_keeps_compositor_state() {
        let mut frame = FrameBuffer::new();
        let mut display = Display::new(&mut frame, MockTransport::failing(), Config::default());

        let window = Dimensions::new(WIDTH, 100);
        assert_eq!(
            display.init(Position::new(8, 0), window, PixelFormat::Rgb565),
            Err(DisplayError::Transport(MockTransportError::BringUpFailed))
        );

        assert_eq!(display.compositor().format(), PixelFormat::Grey1);
        assert_eq!(display.compositor().virtual_screen(), VirtualScreen::PHYSICAL);
        assert_eq!(display.transport().format, None);

        display
            .init(Position::new(8, 0), window, PixelFormat::Rgb565)
            .unwrap();
        assert_eq!(display.compositor().format(), PixelFormat::Rgb565);
        assert_eq!(display.compositor().virtual_screen().offset, Position::new(8, 0));
    }

    #[test]
    fn invalid_geometry_changes_nothing() {
        let mut frame = FrameBuffer::new();
        let mut display = Display::new(&mut frame, MockTransport::new(), Config::default());

        assert_eq!(
            display.init(Position::new(1, 0), FULL, PixelFormat::Rgb565),
            Err(DisplayError::Draw(DrawError::OutOfBounds))
        );
        assert_eq!(display.compositor().format(), PixelFormat::Grey1);
        assert_eq!(display.transport().bring_ups, 0);
    }

    #[test]
    fn later_changes_reach_transport() {
        let mut frame = FrameBuffer::new();
        let mut display = Display::new(&mut frame, MockTransport::new(), Config::default());

        display.set_format(PixelFormat::Grey4).unwrap();
        assert_eq!(display.transport().reconfigures, 0);

        display
            .init(Position::ORIGIN, FULL, PixelFormat::Grey1)
            .unwrap();
        display.set_format(PixelFormat::Indexed8).unwrap();
        display
            .set_virtual_screen(Position::new(2, 2), Dimensions::new(10, 10))
            .unwrap();
        display
            .init_clut(&[ClutEntry::new(1, 2, 3)])
            .unwrap();

        let transport = display.transport();
        assert_eq!(transport.reconfigures, 2);
        assert_eq!(transport.clut_loads, 1);
        assert_eq!(display.compositor().clut().entries().len(), 1);
    }

    #[test]
    fn present_hands_frame_to_transport() {
        let mut frame = FrameBuffer::new();
        let mut display = Display::new(&mut frame, MockTransport::new(), Config::default());
        display
            .init(Position::ORIGIN, FULL, PixelFormat::Indexed8)
            .unwrap();

        display.compositor_mut().poke(0, 0, 0x10);
        display.compositor_mut().poke(1, 0, 0x02);
        display.present().unwrap();

        let transport = display.release();
        assert_eq!(transport.presents, 1);
        assert_eq!(transport.last_checksum, 0x12);
    }
}
