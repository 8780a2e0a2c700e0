use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::PixelColor,
};

use crate::Compositor;

/// Raw pixel value in whatever format the compositor is in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PackedColor(pub u32);

impl PixelColor for PackedColor {
    type Raw = ();
}

impl DrawTarget for Compositor<'_> {
    type Color = PackedColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }

            let _ = self.poke(point.x as usize, point.y as usize, color.0);
        }

        Ok(())
    }
}

impl OriginDimensions for Compositor<'_> {
    fn size(&self) -> Size {
        let size = self.virtual_screen().size;
        Size::new(size.width as u32, size.height as u32)
    }
}
