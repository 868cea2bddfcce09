//! `embedded-graphics` integration.
//!
//! Lets the frame buffer act as a [`DrawTarget`] so scenes can mix the
//! native primitives with embedded-graphics drawables. `Gray2` luma is
//! inverted relative to the panel's color values (luma 3 is white, pixel
//! value 3 is black), so the adapter flips it.

use embedded_graphics::pixelcolor::Gray2;
use embedded_graphics::prelude::*;

use crate::color::Color;
use crate::framebuffer::FrameBuffer;

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Gray2;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_px(point.x, point.y, Color::from_crumb(3 - color.luma()));
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        FrameBuffer::clear(self, Color::from_crumb(3 - color.luma()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn luma_maps_inverted_onto_panel_colors() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.draw_iter([
            Pixel(Point::new(0, 0), Gray2::new(0)),
            Pixel(Point::new(1, 0), Gray2::new(1)),
            Pixel(Point::new(2, 0), Gray2::new(2)),
            Pixel(Point::new(3, 0), Gray2::new(3)),
        ])
        .unwrap();
        assert_eq!(fb.get_px(0, 0), Color::Black);
        assert_eq!(fb.get_px(1, 0), Color::DGrey);
        assert_eq!(fb.get_px(2, 0), Color::LGrey);
        assert_eq!(fb.get_px(3, 0), Color::White);
    }

    #[test]
    fn styled_primitives_render_through_the_adapter() {
        let mut fb = FrameBuffer::new(8, 8);
        Rectangle::new(Point::new(1, 1), Size::new(3, 3))
            .into_styled(PrimitiveStyle::with_fill(Gray2::new(0)))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.get_px(1, 1), Color::Black);
        assert_eq!(fb.get_px(3, 3), Color::Black);
        assert_eq!(fb.get_px(4, 4), Color::White);
    }

    #[test]
    fn size_follows_rotation() {
        use crate::framebuffer::Rotation;
        let mut fb = FrameBuffer::new(16, 8);
        assert_eq!(fb.size(), Size::new(16, 8));
        fb.set_rotation(Rotation::Rotate90);
        assert_eq!(fb.size(), Size::new(8, 16));
    }

    #[test]
    fn out_of_bounds_pixels_are_dropped() {
        let mut fb = FrameBuffer::new(4, 4);
        let before = fb.data().to_vec();
        fb.draw_iter([Pixel(Point::new(-1, 9), Gray2::new(0))]).unwrap();
        assert_eq!(fb.data(), &before[..]);
    }
}
