//! Graphics Support for EPDs
//!
//! [`Framebuffer`] and [`Epd`] are embedded-graphics draw targets. Drawing only
//! touches the framebuffer, nothing reaches the panel before
//! [`Epd::update`](crate::epd::Epd::update).

use core::convert::Infallible;

use embedded_graphics_core::prelude::*;

use crate::color::Color;
use crate::epd::Epd;
use crate::framebuffer::Framebuffer;

impl DrawTarget for Framebuffer {
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl<SPI, BUSY, DC, RST, DELAY> DrawTarget for Epd<SPI, BUSY, DC, RST, DELAY> {
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer_mut().draw_iter(pixels)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl<SPI, BUSY, DC, RST, DELAY> OriginDimensions for Epd<SPI, BUSY, DC, RST, DELAY> {
    fn size(&self) -> Size {
        self.framebuffer().size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorRule, PixelClass};
    use crate::epd::Config;
    use crate::framebuffer::{AccentPolarity, BitPolarity, DisplayRotation};
    use crate::model::Model;
    use crate::test_support::Bus;
    use embedded_graphics::{
        pixelcolor::{BinaryColor, Rgb888},
        prelude::*,
        primitives::{Line, PrimitiveStyle, Rectangle},
    };

    fn display(accent: Option<AccentPolarity>) -> Framebuffer {
        Framebuffer::new(
            200,
            200,
            200,
            BitPolarity::SetIsWhite,
            accent,
            ColorRule::RedAccent,
        )
    }

    #[test]
    fn graphics_size() {
        let mut display = display(None);
        assert_eq!(display.size(), Size::new(200, 200));

        let mut rotated = Framebuffer::new(
            128,
            296,
            128,
            BitPolarity::SetIsWhite,
            None,
            ColorRule::Monochrome,
        );
        rotated.set_rotation(DisplayRotation::Rotate90);
        assert_eq!(rotated.size(), Size::new(296, 128));

        display.set_rotation(DisplayRotation::Rotate270);
        assert_eq!(display.bounding_box().size, Size::new(200, 200));
    }

    #[test]
    fn graphics_rotation_0() {
        let mut display = display(None);
        let _ = Line::new(Point::new(0, 0), Point::new(7, 0))
            .into_styled(PrimitiveStyle::with_stroke(Color::BLACK, 1))
            .draw(&mut display);

        let buffer = display.buffer();
        assert_eq!(buffer[0], 0x00);
        for &byte in buffer.iter().skip(1) {
            assert_eq!(byte, 0xFF);
        }
    }

    #[test]
    fn graphics_rotation_90() {
        let mut display = display(None);
        display.set_rotation(DisplayRotation::Rotate90);
        let _ = Line::new(Point::new(0, 192), Point::new(0, 199))
            .into_styled(PrimitiveStyle::with_stroke(Color::BLACK, 1))
            .draw(&mut display);

        let buffer = display.buffer();
        assert_eq!(buffer[0], 0x00);
        for &byte in buffer.iter().skip(1) {
            assert_eq!(byte, 0xFF);
        }
    }

    #[test]
    fn outside_pixels_are_dropped() {
        let mut display = display(None);
        let before = display.buffer().to_vec();
        let _ = Line::new(Point::new(-10, -1), Point::new(300, -1))
            .into_styled(PrimitiveStyle::with_stroke(Color::BLACK, 1))
            .draw(&mut display);
        assert_eq!(display.buffer(), &before[..]);
    }

    #[test]
    fn red_lands_in_accent_plane() {
        let mut display = display(Some(AccentPolarity::SetIsAccent));
        let _ = Rectangle::new(Point::new(8, 0), Size::new(8, 1))
            .into_styled(PrimitiveStyle::with_fill(Color::from(Rgb888::new(0xE0, 0x10, 0x10))))
            .draw(&mut display);

        assert_eq!(display.class_at(8, 0), Some(PixelClass::Accent));
        assert_eq!(display.class_at(7, 0), Some(PixelClass::Background));
        let accent = display.accent_plane().unwrap_or_default();
        assert_eq!(accent[..2], [0x00, 0xFF]);
    }

    #[test]
    fn clear_fills_every_plane() {
        let mut display = display(Some(AccentPolarity::ClearIsAccent));
        DrawTarget::clear(&mut display, Color::from(BinaryColor::On)).unwrap();
        assert!(display.bw_plane().iter().all(|b| *b == 0x00));
        assert!(display.accent_plane().unwrap_or_default().iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn draw_on_the_driver() {
        let bus = Bus::new();
        let mut epd = bus.epd(Model::Waveshare2in9, Config::default());
        assert_eq!(epd.size(), Size::new(128, 296));

        let _ = Line::new(Point::new(0, 1), Point::new(15, 1))
            .into_styled(PrimitiveStyle::with_stroke(Color::BLACK, 1))
            .draw(&mut epd);
        let bw = epd.framebuffer().bw_plane();
        assert_eq!(bw[16..18], [0x00, 0x00]);
        assert_eq!(bw[18], 0xFF);
        // drawing alone talks to nobody
        assert!(bus.events().is_empty());
    }
}
