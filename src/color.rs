//! Input colors and how a panel classifies them

#[cfg(feature = "graphics")]
use embedded_graphics_core::pixelcolor::{BinaryColor, Rgb888, RgbColor};

/// A color as handed in by the drawing code
///
/// Panels only know two or three inks, every color gets classified
/// into one of them by the panel's [`ColorRule`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Color {
    /// red channel
    pub r: u8,
    /// green channel
    pub g: u8,
    /// blue channel
    pub b: u8,
}

impl Color {
    /// Paper color
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    /// Ink color
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    /// Accent color of the black/white/red panels
    pub const RED: Color = Color::new(0xFF, 0x00, 0x00);

    /// Creates a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Perceived brightness (ITU-R BT.601 weights), 0 to 255
    pub const fn brightness(&self) -> u8 {
        ((self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114) / 1000) as u8
    }
}

/// Which ink a pixel ends up as
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PixelClass {
    /// Paper, usually white
    Background,
    /// Ink, usually black
    Foreground,
    /// The third ink of tri-color panels
    Accent,
}

/// How a panel maps input colors onto its inks
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorRule {
    /// Dark colors (brightness below 128) are ink, everything else is paper
    Monochrome,
    /// Strongly red colors are accent, everything else as [`ColorRule::Monochrome`]
    RedAccent,
}

impl ColorRule {
    /// Classifies `color` for a panel using this rule
    pub fn classify(self, color: Color) -> PixelClass {
        match self {
            ColorRule::RedAccent if color.r >= 0x80 && color.g < 0x80 && color.b < 0x80 => {
                PixelClass::Accent
            }
            _ if color.brightness() < 0x80 => PixelClass::Foreground,
            _ => PixelClass::Background,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<BinaryColor> for Color {
    fn from(b: BinaryColor) -> Color {
        match b {
            BinaryColor::On => Color::BLACK,
            BinaryColor::Off => Color::WHITE,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<Rgb888> for Color {
    fn from(rgb: Rgb888) -> Self {
        Color::new(rgb.r(), rgb.g(), rgb.b())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        Rgb888::new(color.r, color.g, color.b)
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::pixelcolor::PixelColor for Color {
    type Raw = ();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monochrome_threshold() {
        assert_eq!(ColorRule::Monochrome.classify(Color::BLACK), PixelClass::Foreground);
        assert_eq!(ColorRule::Monochrome.classify(Color::WHITE), PixelClass::Background);
        assert_eq!(
            ColorRule::Monochrome.classify(Color::new(0x80, 0x80, 0x80)),
            PixelClass::Background
        );
        assert_eq!(
            ColorRule::Monochrome.classify(Color::new(0x7F, 0x7F, 0x7F)),
            PixelClass::Foreground
        );
    }

    #[test]
    fn red_is_ink_on_monochrome_panels() {
        // brightness of pure red is 76
        assert_eq!(ColorRule::Monochrome.classify(Color::RED), PixelClass::Foreground);
    }

    #[test]
    fn red_accent() {
        assert_eq!(ColorRule::RedAccent.classify(Color::RED), PixelClass::Accent);
        assert_eq!(
            ColorRule::RedAccent.classify(Color::new(0xC0, 0x20, 0x10)),
            PixelClass::Accent
        );
        // orange is too bright in green to count as red
        assert_eq!(
            ColorRule::RedAccent.classify(Color::new(0xFF, 0xA5, 0x00)),
            PixelClass::Background
        );
        assert_eq!(ColorRule::RedAccent.classify(Color::BLACK), PixelClass::Foreground);
        assert_eq!(ColorRule::RedAccent.classify(Color::WHITE), PixelClass::Background);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn from_binary_color() {
        assert_eq!(Color::from(BinaryColor::On), Color::BLACK);
        assert_eq!(Color::from(BinaryColor::Off), Color::WHITE);
    }
}
