//! Packed bit-planes holding the next frame

use alloc::vec;
use alloc::vec::Vec;

use crate::color::{Color, ColorRule, PixelClass};

/// Display rotation, only 90° increments supported
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Meaning of a set bit in the black/white plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitPolarity {
    /// 1 is paper, 0 is ink
    SetIsWhite,
    /// 1 is ink, 0 is paper
    SetIsBlack,
}

/// Meaning of a set bit in the accent plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentPolarity {
    /// 1 shows the accent color
    SetIsAccent,
    /// 0 shows the accent color
    ClearIsAccent,
}

/// What the graphics layer may draw with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayType {
    /// Black and white only
    Binary,
    /// Black, white and an accent color
    Color,
}

/// count the number of bytes per line knowing that it may contains padding bits
pub(crate) const fn line_bytes(width: u32, bits_per_pixel: usize) -> usize {
    // round to upper 8 bit count
    (width as usize * bits_per_pixel + 7) / 8
}

/// Computes the needed buffer length. Takes care of rounding up in case width
/// is not divisible by 8.
///
///  unused
///  bits        width
/// <----><------------------------>
/// \[XXXXX210\]\[76543210\]...\[76543210\] ^
/// \[XXXXX210\]\[76543210\]...\[76543210\] | height
/// \[XXXXX210\]\[76543210\]...\[76543210\] v
pub const fn buffer_len(width: usize, height: usize, planes: usize) -> usize {
    (width + 7) / 8 * height * planes
}

/// Frame memory of one panel
///
/// One plane for black/white panels, a second plane of the same size right behind
/// the first for the accent color. Rows are padded to full bytes, the leftmost
/// pixel of a byte is its most significant bit.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    row_bytes: usize,
    bw_polarity: BitPolarity,
    accent: Option<AccentPolarity>,
    rule: ColorRule,
    rotation: DisplayRotation,
    buffer: Vec<u8>,
}

impl Framebuffer {
    /// Allocates the planes and fills them with paper color
    ///
    /// `controller_width` is the row width of the controller RAM, some panels show
    /// fewer columns than their controller stores.
    pub fn new(
        width: u32,
        height: u32,
        controller_width: u32,
        bw_polarity: BitPolarity,
        accent: Option<AccentPolarity>,
        rule: ColorRule,
    ) -> Self {
        let planes = if accent.is_some() { 2 } else { 1 };
        let row_bytes = line_bytes(controller_width.max(width), 1);
        let mut fb = Framebuffer {
            width,
            height,
            row_bytes,
            bw_polarity,
            accent,
            rule,
            rotation: DisplayRotation::default(),
            buffer: vec![0; row_bytes * height as usize * planes],
        };
        fb.clear();
        fb
    }

    /// Length of all planes together
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Number of bit-planes, 1 or 2
    pub fn plane_count(&self) -> usize {
        if self.accent.is_some() {
            2
        } else {
            1
        }
    }

    fn plane_len(&self) -> usize {
        self.row_bytes * self.height as usize
    }

    /// Both planes back to back
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// The black/white plane
    pub fn bw_plane(&self) -> &[u8] {
        &self.buffer[..self.plane_len()]
    }

    /// The accent plane, if the panel has one
    pub fn accent_plane(&self) -> Option<&[u8]> {
        let len = self.plane_len();
        self.accent.map(|_| &self.buffer[len..])
    }

    pub fn display_type(&self) -> DisplayType {
        match self.accent {
            Some(_) => DisplayType::Color,
            None => DisplayType::Binary,
        }
    }

    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Width as seen by drawing code, after rotation
    pub fn width(&self) -> u32 {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => self.width,
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => self.height,
        }
    }

    /// Height as seen by drawing code, after rotation
    pub fn height(&self) -> u32 {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => self.height,
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => self.width,
        }
    }

    /// Bytes for a whole row of one class, black/white and accent plane
    fn pattern(&self, class: PixelClass) -> (u8, u8) {
        let ink = class == PixelClass::Foreground;
        let bw = match self.bw_polarity {
            BitPolarity::SetIsWhite if ink => 0x00,
            BitPolarity::SetIsWhite => 0xFF,
            BitPolarity::SetIsBlack if ink => 0xFF,
            BitPolarity::SetIsBlack => 0x00,
        };
        let accent = match (self.accent, class == PixelClass::Accent) {
            (Some(AccentPolarity::ClearIsAccent), true) => 0x00,
            (Some(AccentPolarity::ClearIsAccent), false) => 0xFF,
            (_, true) => 0xFF,
            (_, false) => 0x00,
        };
        (bw, accent)
    }

    /// Resets every plane to paper color
    pub fn clear(&mut self) {
        self.fill_class(PixelClass::Background);
    }

    /// Sets every pixel to `color`
    pub fn fill(&mut self, color: Color) {
        self.fill_class(self.rule.classify(color));
    }

    fn fill_class(&mut self, class: PixelClass) {
        let (bw, accent) = self.pattern(class);
        let len = self.plane_len();
        let (bw_plane, accent_plane) = self.buffer.split_at_mut(len);
        bw_plane.fill(bw);
        accent_plane.fill(accent);
    }

    // final coordinates, None if out of range
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        let (w, h) = (self.width as i64, self.height as i64);
        let (x, y) = (x as i64, y as i64);
        let (x, y) = match self.rotation {
            DisplayRotation::Rotate0 => (x, y),
            DisplayRotation::Rotate90 => (w - 1 - y, x),
            DisplayRotation::Rotate180 => (w - 1 - x, h - 1 - y),
            DisplayRotation::Rotate270 => (y, h - 1 - x),
        };

        if x < 0 || x >= w || y < 0 || y >= h {
            return None;
        }

        let index = x as usize / 8 + y as usize * self.row_bytes;
        let mask = 0x80 >> (x % 8);
        Some((index, mask))
    }

    /// Sets a single pixel, out of range coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some((index, mask)) = self.locate(x, y) else {
            return;
        };

        let (bw, accent) = self.pattern(self.rule.classify(color));
        let byte = &mut self.buffer[index];
        *byte = (*byte & !mask) | (bw & mask);

        if self.accent.is_some() {
            let index = index + self.plane_len();
            let byte = &mut self.buffer[index];
            *byte = (*byte & !mask) | (accent & mask);
        }
    }

    /// Reads back the class of a pixel
    pub fn class_at(&self, x: i32, y: i32) -> Option<PixelClass> {
        let (index, mask) = self.locate(x, y)?;

        if self.accent.is_some() {
            let (_, no_accent) = self.pattern(PixelClass::Background);
            let bit = self.buffer[index + self.plane_len()] & mask;
            if bit != no_accent & mask {
                return Some(PixelClass::Accent);
            }
        }

        let (paper, _) = self.pattern(PixelClass::Background);
        if self.buffer[index] & mask == paper & mask {
            Some(PixelClass::Background)
        } else {
            Some(PixelClass::Foreground)
        }
    }
}
