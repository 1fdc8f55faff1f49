//! 16-level grayscale color type for the canonical framebuffer.

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;

/// One of the 16 gray levels the panel can render.
///
/// Level 0 is black, level 15 is white. The discriminant is the raw
/// 4-bit framebuffer nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Color {
    Black = 0,
    Gray1 = 1,
    Gray2 = 2,
    Gray3 = 3,
    Gray4 = 4,
    Gray5 = 5,
    Gray6 = 6,
    Gray7 = 7,
    Gray8 = 8,
    Gray9 = 9,
    Gray10 = 10,
    Gray11 = 11,
    Gray12 = 12,
    Gray13 = 13,
    Gray14 = 14,
    White = 15,
}

impl Color {
    /// Raw 4-bit framebuffer nibble for this level.
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// 8-bit luma expansion (0 = black .. 255 = white).
    pub const fn luma8(self) -> u8 {
        (self as u8) * 17
    }

    /// Level from a raw nibble; upper bits are ignored.
    pub const fn from_level(level: u8) -> Self {
        match level & 0x0F {
            0 => Color::Black,
            1 => Color::Gray1,
            2 => Color::Gray2,
            3 => Color::Gray3,
            4 => Color::Gray4,
            5 => Color::Gray5,
            6 => Color::Gray6,
            7 => Color::Gray7,
            8 => Color::Gray8,
            9 => Color::Gray9,
            10 => Color::Gray10,
            11 => Color::Gray11,
            12 => Color::Gray12,
            13 => Color::Gray13,
            14 => Color::Gray14,
            _ => Color::White,
        }
    }
}

impl From<Gray4> for Color {
    fn from(value: Gray4) -> Self {
        Color::from_level(value.luma())
    }
}

impl From<Color> for Gray4 {
    fn from(value: Color) -> Self {
        Gray4::new(value.level())
    }
}
