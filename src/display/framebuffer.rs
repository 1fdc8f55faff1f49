//! Canonical 4 bpp grayscale framebuffer.

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;

use crate::display::color::Color;

/// Owned 4 bpp surface the rendering layer draws into.
///
/// Two pixels per byte, row-major, even-x pixel in the low nibble
/// (epdiy layout). A fresh buffer is white, matching the panel after
/// a clear cycle.
///
/// Implements [`DrawTarget`] so anything that draws with
/// `embedded-graphics` can render straight into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a white surface. `width` must be even (two pixels per
    /// byte).
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width % 2 == 0, "4 bpp rows must be byte-aligned");
        Self {
            width,
            height,
            data: vec![0xFF; (width as usize / 2) * height as usize],
        }
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize / 2
    }

    /// Raw framebuffer bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// `row_count` rows starting at `y`, for feeding a streaming
    /// session page by page. Returns `None` when the band falls
    /// outside the surface.
    pub fn rows(&self, y: u32, row_count: u32) -> Option<&[u8]> {
        let end = y.checked_add(row_count)?;
        if end > self.height {
            return None;
        }
        let start = y as usize * self.stride();
        Some(&self.data[start..end as usize * self.stride()])
    }

    /// Reset the whole surface to white.
    pub fn clear(&mut self) {
        self.data.fill(0xFF);
    }

    /// Fill the whole surface with one gray level.
    pub fn fill(&mut self, color: Color) {
        let level = color.level();
        self.data.fill(level << 4 | level);
    }

    /// Set a single pixel. Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.stride() + x as usize / 2;
        let byte = &mut self.data[idx];
        if x % 2 == 0 {
            *byte = (*byte & 0xF0) | color.level();
        } else {
            *byte = (*byte & 0x0F) | (color.level() << 4);
        }
    }

    /// Gray level of a single pixel, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte = self.data[y as usize * self.stride() + x as usize / 2];
        let level = if x % 2 == 0 { byte & 0x0F } else { byte >> 4 };
        Some(Color::from_level(level))
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Gray4;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, color.into());
            }
        }
        Ok(())
    }
}
