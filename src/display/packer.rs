//! Grayscale to monochrome row packing.
//!
//! Partial refresh runs the panel in monochrome, so grayscale rows are
//! cut at the midpoint of their domain and packed 8 pixels per byte.
//! The conversion is lossy and one-directional; it exists purely to
//! trade fidelity for refresh speed.

/// Bit depth of the grayscale source rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayDepth {
    /// 4 bits per pixel, 16 levels, two pixels per byte with the
    /// even-x pixel in the low nibble.
    Gray4,
    /// 2 bits per pixel, 4 levels, four pixels per byte packed
    /// MSB-first.
    Gray2,
}

impl GrayDepth {
    /// Bits per pixel.
    pub const fn bits(self) -> u32 {
        match self {
            GrayDepth::Gray4 => 4,
            GrayDepth::Gray2 => 2,
        }
    }

    /// Bytes one row of `width` pixels occupies at this depth.
    pub const fn row_bytes(self, width: usize) -> usize {
        match self {
            GrayDepth::Gray4 => width.div_ceil(2),
            GrayDepth::Gray2 => width.div_ceil(4),
        }
    }

    /// Smallest level rendered as white.
    const fn white_threshold(self) -> u8 {
        match self {
            GrayDepth::Gray4 => 8,
            GrayDepth::Gray2 => 2,
        }
    }

    /// Gray level of pixel `x` within one source row.
    fn level_at(self, row: &[u8], x: usize) -> u8 {
        match self {
            GrayDepth::Gray4 => {
                let byte = row[x / 2];
                if x % 2 == 0 {
                    byte & 0x0F
                } else {
                    byte >> 4
                }
            }
            GrayDepth::Gray2 => {
                let byte = row[x / 4];
                (byte >> ((3 - x % 4) * 2)) & 0x03
            }
        }
    }
}

/// Bytes one packed 1 bpp row of `width` pixels occupies.
pub const fn mono_row_bytes(width: usize) -> usize {
    width.div_ceil(8)
}

/// Pack `rows` grayscale rows of `width` pixels into 1 bpp monochrome.
///
/// Levels at or above the midpoint of the source domain become white
/// (bit 1), the rest black (bit 0), MSB-first, with the final byte of
/// each row zero-padded when `width` is not a multiple of 8. `dst` may
/// be larger than needed; only the first `mono_row_bytes(width) * rows`
/// bytes are written.
///
/// # Panics
///
/// Panics if `src` or `dst` is shorter than the addressed rows; the
/// streaming layer validates lengths before calling.
pub fn gray_to_mono(src: &[u8], dst: &mut [u8], width: usize, rows: usize, depth: GrayDepth) {
    let src_stride = depth.row_bytes(width);
    let dst_stride = mono_row_bytes(width);
    let threshold = depth.white_threshold();

    for row in 0..rows {
        let src_row = &src[row * src_stride..(row + 1) * src_stride];
        let dst_row = &mut dst[row * dst_stride..(row + 1) * dst_stride];
        dst_row.fill(0);

        for x in 0..width {
            if depth.level_at(src_row, x) >= threshold {
                dst_row[x / 8] |= 0x80 >> (x % 8);
            }
        }
    }
}
