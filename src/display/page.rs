//! Page sizing under a fixed byte budget.
//!
//! Streaming a full frame at source depth can need more RAM than the
//! board has to spare, so frames are cut into horizontal pages. These
//! are runtime functions on purpose: the budget, width and depth are
//! parameters so the math can be exercised off-board.

/// Bytes one full display row occupies at the given bit depth.
pub fn row_bytes(width: u32, bpp: u32) -> usize {
    (width as usize * bpp as usize).div_ceil(8)
}

/// Maximum number of full display rows that fit in `max_bytes`.
///
/// Returns `total_height` when the whole frame fits, otherwise the
/// largest row count whose bits fit the budget (integer floor).
///
/// `width * bpp` must be nonzero; passing zero is a caller bug.
pub fn page_height(width: u32, total_height: u32, bpp: u32, max_bytes: usize) -> u32 {
    let row_bits = width as usize * bpp as usize;
    debug_assert!(row_bits > 0, "page_height called with zero row bits");

    let bits_available = max_bytes * 8;
    let rows = (bits_available / row_bits) as u32;
    if rows >= total_height {
        total_height
    } else {
        rows
    }
}
