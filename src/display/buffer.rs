//! Scratch buffer for grayscale-to-monochrome conversion.

use alloc::vec::Vec;

/// Owned scratch region used while a partial-refresh session converts
/// grayscale rows down to 1 bpp.
///
/// Allocation is lazy and fallible: nothing is held until a row batch
/// needs it, an out-of-memory condition reports `false` instead of
/// aborting, and requests above the construction-time ceiling are
/// refused outright. Full-refresh-only sessions never allocate.
#[derive(Debug)]
pub struct ConversionBuffer {
    data: Vec<u8>,
    limit: usize,
}

impl ConversionBuffer {
    /// Empty buffer that will never hold more than `limit` bytes.
    pub const fn new(limit: usize) -> Self {
        Self { data: Vec::new(), limit }
    }

    /// Drop any held region and obtain a fresh one of `bytes` bytes,
    /// zero-filled. Returns `false` and leaves the buffer empty when
    /// the request exceeds the ceiling or the allocator refuses.
    pub fn allocate(&mut self, bytes: usize) -> bool {
        self.release();
        if bytes == 0 || bytes > self.limit {
            return false;
        }
        if self.data.try_reserve_exact(bytes).is_err() {
            log::error!("conversion buffer: failed to allocate {} bytes", bytes);
            return false;
        }
        self.data.resize(bytes, 0);
        true
    }

    /// Free the held region. Safe to call repeatedly or when empty.
    pub fn release(&mut self) {
        // Drop the allocation, not just the length.
        self.data = Vec::new();
    }

    /// True iff a region is held and is at least `bytes` long.
    ///
    /// Checked before each row batch so a still-large-enough region is
    /// reused instead of reallocated.
    pub fn fits(&self, bytes: usize) -> bool {
        !self.data.is_empty() && self.data.len() >= bytes
    }

    /// Held region, empty when nothing is allocated.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable view of the held region.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
