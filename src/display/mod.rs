//! Display layer: geometry, framebuffer, page sizing, row streaming.
//!
//! Everything here is hardware-independent; the panel itself sits
//! behind the traits in [`panel`].

pub mod buffer;
pub mod color;
pub mod framebuffer;
pub mod packer;
pub mod page;
pub mod panel;
pub mod streaming;

/// Display width, pixels horizontally
pub const WIDTH: u32 = 960;

/// Display height, pixels vertically
pub const HEIGHT: u32 = 540;

/// Bit depth of the canonical grayscale framebuffer (16 gray levels)
pub const GRAY_BPP: u32 = 4;

/// Byte budget for page buffers and the conversion scratch region.
///
/// Board-specific: the largest contiguous region the streaming path is
/// allowed to claim while the rest of the firmware keeps running.
pub const MAX_PAGE_BUFFER_SIZE: usize = 48 * 1024;
