//! Row-streaming display layer for 16-gray e-paper panels
//!
//! Built for ED047TC1-class grayscale panels (960x540, 16 gray levels)
//! driven from a memory-constrained controller: the full framebuffer at
//! 4 bpp does not always fit next to everything else, so rendered rows
//! are streamed to the panel in bounded pages instead.
//!
//! The layer picks between two refresh strategies:
//!
//! 1. **Full refresh**: slow, full grayscale depth, minimal ghosting.
//!    Rows are forwarded to the panel driver unmodified.
//! 1. **Partial refresh**: fast, monochrome only. Rows are packed from
//!    4 bpp grayscale down to 1 bpp through a scratch buffer before
//!    being forwarded, trading fidelity for speed.
//!
//! The panel's wire protocol is not implemented here; it stays behind
//! the [`PanelDriver`] trait so the same streaming logic drives real
//! hardware and test doubles alike.
//!
//! ### Usage
//!
//! 1. implement [`PanelDriver`] + [`PanelPower`] for your panel,
//! 1. wrap it in a [`DirectStream`],
//! 1. `start` a session, push row batches with `write_rows`, `finish`.

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

extern crate alloc;

use core::fmt;

pub mod board;
pub mod display;

pub use crate::display::buffer::ConversionBuffer;
pub use crate::display::color::Color;
pub use crate::display::framebuffer::Framebuffer;
pub use crate::display::packer::GrayDepth;
pub use crate::display::page::page_height;
pub use crate::display::panel::{PanelDriver, PanelPower, RefreshMode, Region};
pub use crate::display::streaming::DirectStream;

/// Errors returned by the streaming layer.
///
/// Generic over the panel driver's own error type so hardware faults
/// pass through unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Pass-through from the panel driver.
    Driver(E),
    /// `start` was called while a session is already active.
    SessionActive,
    /// `write_rows` or `finish` was called without an active session.
    NoSession,
    /// The row window falls outside the display or the session's
    /// declared batch limit.
    RowsOutOfBounds,
    /// The supplied row data is shorter than the addressed window.
    BufferTooSmall {
        /// Bytes the addressed window needs.
        required: usize,
        /// Bytes actually provided.
        provided: usize,
    },
    /// A second color plane was supplied. Multi-plane (color) panels
    /// are not yet supported; the plane is rejected rather than
    /// silently discarded.
    ColorPlaneUnsupported,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Driver(e) => write!(f, "panel driver error: {:?}", e),
            Error::SessionActive => write!(f, "a streaming session is already active"),
            Error::NoSession => write!(f, "no streaming session is active"),
            Error::RowsOutOfBounds => write!(f, "row window outside display bounds"),
            Error::BufferTooSmall { required, provided } => {
                write!(f, "row data too small: need {} bytes, got {}", required, provided)
            }
            Error::ColorPlaneUnsupported => write!(f, "color planes are not yet supported"),
        }
    }
}
