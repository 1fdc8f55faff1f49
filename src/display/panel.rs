//! Collaborator traits the streaming layer drives.
//!
//! The panel's native refresh protocol is opaque: real hardware puts
//! an epdiy-style driver behind [`PanelDriver`], tests put a recording
//! mock there.

use core::fmt;

/// Rectangular window on the display surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Window width.
    pub width: u32,
    /// Window height.
    pub height: u32,
}

impl Region {
    /// The whole display surface.
    pub const fn full(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// A full-width band of `rows` rows starting at `y`.
    pub const fn rows(y: u32, width: u32, rows: u32) -> Self {
        Self { x: 0, y, width, height: rows }
    }
}

/// Refresh strategy for one streaming session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Redraw the whole panel at full grayscale depth. Slow, minimal
    /// ghosting.
    Full,
    /// Update a sub-region in monochrome. Fast, may ghost over many
    /// cycles.
    Partial,
}

impl fmt::Display for RefreshMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshMode::Full => write!(f, "full"),
            RefreshMode::Partial => write!(f, "partial"),
        }
    }
}

/// The panel driver the streaming layer writes into.
///
/// `refresh` is the long-running call: it kicks the physical update
/// and blocks on the panel's busy line until the cycle completes.
/// There is no cancellation; once issued, a refresh runs to the end.
pub trait PanelDriver {
    /// Driver-specific hardware error.
    type Error: fmt::Debug;

    /// Display surface size as `(width, height)` pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Write grayscale data addressed as the full screen window.
    fn draw_full_frame(&mut self, gray: &[u8]) -> Result<(), Self::Error>;

    /// Write data into a rectangular window for a partial update.
    ///
    /// `data` is normally packed 1 bpp monochrome, but the degraded
    /// fallback path hands raw grayscale bytes through unchanged.
    fn draw_partial_frame(&mut self, region: Region, data: &[u8]) -> Result<(), Self::Error>;

    /// Run one refresh cycle of the given mode, blocking until the
    /// busy line deasserts.
    fn refresh(&mut self, mode: RefreshMode) -> Result<(), Self::Error>;

    /// Whether the panel accepts row-by-row streaming at all.
    fn supports_direct_streaming(&self) -> bool {
        true
    }

    /// Whether the panel can run monochrome partial updates.
    ///
    /// Grayscale panels report true; partial refresh then trades gray
    /// depth for speed.
    fn supports_partial_refresh(&self) -> bool {
        true
    }
}

/// Power-management collaborator for the panel supply rail.
///
/// The rail must be off whenever no session is active, otherwise the
/// panel draws current while idle.
pub trait PanelPower {
    /// Switch the panel supply rail on or off.
    fn set_panel_power(&mut self, on: bool);
}
