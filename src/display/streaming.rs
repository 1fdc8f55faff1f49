//! Direct row-streaming sessions.
//!
//! A session is started in one of two refresh modes, fed row batches,
//! and finished exactly once. Full mode forwards grayscale rows to the
//! panel untouched; partial mode packs them down to 1 bpp through the
//! conversion scratch buffer first. The mode is fixed at `start`;
//! switching requires finishing and starting a new session.

use crate::display::buffer::ConversionBuffer;
use crate::display::packer::{self, GrayDepth};
use crate::display::panel::{PanelDriver, PanelPower, RefreshMode, Region};
use crate::display::{framebuffer::Framebuffer, MAX_PAGE_BUFFER_SIZE};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    ActiveFull,
    ActivePartial,
}

impl SessionState {
    fn mode(self) -> Option<RefreshMode> {
        match self {
            SessionState::Idle => None,
            SessionState::ActiveFull => Some(RefreshMode::Full),
            SessionState::ActivePartial => Some(RefreshMode::Partial),
        }
    }
}

/// Row-streaming session controller over a panel driver.
///
/// Owns the driver, the session state and the conversion scratch
/// buffer; one controller drives one physical surface. Single-threaded
/// by design: callers run `start` -> `write_rows`* -> `finish`
/// sequentially, and invalid call orders come back as errors instead
/// of being silently ignored.
#[derive(Debug)]
pub struct DirectStream<D> {
    driver: D,
    state: SessionState,
    scratch: ConversionBuffer,
    /// Largest batch the caller declared at `start`; 0 means no limit.
    max_rows: u32,
}

impl<D> DirectStream<D>
where
    D: PanelDriver + PanelPower,
{
    /// Wrap a panel driver. The conversion scratch buffer is capped at
    /// the board page budget.
    pub fn new(driver: D) -> Self {
        Self::with_scratch_limit(driver, MAX_PAGE_BUFFER_SIZE)
    }

    /// Wrap a panel driver with an explicit scratch-buffer ceiling.
    pub fn with_scratch_limit(driver: D, scratch_limit: usize) -> Self {
        Self {
            driver,
            state: SessionState::Idle,
            scratch: ConversionBuffer::new(scratch_limit),
            max_rows: 0,
        }
    }

    /// Whether the panel accepts row-by-row streaming.
    pub fn supports_direct_streaming(&self) -> bool {
        self.driver.supports_direct_streaming()
    }

    /// Whether the panel can run monochrome partial updates.
    pub fn supports_partial_refresh(&self) -> bool {
        self.driver.supports_partial_refresh()
    }

    /// Borrow the wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Unwrap the controller, returning the driver.
    pub fn release(self) -> D {
        self.driver
    }

    /// Start a streaming session in the given refresh mode.
    ///
    /// The mode is recorded for the session's whole lifetime; `finish`
    /// issues exactly one refresh of this mode. `max_row_count` bounds
    /// the size of each row batch, 0 meaning unbounded. Powers the
    /// panel rail on.
    ///
    /// Returns [`Error::SessionActive`] when a session is already
    /// running; the running session is left untouched.
    pub fn start(&mut self, mode: RefreshMode, max_row_count: u32) -> Result<(), Error<D::Error>> {
        if self.state != SessionState::Idle {
            return Err(Error::SessionActive);
        }

        log::debug!("direct streaming: starting {} refresh session", mode);
        self.state = match mode {
            RefreshMode::Full => SessionState::ActiveFull,
            RefreshMode::Partial => SessionState::ActivePartial,
        };
        self.max_rows = max_row_count;
        self.driver.set_panel_power(true);
        Ok(())
    }

    /// Push one batch of grayscale rows.
    ///
    /// `gray` holds `row_count` rows of 4 bpp data, addressed at
    /// display row `y_start`. A zero-row or empty batch is a no-op.
    /// `color` carries a second plane for multi-plane panels, which
    /// are not yet supported; passing one is rejected explicitly.
    ///
    /// In a partial session the batch is packed to monochrome through
    /// the scratch buffer. When the scratch region cannot be obtained
    /// the original grayscale bytes are forwarded instead: visibly
    /// degraded (full-contrast flash) but never fatal.
    pub fn write_rows(
        &mut self,
        y_start: u32,
        row_count: u32,
        gray: &[u8],
        color: Option<&[u8]>,
    ) -> Result<(), Error<D::Error>> {
        if color.is_some() {
            return Err(Error::ColorPlaneUnsupported);
        }
        if row_count == 0 || gray.is_empty() {
            return Ok(());
        }

        let Some(mode) = self.state.mode() else {
            return Err(Error::NoSession);
        };

        let (width, height) = self.driver.dimensions();
        let past_bottom = y_start
            .checked_add(row_count)
            .map_or(true, |end| end > height);
        if past_bottom || (self.max_rows > 0 && row_count > self.max_rows) {
            return Err(Error::RowsOutOfBounds);
        }
        let required_gray = GrayDepth::Gray4.row_bytes(width as usize) * row_count as usize;
        if gray.len() < required_gray {
            return Err(Error::BufferTooSmall {
                required: required_gray,
                provided: gray.len(),
            });
        }

        match mode {
            RefreshMode::Full => {
                log::debug!("direct streaming: wrote {} grayscale rows for full refresh", row_count);
                self.driver
                    .draw_full_frame(gray)
                    .map_err(Error::Driver)
            }
            RefreshMode::Partial => self.write_rows_partial(y_start, row_count, width, gray),
        }
    }

    /// Partial path: pack to 1 bpp via the scratch buffer, falling
    /// back to the raw grayscale bytes when no scratch is available.
    fn write_rows_partial(
        &mut self,
        y_start: u32,
        row_count: u32,
        width: u32,
        gray: &[u8],
    ) -> Result<(), Error<D::Error>> {
        let region = Region::rows(y_start, width, row_count);
        let required = packer::mono_row_bytes(width as usize) * row_count as usize;

        if self.scratch.fits(required) || self.scratch.allocate(required) {
            packer::gray_to_mono(
                gray,
                self.scratch.as_mut_slice(),
                width as usize,
                row_count as usize,
                GrayDepth::Gray4,
            );
            log::debug!(
                "direct streaming: converted {} rows of grayscale to monochrome for partial refresh",
                row_count
            );
            self.driver
                .draw_partial_frame(region, &self.scratch.as_slice()[..required])
                .map_err(Error::Driver)
        } else {
            // Degraded: the panel gets grayscale on the partial path,
            // which refreshes with a visible full-contrast flash.
            log::error!(
                "direct streaming: no conversion buffer for {} bytes, forwarding raw grayscale",
                required
            );
            self.driver
                .draw_partial_frame(region, gray)
                .map_err(Error::Driver)
        }
    }

    /// End the session: one panel refresh of the recorded mode, then
    /// release the scratch buffer and power the rail off.
    ///
    /// Cleanup runs even when the refresh itself fails, so the rail
    /// and the scratch region never outlive a session. Returns
    /// [`Error::NoSession`] when no session is active, without
    /// touching the driver.
    pub fn finish(&mut self) -> Result<(), Error<D::Error>> {
        let Some(mode) = self.state.mode() else {
            return Err(Error::NoSession);
        };

        log::debug!("direct streaming: finishing with {} refresh", mode);
        let result = self.driver.refresh(mode);

        self.scratch.release();
        self.driver.set_panel_power(false);
        self.state = SessionState::Idle;
        self.max_rows = 0;

        result.map_err(Error::Driver)
    }

    /// Push a whole framebuffer and run one full refresh.
    ///
    /// Convenience for the non-streaming case where the canonical
    /// surface fits in RAM. Refuses while a streaming session is
    /// active; powers the rail off afterwards like any session.
    pub fn display_frame(&mut self, frame: &Framebuffer) -> Result<(), Error<D::Error>> {
        if self.state != SessionState::Idle {
            return Err(Error::SessionActive);
        }

        self.driver.set_panel_power(true);
        let result = self
            .driver
            .draw_full_frame(frame.data())
            .and_then(|()| self.driver.refresh(RefreshMode::Full));
        self.driver.set_panel_power(false);

        result.map_err(Error::Driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{GRAY_BPP, HEIGHT, WIDTH};

    const GRAY_ROW: usize = (WIDTH as usize * GRAY_BPP as usize) / 8;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Power(bool),
        FullFrame(usize),
        PartialFrame(Region, Vec<u8>),
        Refresh(RefreshMode),
    }

    #[derive(Debug, Default)]
    struct MockPanel {
        calls: Vec<Call>,
        fail_refresh: bool,
    }

    impl MockPanel {
        fn refreshes(&self) -> Vec<RefreshMode> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Refresh(mode) => Some(*mode),
                    _ => None,
                })
                .collect()
        }
    }

    impl PanelDriver for MockPanel {
        type Error = &'static str;

        fn dimensions(&self) -> (u32, u32) {
            (WIDTH, HEIGHT)
        }

        fn draw_full_frame(&mut self, gray: &[u8]) -> Result<(), Self::Error> {
            self.calls.push(Call::FullFrame(gray.len()));
            Ok(())
        }

        fn draw_partial_frame(&mut self, region: Region, data: &[u8]) -> Result<(), Self::Error> {
            self.calls.push(Call::PartialFrame(region, data.to_vec()));
            Ok(())
        }

        fn refresh(&mut self, mode: RefreshMode) -> Result<(), Self::Error> {
            self.calls.push(Call::Refresh(mode));
            if self.fail_refresh {
                Err("busy line stuck")
            } else {
                Ok(())
            }
        }
    }

    impl PanelPower for MockPanel {
        fn set_panel_power(&mut self, on: bool) {
            self.calls.push(Call::Power(on));
        }
    }

    #[test]
    fn partial_session_packs_rows_and_refreshes_partial_once() {
        let mut stream = DirectStream::new(MockPanel::default());
        stream.start(RefreshMode::Partial, 0).unwrap();

        // Ten all-white 4 bpp rows.
        let gray = vec![0xFFu8; GRAY_ROW * 10];
        stream.write_rows(0, 10, &gray, None).unwrap();
        stream.finish().unwrap();

        let panel = stream.release();
        let packed = panel
            .calls
            .iter()
            .find_map(|c| match c {
                Call::PartialFrame(region, data) => Some((*region, data.clone())),
                _ => None,
            })
            .expect("partial frame written");

        assert_eq!(packed.0, Region::rows(0, WIDTH, 10));
        assert_eq!(packed.1.len(), 1200);
        assert!(packed.1.iter().all(|&b| b == 0xFF));
        assert_eq!(panel.refreshes(), vec![RefreshMode::Partial]);
    }

    #[test]
    fn full_session_forwards_grayscale_unmodified() {
        let mut stream = DirectStream::new(MockPanel::default());
        stream.start(RefreshMode::Full, 0).unwrap();

        let gray = vec![0x33u8; GRAY_ROW * 102];
        stream.write_rows(0, 102, &gray, None).unwrap();
        stream.finish().unwrap();

        let panel = stream.release();
        assert!(panel.calls.contains(&Call::FullFrame(gray.len())));
        assert!(!panel
            .calls
            .iter()
            .any(|c| matches!(c, Call::PartialFrame(..))));
        assert_eq!(panel.refreshes(), vec![RefreshMode::Full]);
    }

    #[test]
    fn allocation_failure_falls_back_to_raw_grayscale() {
        // Scratch ceiling too small for even one packed row.
        let mut stream = DirectStream::with_scratch_limit(MockPanel::default(), 16);
        stream.start(RefreshMode::Partial, 0).unwrap();

        let gray = vec![0x0Fu8; GRAY_ROW * 5];
        stream.write_rows(20, 5, &gray, None).unwrap();
        stream.finish().unwrap();

        let panel = stream.release();
        let (region, data) = panel
            .calls
            .iter()
            .find_map(|c| match c {
                Call::PartialFrame(region, data) => Some((*region, data.clone())),
                _ => None,
            })
            .expect("degraded partial frame written");

        // The original grayscale bytes went out, not packed data.
        assert_eq!(region, Region::rows(20, WIDTH, 5));
        assert_eq!(data, gray);
        assert_eq!(panel.refreshes(), vec![RefreshMode::Partial]);
    }

    #[test]
    fn finish_without_start_touches_nothing() {
        let mut stream = DirectStream::new(MockPanel::default());
        assert_eq!(stream.finish(), Err(Error::NoSession));
        assert!(stream.release().calls.is_empty());
    }

    #[test]
    fn write_rows_without_start_is_rejected() {
        let mut stream = DirectStream::new(MockPanel::default());
        let gray = vec![0u8; GRAY_ROW];
        assert_eq!(stream.write_rows(0, 1, &gray, None), Err(Error::NoSession));
        assert!(stream.release().calls.is_empty());
    }

    #[test]
    fn empty_batches_are_no_ops() {
        let mut stream = DirectStream::new(MockPanel::default());
        stream.start(RefreshMode::Partial, 0).unwrap();

        stream.write_rows(0, 0, &[0xFF], None).unwrap();
        stream.write_rows(0, 5, &[], None).unwrap();
        stream.finish().unwrap();

        let panel = stream.release();
        assert!(!panel
            .calls
            .iter()
            .any(|c| matches!(c, Call::PartialFrame(..) | Call::FullFrame(..))));
    }

    #[test]
    fn double_start_is_rejected_and_session_survives() {
        let mut stream = DirectStream::new(MockPanel::default());
        stream.start(RefreshMode::Partial, 0).unwrap();
        assert_eq!(stream.start(RefreshMode::Full, 0), Err(Error::SessionActive));

        stream.finish().unwrap();
        assert_eq!(stream.release().refreshes(), vec![RefreshMode::Partial]);
    }

    #[test]
    fn mode_change_requires_a_new_session() {
        let mut stream = DirectStream::new(MockPanel::default());
        stream.start(RefreshMode::Full, 0).unwrap();
        stream.finish().unwrap();
        stream.start(RefreshMode::Partial, 0).unwrap();
        stream.finish().unwrap();

        assert_eq!(
            stream.release().refreshes(),
            vec![RefreshMode::Full, RefreshMode::Partial]
        );
    }

    #[test]
    fn color_plane_is_rejected_explicitly() {
        let mut stream = DirectStream::new(MockPanel::default());
        stream.start(RefreshMode::Partial, 0).unwrap();

        let gray = vec![0u8; GRAY_ROW];
        assert_eq!(
            stream.write_rows(0, 1, &gray, Some(&gray)),
            Err(Error::ColorPlaneUnsupported)
        );
    }

    #[test]
    fn row_window_is_bounds_checked() {
        let mut stream = DirectStream::new(MockPanel::default());
        stream.start(RefreshMode::Partial, 8).unwrap();

        let gray = vec![0u8; GRAY_ROW * 16];
        // Past the bottom edge.
        assert_eq!(
            stream.write_rows(HEIGHT - 2, 4, &gray, None),
            Err(Error::RowsOutOfBounds)
        );
        // Larger than the declared batch limit.
        assert_eq!(
            stream.write_rows(0, 16, &gray, None),
            Err(Error::RowsOutOfBounds)
        );
        // Shorter than the addressed window.
        assert_eq!(
            stream.write_rows(0, 4, &gray[..GRAY_ROW], None),
            Err(Error::BufferTooSmall {
                required: GRAY_ROW * 4,
                provided: GRAY_ROW,
            })
        );
    }

    #[test]
    fn power_rail_is_off_after_every_session() {
        let mut stream = DirectStream::new(MockPanel::default());
        stream.start(RefreshMode::Full, 0).unwrap();
        stream.finish().unwrap();

        let panel = stream.release();
        assert_eq!(panel.calls.first(), Some(&Call::Power(true)));
        assert_eq!(panel.calls.last(), Some(&Call::Power(false)));
    }

    #[test]
    fn failed_refresh_still_cleans_up() {
        let panel = MockPanel { fail_refresh: true, ..MockPanel::default() };
        let mut stream = DirectStream::new(panel);
        stream.start(RefreshMode::Partial, 0).unwrap();

        let gray = vec![0xFFu8; GRAY_ROW * 2];
        stream.write_rows(0, 2, &gray, None).unwrap();
        assert_eq!(stream.finish(), Err(Error::Driver("busy line stuck")));

        // Back to idle: a new session can start.
        stream.start(RefreshMode::Full, 0).unwrap();
        let panel = stream.release();
        assert!(panel.calls.contains(&Call::Power(false)));
    }

    #[test]
    fn display_frame_runs_one_full_cycle() {
        let mut stream = DirectStream::new(MockPanel::default());
        let frame = Framebuffer::new(WIDTH, HEIGHT);
        stream.display_frame(&frame).unwrap();

        let panel = stream.release();
        assert_eq!(panel.refreshes(), vec![RefreshMode::Full]);
        assert!(panel
            .calls
            .contains(&Call::FullFrame((WIDTH * HEIGHT / 2) as usize)));
        assert_eq!(panel.calls.last(), Some(&Call::Power(false)));
    }
}
