//! Auto-advance timer.
//!
//! Accumulates unpaused time on every frame and reports when a full period
//! has elapsed. The accumulator starts over whenever the settled page changes
//! through some other path.
use bitflags::bitflags;

use super::page::PageIndex;
use super::scheduler::FrameHandle;

/// Time between automatic page advances.
pub const AUTO_ADVANCE_PERIOD_MS: f64 = 10_000.0;

/// Scroll offset, in pixels, still considered "at the top of the page".
pub const SCROLL_TOP_TOLERANCE: f64 = 5.0;

bitflags! {
    /// Reasons the timer is currently not accumulating time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PauseReasons: u8
    {
        /// A pointer drag is in progress
        const DRAGGING = 1;
        /// A transition is animating or resisting
        const TRANSITION = 1 << 1;
        /// The page is scrolled away from the top
        const SCROLLED = 1 << 2;
    }
}

/// State of the auto-advance loop.
#[derive(Debug, Clone)]
pub struct AutoAdvance
{
    /// Frame the loop is waiting on, `None` when not running
    handle: Option<FrameHandle>,
    /// Unpaused time accumulated in the current cycle
    elapsed_ms: f64,
    /// Timestamp of the previous frame
    last_frame_ms: Option<f64>,
    /// Settled page seen on the previous frame
    last_page: PageIndex,
}

impl AutoAdvance
{
    /// Creates a stopped timer remembering `page` as the current page.
    #[must_use]
    pub const fn new(page: PageIndex) -> Self
    {
        Self {
            handle: None,
            elapsed_ms: 0.0,
            last_frame_ms: None,
            last_page: page,
        }
    }

    /// Whether the loop has a frame scheduled.
    #[must_use]
    pub const fn is_running(&self) -> bool
    {
        self.handle.is_some()
    }

    /// Whether `handle` is the frame this loop is waiting on.
    #[must_use]
    pub fn owns(&self, handle: FrameHandle) -> bool
    {
        self.handle == Some(handle)
    }

    /// Records the frame the loop waits on next.
    pub const fn set_handle(&mut self, handle: FrameHandle)
    {
        self.handle = Some(handle);
    }

    /// Stops the loop, returning the frame that must be cancelled.
    pub const fn stop(&mut self) -> Option<FrameHandle>
    {
        self.last_frame_ms = None;
        self.handle.take()
    }

    /// Unpaused time accumulated in the current cycle.
    #[must_use]
    pub const fn elapsed_ms(&self) -> f64
    {
        self.elapsed_ms
    }

    /// Fraction of the current cycle elapsed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64
    {
        (self.elapsed_ms / AUTO_ADVANCE_PERIOD_MS).clamp(0.0, 1.0)
    }

    /// Advances the timer by one frame.
    ///
    /// # Arguments
    ///
    /// * `now_ms` - Monotonic timestamp of the frame
    /// * `page` - Currently settled page
    /// * `paused` - Active pause reasons; time only accumulates when empty
    ///
    /// # Returns
    ///
    /// `true` when a full period has elapsed. The accumulator has already been
    /// reset and the caller is expected to advance the page.
    pub fn tick(&mut self, now_ms: f64, page: PageIndex, paused: PauseReasons)
    -> bool
    {
        if page != self.last_page
        {
            self.last_page = page;
            self.elapsed_ms = 0.0;
            self.last_frame_ms = Some(now_ms);
            return false;
        }

        let delta = self
            .last_frame_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_frame_ms = Some(now_ms);

        if paused.is_empty()
        {
            self.elapsed_ms += delta;
        }

        if self.progress() >= 1.0
        {
            self.elapsed_ms = 0.0;
            return true;
        }

        false
    }
}
