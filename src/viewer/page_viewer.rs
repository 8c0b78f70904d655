//! Gesture-driven page viewer.
//!
//! Owns the settled page and the in-flight transition, turns pointer input
//! into drags, taps, commits and reverts, and drives at most one animation at
//! a time through a [`FrameScheduler`]. An auto-advance loop runs alongside
//! and funnels into the same commit path as a tap.
use std::mem;

use log::{debug, trace};

use super::page::{PAGE_COUNT, PageIndex};
use super::scene::{Scene, scene};
use super::scheduler::{FrameHandle, FrameScheduler};
use super::timer::{AutoAdvance, PauseReasons, SCROLL_TOP_TOLERANCE};
use super::transition::{Easing, Transition};

/// Releases closer than this to the anchor, in pixels, are taps.
pub const TAP_THRESHOLD_PX: f64 = 12.0;
/// Progress at release from which a drag commits instead of reverting.
pub const COMMIT_THRESHOLD: f64 = 0.25;
/// Progress from which an interrupted animation resolves to its target.
pub const INTERRUPT_SNAP_THRESHOLD: f64 = 0.5;
/// Duration of a full commit animation.
pub const COMMIT_DURATION_MS: f64 = 480.0;
/// Duration of a full revert animation.
pub const REVERT_DURATION_MS: f64 = 320.0;
/// Duration of the resistance release animation.
pub const RESISTANCE_RELEASE_MS: f64 = 380.0;
/// Floor for commit and revert durations.
pub const MIN_ANIMATION_MS: f64 = 40.0;

/// Width hint of an inactive page dot.
pub const DOT_WIDTH: f64 = 8.0;
/// Width hint of the active page dot once the timer period completes.
pub const DOT_ACTIVE_MAX_WIDTH: f64 = 24.0;

/// Pointer input, reduced to what the viewer needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent
{
    /// Horizontal pointer position in pixels
    pub x: f64,
}

impl PointerEvent
{
    /// Creates a pointer event at horizontal position `x`.
    #[must_use]
    pub const fn new(x: f64) -> Self
    {
        Self { x }
    }
}

/// Geometry the viewer reads on demand.
pub trait Viewport
{
    /// Width of the viewer element in pixels.
    fn width(&self) -> f64;

    /// Vertical scroll offset of the page in pixels.
    fn scroll_y(&self) -> f64;
}

/// A fixed viewport, updated by the host when the geometry changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSnapshot
{
    /// Width of the viewer element in pixels
    pub width: f64,
    /// Vertical scroll offset of the page in pixels
    pub scroll_y: f64,
}

impl Viewport for ViewportSnapshot
{
    fn width(&self) -> f64
    {
        self.width
    }

    fn scroll_y(&self) -> f64
    {
        self.scroll_y
    }
}

/// Public view of the viewer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerState
{
    /// At rest on one page
    Settled(PageIndex),
    /// A pointer drag started from `from`
    Dragging
    {
        /// Page the drag started on
        from: PageIndex,
    },
    /// Moving between two pages
    Animating
    {
        /// Page being left
        from: PageIndex,
        /// Page being approached
        to: PageIndex,
        /// Fraction of the way to `to`
        progress: f64,
    },
    /// Tilted against an edge
    Resisting
    {
        /// Tilt in degrees
        angle: f64,
    },
}

/// How an animation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settle
{
    /// Settle on the target page
    Commit,
    /// Return to the original page
    Revert,
    /// Drop the resistance tilt
    Release,
}

/// One running animation of a single scalar.
#[derive(Debug, Clone, Copy)]
struct Tween
{
    /// Frame the animation waits on
    handle: FrameHandle,
    /// Timestamp of the first frame, set when it arrives
    started_at: Option<f64>,
    /// Total duration
    duration_ms: f64,
    /// Value at the start
    start: f64,
    /// Value at the end
    end: f64,
    /// Curve applied to time
    easing: Easing,
    /// Pages involved, for `Between` animations
    pages: Option<(PageIndex, PageIndex)>,
    /// What happens at the end
    settle: Settle,
}

impl Tween
{
    /// Samples the animation at `now_ms`, returning the value and whether the
    /// animation has finished.
    fn sample(&mut self, now_ms: f64) -> (f64, bool)
    {
        let started_at = *self.started_at.get_or_insert(now_ms);
        let time = if self.duration_ms > 0.0
        {
            ((now_ms - started_at).max(0.0) / self.duration_ms).min(1.0)
        }
        else
        {
            1.0
        };
        let value = self.start + (self.end - self.start) * self.easing.apply(time);

        (value, time >= 1.0)
    }

    /// The transition this animation shows for `value`.
    fn transition(&self, value: f64) -> Transition
    {
        match self.pages
        {
            Some((from, to)) => Transition::Between {
                from,
                to,
                progress: value,
            },
            None => Transition::Resistance { angle: value },
        }
    }
}

/// What the viewer is doing besides resting.
#[derive(Debug, Clone, Copy)]
enum Motion
{
    /// Nothing in progress
    Idle,
    /// Pointer held down since `anchor_x`
    Dragging
    {
        /// Pointer position at pointer-down
        anchor_x: f64,
    },
    /// An animation is running
    Animating(Tween),
}

/// The album artwork viewer.
pub struct PageViewer<S: FrameScheduler>
{
    /// Frame source for animations and the auto-advance loop
    scheduler: S,
    /// Settled page
    page: PageIndex,
    /// In-flight transition
    transition: Option<Transition>,
    /// Drag or animation in progress
    motion: Motion,
    /// Auto-advance loop
    timer: AutoAdvance,
}

impl<S: FrameScheduler> PageViewer<S>
{
    /// Creates a viewer settled on `page`.
    ///
    /// The auto-advance loop does not run until [`PageViewer::mount`].
    #[must_use]
    pub const fn new(scheduler: S, page: PageIndex) -> Self
    {
        Self {
            scheduler,
            page,
            transition: None,
            motion: Motion::Idle,
            timer: AutoAdvance::new(page),
        }
    }

    /// Settled page.
    #[must_use]
    pub const fn page(&self) -> PageIndex
    {
        self.page
    }

    /// In-flight transition, `None` when settled.
    #[must_use]
    pub const fn transition(&self) -> Option<Transition>
    {
        self.transition
    }

    /// Whether a pointer drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool
    {
        matches!(self.motion, Motion::Dragging { .. })
    }

    /// Whether an animation is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool
    {
        matches!(self.motion, Motion::Animating(_))
    }

    /// Current state as one of settled, dragging, animating or resisting.
    #[must_use]
    pub const fn state(&self) -> ViewerState
    {
        match (self.motion, self.transition)
        {
            (Motion::Dragging { .. }, _) => ViewerState::Dragging { from: self.page },
            (_, Some(Transition::Between { from, to, progress })) =>
            {
                ViewerState::Animating { from, to, progress }
            }
            (_, Some(Transition::Resistance { angle })) => ViewerState::Resisting { angle },
            (_, None) => ViewerState::Settled(self.page),
        }
    }

    /// What the rendering layer should paint.
    #[must_use]
    pub fn scene(&self) -> Scene
    {
        scene(self.page, self.transition)
    }

    /// Fraction of the auto-advance period elapsed, in `[0, 1]`.
    #[must_use]
    pub fn timer_progress(&self) -> f64
    {
        self.timer.progress()
    }

    /// Width hint for the dot of `dot`.
    ///
    /// The active dot grows with the auto-advance progress and shrinks back
    /// when the cycle restarts; the others keep [`DOT_WIDTH`].
    #[must_use]
    pub fn dot_width(&self, dot: PageIndex) -> f64
    {
        if dot == self.page
        {
            DOT_WIDTH + (DOT_ACTIVE_MAX_WIDTH - DOT_WIDTH) * self.timer.progress()
        }
        else
        {
            DOT_WIDTH
        }
    }

    /// Borrow the scheduler, for the host to collect due frames.
    pub const fn scheduler_mut(&mut self) -> &mut S
    {
        &mut self.scheduler
    }

    /// Starts the auto-advance loop. Does nothing when already running.
    pub fn mount(&mut self)
    {
        if self.timer.is_running()
        {
            return;
        }

        let handle = self.scheduler.schedule();
        self.timer.set_handle(handle);
        debug!("Auto-advance started on page {}", self.page);
    }

    /// Stops the auto-advance loop and any running animation.
    pub fn unmount(&mut self)
    {
        if let Some(handle) = self.timer.stop()
        {
            self.scheduler.cancel(handle);
        }

        self.interrupt();
        debug!("Viewer unmounted on page {}", self.page);
    }

    /// Moves to page `target`.
    ///
    /// Out-of-range targets and the current page are ignored. See
    /// [`PageViewer::go_to`].
    pub fn go_to_page(&mut self, target: i64)
    {
        match PageIndex::new(target)
        {
            Some(page) => self.go_to(page),
            None => trace!("Ignoring page request {target} outside 0..{PAGE_COUNT}"),
        }
    }

    /// Moves to `target`.
    ///
    /// Any running animation is resolved first. Neighbouring pages are reached
    /// with a full commit animation, other pages are committed directly.
    pub fn go_to(&mut self, target: PageIndex)
    {
        if target == self.page
        {
            return;
        }

        self.interrupt();

        if target == self.page
        {
            return;
        }

        if self.page.is_adjacent(target)
        {
            debug!("Animating page {} -> {target}", self.page);
            self.start_tween(
                COMMIT_DURATION_MS,
                0.0,
                1.0,
                Easing::InOutQuad,
                Some((self.page, target)),
                Settle::Commit,
            );
        }
        else
        {
            debug!("Jumping page {} -> {target}", self.page);
            self.page = target;
            self.transition = None;
        }
    }

    /// Advances one page forward, wrapping from the back cover to the front.
    ///
    /// This is what a plain click does.
    pub fn tap(&mut self)
    {
        self.interrupt();
        self.go_to(self.page.next_wrapping());
    }

    /// Starts a drag at the pointer position.
    ///
    /// A running animation is resolved to the nearer end before the drag
    /// begins.
    pub fn pointer_down(&mut self, event: PointerEvent)
    {
        self.interrupt();
        self.motion = Motion::Dragging { anchor_x: event.x };
        trace!("Drag started at x={} on page {}", event.x, self.page);
    }

    /// Updates the drag transition. Ignored when not dragging.
    pub fn pointer_move(&mut self, event: PointerEvent, viewport: &impl Viewport)
    {
        if let Motion::Dragging { anchor_x } = self.motion
        {
            self.transition = Some(Transition::from_drag(
                self.page,
                event.x - anchor_x,
                viewport.width(),
            ));
        }
    }

    /// Ends the drag.
    ///
    /// Short releases are taps and advance one page. Otherwise resistance
    /// springs back, and a page move commits when it got far enough or
    /// reverts when it did not.
    pub fn pointer_up(&mut self, event: PointerEvent, viewport: &impl Viewport)
    {
        let Motion::Dragging { anchor_x } = self.motion
        else
        {
            return;
        };
        self.motion = Motion::Idle;

        let dx = event.x - anchor_x;

        if dx.abs() < TAP_THRESHOLD_PX
        {
            self.transition = None;
            self.tap();
            return;
        }

        self.transition = Some(Transition::from_drag(self.page, dx, viewport.width()));
        self.release(true);
    }

    /// Aborts the drag. A cancelled drag always reverts.
    pub fn pointer_cancel(&mut self)
    {
        if !self.is_dragging()
        {
            return;
        }

        self.motion = Motion::Idle;
        self.release(false);
    }

    /// Delivers a scheduled frame.
    ///
    /// # Arguments
    ///
    /// * `handle` - The frame that fired
    /// * `now_ms` - Monotonic timestamp of the frame
    /// * `viewport` - Geometry, read for the scroll-top check
    ///
    /// Frames that belong to neither the auto-advance loop nor the running
    /// animation are stale and ignored.
    pub fn frame(&mut self, handle: FrameHandle, now_ms: f64, viewport: &impl Viewport)
    {
        if self.timer.owns(handle)
        {
            self.step_timer(now_ms, viewport);
        }
        else if matches!(self.motion, Motion::Animating(tween) if tween.handle == handle)
        {
            self.step_tween(now_ms);
        }
        else
        {
            trace!("Ignoring stale frame {}", handle.id());
        }
    }

    /// Reasons the auto-advance timer should not accumulate time right now.
    fn pause_reasons(&self, viewport: &impl Viewport) -> PauseReasons
    {
        let mut reasons = PauseReasons::empty();
        reasons.set(PauseReasons::DRAGGING, self.is_dragging());
        reasons.set(
            PauseReasons::TRANSITION,
            self.is_animating() || self.transition.is_some(),
        );
        reasons.set(
            PauseReasons::SCROLLED,
            viewport.scroll_y() > SCROLL_TOP_TOLERANCE,
        );
        reasons
    }

    /// One frame of the auto-advance loop.
    fn step_timer(&mut self, now_ms: f64, viewport: &impl Viewport)
    {
        let paused = self.pause_reasons(viewport);
        let is_due = self.timer.tick(now_ms, self.page, paused);

        let handle = self.scheduler.schedule();
        self.timer.set_handle(handle);

        if is_due
        {
            debug!("Auto-advancing from page {}", self.page);
            self.tap();
        }
    }

    /// One frame of the running animation.
    fn step_tween(&mut self, now_ms: f64)
    {
        let Motion::Animating(tween) = &mut self.motion
        else
        {
            return;
        };

        let (value, is_done) = tween.sample(now_ms);
        let transition = tween.transition(value);
        let settle = tween.settle;

        if !is_done
        {
            tween.handle = self.scheduler.schedule();
            self.transition = Some(transition);
            return;
        }

        self.motion = Motion::Idle;
        self.transition = None;

        match (settle, transition)
        {
            (Settle::Commit, Transition::Between { from, to, .. }) =>
            {
                debug!("Committed page {from} -> {to}");
                self.page = to;
            }
            (Settle::Revert, Transition::Between { from, to, .. }) =>
            {
                debug!("Reverted page {from} -/-> {to}");
            }
            _ => trace!("Resistance released on page {}", self.page),
        }
    }

    /// Animates the current transition out after a drag ends.
    fn release(&mut self, may_commit: bool)
    {
        match self.transition
        {
            Some(Transition::Resistance { angle }) =>
            {
                self.start_tween(
                    RESISTANCE_RELEASE_MS,
                    angle,
                    0.0,
                    Easing::OutCubic,
                    None,
                    Settle::Release,
                );
            }
            Some(Transition::Between { from, to, progress })
                if may_commit && progress >= COMMIT_THRESHOLD =>
            {
                self.start_tween(
                    ((1.0 - progress) * COMMIT_DURATION_MS).max(MIN_ANIMATION_MS),
                    progress,
                    1.0,
                    Easing::InOutQuad,
                    Some((from, to)),
                    Settle::Commit,
                );
            }
            Some(Transition::Between { from, to, progress }) =>
            {
                self.start_tween(
                    (progress * REVERT_DURATION_MS).max(MIN_ANIMATION_MS),
                    progress,
                    0.0,
                    Easing::InOutQuad,
                    Some((from, to)),
                    Settle::Revert,
                );
            }
            None =>
            {}
        }
    }

    /// Resolves any drag or animation synchronously.
    ///
    /// An interrupted page animation lands on whichever end its progress was
    /// closer to. Drags and resistance are simply dropped.
    fn interrupt(&mut self)
    {
        match mem::replace(&mut self.motion, Motion::Idle)
        {
            Motion::Animating(tween) =>
            {
                self.scheduler.cancel(tween.handle);

                if let Some(Transition::Between { from, to, progress }) = self.transition
                {
                    self.page = if progress >= INTERRUPT_SNAP_THRESHOLD { to } else { from };
                    debug!(
                        "Interrupted {from} -> {to} at {progress:.2}, resolved to {}",
                        self.page
                    );
                }
                self.transition = None;
            }
            Motion::Dragging { .. } => self.transition = None,
            Motion::Idle =>
            {}
        }
    }

    /// Starts an animation, cancelling any previous one first.
    fn start_tween(
        &mut self,
        duration_ms: f64,
        start: f64,
        end: f64,
        easing: Easing,
        pages: Option<(PageIndex, PageIndex)>,
        settle: Settle,
    )
    {
        if let Motion::Animating(previous) = self.motion
        {
            self.scheduler.cancel(previous.handle);
        }

        let tween = Tween {
            handle: self.scheduler.schedule(),
            started_at: None,
            duration_ms,
            start,
            end,
            easing,
            pages,
            settle,
        };

        self.transition = Some(tween.transition(start));
        self.motion = Motion::Animating(tween);
    }
}
