//! Frame scheduling for the viewer's animation loops.
//!
//! A scheduled frame fires once, on the next display tick, and is then
//! consumed. Loops that want to keep running schedule again from inside the
//! frame, so stopping a loop only means not scheduling any more frames.

/// Handle identifying one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle
{
    /// Wraps a raw frame id.
    #[must_use]
    pub const fn new(id: u64) -> Self
    {
        Self(id)
    }

    /// Raw frame id.
    #[must_use]
    pub const fn id(self) -> u64
    {
        self.0
    }
}

/// Display-refresh scheduling primitive.
pub trait FrameScheduler
{
    /// Requests a callback on the next frame.
    fn schedule(&mut self) -> FrameHandle;

    /// Withdraws a pending request. Unknown or already fired handles are
    /// ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Scheduler driven by the host's periodic tick.
///
/// The host drains [`TickScheduler::take_due`] on every tick and delivers each
/// handle to the viewer together with the tick timestamp.
#[derive(Debug, Default)]
pub struct TickScheduler
{
    /// Id given to the next scheduled frame
    next_id: u64,
    /// Frames waiting for the next tick, in scheduling order
    pending: Vec<FrameHandle>,
}

impl TickScheduler
{
    /// Creates a scheduler with nothing pending.
    #[must_use]
    pub const fn new() -> Self
    {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Removes and returns every frame due on this tick.
    pub fn take_due(&mut self) -> Vec<FrameHandle>
    {
        std::mem::take(&mut self.pending)
    }

    /// Number of frames waiting for the next tick.
    #[must_use]
    pub const fn pending_count(&self) -> usize
    {
        self.pending.len()
    }

    /// Whether the given frame is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, handle: FrameHandle) -> bool
    {
        self.pending.contains(&handle)
    }
}

impl FrameScheduler for TickScheduler
{
    fn schedule(&mut self) -> FrameHandle
    {
        let handle = FrameHandle::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle)
    {
        self.pending.retain(|pending| *pending != handle);
    }
}
