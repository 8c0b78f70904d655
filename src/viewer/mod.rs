//! Album artwork viewer.
//!
//! The interaction and animation core of the application: four artwork pages
//! turned by dragging, tapping or an auto-advance timer, with flip and slide
//! transitions and resistance at the edges. It knows nothing about terminals;
//! the host feeds it pointer events, frames and viewport geometry.
mod page;
mod page_viewer;
mod scene;
mod scheduler;
mod timer;
mod transition;

pub use page::{PAGE_COUNT, PageIndex};
pub use page_viewer::{
    COMMIT_THRESHOLD, DOT_ACTIVE_MAX_WIDTH, DOT_WIDTH, PageViewer, PointerEvent,
    TAP_THRESHOLD_PX, Viewport, ViewerState, ViewportSnapshot,
};
pub use scene::{Scene, scene};
pub use scheduler::{FrameHandle, FrameScheduler, TickScheduler};
pub use timer::{AUTO_ADVANCE_PERIOD_MS, AutoAdvance, PauseReasons};
pub use transition::{
    Easing, MAX_RESISTANCE_DEG, Transition, TransitionKind, kind_of, resistance_angle,
};
