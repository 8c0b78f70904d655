//! User Interface module for the album viewer.
//!
//! Contains components for rendering and managing the terminal UI,
//! including event handling, application state, and UI components.
mod app;
mod artwork;
mod event;
mod guard;
pub mod logging;
mod palette;
mod track_list;

pub use app::{App, AppMode, CELL_WIDTH_PX, LINE_HEIGHT_PX};
pub use event::{Event, EventHandler};
pub use guard::{TerminalGuard, init_panic_hook, init_tui};
pub use palette::Palette;
