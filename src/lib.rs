//! Album Viewer Library
//!
//! A library for presenting a music album in a terminal: page-turning
//! artwork, a track list with a player, lyrics and credits, all driven by a
//! JSON configuration.
//!
//! # Features
//!
//! - Artwork viewer with drag, tap and auto-advance page turns
//! - Flip and slide transitions with edge resistance
//! - Track list and player transport with lyrics
//! - Configuration from a local file or an HTTP(S) URL
//!
//! # Modules
//!
//! - `viewer`: The terminal-agnostic page viewer state machine
//! - `config`: Album configuration document
//! - `player`: Playlist and transport state
//! - `client`: HTTP client for remote configurations
//! - `ui`: Terminal user interface components and event handling
pub mod client;
pub mod config;
pub mod player;
pub mod ui;
pub mod viewer;

#[cfg(test)]
mod test_utils;

pub use config::AlbumConfig;
pub use ui::logging;
pub use ui::{App, AppMode, Event, EventHandler, TerminalGuard, init_panic_hook, init_tui};
