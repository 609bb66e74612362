//! Tray core functionality.
//!
//! This module contains the application tray, its shared state, the events
//! it forwards, and the bridge to the KSNI library.

pub mod backend;
pub mod event;
pub mod host;
#[cfg(feature = "ksni")]
pub mod ksni_impl;
pub mod state;

pub use backend::{TrayBackend, TrayHandle};
pub use event::TrayEvent;
pub use host::ShellTray;
#[cfg(feature = "ksni")]
pub use ksni_impl::{KsniBackend, KsniHandle, KsniTray};
pub use state::TrayState;
