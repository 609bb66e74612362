//! Deep linking.
//!
//! This module extracts `lens://` links from launch arguments and routes them
//! to the application on startup, on OS `open-url` events and when a second
//! instance is launched.

pub mod dispatch;
pub mod extract;

pub use dispatch::{DeepLinking, OpenUrlEvent};
pub use extract::{DeepLink, LENS_SCHEME, extract_deep_link, extract_deep_link_for};
