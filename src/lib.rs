//! # lens-shell
//!
//! Deep-link dispatch and system tray wiring for the Lens desktop shell.
//!
//! ## Overview
//!
//! The crate covers the path from "something outside the application asked
//! for something" to "the application does it":
//!
//! - `lens://` links in launch arguments, OS `open-url` events and second
//!   instance launches are routed to a [`DeepLinkOpener`]
//!   ([`deep_link`]).
//! - The tray menu is built from fixed entries plus extension-contributed
//!   items and rebuilt whenever those items change ([`menu`], [`tray`]).
//! - [`Shell`] owns both for the lifetime of the application and runs their
//!   handlers on one event loop.
//!
//! On Linux the tray is published as a StatusNotifierItem through
//! [ksni](https://crates.io/crates/ksni) (default `ksni` feature). Other
//! hosts can plug in their own [`TrayBackend`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use lens_shell::{Observable, Shell, ShellConfig, tray::KsniBackend};
//!
//! let config = ShellConfig::load(ShellConfig::default_path().unwrap())?;
//! lens_shell::logging::init(&config.logging);
//!
//! let extension_items = Observable::default();
//! let (shell, handle) = Shell::new(&config, collaborators, extension_items.clone(), KsniBackend);
//!
//! handle.ready(std::env::args().collect());
//! shell.run().await?;
//! ```

pub mod collaborators;
pub mod config;
pub mod deep_link;
pub mod error;
pub mod logging;
pub mod menu;
pub mod reactive;
pub mod shell;
mod task;
pub mod tray;

#[cfg(test)]
mod testing;

pub use collaborators::{ApplicationWindow, DeepLinkOpener, MenuCommands, ProtocolClient};
pub use config::{LoggingConfig, ShellConfig, TrayConfig};
pub use deep_link::{DeepLink, DeepLinking, OpenUrlEvent, extract_deep_link};
pub use error::{ShellError, ShellResult};
pub use menu::{MenuNode, TrayMenu, TrayMenuRegistration, build_tray_menu};
pub use reactive::{Observable, Subscription};
pub use shell::{Collaborators, Shell, ShellEvent, ShellHandle};
pub use tray::{ShellTray, TrayBackend, TrayEvent, TrayHandle};
