//! Interfaces to the parts of the application this crate only talks to.
//!
//! The window, the deep-link router, the OS protocol registration and the
//! menu commands all live elsewhere; the shell reaches them through these
//! traits so it can be driven by any host (and by fakes in tests).

use crate::error::ShellResult;
use async_trait::async_trait;

/// Registers the process as the OS handler for a custom URL scheme.
pub trait ProtocolClient: Send + Sync {
    /// Returns `true` when the OS accepted the registration.
    fn set_as_default_protocol_client(&self, scheme: &str) -> bool;
}

/// Routes a deep link into the application.
#[async_trait]
pub trait DeepLinkOpener: Send + Sync {
    async fn open(&self, url: &str) -> ShellResult<()>;
}

/// The main application window.
#[async_trait]
pub trait ApplicationWindow: Send + Sync {
    /// Shows and focuses the window, creating it if needed.
    async fn show(&self) -> ShellResult<()>;
}

/// Actions reachable from the fixed tray menu entries.
#[async_trait]
pub trait MenuCommands: Send + Sync {
    fn navigate_to_preferences(&self);

    fn show_about(&self);

    fn stop_services_and_exit_app(&self);

    async fn check_for_updates(&self) -> ShellResult<()>;
}
