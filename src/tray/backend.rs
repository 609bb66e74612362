//! OS tray abstraction.

use crate::error::ShellResult;
use crate::tray::state::TrayState;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Creates the OS tray icon.
#[async_trait]
pub trait TrayBackend: Send + Sync {
    type Handle: TrayHandle;

    /// Publishes a tray icon that renders `state`.
    ///
    /// Runs on the shell's runtime and must not block it.
    async fn spawn(&self, state: Arc<Mutex<TrayState>>) -> ShellResult<Self::Handle>;
}

/// The live OS tray icon.
///
/// Both methods are called from the shell's event loop and only schedule
/// work; neither waits for the tray service.
pub trait TrayHandle: Send + Sync + 'static {
    /// Re-reads the shared state after it changed.
    fn refresh(&self);

    /// Removes the icon from the tray.
    fn shutdown(&self);
}
