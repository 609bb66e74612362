//! Central error type for the shell wiring.
//!
//! None of these errors is fatal to the host process: every caller in this
//! crate that swallows one logs it with its component prefix first.

use thiserror::Error;

/// Main error type for shell operations.
#[derive(Error, Debug)]
pub enum ShellError {
    /// Registering as the OS handler for the custom scheme failed
    #[error("Protocol client registration failed for {scheme}://")]
    ProtocolRegistration { scheme: String },

    /// The external open-handler failed to handle a deep link
    #[error("Failed to open deep link {url}: {reason}")]
    DeepLinkOpen { url: String, reason: String },

    /// Showing or focusing the main window failed
    #[error("Window error: {0}")]
    Window(String),

    /// A contributed tray menu item cannot be turned into a menu entry
    #[error("Invalid tray menu item at {path}: {reason}")]
    InvalidMenuItem { path: String, reason: String },

    /// The OS tray icon could not be created
    #[error("Failed to spawn tray: {0}")]
    TraySpawn(String),

    /// A second tray icon was requested while one is alive
    #[error("Tray already spawned")]
    TrayAlreadyRunning,

    /// Reading the configuration file failed
    #[error("Config I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The configuration file is not valid JSON for `ShellConfig`
    #[error("Config JSON error: {0}")]
    ConfigJson(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<String> for ShellError {
    fn from(msg: String) -> Self {
        ShellError::Other(msg)
    }
}

impl From<&str> for ShellError {
    fn from(msg: &str) -> Self {
        ShellError::Other(msg.to_string())
    }
}

/// Type alias for Results using ShellError.
pub type ShellResult<T> = Result<T, ShellError>;
