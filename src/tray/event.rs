//! Events emitted by the tray icon.
//!
//! The tray service runs on its own task; it only forwards these events to
//! the shell, which acts on them on its event loop.

/// Events emitted by the tray icon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrayEvent {
    /// A menu entry was clicked in the menu built by rebuild `generation`.
    MenuActivated { generation: u64, id: String },
    /// The icon itself was clicked (primary activation).
    IconActivated,
}
