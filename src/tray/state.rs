//! Tray state shared with the tray service task.

use crate::config::TrayConfig;
use crate::menu::TrayMenu;
use crate::tray::event::TrayEvent;
use tokio::sync::mpsc::UnboundedSender;

/// What the OS tray currently displays.
pub struct TrayState {
    /// Unique identifier for this tray icon.
    pub tray_id: String,
    /// The name of the icon, looked up in `icon_theme_path` first.
    pub icon_name: String,
    /// Directory containing the application's tray icon.
    pub icon_theme_path: String,
    pub title: String,
    /// Tooltip text shown when hovering the icon.
    pub tooltip: String,
    /// Last successfully built menu.
    pub menu: TrayMenu,
    /// Channel sender for forwarding clicks to the shell.
    pub event_sender: Option<UnboundedSender<TrayEvent>>,
}

impl TrayState {
    /// Creates the state for a tray with an empty menu and no listener.
    ///
    /// # Parameters
    ///
    /// - `config` - Tray id, icon name and icon directory
    /// - `title` - Name shown for the tray item, usually the product name
    /// - `tooltip` - Text shown when hovering the icon
    pub fn new(config: &TrayConfig, title: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self {
            tray_id: config.tray_id.clone(),
            icon_name: config.icon_name.clone(),
            icon_theme_path: config.icon_theme_path.clone(),
            title: title.into(),
            tooltip: tooltip.into(),
            menu: TrayMenu::default(),
            event_sender: None,
        }
    }

    /// Forwards `event` to the shell, if it is still listening.
    ///
    /// # Parameters
    ///
    /// - `event` - The click to forward
    pub fn emit(&self, event: TrayEvent) {
        if let Some(ref tx) = self.event_sender
            && tx.send(event).is_err()
        {
            log::debug!("[TRAY] event receiver closed");
        }
    }
}
