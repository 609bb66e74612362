//! Shell configuration.
//!
//! Holds the product identity, the deep-link scheme, feature flags read at
//! menu build time, and the tray icon settings. Loaded from a JSON file;
//! every field has a default so a partial file is valid.

use crate::error::ShellResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Icon file name (without extension) shipped with the application.
pub const TRAY_ICON_NAME: &str = "trayIconTemplate";

/// Top-level configuration for the shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ShellConfig {
    /// Product name used in "Open <product>" and "About <product>".
    pub product_name: String,
    /// Shown as the tray tooltip.
    pub description: String,
    /// Custom URL scheme, without the `://` suffix.
    pub scheme: String,
    /// Adds the "Check for updates" tray entry when true.
    pub auto_update_enabled: bool,
    pub tray: TrayConfig,
    pub logging: LoggingConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            product_name: "OpenLens".to_string(),
            description: "OpenLens - Open Source IDE for Kubernetes".to_string(),
            scheme: crate::deep_link::LENS_SCHEME.to_string(),
            auto_update_enabled: false,
            tray: TrayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Loads the configuration from a JSON file.
    ///
    /// A missing file yields the defaults; any other I/O error or malformed
    /// JSON is returned.
    pub fn load(path: impl AsRef<Path>) -> ShellResult<Self> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("[CONFIG] {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config: Self = serde_json::from_str(&raw)?;
        log::debug!("[CONFIG] loaded {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// `<config dir>/lens-shell/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lens-shell").join("config.json"))
    }

    /// Prefix every deep link must start with, e.g. `lens://`.
    pub fn deep_link_prefix(&self) -> String {
        format!("{}://", self.scheme)
    }
}

/// Tray icon settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TrayConfig {
    /// StatusNotifierItem id.
    pub tray_id: String,
    /// Icon name looked up in `icon_theme_path` (or the system theme).
    pub icon_name: String,
    /// Directory containing the tray icon.
    pub icon_theme_path: String,
    /// Left-click on the icon itself shows the main window.
    pub show_window_on_click: bool,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            tray_id: "lens".to_string(),
            icon_name: TRAY_ICON_NAME.to_string(),
            icon_theme_path: String::new(),
            show_window_on_click: cfg!(target_os = "windows"),
        }
    }
}

impl TrayConfig {
    /// Directory holding the tray icon relative to the static files directory.
    ///
    /// Development builds read it from the build tree, packaged builds from
    /// the `icons` directory copied next to the static files.
    pub fn icon_theme_path_for(static_files_dir: impl AsRef<Path>, is_development: bool) -> PathBuf {
        let dir = static_files_dir.as_ref();
        if is_development {
            dir.join("..").join("build").join("tray")
        } else {
            dir.join("icons")
        }
    }
}

/// Logger settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    /// `env_logger` filter used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
