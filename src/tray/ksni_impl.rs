//! KSNI tray bridge implementation.
//!
//! Publishes the tray as a StatusNotifierItem through the ksni library. The
//! ksni service task never runs menu actions; activations are forwarded as
//! [`TrayEvent`]s.

use crate::error::{ShellError, ShellResult};
use crate::menu::MenuNode;
use crate::tray::backend::{TrayBackend, TrayHandle};
use crate::tray::event::TrayEvent;
use crate::tray::state::TrayState;
use crate::task::spawn_detached;
use async_trait::async_trait;
use ksni::TrayMethods;
use ksni::menu::{CheckmarkItem, MenuItem, StandardItem, SubMenu};
use parking_lot::Mutex;
use std::sync::Arc;

/// Implementation of the `ksni::Tray` trait over the shared tray state.
pub struct KsniTray {
    pub state: Arc<Mutex<TrayState>>,
}

impl ksni::Tray for KsniTray {
    fn id(&self) -> String {
        self.state.lock().tray_id.clone()
    }

    fn icon_name(&self) -> String {
        self.state.lock().icon_name.clone()
    }

    fn icon_theme_path(&self) -> String {
        self.state.lock().icon_theme_path.clone()
    }

    fn title(&self) -> String {
        self.state.lock().title.clone()
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        let state = self.state.lock();
        ksni::ToolTip {
            icon_name: String::new(),
            icon_pixmap: vec![],
            title: state.title.clone(),
            description: state.tooltip.clone(),
        }
    }

    fn activate(&mut self, _x: i32, _y: i32) {
        self.state.lock().emit(TrayEvent::IconActivated);
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        let state = self.state.lock();
        state
            .menu
            .items
            .iter()
            .map(|node| build_menu_item(node, state.menu.generation))
            .collect()
    }
}

/// Converts a built menu node into a ksni menu item.
fn build_menu_item(node: &MenuNode, generation: u64) -> MenuItem<KsniTray> {
    match node {
        MenuNode::Separator => MenuItem::Separator,
        MenuNode::Item {
            label,
            enabled,
            visible,
            submenu,
            ..
        } if !submenu.is_empty() => SubMenu {
            label: label.clone(),
            enabled: *enabled,
            visible: *visible,
            submenu: submenu
                .iter()
                .map(|child| build_menu_item(child, generation))
                .collect(),
            ..Default::default()
        }
        .into(),
        MenuNode::Item {
            id,
            label,
            enabled,
            visible,
            checked: Some(checked),
            ..
        } => CheckmarkItem {
            label: label.clone(),
            enabled: *enabled,
            visible: *visible,
            checked: *checked,
            activate: forward_activation(id.clone(), generation),
            ..Default::default()
        }
        .into(),
        MenuNode::Item {
            id,
            label,
            enabled,
            visible,
            ..
        } => StandardItem {
            label: label.clone(),
            enabled: *enabled,
            visible: *visible,
            activate: forward_activation(id.clone(), generation),
            ..Default::default()
        }
        .into(),
    }
}

fn forward_activation(id: String, generation: u64) -> Box<dyn Fn(&mut KsniTray) + Send> {
    Box::new(move |this: &mut KsniTray| {
        this.state.lock().emit(TrayEvent::MenuActivated {
            generation,
            id: id.clone(),
        });
    })
}

/// Spawns StatusNotifierItem trays over D-Bus.
///
/// Uses ksni's async API on the shell's tokio runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct KsniBackend;

#[async_trait]
impl TrayBackend for KsniBackend {
    type Handle = KsniHandle;

    async fn spawn(&self, state: Arc<Mutex<TrayState>>) -> ShellResult<KsniHandle> {
        let tray = KsniTray { state };
        tray.spawn()
            .await
            .map(|handle| KsniHandle { handle })
            .map_err(|e| ShellError::TraySpawn(e.to_string()))
    }
}

/// A running ksni tray.
pub struct KsniHandle {
    handle: ksni::Handle<KsniTray>,
}

impl TrayHandle for KsniHandle {
    fn refresh(&self) {
        let handle = self.handle.clone();
        spawn_detached("TRAY", async move {
            // An empty update makes ksni re-read the state and emit change signals.
            if handle.update(|_tray: &mut KsniTray| {}).await.is_none() {
                log::warn!("[TRAY] tray service is gone, menu not refreshed");
            }
        });
    }

    /// Requests shutdown and returns; the service winds down on its own task.
    fn shutdown(&self) {
        let handle = self.handle.clone();
        spawn_detached("TRAY", async move {
            handle.shutdown().await;
            log::debug!("[TRAY] tray service stopped");
        });
    }
}
