//! Tray menu construction.
//!
//! Layout, top to bottom: "Open <product>", "Preferences", "Check for
//! updates" (only with auto-update enabled), the extension items, "About
//! <product>", a separator, "Quit App".

use crate::collaborators::{ApplicationWindow, MenuCommands};
use crate::error::{ShellError, ShellResult};
use crate::menu::item::{ItemKind, MenuAction, MenuNode, TrayMenu, TrayMenuRegistration};
use crate::task::spawn_detached;
use std::sync::Arc;

/// Flags read once per build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuFlags {
    pub auto_update_enabled: bool,
}

/// Collaborators behind the fixed menu entries.
#[derive(Clone)]
pub struct TrayActions {
    pub product_name: String,
    pub window: Arc<dyn ApplicationWindow>,
    pub commands: Arc<dyn MenuCommands>,
}

impl TrayActions {
    /// Bundles the collaborators the fixed entries call into.
    ///
    /// # Parameters
    ///
    /// - `product_name` - Used in "Open <product>" and "About <product>"
    /// - `window` - The main application window
    /// - `commands` - Preferences, about, update check and quit
    pub fn new(
        product_name: impl Into<String>,
        window: Arc<dyn ApplicationWindow>,
        commands: Arc<dyn MenuCommands>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            window,
            commands,
        }
    }

    /// Shows the main window without waiting for it.
    pub fn show_window(&self) {
        let window = self.window.clone();
        let product_name = self.product_name.clone();
        spawn_detached("TRAY", async move {
            if let Err(e) = window.show().await {
                log::error!("[TRAY]: Failed to open {}: {}", product_name, e);
            }
        });
    }

    fn check_for_updates(&self) {
        let window = self.window.clone();
        let commands = self.commands.clone();
        spawn_detached("TRAY", async move {
            let result = match commands.check_for_updates().await {
                Ok(()) => window.show().await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                log::error!("[TRAY]: Failed to check for updates: {}", e);
            }
        });
    }

    fn show_about(&self) {
        let window = self.window.clone();
        let commands = self.commands.clone();
        let product_name = self.product_name.clone();
        spawn_detached("TRAY", async move {
            match window.show().await {
                Ok(()) => commands.show_about(),
                Err(e) => log::error!("[TRAY]: Failed to show {} About view: {}", product_name, e),
            }
        });
    }
}

fn action(f: impl Fn() + Send + Sync + 'static) -> MenuAction {
    Arc::new(f)
}

fn fixed_item(id: usize, label: String, action: MenuAction) -> MenuNode {
    MenuNode::Item {
        id: id.to_string(),
        label,
        tool_tip: None,
        enabled: true,
        visible: true,
        checked: None,
        action: Some(action),
        submenu: Vec::new(),
    }
}

/// Builds the complete tray menu from scratch.
///
/// Fails if an extension item cannot be represented; the caller keeps
/// whatever menu it displayed before.
pub fn build_tray_menu(
    extension_items: &[TrayMenuRegistration],
    actions: &TrayActions,
    flags: &MenuFlags,
    generation: u64,
) -> ShellResult<TrayMenu> {
    let mut items = Vec::with_capacity(extension_items.len() + 6);

    let open = actions.clone();
    items.push(fixed_item(
        items.len(),
        format!("Open {}", actions.product_name),
        action(move || open.show_window()),
    ));

    let commands = actions.commands.clone();
    items.push(fixed_item(
        items.len(),
        "Preferences".to_string(),
        action(move || commands.navigate_to_preferences()),
    ));

    if flags.auto_update_enabled {
        let update = actions.clone();
        items.push(fixed_item(
            items.len(),
            "Check for updates".to_string(),
            action(move || update.check_for_updates()),
        ));
    }

    for item in extension_items {
        let id = items.len().to_string();
        items.push(convert_extension_item(item, id)?);
    }

    let about = actions.clone();
    items.push(fixed_item(
        items.len(),
        format!("About {}", actions.product_name),
        action(move || about.show_about()),
    ));

    items.push(MenuNode::Separator);

    let commands = actions.commands.clone();
    items.push(fixed_item(
        items.len(),
        "Quit App".to_string(),
        action(move || commands.stop_services_and_exit_app()),
    ));

    Ok(TrayMenu { generation, items })
}

fn convert_extension_item(item: &TrayMenuRegistration, id: String) -> ShellResult<MenuNode> {
    let checked = match item.kind {
        ItemKind::Separator => return Ok(MenuNode::Separator),
        ItemKind::Normal => None,
        ItemKind::Checkbox { checked } => Some(checked),
    };

    let label = match item.label.as_deref() {
        Some(label) if !label.trim().is_empty() => label.to_string(),
        _ => {
            return Err(ShellError::InvalidMenuItem {
                path: id,
                reason: "missing label".to_string(),
            });
        }
    };

    let submenu = match &item.submenu {
        Some(children) => children
            .iter()
            .enumerate()
            .map(|(index, child)| convert_extension_item(child, format!("{id}/{index}")))
            .collect::<ShellResult<Vec<_>>>()?,
        None => Vec::new(),
    };

    let action = item.click.as_ref().map(|click| {
        let click = click.clone();
        let descriptor = item.clone();
        action(move || click(&descriptor))
    });

    Ok(MenuNode::Item {
        id,
        label,
        tool_tip: item.tool_tip.clone(),
        enabled: item.enabled,
        visible: item.visible,
        checked,
        action,
        submenu,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeCommands, FakeWindow, Journal, wait_for};
    use parking_lot::Mutex;

    fn actions(journal: &Journal) -> TrayActions {
        TrayActions::new(
            "OpenLens",
            Arc::new(FakeWindow {
                journal: journal.clone(),
                fail: false,
            }),
            Arc::new(FakeCommands {
                journal: journal.clone(),
            }),
        )
    }

    #[test]
    fn test_fixed_layout_without_auto_update() {
        let journal = Journal::default();
        let menu = build_tray_menu(&[], &actions(&journal), &MenuFlags::default(), 0).unwrap();

        assert_eq!(
            menu.labels(),
            vec!["Open OpenLens", "Preferences", "About OpenLens", "---", "Quit App"]
        );
    }

    #[test]
    fn test_auto_update_adds_single_entry_before_extensions() {
        let journal = Journal::default();
        let extension = [TrayMenuRegistration::new("Clusters")];
        let flags = MenuFlags {
            auto_update_enabled: true,
        };

        let menu = build_tray_menu(&extension, &actions(&journal), &flags, 0).unwrap();
        let labels = menu.labels();

        assert_eq!(
            labels,
            vec![
                "Open OpenLens",
                "Preferences",
                "Check for updates",
                "Clusters",
                "About OpenLens",
                "---",
                "Quit App"
            ]
        );
        assert_eq!(labels.iter().filter(|l| *l == "Check for updates").count(), 1);
    }

    #[test]
    fn test_extension_click_receives_its_descriptor() {
        let journal = Journal::default();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let extension = [TrayMenuRegistration::new("Port forwards")
            .with_id("port-forwards")
            .on_click(move |item| sink.lock().push(item.id.clone()))];

        let menu =
            build_tray_menu(&extension, &actions(&journal), &MenuFlags::default(), 0).unwrap();

        assert!(menu.activate("2"));
        assert_eq!(*received.lock(), vec![Some("port-forwards".to_string())]);
    }

    #[test]
    fn test_submenus_are_converted_depth_first() {
        let journal = Journal::default();
        let clicked = Arc::new(Mutex::new(Vec::new()));
        let sink = clicked.clone();
        let extension = [TrayMenuRegistration::new("Workloads").with_submenu(vec![
            TrayMenuRegistration::new("Pods"),
            TrayMenuRegistration::separator(),
            TrayMenuRegistration::new("Deployments")
                .on_click(move |item| sink.lock().push(item.label.clone())),
        ])];

        let menu =
            build_tray_menu(&extension, &actions(&journal), &MenuFlags::default(), 0).unwrap();

        let Some(MenuNode::Item { submenu, action, .. }) = menu.find("2") else {
            panic!("submenu missing");
        };
        assert!(action.is_none());
        assert_eq!(submenu.len(), 3);
        assert!(matches!(submenu[1], MenuNode::Separator));
        assert!(!menu.activate("2/0"));
        assert!(menu.activate("2/2"));
        assert_eq!(*clicked.lock(), vec![Some("Deployments".to_string())]);
    }

    #[test]
    fn test_missing_label_fails_build() {
        let journal = Journal::default();
        let extension = [TrayMenuRegistration::new("Ok").with_submenu(vec![
            TrayMenuRegistration::default(),
        ])];

        let result = build_tray_menu(&extension, &actions(&journal), &MenuFlags::default(), 0);

        match result {
            Err(ShellError::InvalidMenuItem { path, .. }) => assert_eq!(path, "2/0"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_preferences_and_quit_run_commands() {
        let journal = Journal::default();
        let menu = build_tray_menu(&[], &actions(&journal), &MenuFlags::default(), 0).unwrap();

        assert!(menu.activate("1"));
        assert!(menu.activate("4"));
        assert_eq!(journal.entries(), vec!["preferences", "quit"]);
    }

    #[tokio::test]
    async fn test_about_shows_window_first() {
        let journal = Journal::default();
        let menu = build_tray_menu(&[], &actions(&journal), &MenuFlags::default(), 0).unwrap();

        let Some(MenuNode::Item { id, .. }) = menu.find_by_label("About OpenLens") else {
            panic!("about entry missing");
        };
        assert!(menu.activate(id));
        wait_for(&journal, "about").await;

        assert_eq!(journal.entries(), vec!["show:start", "show:done", "about"]);
    }

    #[tokio::test]
    async fn test_check_for_updates_then_shows_window() {
        let journal = Journal::default();
        let flags = MenuFlags {
            auto_update_enabled: true,
        };
        let menu = build_tray_menu(&[], &actions(&journal), &flags, 0).unwrap();

        assert!(menu.activate("2"));
        wait_for(&journal, "show:done").await;

        assert_eq!(
            journal.entries(),
            vec!["check-for-updates", "show:start", "show:done"]
        );
    }
}
