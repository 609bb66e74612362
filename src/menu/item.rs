//! Menu item data structures.
//!
//! [`TrayMenuRegistration`] is what an extension contributes to the tray;
//! [`MenuNode`] and [`TrayMenu`] are the built menu that the tray displays.

use std::fmt;
use std::sync::Arc;

/// Click handler of an extension item. Receives the item it belongs to.
pub type ExtensionClick = Arc<dyn Fn(&TrayMenuRegistration) + Send + Sync>;

/// Action bound to a built menu entry.
pub type MenuAction = Arc<dyn Fn() + Send + Sync>;

/// Visual kind of a contributed item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ItemKind {
    #[default]
    Normal,
    Separator,
    Checkbox {
        checked: bool,
    },
}

/// A tray menu entry contributed by an extension.
#[derive(Clone)]
pub struct TrayMenuRegistration {
    /// Optional identifier chosen by the extension.
    pub id: Option<String>,
    /// Display text. Required for everything except separators.
    pub label: Option<String>,
    pub tool_tip: Option<String>,
    pub enabled: bool,
    pub visible: bool,
    pub kind: ItemKind,
    pub click: Option<ExtensionClick>,
    /// Child entries; `Some` turns the entry into a submenu.
    pub submenu: Option<Vec<TrayMenuRegistration>>,
}

impl Default for TrayMenuRegistration {
    fn default() -> Self {
        Self {
            id: None,
            label: None,
            tool_tip: None,
            enabled: true,
            visible: true,
            kind: ItemKind::Normal,
            click: None,
            submenu: None,
        }
    }
}

impl TrayMenuRegistration {
    /// A plain item with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn separator() -> Self {
        Self {
            kind: ItemKind::Separator,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_tool_tip(mut self, tool_tip: impl Into<String>) -> Self {
        self.tool_tip = Some(tool_tip.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn checkbox(mut self, checked: bool) -> Self {
        self.kind = ItemKind::Checkbox { checked };
        self
    }

    pub fn on_click(
        mut self,
        click: impl Fn(&TrayMenuRegistration) + Send + Sync + 'static,
    ) -> Self {
        self.click = Some(Arc::new(click));
        self
    }

    pub fn with_submenu(mut self, submenu: Vec<TrayMenuRegistration>) -> Self {
        self.submenu = Some(submenu);
        self
    }
}

impl fmt::Debug for TrayMenuRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrayMenuRegistration")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("enabled", &self.enabled)
            .field("visible", &self.visible)
            .field("kind", &self.kind)
            .field("click", &self.click.is_some())
            .field("submenu", &self.submenu)
            .finish()
    }
}

/// One entry of a built tray menu.
#[derive(Clone)]
pub enum MenuNode {
    Item {
        /// Position path, e.g. `"3"` or `"3/1"`; unique within one menu.
        id: String,
        label: String,
        tool_tip: Option<String>,
        enabled: bool,
        visible: bool,
        /// `Some` for checkbox entries.
        checked: Option<bool>,
        action: Option<MenuAction>,
        submenu: Vec<MenuNode>,
    },
    Separator,
}

impl MenuNode {
    pub fn label(&self) -> Option<&str> {
        match self {
            MenuNode::Item { label, .. } => Some(label),
            MenuNode::Separator => None,
        }
    }

    fn find<'a>(nodes: &'a [MenuNode], target: &str) -> Option<&'a MenuNode> {
        nodes.iter().find_map(|node| match node {
            MenuNode::Item { id, .. } if id == target => Some(node),
            MenuNode::Item { submenu, .. } => Self::find(submenu, target),
            MenuNode::Separator => None,
        })
    }
}

impl fmt::Debug for MenuNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuNode::Item {
                id,
                label,
                action,
                submenu,
                ..
            } => f
                .debug_struct("Item")
                .field("id", id)
                .field("label", label)
                .field("action", &action.is_some())
                .field("submenu", submenu)
                .finish(),
            MenuNode::Separator => f.write_str("Separator"),
        }
    }
}

/// A built menu, tagged with the rebuild that produced it.
#[derive(Clone, Debug, Default)]
pub struct TrayMenu {
    pub generation: u64,
    pub items: Vec<MenuNode>,
}

impl TrayMenu {
    /// Top-level labels, separators rendered as `"---"`.
    pub fn labels(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|node| node.label().unwrap_or("---").to_string())
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&MenuNode> {
        MenuNode::find(&self.items, id)
    }

    /// Looks up the first top-level entry with this label.
    pub fn find_by_label(&self, label: &str) -> Option<&MenuNode> {
        self.items.iter().find(|node| node.label() == Some(label))
    }

    /// Runs the action of entry `id`. Returns `false` if there is none.
    pub fn activate(&self, id: &str) -> bool {
        match self.find(id) {
            Some(MenuNode::Item {
                action: Some(action),
                ..
            }) => {
                action();
                true
            }
            _ => false,
        }
    }
}
