//! Tray menu data structures and the menu builder.
//!
//! Extensions contribute [`TrayMenuRegistration`]s; [`build_tray_menu`]
//! combines them with the fixed application entries into a [`TrayMenu`].

pub mod builder;
pub mod item;

pub use builder::{MenuFlags, TrayActions, build_tray_menu};
pub use item::{ExtensionClick, ItemKind, MenuAction, MenuNode, TrayMenu, TrayMenuRegistration};
