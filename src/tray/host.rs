//! The application tray: owns the OS tray icon and keeps its menu current.

use crate::config::TrayConfig;
use crate::error::{ShellError, ShellResult};
use crate::menu::{MenuFlags, TrayActions, TrayMenuRegistration, build_tray_menu};
use crate::reactive::{Observable, Subscription};
use crate::tray::backend::{TrayBackend, TrayHandle};
use crate::tray::event::TrayEvent;
use crate::tray::state::TrayState;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

type FlagSource = Arc<dyn Fn() -> MenuFlags + Send + Sync>;

/// Owns the single OS tray icon.
///
/// At most one icon exists between [`ShellTray::start`] and
/// [`ShellTray::stop`]. While it exists, every change of the extension items
/// rebuilds the menu from scratch; a failed rebuild leaves the previous menu
/// in place.
pub struct ShellTray<B: TrayBackend> {
    backend: B,
    config: TrayConfig,
    actions: TrayActions,
    flags: FlagSource,
    extension_items: Observable<Vec<TrayMenuRegistration>>,
    state: Arc<Mutex<TrayState>>,
    handle: Option<Arc<B::Handle>>,
    subscription: Option<Subscription>,
}

impl<B: TrayBackend> ShellTray<B> {
    /// Creates a stopped tray; nothing is shown until [`ShellTray::start`].
    ///
    /// # Parameters
    ///
    /// - `backend` - Publishes the OS tray icon
    /// - `config` - Tray id, icon and click policy
    /// - `tooltip` - Text shown when hovering the icon
    /// - `actions` - Collaborators behind the fixed menu entries
    /// - `extension_items` - Extension-contributed items, followed while running
    /// - `flags` - Read on every rebuild
    pub fn new(
        backend: B,
        config: TrayConfig,
        tooltip: impl Into<String>,
        actions: TrayActions,
        extension_items: Observable<Vec<TrayMenuRegistration>>,
        flags: impl Fn() -> MenuFlags + Send + Sync + 'static,
    ) -> Self {
        let state = TrayState::new(&config, actions.product_name.clone(), tooltip);
        Self {
            backend,
            config,
            actions,
            flags: Arc::new(flags),
            extension_items,
            state: Arc::new(Mutex::new(state)),
            handle: None,
            subscription: None,
        }
    }

    /// Whether the OS tray icon currently exists.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Shared state rendered by the OS tray.
    pub fn state(&self) -> &Arc<Mutex<TrayState>> {
        &self.state
    }

    /// Creates the tray icon and starts following the extension items.
    ///
    /// Returns the receiver of the icon's click events, or
    /// [`ShellError::TrayAlreadyRunning`] if an icon already exists.
    pub async fn start(&mut self) -> ShellResult<UnboundedReceiver<TrayEvent>> {
        if self.handle.is_some() {
            log::warn!("[TRAY] Tray already spawned");
            return Err(ShellError::TrayAlreadyRunning);
        }

        let (tx, rx) = unbounded_channel();
        self.state.lock().event_sender = Some(tx);

        let handle = match self.backend.spawn(self.state.clone()).await {
            Ok(handle) => Arc::new(handle),
            Err(e) => {
                self.state.lock().event_sender = None;
                return Err(e);
            }
        };
        self.handle = Some(handle.clone());

        let state = self.state.clone();
        let actions = self.actions.clone();
        let flags = self.flags.clone();
        self.subscription = Some(self.extension_items.subscribe(
            move |items: &Vec<TrayMenuRegistration>| {
                rebuild(&state, &actions, &flags(), items, handle.as_ref());
            },
        ));

        log::info!("[TRAY] tray started");
        Ok(rx)
    }

    /// Stops following the extension items and removes the icon.
    ///
    /// Calling it again, or before `start`, does nothing.
    pub fn stop(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.dispose();
        }

        let Some(handle) = self.handle.take() else {
            return;
        };
        handle.shutdown();
        self.state.lock().event_sender = None;
        log::info!("[TRAY] tray destroyed");
    }

    /// Acts on a click forwarded by the tray icon.
    pub fn handle_event(&self, event: TrayEvent) {
        match event {
            TrayEvent::MenuActivated { generation, id } => {
                let menu = self.state.lock().menu.clone();
                if menu.generation != generation {
                    log::warn!(
                        "[TRAY] ignoring click on {} from stale menu {} (current {})",
                        id,
                        generation,
                        menu.generation
                    );
                    return;
                }
                if !menu.activate(&id) {
                    log::debug!("[TRAY] menu entry {} has no action", id);
                }
            }
            TrayEvent::IconActivated => {
                if self.config.show_window_on_click {
                    self.actions.show_window();
                }
            }
        }
    }
}

impl<B: TrayBackend> Drop for ShellTray<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn rebuild(
    state: &Mutex<TrayState>,
    actions: &TrayActions,
    flags: &MenuFlags,
    items: &[TrayMenuRegistration],
    handle: &impl TrayHandle,
) {
    let generation = state.lock().menu.generation + 1;
    match build_tray_menu(items, actions, flags, generation) {
        Ok(menu) => {
            state.lock().menu = menu;
            handle.refresh();
        }
        Err(e) => log::error!("[TRAY]: building failed: {}", e),
    }
}
