//! Application shell event loop.
//!
//! OS integrations push [`ShellEvent`]s through a [`ShellHandle`]; the shell
//! handles them one at a time on a single task. Deep-link work is spawned so
//! a slow window or router never stalls the loop, and its failures are
//! logged rather than propagated.

use crate::collaborators::{ApplicationWindow, DeepLinkOpener, MenuCommands, ProtocolClient};
use crate::config::ShellConfig;
use crate::deep_link::{DeepLinking, OpenUrlEvent};
use crate::error::ShellResult;
use crate::menu::{MenuFlags, TrayActions, TrayMenuRegistration};
use crate::reactive::Observable;
use crate::tray::{ShellTray, TrayBackend, TrayEvent};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Lifecycle notifications delivered to the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellEvent {
    /// The application finished loading; carries the launch arguments.
    Ready { args: Vec<String> },
    /// The OS asked the application to open a URL.
    OpenUrl(OpenUrlEvent),
    /// Another launch was redirected here; carries its arguments.
    SecondInstance { args: Vec<String> },
    Quit,
}

/// Sender side of the shell's event queue.
#[derive(Clone, Debug)]
pub struct ShellHandle {
    tx: UnboundedSender<ShellEvent>,
    listening: Arc<AtomicBool>,
}

impl ShellHandle {
    /// Queues `event`. Returns `false` once the shell has stopped.
    pub fn send(&self, event: ShellEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Reports that the application finished loading.
    ///
    /// # Parameters
    ///
    /// - `args` - Command-line arguments the application started with
    pub fn ready(&self, args: Vec<String>) -> bool {
        self.send(ShellEvent::Ready { args })
    }

    /// Whether the ready step has finished and deep links are accepted.
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }

    /// Forwards an OS `open-url` event.
    ///
    /// Once the shell is listening, the default is prevented on `event`
    /// before this returns, so the caller can report it back to the OS
    /// synchronously; the link itself is opened on the event loop. Before
    /// that, the event is left untouched and `false` is returned.
    ///
    /// # Parameters
    ///
    /// - `event` - The event as received from the OS
    pub fn open_url(&self, event: &mut OpenUrlEvent) -> bool {
        if !self.is_listening() {
            log::debug!("[DEEP_LINK] open-url before ready, ignoring {}", event.url());
            return false;
        }

        event.prevent_default();
        self.send(ShellEvent::OpenUrl(event.clone()))
    }

    /// Reports that another launch was redirected to this instance.
    ///
    /// # Parameters
    ///
    /// - `args` - Command-line arguments of the redirected launch
    pub fn second_instance(&self, args: Vec<String>) -> bool {
        self.send(ShellEvent::SecondInstance { args })
    }

    pub fn quit(&self) -> bool {
        self.send(ShellEvent::Quit)
    }
}

/// Everything outside this crate the shell talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub protocol_client: Arc<dyn ProtocolClient>,
    pub opener: Arc<dyn DeepLinkOpener>,
    pub window: Arc<dyn ApplicationWindow>,
    pub commands: Arc<dyn MenuCommands>,
}

/// Owns the tray and the deep-link wiring for the lifetime of the app.
pub struct Shell<B: TrayBackend> {
    deep_linking: DeepLinking,
    tray: ShellTray<B>,
    events: UnboundedReceiver<ShellEvent>,
}

impl<B: TrayBackend> Shell<B> {
    /// Wires the deep-link handlers and the tray. Nothing runs until
    /// [`run`](Self::run) is awaited.
    ///
    /// # Parameters
    ///
    /// - `config` - Product name, scheme, tray and auto-update settings
    /// - `collaborators` - Window, opener, protocol client and menu commands
    /// - `extension_items` - Tray items contributed by extensions; the menu is
    ///   rebuilt whenever they change
    /// - `backend` - Creates the OS tray icon
    pub fn new(
        config: &ShellConfig,
        collaborators: Collaborators,
        extension_items: Observable<Vec<TrayMenuRegistration>>,
        backend: B,
    ) -> (Self, ShellHandle) {
        let deep_linking = DeepLinking::new(
            config.scheme.clone(),
            collaborators.protocol_client,
            collaborators.opener,
            collaborators.window.clone(),
        );

        let actions = TrayActions::new(
            config.product_name.clone(),
            collaborators.window,
            collaborators.commands,
        );
        let auto_update_enabled = config.auto_update_enabled;
        let tray = ShellTray::new(
            backend,
            config.tray.clone(),
            config.description.clone(),
            actions,
            extension_items,
            move || MenuFlags {
                auto_update_enabled,
            },
        );

        let (tx, events) = unbounded_channel();
        let handle = ShellHandle {
            tx,
            listening: deep_linking.listening_flag(),
        };
        (
            Self {
                deep_linking,
                tray,
                events,
            },
            handle,
        )
    }

    pub fn deep_linking(&self) -> &DeepLinking {
        &self.deep_linking
    }

    pub fn tray(&self) -> &ShellTray<B> {
        &self.tray
    }

    /// Runs until [`ShellEvent::Quit`] arrives or every handle is dropped.
    ///
    /// A tray that cannot be created is logged and the shell keeps running
    /// without it. The tray icon is destroyed before returning.
    pub async fn run(mut self) -> ShellResult<()> {
        let mut tray_events = match self.tray.start().await {
            Ok(rx) => Some(rx),
            Err(e) => {
                log::error!("[TRAY] {}", e);
                None
            }
        };

        log::info!("[SHELL] event loop started");
        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(ShellEvent::Quit) | None => break,
                    Some(event) => self.handle_event(event),
                },
                Some(event) = next_tray_event(&mut tray_events) => self.tray.handle_event(event),
            }
        }

        self.tray.stop();
        log::info!("[SHELL] event loop stopped");
        Ok(())
    }

    fn handle_event(&self, event: ShellEvent) {
        let deep_linking = self.deep_linking.clone();
        match event {
            ShellEvent::Ready { args } => {
                tokio::spawn(async move {
                    if let Err(e) = deep_linking.on_ready(&args).await {
                        log::error!("[DEEP_LINK] failed to open launch deep link: {}", e);
                    }
                });
            }
            ShellEvent::OpenUrl(mut event) => {
                tokio::spawn(async move {
                    if let Err(e) = deep_linking.on_open_url(&mut event).await {
                        log::error!("[DEEP_LINK] failed to open {}: {}", event.url(), e);
                    }
                });
            }
            ShellEvent::SecondInstance { args } => {
                tokio::spawn(async move {
                    if let Err(e) = deep_linking.on_second_instance(&args).await {
                        log::error!("[DEEP_LINK] second instance handling failed: {}", e);
                    }
                });
            }
            ShellEvent::Quit => {}
        }
    }
}

async fn next_tray_event(rx: &mut Option<UnboundedReceiver<TrayEvent>>) -> Option<TrayEvent> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
