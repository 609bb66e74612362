//! Deep-link dispatch for the three lifecycle triggers.
//!
//! Application ready, the OS `open-url` event and a second application
//! instance all converge on [`DeepLinkOpener::open`]. Dispatch failures are
//! returned to the caller; only the protocol registration outcome is handled
//! (logged) here.

use crate::collaborators::{ApplicationWindow, DeepLinkOpener, ProtocolClient};
use crate::deep_link::extract::{DeepLink, extract_deep_link_for};
use crate::error::ShellResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// An OS request to open a URL with this application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenUrlEvent {
    url: String,
    default_prevented: bool,
}

impl OpenUrlEvent {
    /// Creates an event whose default handling has not been prevented yet.
    ///
    /// # Parameters
    ///
    /// - `url` - The URL the OS asked the application to open
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            default_prevented: false,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Tells the platform not to run its own handling for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Wires deep links from the OS into the application.
#[derive(Clone)]
pub struct DeepLinking {
    scheme: String,
    protocol_client: Arc<dyn ProtocolClient>,
    opener: Arc<dyn DeepLinkOpener>,
    window: Arc<dyn ApplicationWindow>,
    listening: Arc<AtomicBool>,
}

impl DeepLinking {
    /// Creates the deep-link wiring. Nothing is handled until
    /// [`on_ready`](Self::on_ready) has run.
    ///
    /// # Parameters
    ///
    /// - `scheme` - The URL scheme to register and extract, e.g. `"lens"`
    /// - `protocol_client` - Registers the application as the scheme handler
    /// - `opener` - Receives every deep link that is dispatched
    /// - `window` - The main window, shown on a second instance launch
    pub fn new(
        scheme: impl Into<String>,
        protocol_client: Arc<dyn ProtocolClient>,
        opener: Arc<dyn DeepLinkOpener>,
        window: Arc<dyn ApplicationWindow>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            protocol_client,
            opener,
            window,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Whether `open-url` and second-instance events are being handled.
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }

    /// Shared flag behind [`is_listening`](Self::is_listening).
    pub(crate) fn listening_flag(&self) -> Arc<AtomicBool> {
        self.listening.clone()
    }

    /// Finds the first argument starting with this scheme's prefix.
    ///
    /// # Parameters
    ///
    /// - `args` - Command-line arguments of a launch
    pub fn extract(&self, args: &[String]) -> Option<DeepLink> {
        extract_deep_link_for(&self.scheme, args)
    }

    /// Runs once the application is ready.
    ///
    /// Registers the scheme with the OS, opens a deep link found in the
    /// initial launch arguments, and starts accepting `open-url` and
    /// second-instance events.
    ///
    /// # Parameters
    ///
    /// - `launch_args` - Command-line arguments the application started with
    pub async fn on_ready(&self, launch_args: &[String]) -> ShellResult<()> {
        log::info!("[DEEP_LINK] Setting protocol client for {}://", self.scheme);

        if self.protocol_client.set_as_default_protocol_client(&self.scheme) {
            log::info!("[DEEP_LINK] Protocol client register succeeded");
        } else {
            log::warn!("[DEEP_LINK] Protocol client register failed");
        }

        let result = match self.extract(launch_args) {
            Some(link) => self.dispatch(link.as_str()).await,
            None => Ok(()),
        };

        self.listening.store(true, Ordering::Release);
        result
    }

    /// Handles the OS `open-url` event.
    ///
    /// The OS only fires it for the registered scheme, so the URL is not
    /// checked again. Before [`on_ready`](Self::on_ready) the event is
    /// ignored and its default is left alone.
    ///
    /// # Parameters
    ///
    /// - `event` - The OS event; its default handling is prevented
    pub async fn on_open_url(&self, event: &mut OpenUrlEvent) -> ShellResult<()> {
        if !self.is_listening() {
            log::debug!("[DEEP_LINK] open-url before ready, ignoring {}", event.url());
            return Ok(());
        }

        event.prevent_default();
        self.dispatch(event.url()).await
    }

    /// Handles a second launch of the application.
    ///
    /// The main window is always brought to the front; a deep link found in
    /// the new instance's arguments is opened after the window is shown.
    ///
    /// # Parameters
    ///
    /// - `args` - Command-line arguments of the redirected launch
    pub async fn on_second_instance(&self, args: &[String]) -> ShellResult<()> {
        if !self.is_listening() {
            log::debug!("[DEEP_LINK] second instance before ready, ignoring");
            return Ok(());
        }

        let link = self.extract(args);

        self.window.show().await?;

        match link {
            Some(link) => self.dispatch(link.as_str()).await,
            None => Ok(()),
        }
    }

    async fn dispatch(&self, url: &str) -> ShellResult<()> {
        log::debug!("[DEEP_LINK] opening {}", url);
        self.opener.open(url).await
    }
}
