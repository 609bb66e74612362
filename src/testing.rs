//! Recording fakes for the collaborator traits, shared by unit tests.

use crate::collaborators::{ApplicationWindow, DeepLinkOpener, MenuCommands, ProtocolClient};
use crate::error::{ShellError, ShellResult};
use crate::tray::{TrayBackend, TrayHandle, TrayState};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Ordered journal of collaborator calls.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.0.lock().iter().position(|e| e == entry)
    }
}

pub struct FakeProtocolClient {
    pub journal: Journal,
    pub accept: bool,
}

impl ProtocolClient for FakeProtocolClient {
    fn set_as_default_protocol_client(&self, scheme: &str) -> bool {
        self.journal.record(format!("register:{scheme}"));
        self.accept
    }
}

pub struct FakeOpener {
    pub journal: Journal,
    pub fail: bool,
}

#[async_trait]
impl DeepLinkOpener for FakeOpener {
    async fn open(&self, url: &str) -> ShellResult<()> {
        self.journal.record(format!("open:{url}"));
        if self.fail {
            return Err(ShellError::DeepLinkOpen {
                url: url.to_string(),
                reason: "no route".to_string(),
            });
        }
        Ok(())
    }
}

pub struct FakeWindow {
    pub journal: Journal,
    pub fail: bool,
}

#[async_trait]
impl ApplicationWindow for FakeWindow {
    async fn show(&self) -> ShellResult<()> {
        self.journal.record("show:start");
        tokio::task::yield_now().await;
        if self.fail {
            return Err(ShellError::Window("window destroyed".to_string()));
        }
        self.journal.record("show:done");
        Ok(())
    }
}

pub struct FakeCommands {
    pub journal: Journal,
}

#[async_trait]
impl MenuCommands for FakeCommands {
    fn navigate_to_preferences(&self) {
        self.journal.record("preferences");
    }

    fn show_about(&self) {
        self.journal.record("about");
    }

    fn stop_services_and_exit_app(&self) {
        self.journal.record("quit");
    }

    async fn check_for_updates(&self) -> ShellResult<()> {
        self.journal.record("check-for-updates");
        Ok(())
    }
}

/// Tray backend counting spawns, refreshes and shutdowns.
#[derive(Default)]
pub struct Counters {
    pub spawned: AtomicUsize,
    pub refreshed: AtomicUsize,
    pub shut_down: AtomicUsize,
}

pub struct FakeBackend {
    pub counters: Arc<Counters>,
    pub fail: bool,
}

pub struct FakeHandle {
    counters: Arc<Counters>,
    closed: AtomicBool,
}

#[async_trait]
impl TrayBackend for FakeBackend {
    type Handle = FakeHandle;

    async fn spawn(&self, _state: Arc<Mutex<TrayState>>) -> ShellResult<FakeHandle> {
        if self.fail {
            return Err(ShellError::TraySpawn("no StatusNotifierWatcher".to_string()));
        }
        self.counters.spawned.fetch_add(1, Ordering::SeqCst);
        Ok(FakeHandle {
            counters: self.counters.clone(),
            closed: AtomicBool::new(false),
        })
    }
}

impl TrayHandle for FakeHandle {
    fn refresh(&self) {
        assert!(!self.closed.load(Ordering::SeqCst), "refresh after shutdown");
        self.counters.refreshed.fetch_add(1, Ordering::SeqCst);
    }

    fn shutdown(&self) {
        assert!(!self.closed.swap(true, Ordering::SeqCst), "double shutdown");
        self.counters.shut_down.fetch_add(1, Ordering::SeqCst);
    }
}

/// Waits until `journal` contains `entry`, yielding to spawned tasks.
pub async fn wait_for(journal: &Journal, entry: &str) {
    for _ in 0..1000 {
        if journal.position(entry).is_some() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
    }
    panic!("{entry} never recorded, journal: {:?}", journal.entries());
}
