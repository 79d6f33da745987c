//! Sync bridge between the in-memory state and local persistence.
//!
//! The [`SyncBridge`] receives a [`Snapshot`] after every state mutation and
//! writes it out in a background task:
//! - the current user is upserted and remembered as the session marker
//! - category and task snapshots replace their whole collections
//! - the theme goes to the preferences file
//!
//! Nothing here ever reports a failure to the caller. Each write that fails
//! is logged and dropped; the next mutation persists the then-current state
//! again, which is what brings the store back in line.

pub mod sink;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};
use tokio::task::JoinHandle;

use crate::models::{Category, Task, Theme, User};
use crate::storage::Preferences;

pub use sink::SnapshotSink;

/// The state slices one sync cycle should persist. `None` means untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub user: Option<User>,
    pub categories: Option<Vec<Category>>,
    pub tasks: Option<Vec<Task>>,
    pub theme: Option<Theme>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.categories.is_none() && self.tasks.is_none() && self.theme.is_none()
    }
}

/// Cosmetic progress signal for a "saving…" indicator.
///
/// It does not tell success from failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// No cycle is running
    Idle,
    /// At least one cycle is running or its indicator hold has not elapsed
    Syncing,
}

/// Mirrors state snapshots into a [`SnapshotSink`] and the preferences file.
///
/// Cloning is cheap and every clone shares the same loaded flag and
/// in-flight counter.
#[derive(Clone)]
pub struct SyncBridge {
    sink: Arc<dyn SnapshotSink>,
    preferences: Arc<Preferences>,
    loaded: Arc<AtomicBool>,
    in_flight: Arc<AtomicUsize>,
    indicator_hold: Duration,
}

impl SyncBridge {
    pub fn new(sink: Arc<dyn SnapshotSink>, preferences: Arc<Preferences>, indicator_hold: Duration) -> Self {
        Self {
            sink,
            preferences,
            loaded: Arc::new(AtomicBool::new(false)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            indicator_hold,
        }
    }

    /// Allow syncing. Until this is called every snapshot is ignored so the
    /// empty pre-load state never overwrites what is on disk.
    pub fn mark_loaded(&self) {
        self.loaded.store(true, Ordering::SeqCst);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn status(&self) -> SyncStatus {
        if self.is_syncing() {
            SyncStatus::Syncing
        } else {
            SyncStatus::Idle
        }
    }

    /// Start a background sync cycle for `snapshot`.
    ///
    /// Returns `None` when there is nothing to do: the initial load has not
    /// finished or the snapshot is empty. Cycles are never merged or
    /// cancelled; two quick mutations produce two independent cycles.
    pub fn schedule(&self, snapshot: Snapshot) -> Option<JoinHandle<()>> {
        if !self.is_loaded() {
            debug!("Skipping sync before initial load completed");
            return None;
        }
        if snapshot.is_empty() {
            return None;
        }

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let bridge = self.clone();
        Some(tokio::spawn(async move {
            bridge.persist(&snapshot).await;
            if !bridge.indicator_hold.is_zero() {
                tokio::time::sleep(bridge.indicator_hold).await;
            }
            bridge.in_flight.fetch_sub(1, Ordering::SeqCst);
        }))
    }

    /// Run one sync cycle in place, without the indicator hold.
    ///
    /// Honors the loaded flag like [`SyncBridge::schedule`].
    pub async fn sync_now(&self, snapshot: &Snapshot) {
        if !self.is_loaded() {
            debug!("Skipping sync before initial load completed");
            return;
        }
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.persist(snapshot).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    /// Write every slice present in `snapshot`. Failures are logged and swallowed.
    async fn persist(&self, snapshot: &Snapshot) {
        debug!("🔄 Sync cycle started");
        let mut failures = 0usize;

        if let Some(user) = &snapshot.user {
            match self.sink.save_user(user).await {
                Ok(()) => {
                    if let Err(e) = self.preferences.set_session_email(&user.email) {
                        error!("❌ Failed to store session marker: {e:#}");
                        failures += 1;
                    }
                }
                Err(e) => {
                    error!("❌ {e}");
                    failures += 1;
                }
            }
        }

        if let Some(categories) = &snapshot.categories {
            if let Err(e) = self.sink.save_categories(categories).await {
                error!("❌ {e}");
                failures += 1;
            }
        }

        if let Some(tasks) = &snapshot.tasks {
            if let Err(e) = self.sink.save_tasks(tasks).await {
                error!("❌ {e}");
                failures += 1;
            }
        }

        if let Some(theme) = snapshot.theme {
            if let Err(e) = self.preferences.set_theme(theme) {
                error!("❌ Failed to store theme preference: {e:#}");
                failures += 1;
            }
        }

        if failures == 0 {
            debug!("✅ Sync cycle finished");
        } else {
            info!("Sync cycle finished with {failures} failed write(s); state stays in memory until the next change");
        }
    }
}
