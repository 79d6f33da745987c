//! Application façade: startup, accounts and state mutations.
//!
//! [`App`] owns the state holder and passes the shared store handle
//! explicitly to the sync bridge. Every mutation goes through one of its
//! methods, which applies the change in memory first and then schedules a
//! sync cycle for exactly the kinds that changed.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::constants::{default_categories, WARN_IN_MEMORY_ONLY};
use crate::models::{Category, NewCategory, NewTask, Reminder, Task, User};
use crate::state::{AppState, StateChange};
use crate::storage::{Preferences, RecordStore, StoreError};
use crate::sync::SyncBridge;
use crate::utils::datetime;

/// Account lookups that can fail in front of the user.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("User not found. Try signing up!")]
    UserNotFound,

    #[error("User already exists with this email.")]
    UserExists,

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Database error: {0}")]
    Store(#[from] StoreError),
}

pub struct App {
    store: Arc<RecordStore>,
    preferences: Arc<Preferences>,
    bridge: SyncBridge,
    state: AppState,
    pending: Vec<JoinHandle<()>>,
    persistence_available: bool,
}

impl App {
    /// Build the store and preferences described by `config` and run startup.
    pub async fn start(config: &Config) -> Result<Self> {
        let store = Arc::new(RecordStore::from_config(&config.storage)?);

        let preferences = if config.preferences.in_memory {
            Preferences::in_memory()
        } else {
            match Preferences::load(config.preferences.resolve_path()?) {
                Ok(preferences) => preferences,
                Err(e) => {
                    warn!("⚠️ {e:#}; using in-memory preferences");
                    Preferences::in_memory()
                }
            }
        };

        Ok(Self::start_with(store, Arc::new(preferences), config.sync.indicator_hold()).await)
    }

    /// Startup sequence over an explicit store and preferences.
    ///
    /// Open store, restore the session, load categories (falling back to the
    /// built-in set), load tasks, load the theme. No step is fatal: a store
    /// that cannot be opened leaves the app running on in-memory state.
    pub async fn start_with(store: Arc<RecordStore>, preferences: Arc<Preferences>, indicator_hold: Duration) -> Self {
        let persistence_available = match store.open().await {
            Ok(()) => true,
            Err(e) => {
                warn!("{WARN_IN_MEMORY_ONLY}: {e}");
                false
            }
        };

        let user = if persistence_available {
            Self::restore_session(&store, &preferences).await
        } else {
            None
        };

        let (categories, categories_defaulted) = if persistence_available {
            match store.get_all::<Category>().await {
                Ok(categories) if !categories.is_empty() => (categories, false),
                Ok(_) => (default_categories(), true),
                Err(e) => {
                    warn!("⚠️ {e}; using default categories");
                    (default_categories(), true)
                }
            }
        } else {
            (default_categories(), true)
        };

        let tasks = if persistence_available {
            store.get_all::<Task>().await.unwrap_or_else(|e| {
                warn!("⚠️ {e}; starting without tasks");
                Vec::new()
            })
        } else {
            Vec::new()
        };

        let theme = preferences.theme().unwrap_or_default();

        info!(
            "✅ Loaded {} categories and {} tasks (theme: {theme})",
            categories.len(),
            tasks.len()
        );

        let bridge = SyncBridge::new(store.clone(), preferences.clone(), indicator_hold);
        bridge.mark_loaded();

        let mut app = Self {
            store,
            preferences,
            bridge,
            state: AppState::new(user, categories, tasks, theme),
            pending: Vec::new(),
            persistence_available,
        };

        if categories_defaulted && persistence_available {
            app.schedule(vec![StateChange::Categories]);
        }
        app
    }

    async fn restore_session(store: &RecordStore, preferences: &Preferences) -> Option<User> {
        let email = preferences.session_email()?;
        match store.get::<User>(&email).await {
            Ok(Some(user)) => {
                info!("Restored session for {email}");
                Some(user)
            }
            Ok(None) => {
                info!("Session marker points at unknown user {email}");
                None
            }
            Err(e) => {
                warn!("⚠️ {e}; starting signed out");
                None
            }
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn preferences(&self) -> &Arc<Preferences> {
        &self.preferences
    }

    pub fn bridge(&self) -> &SyncBridge {
        &self.bridge
    }

    /// Whether the record store opened. When false, changes only live in memory.
    pub fn persistence_available(&self) -> bool {
        self.persistence_available
    }

    /// Drives the "saving…" indicator
    pub fn is_saving(&self) -> bool {
        self.bridge.is_syncing()
    }

    fn schedule(&mut self, changes: Vec<StateChange>) {
        if changes.is_empty() {
            return;
        }
        let snapshot = self.state.snapshot(&changes);
        self.pending.retain(|handle| !handle.is_finished());
        if let Some(handle) = self.bridge.schedule(snapshot) {
            self.pending.push(handle);
        }
    }

    /// Wait for every sync cycle scheduled so far.
    pub async fn flush(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                warn!("Sync task ended abnormally: {e}");
            }
        }
    }

    /// Create an account and sign in. The user record is written right away.
    pub async fn signup(&mut self, name: &str, email: &str) -> Result<(), AccountError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AccountError::EmptyEmail);
        }
        if self.store.get::<User>(email).await?.is_some() {
            return Err(AccountError::UserExists);
        }

        let user = User::new(name, email, Utc::now());
        self.store.put(&user).await?;
        info!("Created account for {email}");

        let changes = self.state.login(user);
        self.schedule(changes);
        Ok(())
    }

    /// Sign in as an existing local user. There is no password.
    pub async fn login(&mut self, email: &str) -> Result<(), AccountError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AccountError::EmptyEmail);
        }
        let user = self
            .store
            .get::<User>(email)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let changes = self.state.login(user);
        self.schedule(changes);
        Ok(())
    }

    /// Sign out and forget the session marker.
    ///
    /// Pending cycles still carry the signed-in user and would write the
    /// marker back, so they are awaited first.
    pub async fn logout(&mut self) {
        self.flush().await;
        self.state.logout();
        if let Err(e) = self.preferences.clear_session() {
            warn!("⚠️ Failed to clear session marker: {e:#}");
        }
    }

    pub fn toggle_theme(&mut self) {
        let changes = self.state.toggle_theme();
        self.schedule(changes);
    }

    pub fn add_task(&mut self, new_task: NewTask) {
        let changes = self.state.add_task(new_task);
        self.schedule(changes);
    }

    pub fn remove_task(&mut self, id: &str) {
        let changes = self.state.remove_task(id);
        self.schedule(changes);
    }

    pub fn set_reminder(&mut self, task_id: &str, reminder: Option<Reminder>) {
        let changes = self.state.set_reminder(task_id, reminder);
        self.schedule(changes);
    }

    pub fn add_category(&mut self, new_category: NewCategory) {
        let changes = self.state.add_category(new_category);
        self.schedule(changes);
    }

    /// Remove a category and its tasks.
    pub fn remove_category(&mut self, id: &str) {
        let changes = self.state.remove_category(id);
        self.schedule(changes);
    }

    pub fn toggle_category(&mut self, id: &str) {
        let changes = self.state.toggle_category(id);
        self.schedule(changes);
    }

    /// Toggle a task's completion for an arbitrary day.
    pub fn toggle_task(&mut self, task_id: &str, day: NaiveDate) {
        let changes = self.state.toggle_task(task_id, day, Utc::now());
        self.schedule(changes);
    }

    pub fn toggle_task_today(&mut self, task_id: &str) {
        self.toggle_task(task_id, datetime::today());
    }
}
