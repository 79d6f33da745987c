//! Local storage module for VibeFlow data persistence
//!
//! This module provides:
//! - [`RecordStore`]: SeaORM/SQLite collections of users, tasks and categories
//! - [`Record`] and [`RecordKind`]: the per-kind mapping the store dispatches on
//! - [`Preferences`]: string settings (session marker, theme) kept beside the store

pub mod db;
pub mod error;
pub mod preferences;
pub mod record;

pub use db::RecordStore;
pub use error::{StoreError, StoreResult};
pub use preferences::Preferences;
pub use record::{Record, RecordKind};
