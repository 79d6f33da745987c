//! VibeFlow - a local-first gamified task tracker
//!
//! Users define categories and tasks, complete tasks on specific days and
//! earn points. Everything lives on the device: records in a SQLite file
//! accessed through SeaORM, small settings in a JSON preferences file.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`storage`] - Record store and preferences
//! * [`state`] - In-memory state holder and its mutations
//! * [`sync`] - Sync bridge mirroring state into storage
//! * [`app`] - Startup sequence and the operations the front end calls
//! * [`analytics`] - Point aggregations
//! * [`utils`] - Utility functions and helpers

/// Point aggregations over tasks and categories
pub mod analytics;

/// Startup sequence, accounts and state mutations
pub mod app;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Logging setup on top of the `log` facade
pub mod logger;

/// Domain records: users, tasks, categories
pub mod models;

/// Repository layer for database operations
pub mod repositories;

/// In-memory application state
pub mod state;

/// Record store and preferences
pub mod storage;

/// Sync bridge between state and storage
pub mod sync;

/// Utility functions for date/time handling
pub mod utils;

pub use app::{AccountError, App};
pub use models::{Category, Reminder, ReminderFrequency, Task, Theme, User};
