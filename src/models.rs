//! Domain records shared by the state holder, the sync bridge and the
//! record store.
//!
//! These are plain data: no record validates its foreign keys or clamps its
//! counters on its own. The JSON shape (camelCase) matches what the web front
//! end keeps in memory.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{AVATAR_URL_BASE, DEFAULT_ICON, DEFAULT_TASK_POINTS, DEFAULT_USER_NAME, INITIAL_STREAK};
use crate::utils::datetime;

/// The signed-in person, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    /// Consecutive active days, maintained by the caller
    pub streak: u32,
    pub total_points: u64,
    pub last_active: String,
}

impl User {
    /// Build a freshly signed-up user. A blank name falls back to the default display name.
    pub fn new(name: &str, email: &str, now: DateTime<Utc>) -> Self {
        let name = name.trim();
        Self {
            id: new_id(),
            name: if name.is_empty() { DEFAULT_USER_NAME.to_string() } else { name.to_string() },
            email: email.to_string(),
            avatar: format!("{AVATAR_URL_BASE}/{email}/200"),
            streak: INITIAL_STREAK,
            total_points: 0,
            last_active: datetime::to_iso(now),
        }
    }
}

/// How often a reminder repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    Daily,
    Weekly,
}

impl ReminderFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderFrequency::Daily => "daily",
            ReminderFrequency::Weekly => "weekly",
        }
    }
}

impl fmt::Display for ReminderFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderFrequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(ReminderFrequency::Daily),
            "weekly" => Ok(ReminderFrequency::Weekly),
            other => anyhow::bail!("unknown reminder frequency '{}'", other),
        }
    }
}

/// Optional nudge attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Time of day, `HH:MM`
    pub time: String,
    pub frequency: ReminderFrequency,
    pub enabled: bool,
}

/// A repeatable task that earns `points` each time it is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    /// Owning category. Not checked against the stored categories.
    pub category_id: String,
    pub name: String,
    pub points: u32,
    pub icon: String,
    /// One ISO-8601 timestamp per completion event, in insertion order
    pub completed_dates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Reminder>,
}

impl Task {
    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.completed_dates.iter().any(|d| datetime::is_on_day(d, day))
    }
}

/// A group of tasks. Disabled categories stay stored but are hidden from selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub enabled: bool,
}

/// Input for creating a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub category_id: String,
    pub name: String,
    pub points: u32,
    pub icon: String,
}

impl NewTask {
    /// A task worth the default points, with the default icon.
    pub fn new(category_id: &str, name: &str) -> Self {
        Self {
            category_id: category_id.to_string(),
            name: name.to_string(),
            points: DEFAULT_TASK_POINTS,
            icon: DEFAULT_ICON.to_string(),
        }
    }
}

/// Input for creating a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => anyhow::bail!("unknown theme '{}'", other),
        }
    }
}

/// Random opaque identifier for new users, tasks and categories
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}
