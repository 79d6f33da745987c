//! In-memory application state.
//!
//! [`AppState`] is the authoritative copy of everything the user sees. Every
//! mutating method returns the [`StateChange`]s it caused; the caller hands
//! those to the sync bridge, which persists exactly those kinds. A mutation
//! that turns out to be a no-op (unknown id, blank name) returns no changes.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{new_id, Category, NewCategory, NewTask, Reminder, Task, Theme, User};
use crate::sync::Snapshot;
use crate::utils::datetime;

/// Which slice of state a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateChange {
    User,
    Categories,
    Tasks,
    Theme,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    user: Option<User>,
    categories: Vec<Category>,
    tasks: Vec<Task>,
    theme: Theme,
}

impl AppState {
    pub fn new(user: Option<User>, categories: Vec<Category>, tasks: Vec<Task>, theme: Theme) -> Self {
        Self {
            user,
            categories,
            tasks,
            theme,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Categories offered for task selection
    pub fn active_categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.enabled).collect()
    }

    pub fn tasks_in_category(&self, category_id: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.category_id == category_id).collect()
    }

    pub fn login(&mut self, user: User) -> Vec<StateChange> {
        self.user = Some(user);
        vec![StateChange::User]
    }

    pub fn logout(&mut self) -> Vec<StateChange> {
        match self.user.take() {
            Some(_) => vec![StateChange::User],
            None => Vec::new(),
        }
    }

    pub fn toggle_theme(&mut self) -> Vec<StateChange> {
        self.theme = self.theme.toggled();
        vec![StateChange::Theme]
    }

    pub fn add_task(&mut self, new_task: NewTask) -> Vec<StateChange> {
        let name = new_task.name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        self.tasks.push(Task {
            id: new_id(),
            category_id: new_task.category_id,
            name: name.to_string(),
            points: new_task.points,
            icon: new_task.icon,
            completed_dates: Vec::new(),
            reminder: None,
        });
        vec![StateChange::Tasks]
    }

    pub fn remove_task(&mut self, id: &str) -> Vec<StateChange> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Vec::new();
        }
        vec![StateChange::Tasks]
    }

    pub fn set_reminder(&mut self, task_id: &str, reminder: Option<Reminder>) -> Vec<StateChange> {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.reminder = reminder;
                vec![StateChange::Tasks]
            }
            None => Vec::new(),
        }
    }

    pub fn add_category(&mut self, new_category: NewCategory) -> Vec<StateChange> {
        let name = new_category.name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        self.categories.push(Category {
            id: new_id(),
            name: name.to_string(),
            icon: new_category.icon,
            color: new_category.color,
            enabled: true,
        });
        vec![StateChange::Categories]
    }

    /// Remove a category together with every task filed under it.
    pub fn remove_category(&mut self, id: &str) -> Vec<StateChange> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Vec::new();
        }

        let mut changes = vec![StateChange::Categories];
        let tasks_before = self.tasks.len();
        self.tasks.retain(|t| t.category_id != id);
        if self.tasks.len() != tasks_before {
            changes.push(StateChange::Tasks);
        }
        changes
    }

    pub fn toggle_category(&mut self, id: &str) -> Vec<StateChange> {
        match self.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => {
                category.enabled = !category.enabled;
                vec![StateChange::Categories]
            }
            None => Vec::new(),
        }
    }

    /// Flip the completion of a task for `day` and settle the user's points.
    ///
    /// Completed on `day`: every entry for that day is dropped and the task's
    /// points are taken back, never below zero. Not completed: one timestamp
    /// is appended and the points are awarded.
    pub fn toggle_task(&mut self, task_id: &str, day: NaiveDate, now: DateTime<Utc>) -> Vec<StateChange> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Vec::new();
        };

        let points = u64::from(task.points);
        let completed = task.is_completed_on(day);
        if completed {
            task.completed_dates.retain(|d| !datetime::is_on_day(d, day));
        } else {
            task.completed_dates.push(datetime::completion_timestamp(day, now));
        }

        let mut changes = vec![StateChange::Tasks];
        if let Some(user) = self.user.as_mut() {
            user.total_points = if completed {
                user.total_points.saturating_sub(points)
            } else {
                user.total_points.saturating_add(points)
            };
            changes.push(StateChange::User);
        }
        changes
    }

    /// Copy of the state slices named in `changes`, ready to persist.
    pub fn snapshot(&self, changes: &[StateChange]) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for change in changes {
            match change {
                StateChange::User => snapshot.user = self.user.clone(),
                StateChange::Categories => snapshot.categories = Some(self.categories.clone()),
                StateChange::Tasks => snapshot.tasks = Some(self.tasks.clone()),
                StateChange::Theme => snapshot.theme = Some(self.theme),
            }
        }
        snapshot
    }
}
