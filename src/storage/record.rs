//! Mapping between domain records and their table rows.
//!
//! [`Record`] is the per-kind seam the generic store operations dispatch
//! through. Each implementation converts to and from its entity model and
//! delegates the queries to the matching repository.

use std::fmt;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::{ActiveValue, ConnectionTrait};

use crate::entities::{category, task, user};
use crate::models::{Category, Reminder, Task, User};
use crate::repositories::{CategoryRepository, TaskRepository, UserRepository};

/// The fixed set of record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    User,
    Task,
    Category,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::User => "user",
            RecordKind::Task => "task",
            RecordKind::Category => "category",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain type that lives in one record collection.
#[async_trait]
pub trait Record: Clone + Send + Sync + Sized + 'static {
    const KIND: RecordKind;

    /// Primary key within the collection
    fn key(&self) -> &str;

    async fn find<C>(conn: &C, key: &str) -> Result<Option<Self>>
    where
        C: ConnectionTrait;

    async fn find_all<C>(conn: &C) -> Result<Vec<Self>>
    where
        C: ConnectionTrait;

    /// Insert or fully replace the row at `self.key()`
    async fn save<C>(&self, conn: &C) -> Result<()>
    where
        C: ConnectionTrait;

    async fn remove<C>(conn: &C, key: &str) -> Result<bool>
    where
        C: ConnectionTrait;

    async fn clear<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait;
}

impl TryFrom<user::Model> for User {
    type Error = anyhow::Error;

    fn try_from(model: user::Model) -> Result<Self> {
        Ok(Self {
            streak: u32::try_from(model.streak)
                .with_context(|| format!("User {}: invalid streak {}", model.email, model.streak))?,
            total_points: u64::try_from(model.total_points)
                .with_context(|| format!("User {}: invalid total_points {}", model.email, model.total_points))?,
            id: model.id,
            name: model.name,
            email: model.email,
            avatar: model.avatar,
            last_active: model.last_active,
        })
    }
}

impl From<&User> for user::ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            email: ActiveValue::Set(user.email.clone()),
            id: ActiveValue::Set(user.id.clone()),
            name: ActiveValue::Set(user.name.clone()),
            avatar: ActiveValue::Set(user.avatar.clone()),
            streak: ActiveValue::Set(i64::from(user.streak)),
            // Points beyond i64::MAX are not reachable through toggling.
            total_points: ActiveValue::Set(i64::try_from(user.total_points).unwrap_or(i64::MAX)),
            last_active: ActiveValue::Set(user.last_active.clone()),
        }
    }
}

impl TryFrom<task::Model> for Task {
    type Error = anyhow::Error;

    fn try_from(model: task::Model) -> Result<Self> {
        let completed_dates: Vec<String> = serde_json::from_str(&model.completed_dates)
            .with_context(|| format!("Task {}: completed_dates is not a JSON string array", model.id))?;

        let reminder = match (model.reminder_time, model.reminder_frequency) {
            (Some(time), Some(frequency)) => Some(Reminder {
                time,
                frequency: frequency
                    .parse()
                    .with_context(|| format!("Task {}: invalid reminder", model.id))?,
                enabled: model.reminder_enabled.unwrap_or(false),
            }),
            _ => None,
        };

        Ok(Self {
            points: u32::try_from(model.points)
                .with_context(|| format!("Task {}: invalid points {}", model.id, model.points))?,
            id: model.id,
            category_id: model.category_id,
            name: model.name,
            icon: model.icon,
            completed_dates,
            reminder,
        })
    }
}

impl TryFrom<&Task> for task::ActiveModel {
    type Error = anyhow::Error;

    fn try_from(task: &Task) -> Result<Self> {
        let completed_dates = serde_json::to_string(&task.completed_dates)
            .with_context(|| format!("Task {}: failed to encode completed_dates", task.id))?;
        let reminder = task.reminder.as_ref();

        Ok(Self {
            id: ActiveValue::Set(task.id.clone()),
            category_id: ActiveValue::Set(task.category_id.clone()),
            name: ActiveValue::Set(task.name.clone()),
            points: ActiveValue::Set(i64::from(task.points)),
            icon: ActiveValue::Set(task.icon.clone()),
            completed_dates: ActiveValue::Set(completed_dates),
            reminder_time: ActiveValue::Set(reminder.map(|r| r.time.clone())),
            reminder_frequency: ActiveValue::Set(reminder.map(|r| r.frequency.as_str().to_string())),
            reminder_enabled: ActiveValue::Set(reminder.map(|r| r.enabled)),
        })
    }
}

impl From<category::Model> for Category {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            icon: model.icon,
            color: model.color,
            enabled: model.enabled,
        }
    }
}

impl From<&Category> for category::ActiveModel {
    fn from(category: &Category) -> Self {
        Self {
            id: ActiveValue::Set(category.id.clone()),
            name: ActiveValue::Set(category.name.clone()),
            icon: ActiveValue::Set(category.icon.clone()),
            color: ActiveValue::Set(category.color.clone()),
            enabled: ActiveValue::Set(category.enabled),
        }
    }
}

#[async_trait]
impl Record for User {
    const KIND: RecordKind = RecordKind::User;

    fn key(&self) -> &str {
        &self.email
    }

    async fn find<C>(conn: &C, key: &str) -> Result<Option<Self>>
    where
        C: ConnectionTrait,
    {
        UserRepository::get_by_email(conn, key).await?.map(User::try_from).transpose()
    }

    async fn find_all<C>(conn: &C) -> Result<Vec<Self>>
    where
        C: ConnectionTrait,
    {
        UserRepository::get_all(conn).await?.into_iter().map(User::try_from).collect()
    }

    async fn save<C>(&self, conn: &C) -> Result<()>
    where
        C: ConnectionTrait,
    {
        UserRepository::upsert(conn, self.into()).await
    }

    async fn remove<C>(conn: &C, key: &str) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        UserRepository::delete(conn, key).await
    }

    async fn clear<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        UserRepository::delete_all(conn).await
    }
}

#[async_trait]
impl Record for Task {
    const KIND: RecordKind = RecordKind::Task;

    fn key(&self) -> &str {
        &self.id
    }

    async fn find<C>(conn: &C, key: &str) -> Result<Option<Self>>
    where
        C: ConnectionTrait,
    {
        TaskRepository::get_by_id(conn, key).await?.map(Task::try_from).transpose()
    }

    async fn find_all<C>(conn: &C) -> Result<Vec<Self>>
    where
        C: ConnectionTrait,
    {
        TaskRepository::get_all(conn).await?.into_iter().map(Task::try_from).collect()
    }

    async fn save<C>(&self, conn: &C) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let model = task::ActiveModel::try_from(self)?;
        TaskRepository::upsert(conn, model).await
    }

    async fn remove<C>(conn: &C, key: &str) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        TaskRepository::delete(conn, key).await
    }

    async fn clear<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        TaskRepository::delete_all(conn).await
    }
}

#[async_trait]
impl Record for Category {
    const KIND: RecordKind = RecordKind::Category;

    fn key(&self) -> &str {
        &self.id
    }

    async fn find<C>(conn: &C, key: &str) -> Result<Option<Self>>
    where
        C: ConnectionTrait,
    {
        Ok(CategoryRepository::get_by_id(conn, key).await?.map(Category::from))
    }

    async fn find_all<C>(conn: &C) -> Result<Vec<Self>>
    where
        C: ConnectionTrait,
    {
        Ok(CategoryRepository::get_all(conn)
            .await?
            .into_iter()
            .map(Category::from)
            .collect())
    }

    async fn save<C>(&self, conn: &C) -> Result<()>
    where
        C: ConnectionTrait,
    {
        CategoryRepository::upsert(conn, self.into()).await
    }

    async fn remove<C>(conn: &C, key: &str) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        CategoryRepository::delete(conn, key).await
    }

    async fn clear<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        CategoryRepository::delete_all(conn).await
    }
}
