//! Task repository for database operations.

use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, EntityTrait};

use crate::entities::task;

/// Repository for task-related database operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Get all tasks.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find().all(conn).await?)
    }

    /// Get a single task by id.
    pub async fn get_by_id<C>(conn: &C, id: &str) -> Result<Option<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find_by_id(id.to_string()).one(conn).await?)
    }

    /// Insert a task or overwrite every column of the existing row with the same id.
    pub async fn upsert<C>(conn: &C, task: task::ActiveModel) -> Result<()>
    where
        C: ConnectionTrait,
    {
        task::Entity::insert(task)
            .on_conflict(
                OnConflict::column(task::Column::Id)
                    .update_columns([
                        task::Column::CategoryId,
                        task::Column::Name,
                        task::Column::Points,
                        task::Column::Icon,
                        task::Column::CompletedDates,
                        task::Column::ReminderTime,
                        task::Column::ReminderFrequency,
                        task::Column::ReminderEnabled,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    /// Delete a task by id. Returns whether a row was removed.
    pub async fn delete<C>(conn: &C, id: &str) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let result = task::Entity::delete_by_id(id.to_string()).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Delete every task.
    pub async fn delete_all<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::delete_many().exec(conn).await?.rows_affected)
    }
}
