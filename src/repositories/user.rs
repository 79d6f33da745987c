//! User repository for database operations.

use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, EntityTrait};

use crate::entities::user;

/// Repository for user-related database operations.
pub struct UserRepository;

impl UserRepository {
    /// Get a single user by email.
    pub async fn get_by_email<C>(conn: &C, email: &str) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find_by_id(email.to_string()).one(conn).await?)
    }

    /// Get all users.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find().all(conn).await?)
    }

    /// Insert a user or overwrite every column of the existing row with the same email.
    pub async fn upsert<C>(conn: &C, user: user::ActiveModel) -> Result<()>
    where
        C: ConnectionTrait,
    {
        user::Entity::insert(user)
            .on_conflict(
                OnConflict::column(user::Column::Email)
                    .update_columns([
                        user::Column::Id,
                        user::Column::Name,
                        user::Column::Avatar,
                        user::Column::Streak,
                        user::Column::TotalPoints,
                        user::Column::LastActive,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    /// Delete a user by email. Returns whether a row was removed.
    pub async fn delete<C>(conn: &C, email: &str) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let result = user::Entity::delete_by_id(email.to_string()).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Delete every user.
    pub async fn delete_all<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::delete_many().exec(conn).await?.rows_affected)
    }
}
