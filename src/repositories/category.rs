//! Category repository for database operations.

use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, EntityTrait};

use crate::entities::category;

/// Repository for category-related database operations.
pub struct CategoryRepository;

impl CategoryRepository {
    /// Get all categories.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<category::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(category::Entity::find().all(conn).await?)
    }

    /// Get a single category by id.
    pub async fn get_by_id<C>(conn: &C, id: &str) -> Result<Option<category::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(category::Entity::find_by_id(id.to_string()).one(conn).await?)
    }

    /// Insert a category or overwrite every column of the existing row with the same id.
    pub async fn upsert<C>(conn: &C, category: category::ActiveModel) -> Result<()>
    where
        C: ConnectionTrait,
    {
        category::Entity::insert(category)
            .on_conflict(
                OnConflict::column(category::Column::Id)
                    .update_columns([
                        category::Column::Name,
                        category::Column::Icon,
                        category::Column::Color,
                        category::Column::Enabled,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    /// Delete a category by id. Tasks in the category are left alone.
    pub async fn delete<C>(conn: &C, id: &str) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let result = category::Entity::delete_by_id(id.to_string()).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Delete every category.
    pub async fn delete_all<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(category::Entity::delete_many().exec(conn).await?.rows_affected)
    }
}
