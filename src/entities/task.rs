use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub points: i64,
    pub icon: String,
    /// JSON array of ISO-8601 completion timestamps
    #[sea_orm(column_type = "Text")]
    pub completed_dates: String,
    pub reminder_time: Option<String>,
    pub reminder_frequency: Option<String>,
    pub reminder_enabled: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
