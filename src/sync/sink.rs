use async_trait::async_trait;

use crate::models::{Category, Task, User};
use crate::storage::{RecordStore, StoreResult};

/// Destination of sync cycles.
///
/// [`RecordStore`] is the real one; the trait exists so the bridge can be
/// pointed at anything that stores the three record kinds.
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    /// Upsert the current user by email
    async fn save_user(&self, user: &User) -> StoreResult<()>;

    /// Replace the stored categories with this snapshot
    async fn save_categories(&self, categories: &[Category]) -> StoreResult<()>;

    /// Replace the stored tasks with this snapshot
    async fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()>;
}

#[async_trait]
impl SnapshotSink for RecordStore {
    async fn save_user(&self, user: &User) -> StoreResult<()> {
        self.put(user).await
    }

    async fn save_categories(&self, categories: &[Category]) -> StoreResult<()> {
        self.replace_all(categories).await
    }

    async fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()> {
        self.replace_all(tasks).await
    }
}
