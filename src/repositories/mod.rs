//! Repository layer for database operations.
//!
//! Each repository is a stateless struct whose functions are generic over
//! [`sea_orm::ConnectionTrait`], so the same call works against the shared
//! connection or inside a transaction. Repositories speak entity models
//! only; mapping to domain records happens in the storage layer.

pub mod category;
pub mod task;
pub mod user;

pub use category::CategoryRepository;
pub use task::TaskRepository;
pub use user::UserRepository;
