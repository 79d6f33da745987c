//! SeaORM entity models for the three record collections.
//!
//! There are no relations between the tables: a task whose
//! category is gone is still a valid row.

pub mod category;
pub mod task;
pub mod user;

pub use category::Entity as Category;
pub use task::Entity as Task;
pub use user::Entity as User;
