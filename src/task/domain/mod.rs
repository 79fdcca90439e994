//! Domain model for tasks.
//!
//! A task belongs to exactly one task list for its whole life. Access to a
//! task is decided by its parent list, so the task itself carries no
//! authorization rules.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use task::{PersistedTaskData, Task, TaskDetails, TaskName};
