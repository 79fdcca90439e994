//! Domain model for shared task lists.
//!
//! A [`TaskList`] is owned by one user and shared with an ordered roster of
//! connected users. Every mutator authorizes the caller before it changes
//! any field, so a rejected call leaves the aggregate untouched.

mod error;
mod ids;
mod task_list;

pub use error::TaskListDomainError;
pub use ids::TaskListId;
pub use task_list::{MAX_NAME_LENGTH, PersistedTaskListData, TaskList, TaskListName};
