//! Repository port for task persistence and per-list queries.

use crate::pagination::{PageRequest, PagedEntities};
use crate::repository::RepositoryResult;
use crate::task::domain::{Task, TaskId};
use crate::task_list::domain::TaskListId;
use async_trait::async_trait;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::repository::RepositoryError::Duplicate`] when the
    /// task ID already exists.
    async fn create(&self, task: &Task) -> RepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn get(&self, id: TaskId) -> RepositoryResult<Option<Task>>;

    /// Returns one page of all tasks ordered by identifier.
    async fn get_paged(&self, request: PageRequest) -> RepositoryResult<PagedEntities<Task>>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::repository::RepositoryError::NotFound`] when the task
    /// does not exist.
    async fn update(&self, task: &Task) -> RepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::repository::RepositoryError::NotFound`] when the task
    /// does not exist.
    async fn delete(&self, id: TaskId) -> RepositoryResult<()>;

    /// Returns one page of the tasks belonging to `task_list_id`.
    async fn get_by_task_list_paged(
        &self,
        task_list_id: TaskListId,
        request: PageRequest,
    ) -> RepositoryResult<PagedEntities<Task>>;

    /// Deletes every task belonging to `task_list_id` and returns how many
    /// were removed.
    async fn delete_all_by_task_list(&self, task_list_id: TaskListId) -> RepositoryResult<u64>;
}
