//! Repository port for task list persistence and membership queries.

use crate::pagination::{PageRequest, PagedEntities};
use crate::repository::RepositoryResult;
use crate::task_list::domain::{TaskList, TaskListId};
use crate::user::domain::UserId;
use async_trait::async_trait;

/// Task list persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskListRepository: Send + Sync {
    /// Stores a new task list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::repository::RepositoryError::Duplicate`] when the
    /// identifier already exists.
    async fn create(&self, task_list: &TaskList) -> RepositoryResult<()>;

    /// Finds a task list by identifier.
    ///
    /// Returns `None` when the task list does not exist.
    async fn get(&self, id: TaskListId) -> RepositoryResult<Option<TaskList>>;

    /// Returns one page of all task lists ordered by identifier.
    async fn get_paged(&self, request: PageRequest) -> RepositoryResult<PagedEntities<TaskList>>;

    /// Persists changes to an existing task list.
    ///
    /// The write only succeeds while the stored revision still equals
    /// [`TaskList::revision`]; the stored revision is then advanced by one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::repository::RepositoryError::NotFound`] when the list
    /// does not exist and [`crate::repository::RepositoryError::Conflict`]
    /// when it was modified after it was loaded.
    async fn update(&self, task_list: &TaskList) -> RepositoryResult<()>;

    /// Deletes a task list. Its tasks are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::repository::RepositoryError::NotFound`] when the list
    /// does not exist.
    async fn delete(&self, id: TaskListId) -> RepositoryResult<()>;

    /// Returns one page of the lists `user_id` owns or is connected to.
    async fn get_by_user_id_paged(
        &self,
        user_id: UserId,
        request: PageRequest,
    ) -> RepositoryResult<PagedEntities<TaskList>>;
}
