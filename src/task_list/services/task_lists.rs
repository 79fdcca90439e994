//! Service layer for task list management and sharing.

use super::{
    ConnectionView, CreateTaskListRequest, RetryPolicy, TaskListDetails, TaskListSummary,
    UpdateTaskListRequest,
};
use crate::error::{Classify, ErrorKind};
use crate::identity::{Unauthenticated, UserContext};
use crate::outcome::Outcome;
use crate::pagination::{Page, PageQuery, PaginationError, validate};
use crate::repository::RepositoryError;
use crate::task::ports::TaskRepository;
use crate::task_list::{
    domain::{TaskList, TaskListDomainError, TaskListId, TaskListName},
    ports::TaskListRepository,
};
use crate::user::{domain::UserId, ports::UserRepository};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Service-level errors for task list operations.
#[derive(Debug, Error)]
pub enum TaskListServiceError {
    /// No caller identity was supplied.
    #[error(transparent)]
    Unauthenticated(#[from] Unauthenticated),
    /// Paging parameters were rejected.
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    /// Validation or authorization failed inside the aggregate.
    #[error(transparent)]
    Domain(#[from] TaskListDomainError),
    /// The task list does not exist.
    #[error("TaskList not found")]
    TaskListNotFound(TaskListId),
    /// A referenced user does not exist.
    #[error("User not found")]
    UserNotFound(UserId),
    /// The roster references a user that has no stored record.
    #[error("task list {task_list_id} references missing user {user_id}")]
    IntegrityViolation {
        /// Task list whose roster is inconsistent.
        task_list_id: TaskListId,
        /// Connected user without a stored record.
        user_id: UserId,
    },
    /// The tasks of a list were deleted but the list itself was not.
    #[error("task list {task_list_id} was emptied but could not be deleted: {source}")]
    CascadeIncomplete {
        /// Task list that still exists without its tasks.
        task_list_id: TaskListId,
        /// Failure of the final delete attempt.
        source: RepositoryError,
    },
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl Classify for TaskListServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated(err) => err.kind(),
            Self::Pagination(err) => err.kind(),
            Self::Domain(err) => err.kind(),
            Self::TaskListNotFound(_) | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::IntegrityViolation { .. } | Self::CascadeIncomplete { .. } => {
                ErrorKind::Unexpected
            }
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for task list service operations.
pub type TaskListServiceResult<T> = Result<T, TaskListServiceError>;

/// Task list orchestration service.
///
/// Every operation acts on behalf of the caller in the supplied
/// [`UserContext`] and fails with [`TaskListServiceError::Unauthenticated`]
/// before any storage access when the context is anonymous.
#[derive(Clone)]
pub struct TaskListService<L, T, U, C>
where
    L: TaskListRepository,
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    task_lists: Arc<L>,
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
    retry_policy: RetryPolicy,
}

impl<L, T, U, C> TaskListService<L, T, U, C>
where
    L: TaskListRepository,
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task list service with the default retry policy.
    #[must_use]
    pub fn new(task_lists: Arc<L>, tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            task_lists,
            tasks,
            users,
            clock,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy used when deleting an emptied task list.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Lists one page of the task lists the caller owns or is connected to.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListServiceError::Pagination`] before touching storage
    /// when the paging parameters are invalid.
    pub async fn list_task_lists(
        &self,
        context: &UserContext,
        query: &PageQuery,
    ) -> TaskListServiceResult<Page<TaskListSummary>> {
        let user_id = context.require_user()?;
        let request = validate(query)?;
        let task_lists = self
            .task_lists
            .get_by_user_id_paged(user_id, request)
            .await?;
        Ok(Page::from_entities(
            task_lists,
            request,
            TaskListSummary::from,
        ))
    }

    /// Retrieves one task list together with its owner's name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListServiceError::TaskListNotFound`] for an unknown
    /// list, a forbidden domain error for callers without access, and
    /// [`TaskListServiceError::UserNotFound`] when the owner record is gone.
    pub async fn get_task_list(
        &self,
        context: &UserContext,
        id: TaskListId,
    ) -> TaskListServiceResult<TaskListDetails> {
        let user_id = context.require_user()?;
        let task_list = self.load(id).await?;
        task_list.check_connection(user_id)?;

        let owner_id = task_list.owner_id();
        let owner = self
            .users
            .get(owner_id)
            .await?
            .ok_or(TaskListServiceError::UserNotFound(owner_id))?;
        Ok(TaskListDetails::new(&task_list, &owner))
    }

    /// Creates a task list owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid name and
    /// [`TaskListServiceError::UserNotFound`] when the caller has no user
    /// record.
    pub async fn create_task_list(
        &self,
        context: &UserContext,
        request: CreateTaskListRequest,
    ) -> TaskListServiceResult<Outcome<TaskListId>> {
        let user_id = context.require_user()?;
        let name = TaskListName::new(request.name)?;
        if self.users.get(user_id).await?.is_none() {
            return Err(TaskListServiceError::UserNotFound(user_id));
        }

        let task_list = TaskList::create(name, user_id, &*self.clock)?;
        self.task_lists.create(&task_list).await?;
        info!(task_list_id = %task_list.id(), owner_id = %user_id, "created task list");
        Ok(Outcome::Created(task_list.id()))
    }

    /// Renames a task list.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid name,
    /// [`TaskListServiceError::TaskListNotFound`] for an unknown list, a
    /// forbidden domain error for callers without access, and a repository
    /// conflict when the list changed concurrently.
    pub async fn update_task_list(
        &self,
        context: &UserContext,
        id: TaskListId,
        request: UpdateTaskListRequest,
    ) -> TaskListServiceResult<Outcome<()>> {
        let user_id = context.require_user()?;
        let name = TaskListName::new(request.name)?;
        let mut task_list = self.load(id).await?;
        task_list.update(user_id, name)?;
        self.task_lists.update(&task_list).await?;
        info!(task_list_id = %id, "renamed task list");
        Ok(Outcome::Completed(()))
    }

    /// Deletes a task list and all of its tasks.
    ///
    /// Tasks are removed first. Deleting the emptied list is then retried
    /// under the configured [`RetryPolicy`] while the failure is transient.
    ///
    /// # Errors
    ///
    /// Returns a forbidden domain error unless the caller owns the list, and
    /// [`TaskListServiceError::CascadeIncomplete`] when the list survives
    /// every retry.
    pub async fn delete_task_list(
        &self,
        context: &UserContext,
        id: TaskListId,
    ) -> TaskListServiceResult<Outcome<()>> {
        let user_id = context.require_user()?;
        let task_list = self.load(id).await?;
        task_list.check_ownership(user_id)?;

        let removed_tasks = self.tasks.delete_all_by_task_list(id).await?;
        self.delete_emptied_list(id).await?;
        info!(task_list_id = %id, removed_tasks, "deleted task list");
        Ok(Outcome::Deleted(()))
    }

    /// Lists the connected users of a task list in roster order.
    ///
    /// # Errors
    ///
    /// Returns a forbidden domain error for callers without access and
    /// [`TaskListServiceError::IntegrityViolation`] when a connected user has
    /// no stored record.
    pub async fn list_connections(
        &self,
        context: &UserContext,
        id: TaskListId,
    ) -> TaskListServiceResult<Vec<ConnectionView>> {
        let user_id = context.require_user()?;
        let task_list = self.load(id).await?;
        task_list.check_connection(user_id)?;

        let users: HashMap<UserId, _> = self
            .users
            .get_many(task_list.connected_user_ids())
            .await?
            .into_iter()
            .map(|user| (user.id(), user))
            .collect();

        task_list
            .connected_user_ids()
            .iter()
            .map(|connected| {
                users.get(connected).map(ConnectionView::from).ok_or(
                    TaskListServiceError::IntegrityViolation {
                        task_list_id: id,
                        user_id: *connected,
                    },
                )
            })
            .collect()
    }

    /// Shares a task list with another user.
    ///
    /// # Errors
    ///
    /// Returns a forbidden domain error for callers without access, a
    /// conflict when `user_id` is the owner or already connected, and
    /// [`TaskListServiceError::UserNotFound`] for an unknown `user_id`.
    pub async fn add_connection(
        &self,
        context: &UserContext,
        task_list_id: TaskListId,
        user_id: UserId,
    ) -> TaskListServiceResult<Outcome<()>> {
        let logged_user_id = context.require_user()?;
        let mut task_list = self.load(task_list_id).await?;
        task_list.add_connection(logged_user_id, user_id)?;
        if self.users.get(user_id).await?.is_none() {
            return Err(TaskListServiceError::UserNotFound(user_id));
        }

        self.task_lists.update(&task_list).await?;
        info!(%task_list_id, %user_id, "connected user to task list");
        Ok(Outcome::Created(()))
    }

    /// Stops sharing a task list with a user.
    ///
    /// # Errors
    ///
    /// Returns a forbidden domain error for callers without access or when
    /// `user_id` is the owner, and a not-found domain error when `user_id` is
    /// not connected.
    pub async fn remove_connection(
        &self,
        context: &UserContext,
        task_list_id: TaskListId,
        user_id: UserId,
    ) -> TaskListServiceResult<Outcome<()>> {
        let logged_user_id = context.require_user()?;
        let mut task_list = self.load(task_list_id).await?;
        task_list.remove_connection(logged_user_id, user_id)?;
        self.task_lists.update(&task_list).await?;
        info!(%task_list_id, %user_id, "disconnected user from task list");
        Ok(Outcome::Deleted(()))
    }

    async fn load(&self, id: TaskListId) -> TaskListServiceResult<TaskList> {
        self.task_lists
            .get(id)
            .await?
            .ok_or(TaskListServiceError::TaskListNotFound(id))
    }

    async fn delete_emptied_list(&self, id: TaskListId) -> TaskListServiceResult<()> {
        let max_attempts = self.retry_policy.max_attempts().get();
        let mut attempt = 1;
        loop {
            match self.task_lists.delete(id).await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    warn!(task_list_id = %id, attempt, error = %err, "retrying task list delete");
                    tokio::time::sleep(self.retry_policy.backoff()).await;
                    attempt += 1;
                }
                Err(err) if err.is_transient() => {
                    error!(
                        task_list_id = %id,
                        attempts = attempt,
                        error = %err,
                        "task list has no tasks left but could not be deleted"
                    );
                    return Err(TaskListServiceError::CascadeIncomplete {
                        task_list_id: id,
                        source: err,
                    });
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
