//! Service layer for tasks.
//!
//! Every operation resolves the parent task list first and requires the
//! caller to be its owner or a connection.

use crate::error::{Classify, ErrorKind};
use crate::identity::{Unauthenticated, UserContext};
use crate::outcome::Outcome;
use crate::pagination::{Page, PageQuery, PaginationError, validate};
use crate::repository::RepositoryError;
use crate::task::{
    domain::{Task, TaskDetails, TaskDomainError, TaskId, TaskName},
    ports::TaskRepository,
};
use crate::task_list::{
    domain::{TaskListDomainError, TaskListId},
    ports::TaskListRepository,
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a task.
pub type CreateTaskRequest = TaskDetails;

/// Request payload for editing a task; fields omitted are cleared.
pub type UpdateTaskRequest = TaskDetails;

/// Read model for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion flag.
    pub is_completed: bool,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            name: task.name().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
            is_completed: task.is_completed(),
        }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No caller identity was supplied.
    #[error(transparent)]
    Unauthenticated(#[from] Unauthenticated),
    /// Paging parameters were rejected.
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    /// Task validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The caller may not access the parent task list.
    #[error(transparent)]
    Access(#[from] TaskListDomainError),
    /// The parent task list does not exist.
    #[error("TaskList not found")]
    TaskListNotFound(TaskListId),
    /// The task does not exist.
    #[error("Task not found.")]
    TaskNotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl Classify for TaskServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated(err) => err.kind(),
            Self::Pagination(err) => err.kind(),
            Self::Domain(err) => err.kind(),
            Self::Access(err) => err.kind(),
            Self::TaskListNotFound(_) | Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<T, L, C>
where
    T: TaskRepository,
    L: TaskListRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    task_lists: Arc<L>,
    clock: Arc<C>,
}

impl<T, L, C> TaskService<T, L, C>
where
    T: TaskRepository,
    L: TaskListRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, task_lists: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            task_lists,
            clock,
        }
    }

    /// Lists one page of the tasks in a task list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Pagination`] before touching storage when
    /// the paging parameters are invalid, and
    /// [`TaskServiceError::Access`] when the caller is not connected.
    pub async fn list_tasks(
        &self,
        context: &UserContext,
        task_list_id: TaskListId,
        query: &PageQuery,
    ) -> TaskServiceResult<Page<TaskView>> {
        let user_id = context.require_user()?;
        let request = validate(query)?;
        self.authorize(user_id, task_list_id).await?;
        let tasks = self
            .tasks
            .get_by_task_list_paged(task_list_id, request)
            .await?;
        Ok(Page::from_entities(tasks, request, TaskView::from))
    }

    /// Adds a task to a task list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a blank name,
    /// [`TaskServiceError::TaskListNotFound`] for an unknown list, and
    /// [`TaskServiceError::Access`] when the caller is not connected.
    pub async fn create_task(
        &self,
        context: &UserContext,
        task_list_id: TaskListId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Outcome<TaskId>> {
        let user_id = context.require_user()?;
        TaskName::new(request.name.as_str())?;
        self.authorize(user_id, task_list_id).await?;

        let task = Task::create(request, task_list_id, &*self.clock)?;
        self.tasks.create(&task).await?;
        info!(task_id = %task.id(), %task_list_id, "created task");
        Ok(Outcome::Created(task.id()))
    }

    /// Replaces the editable fields of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a blank name,
    /// [`TaskServiceError::TaskNotFound`] for an unknown task, and
    /// [`TaskServiceError::Access`] when the caller is not connected to the
    /// parent list.
    pub async fn update_task(
        &self,
        context: &UserContext,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Outcome<()>> {
        let user_id = context.require_user()?;
        TaskName::new(request.name.as_str())?;
        let mut task = self.load_authorized(user_id, task_id).await?;
        task.update(request)?;
        self.tasks.update(&task).await?;
        info!(%task_id, "updated task");
        Ok(Outcome::Completed(()))
    }

    /// Marks a task as completed or reopens it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] for an unknown task and
    /// [`TaskServiceError::Access`] when the caller is not connected to the
    /// parent list.
    pub async fn set_task_completion(
        &self,
        context: &UserContext,
        task_id: TaskId,
        is_completed: bool,
    ) -> TaskServiceResult<Outcome<()>> {
        let user_id = context.require_user()?;
        let mut task = self.load_authorized(user_id, task_id).await?;
        task.change_status(is_completed);
        self.tasks.update(&task).await?;
        info!(%task_id, is_completed, "changed task status");
        Ok(Outcome::Completed(()))
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] for an unknown task and
    /// [`TaskServiceError::Access`] when the caller is not connected to the
    /// parent list.
    pub async fn delete_task(
        &self,
        context: &UserContext,
        task_id: TaskId,
    ) -> TaskServiceResult<Outcome<()>> {
        let user_id = context.require_user()?;
        self.load_authorized(user_id, task_id).await?;
        self.tasks.delete(task_id).await?;
        info!(%task_id, "deleted task");
        Ok(Outcome::Deleted(()))
    }

    async fn authorize(&self, user_id: UserId, task_list_id: TaskListId) -> TaskServiceResult<()> {
        let task_list = self
            .task_lists
            .get(task_list_id)
            .await?
            .ok_or(TaskServiceError::TaskListNotFound(task_list_id))?;
        task_list.check_connection(user_id)?;
        Ok(())
    }

    async fn load_authorized(&self, user_id: UserId, task_id: TaskId) -> TaskServiceResult<Task> {
        let task = self
            .tasks
            .get(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))?;
        self.authorize(user_id, task.task_list_id()).await?;
        Ok(task)
    }
}
