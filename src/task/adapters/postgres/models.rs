//! Diesel row models for task persistence.

use super::schema::tasks;
use crate::repository::{RepositoryError, RepositoryResult};
use crate::task::domain::{PersistedTaskData, Task, TaskId, TaskName};
use crate::task_list::domain::TaskListId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion flag.
    pub is_completed: bool,
    /// Parent task list.
    pub task_list_id: uuid::Uuid,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion flag.
    pub is_completed: bool,
    /// Parent task list.
    pub task_list_id: uuid::Uuid,
}

/// Changeset applied when a task is edited or its status changes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion flag.
    pub is_completed: bool,
}

impl From<&Task> for NewTaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            name: task.name().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
            created_at: task.created_at(),
            is_completed: task.is_completed(),
            task_list_id: task.task_list_id().into_inner(),
        }
    }
}

impl From<&Task> for TaskChangeset {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
            is_completed: task.is_completed(),
        }
    }
}

impl TaskRow {
    /// Reconstructs the domain task, rejecting rows with a blank name.
    pub fn into_domain(self) -> RepositoryResult<Task> {
        let name = TaskName::new(self.name).map_err(RepositoryError::invalid_persisted_data)?;
        Ok(Task::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(self.id),
            name,
            description: self.description,
            due_date: self.due_date,
            created_at: self.created_at,
            is_completed: self.is_completed,
            task_list_id: TaskListId::from_uuid(self.task_list_id),
        }))
    }
}
