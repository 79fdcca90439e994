//! Request payloads and read models for task list operations.

use crate::task_list::domain::{TaskList, TaskListId};
use crate::user::domain::{User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request payload for creating a task list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskListRequest {
    /// List name; trimmed before validation.
    pub name: String,
}

impl CreateTaskListRequest {
    /// Creates a request for the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request payload for renaming a task list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskListRequest {
    /// New list name; trimmed before validation.
    pub name: String,
}

impl UpdateTaskListRequest {
    /// Creates a request for the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Task list entry in a paged listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListSummary {
    /// Task list identifier.
    pub id: TaskListId,
    /// List name.
    pub name: String,
}

impl From<TaskList> for TaskListSummary {
    fn from(task_list: TaskList) -> Self {
        Self {
            id: task_list.id(),
            name: task_list.name().as_str().to_owned(),
        }
    }
}

/// Detailed view of one task list including its owner's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListDetails {
    /// Task list identifier.
    pub id: TaskListId,
    /// List name.
    pub name: String,
    /// Owning user.
    pub owner_id: UserId,
    /// Display name of the owner.
    pub owner_name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskListDetails {
    pub(crate) fn new(task_list: &TaskList, owner: &User) -> Self {
        Self {
            id: task_list.id(),
            name: task_list.name().as_str().to_owned(),
            owner_id: task_list.owner_id(),
            owner_name: owner.name().as_str().to_owned(),
            created_at: task_list.created_at(),
        }
    }
}

/// A connected user of a task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionView {
    /// Connected user.
    pub user_id: UserId,
    /// Display name of the connected user.
    pub name: String,
}

impl From<&User> for ConnectionView {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id(),
            name: user.name().as_str().to_owned(),
        }
    }
}
