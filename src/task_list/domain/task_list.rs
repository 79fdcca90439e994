//! Task list aggregate root.

use super::{TaskListDomainError, TaskListId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Maximum length of a task list name, in characters, after trimming.
pub const MAX_NAME_LENGTH: usize = 255;

/// Validated task list name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskListName(String);

impl TaskListName {
    /// Creates a validated task list name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::EmptyName`] for a blank name and
    /// [`TaskListDomainError::NameTooLong`] when the trimmed name exceeds
    /// [`MAX_NAME_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskListDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskListDomainError::EmptyName);
        }
        let length = trimmed.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(TaskListDomainError::NameTooLong { length });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskListName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TaskListName {
    type Error = TaskListDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskListName> for String {
    fn from(value: TaskListName) -> Self {
        value.0
    }
}

/// Parameter object for reconstructing a persisted task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskListData {
    /// Persisted task list identifier.
    pub id: TaskListId,
    /// Persisted name.
    pub name: String,
    /// Persisted owner.
    pub owner_id: UserId,
    /// Persisted connection roster, in insertion order.
    pub connected_user_ids: Vec<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted revision counter.
    pub revision: u64,
}

/// A task list owned by one user and shared with connected users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    id: TaskListId,
    name: TaskListName,
    owner_id: UserId,
    connected_user_ids: Vec<UserId>,
    created_at: DateTime<Utc>,
    revision: u64,
}

impl TaskList {
    /// Creates a task list owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is blank or too long.
    pub fn create(
        name: impl Into<String>,
        owner_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskListDomainError> {
        Ok(Self {
            id: TaskListId::new(),
            name: TaskListName::new(name)?,
            owner_id,
            connected_user_ids: Vec::new(),
            created_at: clock.utc(),
            revision: 0,
        })
    }

    /// Reconstructs a task list from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored name is invalid or the stored roster
    /// breaks the ownership invariants.
    pub fn from_persisted(data: PersistedTaskListData) -> Result<Self, TaskListDomainError> {
        let mut seen = HashSet::with_capacity(data.connected_user_ids.len());
        for user_id in &data.connected_user_ids {
            if *user_id == data.owner_id {
                return Err(TaskListDomainError::OwnerInRoster(*user_id));
            }
            if !seen.insert(*user_id) {
                return Err(TaskListDomainError::DuplicateConnection(*user_id));
            }
        }

        Ok(Self {
            id: data.id,
            name: TaskListName::new(data.name)?,
            owner_id: data.owner_id,
            connected_user_ids: data.connected_user_ids,
            created_at: data.created_at,
            revision: data.revision,
        })
    }

    /// Returns the task list identifier.
    #[must_use]
    pub const fn id(&self) -> TaskListId {
        self.id
    }

    /// Returns the task list name.
    #[must_use]
    pub const fn name(&self) -> &TaskListName {
        &self.name
    }

    /// Returns the owner.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the connected users in the order they were added.
    #[must_use]
    pub fn connected_user_ids(&self) -> &[UserId] {
        &self.connected_user_ids
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the revision this aggregate was loaded at.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` when `user_id` is the owner or a connection.
    #[must_use]
    pub fn is_connected(&self, user_id: UserId) -> bool {
        self.owner_id == user_id || self.connected_user_ids.contains(&user_id)
    }

    /// Renames the list on behalf of `logged_user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::NotConnected`] for callers without
    /// access, otherwise a validation error for an invalid name.
    pub fn update(
        &mut self,
        logged_user_id: UserId,
        name: impl Into<String>,
    ) -> Result<(), TaskListDomainError> {
        self.check_connection(logged_user_id)?;
        self.name = TaskListName::new(name)?;
        Ok(())
    }

    /// Shares the list with `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::NotConnected`] for callers without
    /// access, [`TaskListDomainError::OwnerCannotConnect`] when `user_id` is
    /// the owner and [`TaskListDomainError::AlreadyConnected`] when it is
    /// already on the roster.
    pub fn add_connection(
        &mut self,
        logged_user_id: UserId,
        user_id: UserId,
    ) -> Result<(), TaskListDomainError> {
        self.check_connection(logged_user_id)?;
        if user_id == self.owner_id {
            return Err(TaskListDomainError::OwnerCannotConnect(user_id));
        }
        if self.connected_user_ids.contains(&user_id) {
            return Err(TaskListDomainError::AlreadyConnected(user_id));
        }
        self.connected_user_ids.push(user_id);
        Ok(())
    }

    /// Stops sharing the list with `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::NotConnected`] for callers without
    /// access, [`TaskListDomainError::CannotRemoveOwner`] when `user_id` is
    /// the owner and [`TaskListDomainError::ConnectionNotFound`] when it is
    /// not on the roster.
    pub fn remove_connection(
        &mut self,
        logged_user_id: UserId,
        user_id: UserId,
    ) -> Result<(), TaskListDomainError> {
        self.check_connection(logged_user_id)?;
        if user_id == self.owner_id {
            return Err(TaskListDomainError::CannotRemoveOwner(user_id));
        }
        let position = self
            .connected_user_ids
            .iter()
            .position(|connected| *connected == user_id)
            .ok_or(TaskListDomainError::ConnectionNotFound(user_id))?;
        self.connected_user_ids.remove(position);
        Ok(())
    }

    /// Succeeds only for the owner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::NotOwner`] for anyone else.
    pub fn check_ownership(&self, user_id: UserId) -> Result<(), TaskListDomainError> {
        if self.owner_id == user_id {
            Ok(())
        } else {
            Err(TaskListDomainError::NotOwner(user_id))
        }
    }

    /// Succeeds for the owner and for connected users.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::NotConnected`] for anyone else.
    pub fn check_connection(&self, user_id: UserId) -> Result<(), TaskListDomainError> {
        if self.is_connected(user_id) {
            Ok(())
        } else {
            Err(TaskListDomainError::NotConnected(user_id))
        }
    }

    /// Advances the revision after a successful compare-and-swap write.
    pub(crate) const fn mark_persisted(&mut self) {
        self.revision += 1;
    }
}
