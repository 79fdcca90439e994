//! Error types for task list validation and authorization.

use thiserror::Error;

use crate::error::{Classify, ErrorKind};
use crate::user::domain::UserId;

/// Errors returned by task list construction and mutators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskListDomainError {
    /// The task list name is empty after trimming.
    #[error("Name is required.")]
    EmptyName,

    /// The trimmed task list name exceeds the maximum length.
    #[error("Name must be between 1 and 255 characters long")]
    NameTooLong {
        /// Length of the rejected name in characters.
        length: usize,
    },

    /// The user is neither the owner nor a connection of the list.
    #[error("User is not connected to this task list.")]
    NotConnected(UserId),

    /// The user is not the owner of the list.
    #[error("User is not an owner of this task list.")]
    NotOwner(UserId),

    /// The owner cannot also be a connection.
    #[error("User is the owner of this task list.")]
    OwnerCannotConnect(UserId),

    /// The user is already a connection of the list.
    #[error("User is already connected to this task list.")]
    AlreadyConnected(UserId),

    /// The owner cannot be removed from the list.
    #[error("You cannot remove an owner.")]
    CannotRemoveOwner(UserId),

    /// The user to remove is not a connection of the list.
    #[error("User is not connected to this task list.")]
    ConnectionNotFound(UserId),

    /// A persisted roster lists the owner as a connection.
    #[error("persisted roster contains the owner {0}")]
    OwnerInRoster(UserId),

    /// A persisted roster lists the same connection twice.
    #[error("persisted roster contains {0} more than once")]
    DuplicateConnection(UserId),
}

impl Classify for TaskListDomainError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => ErrorKind::Validation,
            Self::NotConnected(_) | Self::NotOwner(_) | Self::CannotRemoveOwner(_) => {
                ErrorKind::Forbidden
            }
            Self::OwnerCannotConnect(_) | Self::AlreadyConnected(_) => ErrorKind::Conflict,
            Self::ConnectionNotFound(_) => ErrorKind::NotFound,
            Self::OwnerInRoster(_) | Self::DuplicateConnection(_) => ErrorKind::Unexpected,
        }
    }
}
