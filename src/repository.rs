//! Error contract shared by every repository port.
//!
//! Each entity has its own port trait (see `user::ports`, `task_list::ports`
//! and `task::ports`), all offering create, get, paged get, update, and
//! delete. They report failures through [`RepositoryError`] so that services
//! classify storage problems the same way for every entity.

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{Classify, ErrorKind};

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The entity to update or delete does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, for example `"task list"`.
        entity: &'static str,
        /// Identifier that was looked up.
        id: Uuid,
    },

    /// An entity with the same identifier already exists.
    #[error("duplicate {entity} identifier: {id}")]
    Duplicate {
        /// Entity kind.
        entity: &'static str,
        /// Conflicting identifier.
        id: Uuid,
    },

    /// The stored entity changed since it was loaded.
    #[error("{entity} {id} was modified concurrently (expected revision {expected_revision})")]
    Conflict {
        /// Entity kind.
        entity: &'static str,
        /// Identifier of the stale entity.
        id: Uuid,
        /// Revision the caller loaded.
        expected_revision: u64,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Creates a not-found error for the given entity kind.
    #[must_use]
    pub const fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` for failures that may succeed when retried.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

impl Classify for RepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Duplicate { .. } | Self::InvalidPersistedData(_) | Self::Persistence(_) => {
                ErrorKind::Unexpected
            }
        }
    }
}

/// Maps a poisoned in-memory lock into a persistence error.
pub(crate) fn lock_poisoned(err: &impl std::fmt::Display) -> RepositoryError {
    RepositoryError::persistence(std::io::Error::other(err.to_string()))
}
