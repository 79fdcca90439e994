//! Repository port for user persistence and lookup.

use crate::pagination::{PageRequest, PagedEntities};
use crate::repository::RepositoryResult;
use crate::user::domain::{User, UserId};
use async_trait::async_trait;

/// User persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::repository::RepositoryError::Duplicate`] when the
    /// user ID already exists.
    async fn create(&self, user: &User) -> RepositoryResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn get(&self, id: UserId) -> RepositoryResult<Option<User>>;

    /// Returns one page of all users ordered by identifier.
    async fn get_paged(&self, request: PageRequest) -> RepositoryResult<PagedEntities<User>>;

    /// Persists changes to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::repository::RepositoryError::NotFound`] when the user
    /// does not exist.
    async fn update(&self, user: &User) -> RepositoryResult<()>;

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::repository::RepositoryError::NotFound`] when the user
    /// does not exist.
    async fn delete(&self, id: UserId) -> RepositoryResult<()>;

    /// Returns every stored user whose identifier is in `ids`.
    ///
    /// Unknown identifiers are skipped; the result order is unspecified.
    async fn get_many(&self, ids: &[UserId]) -> RepositoryResult<Vec<User>>;
}
