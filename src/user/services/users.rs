//! Service layer for user registration and lookup.

use crate::error::{Classify, ErrorKind};
use crate::outcome::Outcome;
use crate::pagination::{Page, PageQuery, PaginationError, validate};
use crate::repository::RepositoryError;
use crate::user::{
    domain::{User, UserDomainError, UserId},
    ports::UserRepository,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddUserRequest {
    /// Display name; trimmed before validation.
    pub name: String,
}

impl AddUserRequest {
    /// Creates a request for the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Read model for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            name: user.name().as_str().to_owned(),
        }
    }
}

/// Service-level errors for user operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Paging parameters were rejected.
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// The requested user does not exist.
    #[error("User was not found")]
    NotFound(UserId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl Classify for UserServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Pagination(err) => err.kind(),
            Self::Domain(err) => err.kind(),
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User registration and lookup service.
///
/// User operations do not act on behalf of a caller, so they take no
/// identity context.
#[derive(Clone)]
pub struct UserService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Creates a new user service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists one page of users ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Pagination`] before touching storage when
    /// the paging parameters are invalid.
    pub async fn list_users(&self, query: &PageQuery) -> UserServiceResult<Page<UserView>> {
        let request = validate(query)?;
        let users = self.repository.get_paged(request).await?;
        Ok(Page::from_entities(users, request, UserView::from))
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Domain`] when the name is blank.
    pub async fn add_user(&self, request: AddUserRequest) -> UserServiceResult<Outcome<UserId>> {
        let user = User::create(request.name)?;
        self.repository.create(&user).await?;
        info!(user_id = %user.id(), "registered user");
        Ok(Outcome::Created(user.id()))
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when no such user exists.
    pub async fn get_user(&self, id: UserId) -> UserServiceResult<UserView> {
        self.repository
            .get(id)
            .await?
            .map(UserView::from)
            .ok_or(UserServiceError::NotFound(id))
    }
}
