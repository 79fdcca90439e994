//! Caller identity for one unit of work.
//!
//! Authentication happens outside this crate. The transport layer resolves
//! the caller (or fails to) and hands services a [`UserContext`]. An absent
//! identity is an explicit state rather than a sentinel identifier: services
//! that act on behalf of a user call [`UserContext::require_user`] before
//! doing any work.

use thiserror::Error;

use crate::error::{Classify, ErrorKind};
use crate::user::domain::UserId;

/// Returned when an operation needs a caller identity and none was supplied.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("a valid user identity must be provided")]
pub struct Unauthenticated;

impl Classify for Unauthenticated {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Unauthenticated
    }
}

/// Identity of the caller for the current unit of work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserContext {
    logged_user_id: Option<UserId>,
}

impl UserContext {
    /// Creates a context without a caller identity.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            logged_user_id: None,
        }
    }

    /// Creates a context for an authenticated caller.
    #[must_use]
    pub const fn authenticated(user_id: UserId) -> Self {
        Self {
            logged_user_id: Some(user_id),
        }
    }

    /// Returns the caller identity, if any.
    #[must_use]
    pub const fn logged_user_id(&self) -> Option<UserId> {
        self.logged_user_id
    }

    /// Returns the caller identity or fails when none was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`Unauthenticated`] for an anonymous context.
    pub const fn require_user(&self) -> Result<UserId, Unauthenticated> {
        match self.logged_user_id {
            Some(user_id) => Ok(user_id),
            None => Err(Unauthenticated),
        }
    }
}

impl From<Option<UserId>> for UserContext {
    fn from(logged_user_id: Option<UserId>) -> Self {
        Self { logged_user_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn anonymous_context_requires_identity() {
        let context = UserContext::anonymous();

        assert_eq!(context.require_user(), Err(Unauthenticated));
        assert_eq!(Unauthenticated.kind(), ErrorKind::Unauthenticated);
    }

    #[rstest]
    fn authenticated_context_exposes_identity() {
        let user_id = UserId::new();
        let context = UserContext::authenticated(user_id);

        assert_eq!(context.require_user(), Ok(user_id));
        assert_eq!(context.logged_user_id(), Some(user_id));
        assert_eq!(UserContext::from(Some(user_id)), context);
    }
}
