//! User entity.

use super::{UserDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name of a user, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Creates a validated user name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] when the name is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: UserName,
}

impl User {
    /// Creates a user with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] when the name is blank.
    pub fn create(name: impl Into<String>) -> Result<Self, UserDomainError> {
        Ok(Self {
            id: UserId::new(),
            name: UserName::new(name)?,
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: UserId, name: UserName) -> Self {
        Self { id, name }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Replaces the display name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] when the name is blank; the
    /// current name is kept in that case.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), UserDomainError> {
        self.name = UserName::new(name)?;
        Ok(())
    }
}
