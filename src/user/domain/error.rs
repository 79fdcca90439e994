//! Error types for user domain validation.

use thiserror::Error;

use crate::error::{Classify, ErrorKind};

/// Errors returned while constructing or renaming users.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user name is empty after trimming.
    #[error("Name is required.")]
    EmptyName,
}

impl Classify for UserDomainError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
