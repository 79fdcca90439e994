//! Error types for task domain validation.

use thiserror::Error;

use crate::error::{Classify, ErrorKind};

/// Errors returned while constructing or updating tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("Name is required.")]
    EmptyName,
}

impl Classify for TaskDomainError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
