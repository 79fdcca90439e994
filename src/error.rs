//! Error classification shared by every service.
//!
//! Domain, pagination, and repository errors each map onto one
//! [`ErrorKind`]. A boundary layer translates the kind into its own status
//! vocabulary and uses [`ClientError`] to build the payload it returns, which
//! keeps the details of unexpected failures out of client responses.

use serde::Serialize;
use std::fmt;
use tracing::error;
use uuid::Uuid;

/// Client-visible failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or out-of-range input; the client must fix the request.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// The caller lacks the required relationship to the aggregate.
    Forbidden,
    /// The operation would violate a uniqueness or membership invariant.
    Conflict,
    /// No caller identity was supplied for an operation that needs one.
    Unauthenticated,
    /// An unanticipated failure; details are logged, never returned.
    Unexpected,
}

impl ErrorKind {
    /// Returns the stable machine-readable name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::Unauthenticated => "unauthenticated",
            Self::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that know which client-visible category they belong to.
pub trait Classify: std::error::Error {
    /// Returns the failure category of this error.
    fn kind(&self) -> ErrorKind;
}

/// Client-facing error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientError {
    kind: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    incident_id: Option<Uuid>,
}

impl ClientError {
    /// Builds the payload for a classified error.
    ///
    /// Unexpected failures are logged together with a freshly generated
    /// incident identifier, and the returned message only mentions that
    /// identifier.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: Classify + ?Sized,
    {
        let kind = err.kind();
        if kind != ErrorKind::Unexpected {
            return Self {
                kind,
                message: err.to_string(),
                incident_id: None,
            };
        }

        let incident_id = Uuid::new_v4();
        error!(%incident_id, error = %err, "unexpected failure");
        Self {
            kind,
            message: format!("An unexpected error occurred (error id: {incident_id})."),
            incident_id: Some(incident_id),
        }
    }

    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message safe to show to the client.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the incident identifier of an unexpected failure.
    #[must_use]
    pub const fn incident_id(&self) -> Option<Uuid> {
        self.incident_id
    }
}
