//! Success markers returned by service methods.
//!
//! The boundary layer uses the marker to pick a transport-level status (for
//! example "created" or "no content") without inspecting the operation.

/// Successful service result tagged with what happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation completed without creating or deleting an entity.
    Completed(T),
    /// A new entity or relationship was created.
    Created(T),
    /// An entity or relationship was deleted.
    Deleted(T),
}

impl<T> Outcome<T> {
    /// Returns the wrapped value.
    pub fn into_inner(self) -> T {
        match self {
            Self::Completed(value) | Self::Created(value) | Self::Deleted(value) => value,
        }
    }

    /// Returns `true` for [`Outcome::Created`].
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Returns `true` for [`Outcome::Deleted`].
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}
