//! Port contracts for user persistence.

pub mod repository;

pub use repository::UserRepository;

#[cfg(test)]
pub use repository::MockUserRepository;
