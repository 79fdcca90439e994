//! Port contracts for task list persistence.

pub mod repository;

pub use repository::TaskListRepository;

#[cfg(test)]
pub use repository::MockTaskListRepository;
