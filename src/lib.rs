//! Tasklists: multi-user task-list management.
//!
//! Users own task lists, share them with other users ("connections"), and
//! attach tasks with due dates and completion state to a list. The crate
//! holds the authorization-bearing domain model together with the
//! pagination and repository contracts every listing operation relies on.
//!
//! # Architecture
//!
//! Tasklists follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//! - **Services**: One orchestration method per use case
//!
//! # Modules
//!
//! - [`user`]: User registration and lookup
//! - [`task_list`]: Task lists, ownership, and connection management
//! - [`task`]: Tasks attached to a task list
//! - [`pagination`]: Page validation and metadata shared by listings
//! - [`identity`]: The caller identity for one unit of work
//! - [`error`]: Error classification and client-facing error payloads

pub mod config;
pub mod error;
pub mod identity;
pub mod outcome;
pub mod pagination;
pub mod postgres;
pub mod repository;
pub mod seed;
pub mod task;
pub mod task_list;
pub mod user;
