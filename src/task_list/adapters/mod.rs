//! Adapter implementations for task list persistence.

pub mod memory;
pub mod postgres;
