//! Unit tests for the task list context.

mod repository_tests;
