//! Application services for task list management and sharing.

mod retry;
mod task_lists;
mod views;

pub use retry::RetryPolicy;
pub use task_lists::{TaskListService, TaskListServiceError, TaskListServiceResult};
pub use views::{
    ConnectionView, CreateTaskListRequest, TaskListDetails, TaskListSummary,
    UpdateTaskListRequest,
};
