//! Application services for tasks within shared task lists.

mod tasks;

pub use tasks::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, TaskView,
    UpdateTaskRequest,
};
