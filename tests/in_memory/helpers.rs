//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklists::identity::UserContext;
use tasklists::task::{adapters::memory::InMemoryTaskRepository, services::TaskService};
use tasklists::task_list::{
    adapters::memory::InMemoryTaskListRepository,
    domain::TaskListId,
    services::{CreateTaskListRequest, TaskListService},
};
use tasklists::user::{
    adapters::memory::InMemoryUserRepository,
    domain::UserId,
    services::{AddUserRequest, UserService},
};

/// Task list service wired to in-memory repositories.
pub type TestTaskListService = TaskListService<
    InMemoryTaskListRepository,
    InMemoryTaskRepository,
    InMemoryUserRepository,
    DefaultClock,
>;

/// Task service wired to in-memory repositories.
pub type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryTaskListRepository, DefaultClock>;

/// All three services sharing one set of repositories.
pub struct App {
    pub users: UserService<InMemoryUserRepository>,
    pub task_lists: TestTaskListService,
    pub tasks: TestTaskService,
    pub user_repository: Arc<InMemoryUserRepository>,
    pub task_list_repository: Arc<InMemoryTaskListRepository>,
    pub task_repository: Arc<InMemoryTaskRepository>,
}

impl App {
    /// Registers a user and returns an authenticated context for them.
    pub async fn register(&self, name: &str) -> (UserId, UserContext) {
        let id = self
            .users
            .add_user(AddUserRequest::new(name))
            .await
            .expect("user registration should succeed")
            .into_inner();
        (id, UserContext::authenticated(id))
    }

    /// Creates a task list owned by the caller.
    pub async fn create_list(&self, context: &UserContext, name: &str) -> TaskListId {
        self.task_lists
            .create_task_list(context, CreateTaskListRequest::new(name))
            .await
            .expect("task list creation should succeed")
            .into_inner()
    }
}

/// Provides services over fresh in-memory repositories.
#[fixture]
pub fn app() -> App {
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let task_list_repository = Arc::new(InMemoryTaskListRepository::new());
    let task_repository = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(DefaultClock);

    App {
        users: UserService::new(Arc::clone(&user_repository)),
        task_lists: TaskListService::new(
            Arc::clone(&task_list_repository),
            Arc::clone(&task_repository),
            Arc::clone(&user_repository),
            Arc::clone(&clock),
        ),
        tasks: TaskService::new(
            Arc::clone(&task_repository),
            Arc::clone(&task_list_repository),
            clock,
        ),
        user_repository,
        task_list_repository,
        task_repository,
    }
}
