//! Shared world state for task list sharing BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklists::identity::UserContext;
use tasklists::task::adapters::memory::InMemoryTaskRepository;
use tasklists::task_list::{
    adapters::memory::InMemoryTaskListRepository,
    domain::TaskListId,
    services::{TaskListService, TaskListServiceError},
};
use tasklists::user::{
    adapters::memory::InMemoryUserRepository, domain::UserId, services::UserService,
};

/// Task list service type used by the BDD world.
pub type TestTaskListService = TaskListService<
    InMemoryTaskListRepository,
    InMemoryTaskRepository,
    InMemoryUserRepository,
    DefaultClock,
>;

/// Scenario world for task list sharing behaviour tests.
pub struct SharingWorld {
    pub users: UserService<InMemoryUserRepository>,
    pub task_lists: TestTaskListService,
    pub registered: HashMap<String, UserId>,
    pub task_list_id: Option<TaskListId>,
    pub last_result: Option<Result<(), TaskListServiceError>>,
}

impl SharingWorld {
    /// Creates a world with empty repositories.
    #[must_use]
    pub fn new() -> Self {
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let task_lists = TaskListService::new(
            Arc::new(InMemoryTaskListRepository::new()),
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&user_repository),
            Arc::new(DefaultClock),
        );

        Self {
            users: UserService::new(user_repository),
            task_lists,
            registered: HashMap::new(),
            task_list_id: None,
            last_result: None,
        }
    }

    /// Returns the identifier of a user registered earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no user with that name was registered.
    pub fn user_id(&self, name: &str) -> Result<UserId, eyre::Report> {
        self.registered
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("user {name} was not registered in this scenario"))
    }

    /// Returns an authenticated context for a registered user.
    ///
    /// # Errors
    ///
    /// Returns an error if no user with that name was registered.
    pub fn context(&self, name: &str) -> Result<UserContext, eyre::Report> {
        self.user_id(name).map(UserContext::authenticated)
    }

    /// Returns the task list created by the scenario background.
    ///
    /// # Errors
    ///
    /// Returns an error if no task list was created yet.
    pub fn task_list_id(&self) -> Result<TaskListId, eyre::Report> {
        self.task_list_id
            .ok_or_else(|| eyre::eyre!("missing task list in scenario world"))
    }
}

impl Default for SharingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SharingWorld {
    SharingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
