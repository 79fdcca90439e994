//! Demonstration dataset and the seeder that loads it.
//!
//! Seeding is idempotent: every record has a fixed identifier and is
//! inserted when absent or overwritten when present. Records of one kind are
//! written concurrently, and each kind completes before the next begins so
//! that task lists never precede their users, nor tasks their lists.

use chrono::{DateTime, Duration, Utc};
use futures::future::try_join_all;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::{Uuid, uuid};

use crate::repository::RepositoryError;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskDomainError, TaskId, TaskName},
    ports::TaskRepository,
};
use crate::task_list::{
    domain::{PersistedTaskListData, TaskList, TaskListDomainError, TaskListId},
    ports::TaskListRepository,
};
use crate::user::{
    domain::{User, UserDomainError, UserId, UserName},
    ports::UserRepository,
};

const JOHN: Uuid = uuid!("0195a49a-0b22-70ae-a522-518da9ebadb9");
const MARY: Uuid = uuid!("0195a49d-7c46-79bc-b5e7-5704f7b97ee3");
const BOB: Uuid = uuid!("0195a49d-a733-7b00-84f8-89cac50eabe6");

const J_LIST_1: Uuid = uuid!("0195a49f-3fdf-72b4-bada-83f60e5c7881");
const J_LIST_2: Uuid = uuid!("0195a4a4-7078-7f59-af9e-30d9f49d78e0");
const J_LIST_3: Uuid = uuid!("0195a4a4-fb9a-72f5-ab5e-cfac8d5c0eff");
const M_LIST_1: Uuid = uuid!("0195a547-c68c-7d63-96d5-c2d3fa1a386c");
const B_LIST_1: Uuid = uuid!("0195a549-4940-7c40-9170-92223a679f20");

const TASK_DESCRIPTION: &str = "Description description";

/// Errors raised while building or loading the demonstration dataset.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A user record in the dataset is invalid.
    #[error("invalid seed user: {0}")]
    User(#[from] UserDomainError),
    /// A task list record in the dataset is invalid.
    #[error("invalid seed task list: {0}")]
    TaskList(#[from] TaskListDomainError),
    /// A task record in the dataset is invalid.
    #[error("invalid seed task: {0}")]
    Task(#[from] TaskDomainError),
    /// Writing a record failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Number of records written per entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Users written.
    pub users: usize,
    /// Task lists written.
    pub task_lists: usize,
    /// Tasks written.
    pub tasks: usize,
}

/// The fixed demonstration dataset.
#[derive(Debug, Clone)]
pub struct SeedDataset {
    users: Vec<User>,
    task_lists: Vec<PersistedTaskListData>,
    tasks: Vec<Task>,
}

impl SeedDataset {
    /// Builds the dataset with timestamps relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if a built-in record violates a domain rule.
    pub fn demo(now: DateTime<Utc>) -> Result<Self, SeedError> {
        let users = [(JOHN, "John"), (MARY, "Mary"), (BOB, "Bob")]
            .into_iter()
            .map(|(id, name)| -> Result<User, SeedError> {
                Ok(User::from_persisted(UserId::from_uuid(id), UserName::new(name)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let task_lists = [
            (J_LIST_1, "J List 1", JOHN, vec![MARY, BOB]),
            (J_LIST_2, "J List 2", JOHN, Vec::new()),
            (J_LIST_3, "J List 3", JOHN, vec![BOB]),
            (M_LIST_1, "M List 1", MARY, vec![BOB, JOHN]),
            (B_LIST_1, "B List 1", BOB, Vec::new()),
        ]
        .into_iter()
        .map(|(id, name, owner, connections)| PersistedTaskListData {
            id: TaskListId::from_uuid(id),
            name: name.to_owned(),
            owner_id: UserId::from_uuid(owner),
            connected_user_ids: connections.into_iter().map(UserId::from_uuid).collect(),
            created_at: now,
            revision: 0,
        })
        .collect::<Vec<_>>();
        for data in &task_lists {
            TaskList::from_persisted(data.clone())?;
        }

        let tasks = [
            (uuid!("0195a4a6-f1b0-7d3c-bb6c-a9f63c71b705"), "Task 1", 3, false, J_LIST_1),
            (uuid!("0195a4ae-5522-7c0e-8b12-9d3475c6a49e"), "Task 2", 1, true, J_LIST_1),
            (uuid!("0195a4ae-8497-75b0-a410-4ae4f3e24002"), "Task 3", -1, false, J_LIST_1),
            (uuid!("0195a4b4-5549-7f44-afa6-2f55cd259bf9"), "Task 4", 1, true, J_LIST_3),
        ]
        .into_iter()
        .map(|(id, name, due_in_days, is_completed, parent)| -> Result<Task, SeedError> {
            Ok(Task::from_persisted(PersistedTaskData {
                id: TaskId::from_uuid(id),
                name: TaskName::new(name)?,
                description: Some(TASK_DESCRIPTION.to_owned()),
                due_date: Some(now + Duration::days(due_in_days)),
                created_at: now,
                is_completed,
                task_list_id: TaskListId::from_uuid(parent),
            }))
        })
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            users,
            task_lists,
            tasks,
        })
    }

    /// Returns the users in the dataset.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Returns the task lists in the dataset.
    #[must_use]
    pub fn task_lists(&self) -> &[PersistedTaskListData] {
        &self.task_lists
    }

    /// Returns the tasks in the dataset.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// Loads the demonstration dataset into a set of repositories.
pub struct Seeder<U, L, T, C>
where
    U: UserRepository,
    L: TaskListRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    task_lists: Arc<L>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<U, L, T, C> Seeder<U, L, T, C>
where
    U: UserRepository,
    L: TaskListRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a seeder writing to the given repositories.
    #[must_use]
    pub const fn new(users: Arc<U>, task_lists: Arc<L>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            users,
            task_lists,
            tasks,
            clock,
        }
    }

    /// Writes every record of the demonstration dataset.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Repository`] when a write fails. Kinds seeded
    /// before the failure stay written.
    pub async fn seed(&self) -> Result<SeedReport, SeedError> {
        let dataset = SeedDataset::demo(self.clock.utc())?;
        info!("seeding database started");

        let users = try_join_all(dataset.users().iter().map(|user| self.upsert_user(user))).await?;
        info!(count = users.len(), "users seeded");

        let task_lists = try_join_all(
            dataset
                .task_lists()
                .iter()
                .map(|data| self.upsert_task_list(data)),
        )
        .await?;
        info!(count = task_lists.len(), "task lists seeded");

        let tasks = try_join_all(dataset.tasks().iter().map(|task| self.upsert_task(task))).await?;
        info!(count = tasks.len(), "tasks seeded");

        Ok(SeedReport {
            users: users.len(),
            task_lists: task_lists.len(),
            tasks: tasks.len(),
        })
    }

    async fn upsert_user(&self, user: &User) -> Result<(), SeedError> {
        if self.users.get(user.id()).await?.is_some() {
            self.users.update(user).await?;
        } else {
            self.users.create(user).await?;
        }
        Ok(())
    }

    async fn upsert_task_list(&self, data: &PersistedTaskListData) -> Result<(), SeedError> {
        let stored_revision = self
            .task_lists
            .get(data.id)
            .await?
            .map(|existing| existing.revision());
        let task_list = TaskList::from_persisted(PersistedTaskListData {
            revision: stored_revision.unwrap_or_default(),
            ..data.clone()
        })?;
        if stored_revision.is_some() {
            self.task_lists.update(&task_list).await?;
        } else {
            self.task_lists.create(&task_list).await?;
        }
        Ok(())
    }

    async fn upsert_task(&self, task: &Task) -> Result<(), SeedError> {
        if self.tasks.get(task.id()).await?.is_some() {
            self.tasks.update(task).await?;
        } else {
            self.tasks.create(task).await?;
        }
        Ok(())
    }
}
