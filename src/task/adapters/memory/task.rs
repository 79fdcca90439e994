//! In-memory repository for tasks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::pagination::{PageRequest, PagedEntities, paginate_by_key};
use crate::repository::{RepositoryError, RepositoryResult, lock_poisoned};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
};
use crate::task_list::domain::TaskListId;

const ENTITY: &str = "task";

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> RepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(|err| lock_poisoned(&err))?;
        if tasks.contains_key(&task.id()) {
            return Err(RepositoryError::Duplicate {
                entity: ENTITY,
                id: task.id().into_inner(),
            });
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn get(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let tasks = self.tasks.read().map_err(|err| lock_poisoned(&err))?;
        Ok(tasks.get(&id).cloned())
    }

    async fn get_paged(&self, request: PageRequest) -> RepositoryResult<PagedEntities<Task>> {
        let tasks = self.tasks.read().map_err(|err| lock_poisoned(&err))?;
        let all = tasks.values().cloned().collect();
        Ok(paginate_by_key(all, request, Task::id))
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(|err| lock_poisoned(&err))?;
        let stored = tasks
            .get_mut(&task.id())
            .ok_or_else(|| RepositoryError::not_found(ENTITY, task.id().into_inner()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(|err| lock_poisoned(&err))?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id.into_inner()))
    }

    async fn get_by_task_list_paged(
        &self,
        task_list_id: TaskListId,
        request: PageRequest,
    ) -> RepositoryResult<PagedEntities<Task>> {
        let tasks = self.tasks.read().map_err(|err| lock_poisoned(&err))?;
        let children = tasks
            .values()
            .filter(|task| task.task_list_id() == task_list_id)
            .cloned()
            .collect();
        Ok(paginate_by_key(children, request, Task::id))
    }

    async fn delete_all_by_task_list(&self, task_list_id: TaskListId) -> RepositoryResult<u64> {
        let mut tasks = self.tasks.write().map_err(|err| lock_poisoned(&err))?;
        let before = tasks.len();
        tasks.retain(|_, task| task.task_list_id() != task_list_id);
        let removed = before.saturating_sub(tasks.len());
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}
