//! In-memory repository for task lists.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::pagination::{PageRequest, PagedEntities, paginate_by_key};
use crate::repository::{RepositoryError, RepositoryResult, lock_poisoned};
use crate::task_list::{
    domain::{TaskList, TaskListId},
    ports::TaskListRepository,
};
use crate::user::domain::UserId;

const ENTITY: &str = "task list";

/// Thread-safe in-memory task list repository.
///
/// The write lock makes each update's revision check and write atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskListRepository {
    task_lists: Arc<RwLock<HashMap<TaskListId, TaskList>>>,
}

impl InMemoryTaskListRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskListRepository for InMemoryTaskListRepository {
    async fn create(&self, task_list: &TaskList) -> RepositoryResult<()> {
        let mut task_lists = self.task_lists.write().map_err(|err| lock_poisoned(&err))?;
        if task_lists.contains_key(&task_list.id()) {
            return Err(RepositoryError::Duplicate {
                entity: ENTITY,
                id: task_list.id().into_inner(),
            });
        }
        task_lists.insert(task_list.id(), task_list.clone());
        Ok(())
    }

    async fn get(&self, id: TaskListId) -> RepositoryResult<Option<TaskList>> {
        let task_lists = self.task_lists.read().map_err(|err| lock_poisoned(&err))?;
        Ok(task_lists.get(&id).cloned())
    }

    async fn get_paged(&self, request: PageRequest) -> RepositoryResult<PagedEntities<TaskList>> {
        let task_lists = self.task_lists.read().map_err(|err| lock_poisoned(&err))?;
        let all = task_lists.values().cloned().collect();
        Ok(paginate_by_key(all, request, TaskList::id))
    }

    async fn update(&self, task_list: &TaskList) -> RepositoryResult<()> {
        let mut task_lists = self.task_lists.write().map_err(|err| lock_poisoned(&err))?;
        let id = task_list.id();
        let stored = task_lists
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id.into_inner()))?;
        if stored.revision() != task_list.revision() {
            return Err(RepositoryError::Conflict {
                entity: ENTITY,
                id: id.into_inner(),
                expected_revision: task_list.revision(),
            });
        }
        let mut next = task_list.clone();
        next.mark_persisted();
        *stored = next;
        Ok(())
    }

    async fn delete(&self, id: TaskListId) -> RepositoryResult<()> {
        let mut task_lists = self.task_lists.write().map_err(|err| lock_poisoned(&err))?;
        task_lists
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id.into_inner()))
    }

    async fn get_by_user_id_paged(
        &self,
        user_id: UserId,
        request: PageRequest,
    ) -> RepositoryResult<PagedEntities<TaskList>> {
        let task_lists = self.task_lists.read().map_err(|err| lock_poisoned(&err))?;
        let visible = task_lists
            .values()
            .filter(|task_list| task_list.is_connected(user_id))
            .cloned()
            .collect();
        Ok(paginate_by_key(visible, request, TaskList::id))
    }
}
