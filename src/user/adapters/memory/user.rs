//! In-memory repository for users.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::pagination::{PageRequest, PagedEntities, paginate_by_key};
use crate::repository::{RepositoryError, RepositoryResult, lock_poisoned};
use crate::user::{
    domain::{User, UserId},
    ports::UserRepository,
};

const ENTITY: &str = "user";

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> RepositoryResult<()> {
        let mut users = self.users.write().map_err(|err| lock_poisoned(&err))?;
        if users.contains_key(&user.id()) {
            return Err(RepositoryError::Duplicate {
                entity: ENTITY,
                id: user.id().into_inner(),
            });
        }
        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn get(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let users = self.users.read().map_err(|err| lock_poisoned(&err))?;
        Ok(users.get(&id).cloned())
    }

    async fn get_paged(&self, request: PageRequest) -> RepositoryResult<PagedEntities<User>> {
        let users = self.users.read().map_err(|err| lock_poisoned(&err))?;
        let all = users.values().cloned().collect();
        Ok(paginate_by_key(all, request, User::id))
    }

    async fn update(&self, user: &User) -> RepositoryResult<()> {
        let mut users = self.users.write().map_err(|err| lock_poisoned(&err))?;
        let stored = users
            .get_mut(&user.id())
            .ok_or_else(|| RepositoryError::not_found(ENTITY, user.id().into_inner()))?;
        *stored = user.clone();
        Ok(())
    }

    async fn delete(&self, id: UserId) -> RepositoryResult<()> {
        let mut users = self.users.write().map_err(|err| lock_poisoned(&err))?;
        users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id.into_inner()))
    }

    async fn get_many(&self, ids: &[UserId]) -> RepositoryResult<Vec<User>> {
        let users = self.users.read().map_err(|err| lock_poisoned(&err))?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}
