//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::pagination::{PageRequest, PagedEntities};
use crate::postgres::{PgPool, from_sql_count, run_blocking, to_sql_bigint};
use crate::repository::{RepositoryError, RepositoryResult};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
};
use crate::task_list::domain::TaskListId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

const ENTITY: &str = "task";

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: &Task) -> RepositoryResult<()> {
        let new_row = NewTaskRow::from(task);
        let id = new_row.id;
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::Duplicate { entity: ENTITY, id }
                    }
                    _ => RepositoryError::persistence(err),
                })?;
            debug!(task_id = %id, "inserted task row");
            Ok(())
        })
        .await
    }

    async fn get(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .map(TaskRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn get_paged(&self, request: PageRequest) -> RepositoryResult<PagedEntities<Task>> {
        run_blocking(&self.pool, move |connection| {
            load_page(connection, request, None)
        })
        .await
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let id = task.id().into_inner();
        let changes = TaskChangeset::from(task);
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(id)))
                .set(&changes)
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            if updated == 0 {
                return Err(RepositoryError::not_found(ENTITY, id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            if deleted == 0 {
                return Err(RepositoryError::not_found(ENTITY, id.into_inner()));
            }
            Ok(())
        })
        .await
    }

    async fn get_by_task_list_paged(
        &self,
        task_list_id: TaskListId,
        request: PageRequest,
    ) -> RepositoryResult<PagedEntities<Task>> {
        run_blocking(&self.pool, move |connection| {
            load_page(connection, request, Some(task_list_id))
        })
        .await
    }

    async fn delete_all_by_task_list(&self, task_list_id: TaskListId) -> RepositoryResult<u64> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(
                tasks::table.filter(tasks::task_list_id.eq(task_list_id.into_inner())),
            )
            .execute(connection)
            .map_err(RepositoryError::persistence)?;
            debug!(%task_list_id, deleted, "deleted task rows for task list");
            Ok(u64::try_from(deleted).unwrap_or(u64::MAX))
        })
        .await
    }
}

fn load_page(
    connection: &mut PgConnection,
    request: PageRequest,
    task_list_id: Option<TaskListId>,
) -> RepositoryResult<PagedEntities<Task>> {
    let mut count_query = tasks::table.into_boxed();
    let mut page_query = tasks::table.select(TaskRow::as_select()).into_boxed();
    if let Some(parent) = task_list_id {
        count_query = count_query.filter(tasks::task_list_id.eq(parent.into_inner()));
        page_query = page_query.filter(tasks::task_list_id.eq(parent.into_inner()));
    }

    let total: i64 = count_query
        .count()
        .get_result(connection)
        .map_err(RepositoryError::persistence)?;

    page_query = if request.ascending() {
        page_query.order(tasks::id.asc())
    } else {
        page_query.order(tasks::id.desc())
    };
    let rows = page_query
        .offset(to_sql_bigint(request.skip()))
        .limit(to_sql_bigint(request.limit()))
        .load::<TaskRow>(connection)
        .map_err(RepositoryError::persistence)?;

    let items = rows
        .into_iter()
        .map(TaskRow::into_domain)
        .collect::<RepositoryResult<Vec<_>>>()?;
    Ok(PagedEntities::new(items, from_sql_count(total)?))
}
