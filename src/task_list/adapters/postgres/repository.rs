//! `PostgreSQL` repository implementation for task list storage.

use super::{models::TaskListRow, schema::task_lists};
use crate::pagination::{PageRequest, PagedEntities};
use crate::postgres::{PgPool, from_sql_count, run_blocking, to_sql_bigint};
use crate::repository::{RepositoryError, RepositoryResult};
use crate::task_list::{
    domain::{TaskList, TaskListId},
    ports::TaskListRepository,
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Bool;
use tracing::debug;

const ENTITY: &str = "task list";

type VisibilityFilter = Box<dyn BoxableExpression<task_lists::table, Pg, SqlType = Bool>>;

/// `PostgreSQL`-backed task list repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskListRepository {
    pool: PgPool,
}

impl PostgresTaskListRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskListRepository for PostgresTaskListRepository {
    async fn create(&self, task_list: &TaskList) -> RepositoryResult<()> {
        let row = TaskListRow::from(task_list);
        let id = row.id;
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(task_lists::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::Duplicate { entity: ENTITY, id }
                    }
                    _ => RepositoryError::persistence(err),
                })?;
            debug!(task_list_id = %id, "inserted task list row");
            Ok(())
        })
        .await
    }

    async fn get(&self, id: TaskListId) -> RepositoryResult<Option<TaskList>> {
        run_blocking(&self.pool, move |connection| {
            task_lists::table
                .filter(task_lists::id.eq(id.into_inner()))
                .select(TaskListRow::as_select())
                .first::<TaskListRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .map(TaskListRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn get_paged(&self, request: PageRequest) -> RepositoryResult<PagedEntities<TaskList>> {
        run_blocking(&self.pool, move |connection| {
            load_page(connection, request, None)
        })
        .await
    }

    async fn update(&self, task_list: &TaskList) -> RepositoryResult<()> {
        let row = TaskListRow::from(task_list);
        let expected_revision = task_list.revision();
        run_blocking(&self.pool, move |connection| {
            let next_revision = to_sql_bigint(expected_revision.saturating_add(1));
            let updated = diesel::update(
                task_lists::table
                    .filter(task_lists::id.eq(row.id))
                    .filter(task_lists::revision.eq(row.revision)),
            )
            .set((
                task_lists::name.eq(&row.name),
                task_lists::connected_user_ids.eq(&row.connected_user_ids),
                task_lists::revision.eq(next_revision),
            ))
            .execute(connection)
            .map_err(RepositoryError::persistence)?;

            if updated == 1 {
                debug!(task_list_id = %row.id, revision = next_revision, "updated task list row");
                return Ok(());
            }

            let exists = diesel::select(diesel::dsl::exists(
                task_lists::table.filter(task_lists::id.eq(row.id)),
            ))
            .get_result::<bool>(connection)
            .map_err(RepositoryError::persistence)?;
            if exists {
                Err(RepositoryError::Conflict {
                    entity: ENTITY,
                    id: row.id,
                    expected_revision,
                })
            } else {
                Err(RepositoryError::not_found(ENTITY, row.id))
            }
        })
        .await
    }

    async fn delete(&self, id: TaskListId) -> RepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let deleted =
                diesel::delete(task_lists::table.filter(task_lists::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(RepositoryError::persistence)?;
            if deleted == 0 {
                return Err(RepositoryError::not_found(ENTITY, id.into_inner()));
            }
            Ok(())
        })
        .await
    }

    async fn get_by_user_id_paged(
        &self,
        user_id: UserId,
        request: PageRequest,
    ) -> RepositoryResult<PagedEntities<TaskList>> {
        run_blocking(&self.pool, move |connection| {
            load_page(connection, request, Some(user_id))
        })
        .await
    }
}

/// Lists owned by `user_id` or shared with it.
fn visible_to(user_id: UserId) -> VisibilityFilter {
    let user_uuid = user_id.into_inner();
    Box::new(
        task_lists::owner_id
            .eq(user_uuid)
            .or(task_lists::connected_user_ids.contains(vec![user_uuid])),
    )
}

fn load_page(
    connection: &mut PgConnection,
    request: PageRequest,
    visible_user: Option<UserId>,
) -> RepositoryResult<PagedEntities<TaskList>> {
    let mut count_query = task_lists::table.into_boxed();
    let mut page_query = task_lists::table.select(TaskListRow::as_select()).into_boxed();
    if let Some(user_id) = visible_user {
        count_query = count_query.filter(visible_to(user_id));
        page_query = page_query.filter(visible_to(user_id));
    }

    let total: i64 = count_query
        .count()
        .get_result(connection)
        .map_err(RepositoryError::persistence)?;

    page_query = if request.ascending() {
        page_query.order(task_lists::id.asc())
    } else {
        page_query.order(task_lists::id.desc())
    };
    let rows = page_query
        .offset(to_sql_bigint(request.skip()))
        .limit(to_sql_bigint(request.limit()))
        .load::<TaskListRow>(connection)
        .map_err(RepositoryError::persistence)?;

    let items = rows
        .into_iter()
        .map(TaskListRow::into_domain)
        .collect::<RepositoryResult<Vec<_>>>()?;
    Ok(PagedEntities::new(items, from_sql_count(total)?))
}
