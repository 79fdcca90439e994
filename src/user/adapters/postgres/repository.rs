//! `PostgreSQL` repository implementation for user storage.

use super::{models::UserRow, schema::users};
use crate::pagination::{PageRequest, PagedEntities};
use crate::postgres::{PgPool, from_sql_count, run_blocking, to_sql_bigint};
use crate::repository::{RepositoryError, RepositoryResult};
use crate::user::{
    domain::{User, UserId},
    ports::UserRepository,
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

const ENTITY: &str = "user";

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> RepositoryResult<()> {
        let row = UserRow::from(user);
        let id = row.id;
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::Duplicate { entity: ENTITY, id }
                    }
                    _ => RepositoryError::persistence(err),
                })?;
            debug!(user_id = %id, "inserted user row");
            Ok(())
        })
        .await
    }

    async fn get(&self, id: UserId) -> RepositoryResult<Option<User>> {
        run_blocking(&self.pool, move |connection| {
            users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .map(UserRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn get_paged(&self, request: PageRequest) -> RepositoryResult<PagedEntities<User>> {
        run_blocking(&self.pool, move |connection| {
            let total: i64 = users::table
                .count()
                .get_result(connection)
                .map_err(RepositoryError::persistence)?;

            let mut query = users::table.select(UserRow::as_select()).into_boxed();
            query = if request.ascending() {
                query.order(users::id.asc())
            } else {
                query.order(users::id.desc())
            };
            let rows = query
                .offset(to_sql_bigint(request.skip()))
                .limit(to_sql_bigint(request.limit()))
                .load::<UserRow>(connection)
                .map_err(RepositoryError::persistence)?;

            let items = rows
                .into_iter()
                .map(UserRow::into_domain)
                .collect::<RepositoryResult<Vec<_>>>()?;
            Ok(PagedEntities::new(items, from_sql_count(total)?))
        })
        .await
    }

    async fn update(&self, user: &User) -> RepositoryResult<()> {
        let row = UserRow::from(user);
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(users::table.filter(users::id.eq(row.id)))
                .set(users::name.eq(&row.name))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            if updated == 0 {
                return Err(RepositoryError::not_found(ENTITY, row.id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: UserId) -> RepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(users::table.filter(users::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            if deleted == 0 {
                return Err(RepositoryError::not_found(ENTITY, id.into_inner()));
            }
            Ok(())
        })
        .await
    }

    async fn get_many(&self, ids: &[UserId]) -> RepositoryResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let lookup: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        run_blocking(&self.pool, move |connection| {
            users::table
                .filter(users::id.eq_any(lookup))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(RepositoryError::persistence)?
                .into_iter()
                .map(UserRow::into_domain)
                .collect()
        })
        .await
    }
}
