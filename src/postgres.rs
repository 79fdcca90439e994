//! Connection pooling and blocking helpers shared by `PostgreSQL` adapters.
//!
//! Diesel is synchronous, so every adapter offloads its work to Tokio's
//! blocking thread pool through [`run_blocking`] rather than stalling the
//! async executor's worker threads.

use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use tracing::info;

use crate::repository::{RepositoryError, RepositoryResult};

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type handed to adapter closures.
pub type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Schema for users, task lists, and tasks.
///
/// Statements are idempotent so the schema can be applied on every start.
/// There are deliberately no foreign keys between the tables: cascading
/// deletes are orchestrated by the task list service.
pub const SCHEMA_SQL: &str = include_str!("../migrations/0001_create_tasklists.sql");

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`RepositoryError::Persistence`] when the pool cannot open its
/// initial connections.
pub fn build_pool(database_url: &str) -> RepositoryResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .map_err(RepositoryError::persistence)
}

/// Applies [`SCHEMA_SQL`] to the database behind `pool`.
///
/// # Errors
///
/// Returns [`RepositoryError::Persistence`] when a connection cannot be
/// obtained or a statement fails.
pub async fn ensure_schema(pool: &PgPool) -> RepositoryResult<()> {
    run_blocking(pool, |connection| {
        connection
            .batch_execute(SCHEMA_SQL)
            .map_err(RepositoryError::persistence)
    })
    .await?;
    info!("database schema is up to date");
    Ok(())
}

/// Runs a blocking database operation on a dedicated thread pool.
///
/// Wraps the closure in [`tokio::task::spawn_blocking`] to prevent
/// blocking the async executor's worker threads. The connection is checked
/// out of the pool on the blocking thread.
pub(crate) async fn run_blocking<F, T>(pool: &PgPool, f: F) -> RepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection: PooledConn = pool.get().map_err(RepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(RepositoryError::persistence)?
}

/// Converts a page offset or limit into the signed type `PostgreSQL` expects.
pub(crate) fn to_sql_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Converts a row count returned by `COUNT(*)` into an unsigned total.
pub(crate) fn from_sql_count(value: i64) -> RepositoryResult<u64> {
    u64::try_from(value).map_err(RepositoryError::invalid_persisted_data)
}
