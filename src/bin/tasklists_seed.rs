//! Prepares a `PostgreSQL` database for the task list services.
//!
//! Usage:
//!
//! ```text
//! tasklists-seed [--database-url <url>] [--seed-on-start <bool>]
//! ```
//!
//! Settings are layered from defaults, `TASKLISTS_*` environment variables,
//! and command-line flags. The schema is applied on every run; the
//! demonstration dataset is loaded unless `seed_on_start` is disabled.

use std::sync::Arc;

use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tasklists::config::ServiceSettings;
use tasklists::postgres::{build_pool, ensure_schema};
use tasklists::seed::Seeder;
use tasklists::task::adapters::postgres::PostgresTaskRepository;
use tasklists::task_list::adapters::postgres::PostgresTaskListRepository;
use tasklists::user::adapters::postgres::PostgresUserRepository;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_LOG_FILTER: &str = "tasklists=info";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()?;

    let settings = ServiceSettings::load_from_iter(std::env::args_os())?;
    let pool = build_pool(settings.database_url())?;
    ensure_schema(&pool).await?;

    if !settings.seed_on_start {
        info!("seeding disabled; schema applied only");
        return Ok(());
    }

    let seeder = Seeder::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresTaskListRepository::new(pool.clone())),
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let report = seeder.seed().await?;
    info!(
        users = report.users,
        task_lists = report.task_lists,
        tasks = report.tasks,
        "database seeding finished"
    );
    Ok(())
}
