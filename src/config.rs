//! Service configuration loaded via `OrthoConfig`.
//!
//! Values are layered from defaults, an optional configuration file,
//! `TASKLISTS_*` environment variables, and command-line flags.

use std::num::NonZeroU32;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::pagination::{DEFAULT_PAGE_SIZE, PageQuery};
use crate::task_list::services::RetryPolicy;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/tasklists";

/// Configuration values for the task list services and maintenance tools.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKLISTS")]
pub struct ServiceSettings {
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Page size applied when a caller does not supply one.
    pub default_page_size: Option<i64>,
    /// Attempts made to delete a task list after its tasks were removed.
    pub cascade_delete_max_attempts: Option<u32>,
    /// Pause between those attempts, in milliseconds.
    pub cascade_delete_backoff_ms: Option<u64>,
    /// Load the demonstration dataset after the schema is applied.
    #[ortho_config(default = true)]
    pub seed_on_start: bool,
}

impl ServiceSettings {
    /// Return the configured database URL, falling back to a local default.
    #[must_use]
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Return the first page query with the configured default page size.
    #[must_use]
    pub fn default_page_query(&self) -> PageQuery {
        PageQuery::new(1, self.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    /// Return the retry policy for cascading task list deletes.
    ///
    /// A configured attempt count of zero falls back to the default.
    #[must_use]
    pub fn cascade_delete_retry(&self) -> RetryPolicy {
        let max_attempts = self
            .cascade_delete_max_attempts
            .and_then(NonZeroU32::new)
            .unwrap_or(RetryPolicy::DEFAULT_MAX_ATTEMPTS);
        let backoff = self
            .cascade_delete_backoff_ms
            .map_or(RetryPolicy::DEFAULT_BACKOFF, Duration::from_millis);
        RetryPolicy::new(max_attempts, backoff)
    }
}
