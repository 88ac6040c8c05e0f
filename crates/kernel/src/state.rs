//! Application state shared across all handlers.
//!
//! Every service is constructed explicitly at process startup and handed to
//! the components that need it; there is no lazy initialization and no
//! request-context value lookup.

use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;

use crate::config::Config;
use crate::db;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,

    /// Loaded configuration.
    config: Config,
}

impl AppState {
    /// Construct the application state, connecting to the database.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::create_pool(config).await?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                db,
                config: config.clone(),
            }),
        })
    }

    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub async fn postgres_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }
}
