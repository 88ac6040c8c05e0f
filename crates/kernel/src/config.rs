//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Public site URL used to build absolute resource links.
    pub site_url: String,

    /// Page limit applied when a request omits `page[limit]` (default: 20).
    /// Always positive; pagination math divides by it.
    pub default_page_limit: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let site_url = env::var("SITE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));

        let default_page_limit: u64 = env::var("DEFAULT_PAGE_LIMIT")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .context("DEFAULT_PAGE_LIMIT must be a valid u64")?;
        if default_page_limit == 0 {
            anyhow::bail!("DEFAULT_PAGE_LIMIT must be greater than zero");
        }

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            site_url,
            default_page_limit,
        })
    }
}
