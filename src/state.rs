use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    // The pool connects lazily: a down database must not prevent boot, since
    // schema sync is allowed to fail and requests report store errors anyway.
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(&config.database_url)
            .context("invalid database url")?;
        Ok(Self { db, config })
    }
}
