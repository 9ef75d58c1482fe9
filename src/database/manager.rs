use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::StoreError;

/// Creates connection pools for the mirror database
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect using DATABASE_URL and the pool settings from config
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
        let base = std::env::var("DATABASE_URL")
            .map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;
        let url = Self::parse_database_url(&base)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url.as_str())
            .await?;

        info!("Created database pool for: {}", Self::display_name(&url));
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    fn parse_database_url(raw: &str) -> Result<url::Url, StoreError> {
        let url = url::Url::parse(raw).map_err(|_| StoreError::InvalidDatabaseUrl)?;
        match url.scheme() {
            "postgres" | "postgresql" => Ok(url),
            _ => Err(StoreError::InvalidDatabaseUrl),
        }
    }

    /// host/database, never the credentials
    fn display_name(url: &url::Url) -> String {
        format!(
            "{}{}",
            url.host_str().unwrap_or("localhost"),
            url.path()
        )
    }
}
