use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::core::config::{DatabaseConfig, DatabaseEngine};
use crate::modules::catalog_store::{CatalogStore, PgCatalogStore, SqliteCatalogStore};

pub(crate) static POSTGRES_MIGRATOR: Migrator = sqlx::migrate!("./migrations/postgres");
static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("./migrations/sqlite");

/// Open a pool for the configured engine, apply its migrations and wrap it in a catalog store
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn CatalogStore>> {
    match &config.engine {
        DatabaseEngine::Postgres { options } => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
                .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
                .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
                .connect_with(options.clone())
                .await?;
            tracing::info!("Database connection pool created");

            tracing::info!("Running database migrations...");
            POSTGRES_MIGRATOR
                .run(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");

            Ok(Arc::new(PgCatalogStore::new(pool)))
        }
        DatabaseEngine::Sqlite { path } => {
            let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", path))?
                .create_if_missing(true)
                .foreign_keys(true);

            let pool = SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
                .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
                .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
                .connect_with(options)
                .await?;
            tracing::info!("Database connection pool created");

            tracing::info!("Running database migrations...");
            SQLITE_MIGRATOR
                .run(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");

            Ok(Arc::new(SqliteCatalogStore::new(pool)))
        }
    }
}

/// Single-connection in-memory SQLite store with migrations applied
#[cfg(test)]
pub async fn connect_in_memory() -> Arc<SqliteCatalogStore> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    // Every connection to :memory: is a distinct database, so the pool must never recycle it
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    SQLITE_MIGRATOR.run(&pool).await.unwrap();

    Arc::new(SqliteCatalogStore::new(pool))
}
