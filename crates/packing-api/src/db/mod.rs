//! # Database Persistence Layer
//!
//! Postgres persistence for the pack-size catalog via SQLx.
//!
//! The database is **optional**. When `database.url` or `database.host` is
//! configured, the catalog lives in the `pack_sizes` table and every
//! calculation reads a fresh snapshot from it. When absent, the service runs
//! in in-memory mode seeded from `packs.sizes` (development and tests).

pub mod pack_sizes;

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::{ConfigError, DatabaseConfig};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Database start-up failures.
#[derive(thiserror::Error, Debug)]
pub enum DbInitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Open a connection pool.
///
/// Returns `None` when no database is configured (in-memory mode).
pub async fn connect(config: &DatabaseConfig) -> Result<Option<PgPool>, DbInitError> {
    if !config.is_configured() {
        tracing::warn!(
            "no database configured, running in-memory only mode; \
             pack sizes will not survive restarts"
        );
        return Ok(None);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(config.connect_options()?)
        .await?;

    tracing::info!("Connected to PostgreSQL");
    Ok(Some(pool))
}

/// Apply pending embedded migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), DbInitError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Connect and migrate in one step.
pub async fn init_pool(config: &DatabaseConfig) -> Result<Option<PgPool>, DbInitError> {
    let pool = connect(config).await?;
    if let Some(pool) = &pool {
        migrate(pool).await?;
    }
    Ok(pool)
}
