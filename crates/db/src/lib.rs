//! Canvass database layer.
//!
//! PostgreSQL access for survey runs:
//!
//! - [`models`] — entity structs and command DTOs.
//! - [`repositories`] — zero-sized repository structs whose async methods
//!   accept a `&PgPool` as the first argument.
//! - Crate root — connection settings, pool construction, health check
//!   and migration runner used by host binaries.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

/// Shared connection pool type.
pub type DbPool = sqlx::PgPool;

/// Pool size cap when `DATABASE_MAX_CONNECTIONS` is not set.
const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Database connection settings, read from the environment.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Postgres connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Pool size cap (`DATABASE_MAX_CONNECTIONS`, default 20).
    pub max_connections: u32,
}

impl DbConfig {
    /// Read settings from the environment.
    ///
    /// `DATABASE_URL` is required; `DATABASE_MAX_CONNECTIONS` defaults to
    /// [`DEFAULT_MAX_CONNECTIONS`].
    pub fn from_env() -> Result<Self, canvass_core::error::CoreError> {
        use canvass_core::error::CoreError;

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| CoreError::Internal("DATABASE_URL must be set".to_string()))?;

        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse::<u32>().map_err(|_| {
                CoreError::Validation(format!(
                    "DATABASE_MAX_CONNECTIONS must be a number, got '{raw}'"
                ))
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

/// Create a connection pool from the given settings.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    tracing::info!(
        max_connections = config.max_connections,
        "Database connection pool created"
    );
    Ok(pool)
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    tracing::debug!("Database health check passed");
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
