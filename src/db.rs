//! PostgreSQL pool and schema setup.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use crate::config::Config;

/// Idempotent DDL for the todo table.
pub const CREATE_TODOS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        done BOOLEAN NOT NULL DEFAULT FALSE
    )
"#;

/// Open a connection pool using the configured credentials.
///
/// Pool sizing and queueing are left at the driver defaults.
pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    debug!(url = %config.redacted_database_url(), "connecting to database");

    PgPoolOptions::new()
        .connect_with(config.connect_options())
        .await
}

/// Create the todo table if it does not exist yet.
///
/// Safe to run on every start; existing rows are untouched.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TODOS_TABLE).execute(pool).await?;
    info!("database schema ready");
    Ok(())
}

/// Round-trip a trivial query to confirm the database answers.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
