//! Database module
//!
//! Pool setup, embedded migrations and the hookup repository.

pub mod connection;
pub mod repositories;

use sqlx::PgPool;
use tracing::info;

pub use connection::{create_pool, test_connection};

/// Apply the embedded migrations under `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate!("./migrations");
    migrator.run(pool).await?;
    info!(count = migrator.iter().count(), "Migrations applied");
    Ok(())
}
