use crate::config::DatabaseConfig;
use crate::error::AppResult;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;

/// Shared handle to the connection pool, cloned into every service.
pub type DbPool = Arc<DatabaseConnection>;

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let mut options = ConnectOptions::new(config.connection_url());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let pool = Database::connect(options).await?;
    log::info!(
        "Connected to database {} at {}:{}",
        config.name,
        config.host,
        config.port
    );
    Ok(Arc::new(pool))
}

pub async fn run_migrations(pool: &DatabaseConnection) -> AppResult<()> {
    Migrator::up(pool, None).await?;
    Ok(())
}
