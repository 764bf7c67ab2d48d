//! Pool construction and database bootstrap.

use crate::config::DatabaseConfig;
use sqlx::{ConnectOptions, PgConnection, PgPool};

/// Connect a pool to the configured database using the driver's default pool policy.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPool::connect_with(config.connect_options()).await
}

/// Ensure the configured database exists; create it if not. Connects to the
/// `postgres` maintenance database to run CREATE DATABASE. Call before [`connect`].
pub async fn ensure_database_exists(config: &DatabaseConfig) -> Result<(), sqlx::Error> {
    let db_name = config.database.as_str();
    if db_name == "postgres" {
        return Ok(());
    }
    let mut conn: PgConnection = config.maintenance_options().connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
