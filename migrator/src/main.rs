//! One-shot migration process. Run before starting the API:
//!
//! `cargo run -p customer-migrator`

use customer_api::migration::{self, PgLedger, MIGRATIONS};
use customer_api::{db, load_dotenv, DatabaseConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("customer_migrator=info,customer_api=info")),
        )
        .init();

    let config = DatabaseConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "configuration missing; set DB_* in the environment or .env");
        e
    })?;

    db::ensure_database_exists(&config).await?;
    let pool = db::connect(&config).await?;
    let ledger = PgLedger::new(pool);

    let pending: Vec<_> = migration::status(&ledger, MIGRATIONS)
        .await?
        .into_iter()
        .filter(|(_, applied)| !applied)
        .map(|(name, _)| name)
        .collect();
    tracing::info!(count = pending.len(), ?pending, "pending migrations");

    match migration::run(&ledger, MIGRATIONS).await {
        Ok(report) => {
            println!("{}", report);
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "migration run aborted");
            Err(e.into())
        }
    }
}
