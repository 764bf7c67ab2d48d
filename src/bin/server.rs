//! HTTP server: loads DB_* settings, connects, mounts customer, common and static routes.

use customer_api::{app, db, load_dotenv, AppState, CustomerRepository, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("customer_api=info")),
        )
        .init();

    let config = ServerConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "configuration missing; set DB_* in the environment or .env");
        e
    })?;
    tracing::debug!(?config, "configuration loaded");

    let pool = db::connect(&config.database).await?;
    let state = AppState::new(CustomerRepository::new(pool));
    let router = app(state, &config.static_dir);

    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
