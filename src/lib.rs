//! Customer API: CRUD over a PostgreSQL `customers` table plus a forward-only migration ledger.

pub mod config;
pub mod customers;
pub mod db;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod state;

pub use config::{load_dotenv, DatabaseConfig, ServerConfig};
pub use customers::{Customer, CustomerPatch, CustomerRepository, CustomerStore, NewCustomer};
pub use error::{AppError, ConfigError, MigrationError};
pub use migration::{LedgerStore, Migration, MigrationReport, PgLedger, MIGRATIONS};
pub use routes::{app, customer_routes, health_routes};
pub use state::AppState;
