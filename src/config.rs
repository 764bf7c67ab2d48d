//! Environment configuration. `.env` is read when present; process env wins.

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STATIC_DIR: &str = "./static";

/// Connection settings for the customers database.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl DatabaseConfig {
    /// Read `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_DATABASE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let port_raw = required("DB_PORT")?;
        let port = port_raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
            name: "DB_PORT",
            reason: format!("{} ({})", e, port_raw),
        })?;
        Ok(Self {
            host: required("DB_HOST")?,
            port,
            user: required("DB_USER")?,
            // An empty password is allowed; an unset one is not.
            password: lookup("DB_PASSWORD").ok_or(ConfigError::Missing("DB_PASSWORD"))?,
            database: required("DB_DATABASE")?,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    /// Options for the `postgres` maintenance database with the same credentials.
    pub fn maintenance_options(&self) -> PgConnectOptions {
        self.connect_options().database("postgres")
    }
}

/// Everything the HTTP server needs at startup.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database: DatabaseConfig,
    pub listen_addr: String,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig::from_lookup(&lookup)?;
        let listen_addr = lookup("LISTEN_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
        let static_dir = lookup("STATIC_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.into());
        Ok(Self {
            database,
            listen_addr,
            static_dir: PathBuf::from(static_dir),
        })
    }
}

/// Load `.env` from the working directory if one exists.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "could not read .env");
        }
    }
}
