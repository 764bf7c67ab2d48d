//! Forward-only migration ledger.
//!
//! Each migration in [`MIGRATIONS`] runs at most once per database. The `migrations`
//! table records what has run; a run walks the list in order, skips recorded names,
//! applies the rest and stops at the first failure. Re-running after a fix resumes
//! at the first unrecorded migration. `down` effects are kept alongside `up` but the
//! runner never executes them.

mod definitions;

pub use definitions::MIGRATIONS;

use crate::error::MigrationError;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::PgPool;
use std::fmt;

/// A named pair of stateless SQL effects.
#[derive(Clone, Copy, Debug)]
pub struct Migration {
    pub name: &'static str,
    pub up: &'static [&'static str],
    pub down: &'static [&'static str],
}

/// Persistence the runner needs: the ledger itself and a way to execute `up`.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn ensure_ledger(&self) -> Result<(), sqlx::Error>;
    async fn is_applied(&self, name: &str) -> Result<bool, sqlx::Error>;
    async fn apply(&self, migration: &Migration) -> Result<(), sqlx::Error>;
    async fn record(&self, name: &str, executed_at: NaiveDateTime) -> Result<(), sqlx::Error>;
}

pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PgLedger {
    async fn ensure_ledger(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS migrations (
                name VARCHAR(100) PRIMARY KEY,
                executed_datetime TIMESTAMP NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn is_applied(&self, name: &str) -> Result<bool, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM migrations WHERE name = $1")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), sqlx::Error> {
        for sql in migration.up {
            tracing::debug!(migration = migration.name, sql = %sql, "execute");
            sqlx::query(sql).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn record(&self, name: &str, executed_at: NaiveDateTime) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO migrations (name, executed_datetime) VALUES ($1, $2)")
            .bind(name)
            .bind(executed_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Names applied by one run, in order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub applied: Vec<&'static str>,
}

impl MigrationReport {
    pub fn last_applied(&self) -> Option<&'static str> {
        self.applied.last().copied()
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_applied() {
            Some(name) => write!(f, "Migrated up to {}", name),
            None => write!(f, "Up to date..."),
        }
    }
}

/// Apply every unrecorded migration in order. The first failure aborts the run.
pub async fn run(ledger: &dyn LedgerStore, migrations: &[Migration]) -> Result<MigrationReport, MigrationError> {
    ledger.ensure_ledger().await.map_err(MigrationError::Ledger)?;

    let mut report = MigrationReport::default();
    for migration in migrations {
        if ledger
            .is_applied(migration.name)
            .await
            .map_err(MigrationError::Ledger)?
        {
            tracing::debug!(migration = migration.name, "already applied");
            continue;
        }

        tracing::info!(migration = migration.name, "applying");
        ledger
            .apply(migration)
            .await
            .map_err(|source| MigrationError::Failed {
                name: migration.name,
                source,
            })?;
        ledger
            .record(migration.name, Utc::now().naive_utc())
            .await
            .map_err(MigrationError::Ledger)?;
        report.applied.push(migration.name);
    }
    Ok(report)
}

/// Whether each migration is recorded, in list order. Creates the ledger if needed.
pub async fn status(
    ledger: &dyn LedgerStore,
    migrations: &[Migration],
) -> Result<Vec<(&'static str, bool)>, MigrationError> {
    ledger.ensure_ledger().await.map_err(MigrationError::Ledger)?;
    let mut out = Vec::with_capacity(migrations.len());
    for migration in migrations {
        let applied = ledger
            .is_applied(migration.name)
            .await
            .map_err(MigrationError::Ledger)?;
        out.push((migration.name, applied));
    }
    Ok(out)
}
