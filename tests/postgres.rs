//! Repository and ledger against a real PostgreSQL. Each test works in its own
//! throwaway schema. Skipped when DB_* is not configured.

use customer_api::migration::{self, Migration, PgLedger, MIGRATIONS};
use customer_api::{db, AppError, CustomerPatch, CustomerRepository, CustomerStore, DatabaseConfig, MigrationError, NewCustomer};
use sqlx::{ConnectOptions, PgPool};
use uuid::Uuid;

/// A schema that exists for one test. Dropped when the guard goes out of scope,
/// including when an assertion panics.
struct Scratch {
    config: DatabaseConfig,
    pool: PgPool,
    schema: String,
}

impl Drop for Scratch {
    fn drop(&mut self) {
        // The test's runtime may be unwinding; clean up on a private one.
        let options = self.config.connect_options();
        let sql = format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema);
        let cleanup = std::thread::spawn(move || -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
            rt.block_on(async move {
                let mut conn = options.connect().await?;
                sqlx::query(&sql).execute(&mut conn).await?;
                Ok(())
            })
        });
        if let Ok(Err(e)) = cleanup.join() {
            eprintln!("could not drop schema {}: {}", self.schema, e);
        }
    }
}

async fn schema_exists(config: &DatabaseConfig, schema: &str) -> bool {
    let mut conn = config.connect_options().connect().await.unwrap();
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = $1)")
            .bind(schema)
            .fetch_one(&mut conn)
            .await
            .unwrap();
    exists
}

async fn scratch(tag: &str) -> Option<Scratch> {
    customer_api::load_dotenv();
    let config = match DatabaseConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            println!("Skipping test - database not configured ({})", e);
            return None;
        }
    };
    if let Err(e) = db::ensure_database_exists(&config).await {
        println!("Skipping test - cannot reach database ({})", e);
        return None;
    }
    let admin = match db::connect(&config).await {
        Ok(p) => p,
        Err(e) => {
            println!("Skipping test - cannot connect ({})", e);
            return None;
        }
    };
    let schema = format!("customer_api_test_{}_{}", tag, Uuid::new_v4().simple());
    sqlx::query(&format!("CREATE SCHEMA {}", schema))
        .execute(&admin)
        .await
        .unwrap();
    admin.close().await;
    let options = config
        .connect_options()
        .options([("search_path", schema.as_str())]);
    let pool = PgPool::connect_with(options).await.unwrap();
    Some(Scratch { config, pool, schema })
}

async fn ledger_rows(pool: &PgPool, name: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM migrations WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap();
    n
}

#[tokio::test]
async fn migrating_twice_records_each_migration_once() {
    let Some(s) = scratch("ledger").await else { return };
    let ledger = PgLedger::new(s.pool.clone());

    let first = migration::run(&ledger, MIGRATIONS).await.unwrap();
    assert_eq!(first.last_applied(), Some("insert_fake_customers"));
    let second = migration::run(&ledger, MIGRATIONS).await.unwrap();
    assert_eq!(second.to_string(), "Up to date...");

    for m in MIGRATIONS {
        assert_eq!(ledger_rows(&s.pool, m.name).await, 1, "{}", m.name);
    }
    let seeded = CustomerRepository::new(s.pool.clone()).all().await.unwrap();
    assert_eq!(seeded.len(), 3);
    assert!(seeded.iter().any(|c| c.name == "Jack Doe" && !c.contacted));
}

#[tokio::test]
async fn failed_migration_stops_the_run() {
    const BROKEN: &[Migration] = &[
        Migration { name: "first", up: &["CREATE TABLE first_t (id INT)"], down: &[] },
        Migration { name: "broken", up: &["CREATE TABLEX nope"], down: &[] },
        Migration { name: "third", up: &["CREATE TABLE third_t (id INT)"], down: &[] },
    ];
    let Some(s) = scratch("broken").await else { return };
    let ledger = PgLedger::new(s.pool.clone());

    let err = migration::run(&ledger, BROKEN).await.unwrap_err();
    assert!(matches!(err, MigrationError::Failed { name: "broken", .. }));
    assert_eq!(ledger_rows(&s.pool, "first").await, 1);
    assert_eq!(ledger_rows(&s.pool, "broken").await, 0);
    assert_eq!(ledger_rows(&s.pool, "third").await, 0);
    let (third_exists,): (bool,) = sqlx::query_as("SELECT to_regclass('third_t') IS NOT NULL")
        .fetch_one(&s.pool)
        .await
        .unwrap();
    assert!(!third_exists);
}

#[tokio::test]
async fn repository_round_trip() {
    let Some(s) = scratch("repo").await else { return };
    migration::run(&PgLedger::new(s.pool.clone()), &MIGRATIONS[..1]).await.unwrap();
    let repo = CustomerRepository::new(s.pool.clone());

    assert!(repo.all().await.unwrap().is_empty());

    let created = repo
        .create(NewCustomer {
            name: "Ann".into(),
            role: "QA".into(),
            email: "a@x.com".into(),
            phone: "123".into(),
            contacted: false,
        })
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(repo.of_id(created.id).await.unwrap(), created);

    let mut changed = created.clone();
    CustomerPatch {
        contacted: Some(true),
        ..Default::default()
    }
    .apply(&mut changed);
    repo.update(&changed).await.unwrap();
    assert_eq!(repo.of_id(created.id).await.unwrap(), changed);
    assert_eq!(repo.all().await.unwrap(), vec![changed.clone()]);

    repo.delete(&changed).await.unwrap();
    assert!(matches!(repo.of_id(created.id).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn missing_rows_are_not_storage_errors() {
    let Some(s) = scratch("missing").await else { return };
    migration::run(&PgLedger::new(s.pool.clone()), &MIGRATIONS[..1]).await.unwrap();
    let repo = CustomerRepository::new(s.pool.clone());

    assert!(matches!(repo.of_id(424242).await, Err(AppError::NotFound(_))));
    let ghost = NewCustomer::default().with_id(424242);
    repo.update(&ghost).await.unwrap();
    repo.delete(&ghost).await.unwrap();
    assert!(repo.all().await.unwrap().is_empty());
    repo.ping().await.unwrap();
}

#[tokio::test]
async fn scratch_schema_is_removed_even_after_a_panic() {
    let Some(s) = scratch("guard").await else { return };
    let config = s.config.clone();
    let schema = s.schema.clone();
    assert!(schema_exists(&config, &schema).await);

    let handle = tokio::runtime::Handle::current();
    let failed = std::thread::spawn(move || {
        let _runtime = handle.enter();
        let _guard = s;
        panic!("assertion failed inside a test");
    })
    .join();
    assert!(failed.is_err());
    assert!(!schema_exists(&config, &schema).await);
}
