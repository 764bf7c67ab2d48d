//! Single-table CRUD against PostgreSQL. Every call is one statement on the pool.

use super::{Customer, NewCustomer, CUSTOMER_NOT_FOUND};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

const SELECT_ONE: &str = "SELECT id, name, role, email, phone, contacted FROM customers WHERE id = $1";
const SELECT_ALL: &str = "SELECT id, name, role, email, phone, contacted FROM customers";
const INSERT: &str =
    "INSERT INTO customers (name, role, email, phone, contacted) VALUES ($1, $2, $3, $4, $5) RETURNING id";
const UPDATE: &str =
    "UPDATE customers SET name = $1, role = $2, email = $3, phone = $4, contacted = $5 WHERE id = $6";
const DELETE: &str = "DELETE FROM customers WHERE id = $1";

/// Storage operations the HTTP layer depends on.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Fails with `NotFound` when no row has `id`.
    async fn of_id(&self, id: i64) -> Result<Customer, AppError>;
    /// Every row in scan order; empty when the table is empty.
    async fn all(&self) -> Result<Vec<Customer>, AppError>;
    /// Insert and return the record with its assigned id.
    async fn create(&self, customer: NewCustomer) -> Result<Customer, AppError>;
    /// Replace all mutable fields of the row with `customer.id`. No-op if absent.
    async fn update(&self, customer: &Customer) -> Result<(), AppError>;
    /// Remove the row with `customer.id`. No-op if absent.
    async fn delete(&self, customer: &Customer) -> Result<(), AppError>;
    /// One trivial round trip, for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

/// PostgreSQL-backed [`CustomerStore`]. Cloning shares the pool.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn of_id(&self, id: i64) -> Result<Customer, AppError> {
        tracing::debug!(sql = %SELECT_ONE, id, "query");
        sqlx::query_as::<_, Customer>(SELECT_ONE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(CUSTOMER_NOT_FOUND.into()))
    }

    async fn all(&self) -> Result<Vec<Customer>, AppError> {
        tracing::debug!(sql = %SELECT_ALL, "query");
        let rows = sqlx::query_as::<_, Customer>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(&self, customer: NewCustomer) -> Result<Customer, AppError> {
        tracing::debug!(sql = %INSERT, "query");
        let (id,): (i64,) = sqlx::query_as(INSERT)
            .bind(&customer.name)
            .bind(&customer.role)
            .bind(&customer.email)
            .bind(&customer.phone)
            .bind(customer.contacted)
            .fetch_one(&self.pool)
            .await?;
        Ok(customer.with_id(id))
    }

    async fn update(&self, customer: &Customer) -> Result<(), AppError> {
        tracing::debug!(sql = %UPDATE, id = customer.id, "query");
        let result = sqlx::query(UPDATE)
            .bind(&customer.name)
            .bind(&customer.role)
            .bind(&customer.email)
            .bind(&customer.phone)
            .bind(customer.contacted)
            .bind(customer.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            tracing::debug!(id = customer.id, "update matched no row");
        }
        Ok(())
    }

    async fn delete(&self, customer: &Customer) -> Result<(), AppError> {
        tracing::debug!(sql = %DELETE, id = customer.id, "query");
        let result = sqlx::query(DELETE).bind(customer.id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            tracing::debug!(id = customer.id, "delete matched no row");
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
