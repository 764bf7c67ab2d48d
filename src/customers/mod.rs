//! Customer records: entity shapes and the repository over the `customers` table.

mod entity;
mod repository;

pub use entity::{Customer, CustomerPatch, NewCustomer};
pub use repository::{CustomerRepository, CustomerStore};

/// Message carried by `AppError::NotFound` when no row has the requested id.
pub const CUSTOMER_NOT_FOUND: &str = "Customer was not found";
