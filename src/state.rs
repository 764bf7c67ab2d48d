//! Shared application state for all routes.

use crate::customers::CustomerStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerStore>,
}

impl AppState {
    pub fn new<S>(customers: S) -> Self
    where
        S: CustomerStore + 'static,
    {
        Self {
            customers: Arc::new(customers),
        }
    }
}
