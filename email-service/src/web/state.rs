//! Shared application state

use crate::store::EmailStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: EmailStore,
}

impl AppState {
    pub fn new(store: EmailStore) -> Self {
        Self { store }
    }
}
