use spots_core::SpotStore;
use std::sync::Arc;

/// Application state shared by every handler.
///
/// Holds the single `SpotStore` instance, so all requests contend on the same
/// storage lock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SpotStore>,
}

impl AppState {
    pub fn new(store: Arc<SpotStore>) -> Self {
        Self { store }
    }
}
