//! Shopping Cart State Management
//!
//! Wires a cart store and a catalog reader into the handler shared by all
//! request tasks.

use std::sync::Arc;

use sqlx::AnyPool;

use super::handler::Handler;
use super::memory::{InMemoryCartStore, InMemoryProductStore};
use super::models::Product;
use super::sql::{demo_products, SqlCartStore, SqlProductStore};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub handler: Handler,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// In-memory cart over the demo catalog.
    pub fn new() -> Self {
        Self::in_memory(demo_products())
    }

    /// In-memory cart over the given catalog.
    pub fn in_memory(products: Vec<Product>) -> Self {
        Self {
            handler: Handler::new(
                Arc::new(InMemoryCartStore::new()),
                Arc::new(InMemoryProductStore::new(products)),
            ),
        }
    }

    /// Cart and catalog backed by the `cart` and `products` tables.
    pub fn sql(pool: AnyPool) -> Self {
        Self {
            handler: Handler::new(
                Arc::new(SqlCartStore::new(pool.clone())),
                Arc::new(SqlProductStore::new(pool)),
            ),
        }
    }
}
