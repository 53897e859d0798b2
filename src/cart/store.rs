//! Store contracts consumed by the request handler.
//!
//! The handler only ever sees these traits, so either backing (in-memory or
//! SQL) can be swapped in at construction time.

use async_trait::async_trait;

use super::models::{Item, Product};
use crate::error::CartError;

/// Owner of the cart's line items.
///
/// Implementations keep at most one item per `product_id`, never store an
/// item with a non-positive quantity, and list items by ascending
/// `product_id`.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Inserts the item or, when it is already present, adds to its quantity.
    async fn add(&self, item: Item) -> Result<(), CartError>;

    /// Looks up a single item. A zero id or a miss is `Ok(None)`.
    async fn get_by_id(&self, product_id: u64) -> Result<Option<Item>, CartError>;

    /// Number of distinct items and the items ordered by `product_id`.
    async fn get_list(&self) -> Result<(usize, Vec<Item>), CartError>;

    /// Overwrites the stored quantity, deletes on a non-positive quantity,
    /// or falls back to [`CartStore::add`] when the item is absent.
    async fn update(&self, item: Item) -> Result<(), CartError>;

    /// Removes the item, failing with [`CartError::NotFound`] when absent.
    async fn delete(&self, product_id: u64) -> Result<(), CartError>;
}

/// Read-only access to the product catalog.
#[async_trait]
pub trait ProductReader: Send + Sync {
    async fn get_by_id(&self, id: u64) -> Result<Option<Product>, CartError>;
}
