//! In-memory store variants.
//!
//! The cart is a single `Vec<Item>` behind a `parking_lot::RwLock`. Every
//! operation takes the lock exactly once, so a merge or overwrite can never
//! interleave with another writer, and the lock is never held across an
//! await point.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::models::{Item, Product};
use super::store::{CartStore, ProductReader};
use crate::error::CartError;

// =============================================================================
// Cart Store
// =============================================================================

#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    items: RwLock<Vec<Item>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Merges `item` into `items`, re-sorting only when a new entry is pushed.
fn merge_item(items: &mut Vec<Item>, item: Item) -> Result<(), CartError> {
    item.validate()?;

    if let Some(existing) = items.iter_mut().find(|i| i.product_id == item.product_id) {
        existing.quantity = existing
            .quantity
            .checked_add(item.quantity)
            .ok_or(CartError::InvalidQuantity)?;
        return Ok(());
    }

    items.push(item);
    items.sort_unstable_by_key(|i| i.product_id);
    Ok(())
}

fn remove_item(items: &mut Vec<Item>, product_id: u64) -> Result<(), CartError> {
    let pos = items
        .iter()
        .position(|i| i.product_id == product_id)
        .ok_or(CartError::NotFound)?;

    // swap_remove moves the last element into `pos`; restore the ordering.
    items.swap_remove(pos);
    items.sort_unstable_by_key(|i| i.product_id);
    Ok(())
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn add(&self, item: Item) -> Result<(), CartError> {
        item.validate()?;
        let mut items = self.items.write();
        merge_item(&mut items, item)?;
        tracing::trace!(product_id = item.product_id, "item merged into cart");
        Ok(())
    }

    async fn get_by_id(&self, product_id: u64) -> Result<Option<Item>, CartError> {
        if product_id == 0 {
            return Ok(None);
        }
        let items = self.items.read();
        Ok(items.iter().find(|i| i.product_id == product_id).copied())
    }

    async fn get_list(&self) -> Result<(usize, Vec<Item>), CartError> {
        let items = self.items.read();
        Ok((items.len(), items.clone()))
    }

    async fn update(&self, item: Item) -> Result<(), CartError> {
        let mut items = self.items.write();

        let pos = match item.product_id {
            0 => None,
            id => items.iter().position(|i| i.product_id == id),
        };

        match pos {
            Some(_) if item.quantity <= 0 => remove_item(&mut items, item.product_id),
            Some(pos) => {
                items[pos].quantity = item.quantity;
                Ok(())
            }
            None => merge_item(&mut items, item),
        }
    }

    async fn delete(&self, product_id: u64) -> Result<(), CartError> {
        let mut items = self.items.write();
        remove_item(&mut items, product_id)?;
        tracing::trace!(product_id, "item removed from cart");
        Ok(())
    }
}

// =============================================================================
// Product Catalog
// =============================================================================

/// Fixed catalog, loaded once at construction.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductStore {
    products: Vec<Product>,
}

impl InMemoryProductStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductReader for InMemoryProductStore {
    async fn get_by_id(&self, id: u64) -> Result<Option<Product>, CartError> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}
