//! Shopping Cart Domain Models
//!
//! Line items, catalog products, the computed cart view and the response
//! envelope returned by every request.

use serde::{Deserialize, Serialize};

use crate::error::CartError;

// =============================================================================
// Cart Domain Models
// =============================================================================

/// One product's presence in the cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Catalog identifier, unique within the cart
    #[serde(default)]
    pub product_id: u64,

    /// Always positive for a stored item
    #[serde(default)]
    pub quantity: i32,
}

impl Item {
    pub fn new(product_id: u64, quantity: i32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }

    /// Rejects items that may not be inserted into a cart.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.product_id == 0 {
            return Err(CartError::InvalidProduct);
        }
        if self.quantity <= 0 {
            return Err(CartError::InvalidQuantity);
        }
        Ok(())
    }
}

/// Read-only catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Aggregate view of the cart, computed on every `Get`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<Item>,
    pub items_count: i32,
    pub quantity_count: i32,
    pub total_price: f64,
}

// =============================================================================
// Response Envelope
// =============================================================================

/// Payload of a successful response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ResponseResult {
    Item(Item),
    Cart(Cart),
}

/// Uniform result of every cart operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub ok: bool,

    /// Populated only on failure
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub result: Option<ResponseResult>,
}

impl Response {
    pub fn success(result: Option<ResponseResult>) -> Self {
        Self {
            ok: true,
            description: String::new(),
            result,
        }
    }

    pub fn failure(err: &CartError) -> Self {
        Self {
            ok: false,
            description: err.to_string(),
            result: None,
        }
    }

    pub fn item(&self) -> Option<&Item> {
        match &self.result {
            Some(ResponseResult::Item(item)) => Some(item),
            _ => None,
        }
    }

    pub fn cart(&self) -> Option<&Cart> {
        match &self.result {
            Some(ResponseResult::Cart(cart)) => Some(cart),
            _ => None,
        }
    }
}
