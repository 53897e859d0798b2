//! Request handler: turns the four cart requests into store calls and shapes
//! their outcome into a [`Response`] envelope.
//!
//! Every failure is reported twice, as the `ok=false` envelope and as the
//! [`CartError`] it came from, both carried by [`Rejection`].

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::helpers::{format_item_summary, round_price};
use super::models::{Cart, Item, Response, ResponseResult};
use super::store::{CartStore, ProductReader};
use crate::error::{CartError, Rejection};

pub type HandlerResult = Result<Response, Rejection>;

#[derive(Clone)]
pub struct Handler {
    cart: Arc<dyn CartStore>,
    products: Arc<dyn ProductReader>,
}

impl Handler {
    pub fn new(cart: Arc<dyn CartStore>, products: Arc<dyn ProductReader>) -> Self {
        Self { cart, products }
    }

    /// Adds `quantity` of the product, merging with any existing line item.
    #[instrument(skip(self))]
    pub async fn add(&self, product_id: u64, quantity: i32) -> HandlerResult {
        self.cart
            .add(Item::new(product_id, quantity))
            .await
            .map_err(reject)?;

        let item = self.cart.get_by_id(product_id).await.map_err(reject)?;
        debug!(?item, "item added");
        Ok(Response::success(item.map(ResponseResult::Item)))
    }

    /// Lists the cart with its item count, quantity count and total price.
    ///
    /// Items whose product is missing from the catalog count at price zero.
    #[instrument(skip(self))]
    pub async fn get(&self) -> HandlerResult {
        let (count, items) = self.cart.get_list().await.map_err(reject)?;

        let mut cart = Cart {
            items_count: i32::try_from(count).unwrap_or(i32::MAX),
            ..Cart::default()
        };
        let mut total = 0.0;
        for item in &items {
            cart.quantity_count = cart.quantity_count.saturating_add(item.quantity);
            match self.products.get_by_id(item.product_id).await.map_err(reject)? {
                Some(product) => total += product.price * f64::from(item.quantity),
                None => warn!(product_id = item.product_id, "product missing from catalog"),
            }
        }
        cart.total_price = round_price(total);
        debug!(items = %format_item_summary(&items), total = cart.total_price, "cart listed");
        cart.items = items;

        Ok(Response::success(Some(ResponseResult::Cart(cart))))
    }

    /// Overwrites the quantity; a non-positive quantity removes the item and
    /// leaves the result empty.
    #[instrument(skip(self))]
    pub async fn update(&self, product_id: u64, quantity: i32) -> HandlerResult {
        self.cart
            .update(Item::new(product_id, quantity))
            .await
            .map_err(reject)?;

        if quantity <= 0 {
            debug!("item removed by update");
            return Ok(Response::success(None));
        }

        let item = self.cart.get_by_id(product_id).await.map_err(reject)?;
        Ok(Response::success(item.map(ResponseResult::Item)))
    }

    /// Removes the item regardless of its quantity.
    #[instrument(skip(self))]
    pub async fn remove(&self, product_id: u64) -> HandlerResult {
        self.cart.delete(product_id).await.map_err(reject)?;
        Ok(Response::success(None))
    }
}

fn reject(err: CartError) -> Rejection {
    warn!(error = %err, "cart request rejected");
    Rejection::from(err)
}
