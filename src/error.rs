//! Error types shared by the cart stores, the request handler and the client.

use thiserror::Error;

use crate::cart::models::Response;

/// Failures raised by a cart store or a catalog reader.
#[derive(Debug, Error)]
pub enum CartError {
    /// `productId` missing or non-positive.
    #[error("product_id not provided")]
    InvalidProduct,

    /// `quantity` is non-positive, or a merge would exceed `i32::MAX`.
    #[error("item quantity out of range")]
    InvalidQuantity,

    /// Delete target does not exist in the cart.
    #[error("item not exists or already removed")]
    NotFound,

    /// The backing table could not be reached or queried.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

/// A failed request: the failure envelope sent to the caller together with
/// the error that produced it.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct Rejection {
    pub response: Response,
    #[source]
    pub source: CartError,
}

impl From<CartError> for Rejection {
    fn from(source: CartError) -> Self {
        Self {
            response: Response::failure(&source),
            source,
        }
    }
}

/// Errors surfaced by [`crate::client::CartClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rpc error {code}: {message}")]
    Rpc {
        code: i32,
        message: String,
        envelope: Option<Response>,
    },

    #[error("malformed rpc reply: {0}")]
    Malformed(String),
}
