//! RPC Module
//!
//! JSON-RPC 2.0 transport for the cart, including:
//! - Protocol models (JsonRpcRequest, method params, constants)
//! - RPC helpers (success/error responses, params decoding)
//! - Method dispatch onto the cart handler

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types and functions
pub use handlers::routes;
