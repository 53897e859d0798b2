//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (Item, Product, Cart, Response envelope)
//! - Store contracts and their in-memory and SQL variants
//! - The request handler shaping store results into responses
//! - Application state management

pub mod handler;
pub mod helpers;
pub mod memory;
pub mod models;
pub mod sql;
pub mod state;
pub mod store;

// Re-export commonly used types for convenience
pub use handler::Handler;
pub use state::{AppState, SharedState};
pub use store::{CartStore, ProductReader};
