//! Shopping Cart Library
//!
//! This library provides a concurrent shopping cart with in-memory and SQL
//! backed stores, exposed over JSON-RPC.

// Domain modules
pub mod cart;
pub mod error;
pub mod rpc;

// Infrastructure
pub mod client;
pub mod config;
pub mod router;
