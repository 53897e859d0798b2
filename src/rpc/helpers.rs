//! RPC Protocol Helpers
//!
//! This module contains helper functions for JSON-RPC communication.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::models::{INTERNAL_ERROR, INVALID_PARAMS, ITEM_NOT_FOUND};
use crate::error::{CartError, Rejection};

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back.
/// * `result` – The payload representing the successful outcome.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier (or `null` if unavailable).
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
pub fn rpc_error(id: Value, code: i32, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}

/// Like [`rpc_error`], with the failure envelope attached as `error.data`.
pub fn rpc_error_with_data(id: Value, code: i32, message: impl Into<String>, data: Value) -> Value {
    let mut body = rpc_error(id, code, message);
    body["error"]["data"] = data;
    body
}

/// Decodes method params; `null` or absent params decode as the default.
pub fn parse_params<T: DeserializeOwned + Default>(params: Value) -> Result<T, String> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params).map_err(|e| format!("Invalid params: {}", e))
}

/// JSON-RPC error code for a rejected cart request.
pub fn rejection_code(rejection: &Rejection) -> i32 {
    match rejection.source {
        CartError::InvalidProduct | CartError::InvalidQuantity => INVALID_PARAMS,
        CartError::NotFound => ITEM_NOT_FOUND,
        CartError::Storage(_) => INTERNAL_ERROR,
    }
}
