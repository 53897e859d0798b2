//! RPC Protocol Models and Constants
//!
//! JSON-RPC 2.0 envelopes, method names, error codes and the parameter
//! shapes of the four cart methods.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// RPC Constants
// =============================================================================

pub const METHOD_ADD: &str = "Add";
pub const METHOD_GET: &str = "Get";
pub const METHOD_UPDATE: &str = "Update";
pub const METHOD_REMOVE: &str = "Remove";
pub const METHOD_PING: &str = "ping";

/// Path the RPC endpoint is mounted on
pub const RPC_PATH: &str = "/rpc";
/// Server identifier
pub const SERVER_NAME: &str = "shop-cart";

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
/// Remove target is not in the cart
pub const ITEM_NOT_FOUND: i32 = -32004;

// =============================================================================
// RPC Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[serde(default)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    #[serde(default)]
    pub params: Option<Value>,

    /// Request identifier
    #[serde(default)]
    pub id: Option<Value>,
}

/// Error member of a JSON-RPC 2.0 response
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Standard JSON-RPC 2.0 Response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

// =============================================================================
// Cart Method Parameters
// =============================================================================

/// Params of `Add`; absent fields default to zero and fail validation.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest {
    #[serde(default)]
    pub product_id: u64,
    #[serde(default)]
    pub quantity: i32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(default)]
    pub product_id: u64,
    #[serde(default)]
    pub quantity: i32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    #[serde(default)]
    pub product_id: u64,
}
