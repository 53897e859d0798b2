//! Minimal JSON-RPC client for the cart server.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;

use crate::cart::models::Response;
use crate::error::ClientError;
use crate::rpc::models::*;

pub struct CartClient {
    http: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl CartClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:2368`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), RPC_PATH),
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn add(&self, product_id: u64, quantity: i32) -> Result<Response, ClientError> {
        self.call(METHOD_ADD, AddRequest { product_id, quantity }).await
    }

    pub async fn get(&self) -> Result<Response, ClientError> {
        self.call(METHOD_GET, Value::Null).await
    }

    pub async fn update(&self, product_id: u64, quantity: i32) -> Result<Response, ClientError> {
        self.call(METHOD_UPDATE, UpdateRequest { product_id, quantity })
            .await
    }

    pub async fn remove(&self, product_id: u64) -> Result<Response, ClientError> {
        self.call(METHOD_REMOVE, RemoveRequest { product_id }).await
    }

    async fn call<P: Serialize>(&self, method: &str, params: P) -> Result<Response, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let params =
            serde_json::to_value(params).map_err(|e| ClientError::Malformed(e.to_string()))?;
        let request = JsonRpcRequest {
            jsonrpc: Some("2.0".into()),
            method: method.to_string(),
            params: Some(params),
            id: Some(Value::from(id)),
        };

        let reply: JsonRpcResponse = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = reply.error {
            let envelope = err
                .data
                .and_then(|data| serde_json::from_value::<Response>(data).ok());
            return Err(ClientError::Rpc {
                code: err.code,
                message: err.message,
                envelope,
            });
        }

        let result = reply
            .result
            .ok_or_else(|| ClientError::Malformed("neither result nor error".into()))?;
        serde_json::from_value(result).map_err(|e| ClientError::Malformed(e.to_string()))
    }
}
