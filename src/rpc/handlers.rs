//! RPC route handlers
//!
//! Decodes JSON-RPC requests, dispatches the cart methods to the shared
//! [`Handler`](crate::cart::Handler) and encodes its envelopes. `handle_call`
//! is public so tests can drive dispatch without going through HTTP.

use super::{helpers::*, models::*};
use crate::cart::{models::Response, state::*};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Creates routes for the RPC endpoint
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_rpc))
        .route(RPC_PATH, post(handle_rpc))
}

/// A method call that ended in a JSON-RPC error.
#[derive(Debug)]
pub struct CallFailure {
    pub code: i32,
    pub message: String,
    /// Failure envelope, present for rejected cart requests
    pub data: Option<Value>,
}

impl CallFailure {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// Endpoint: POST /rpc
async fn handle_rpc(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            warn!(error = %e.body_text(), "rpc parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, PARSE_ERROR, "Parse error")),
            )
                .into_response();
        }
    };

    let id = req.id.unwrap_or(Value::Null);
    let params = req.params.unwrap_or(Value::Null);
    debug!(method = %req.method, ?id, "rpc call");

    let response_body = match handle_call(&state, &req.method, params).await {
        Ok(result) => rpc_success(id, result),
        Err(CallFailure {
            code,
            message,
            data: Some(data),
        }) => rpc_error_with_data(id, code, message, data),
        Err(CallFailure { code, message, .. }) => rpc_error(id, code, message),
    };

    Json(response_body).into_response()
}

/// Runs one method call against the cart.
pub async fn handle_call(
    state: &AppState,
    method: &str,
    params: Value,
) -> Result<Value, CallFailure> {
    let handler = &state.handler;
    let outcome = match method {
        METHOD_ADD => {
            let req: AddRequest = parse_params(params).map_err(invalid_params)?;
            handler.add(req.product_id, req.quantity).await
        }
        METHOD_GET => handler.get().await,
        METHOD_UPDATE => {
            let req: UpdateRequest = parse_params(params).map_err(invalid_params)?;
            handler.update(req.product_id, req.quantity).await
        }
        METHOD_REMOVE => {
            let req: RemoveRequest = parse_params(params).map_err(invalid_params)?;
            handler.remove(req.product_id).await
        }
        METHOD_PING => return Ok(json!({ "server": SERVER_NAME })),
        _ => {
            warn!(method, "unknown rpc method");
            return Err(CallFailure::new(METHOD_NOT_FOUND, "Method not found"));
        }
    };

    match outcome {
        Ok(response) => envelope(&response),
        Err(rejection) => Err(CallFailure {
            code: rejection_code(&rejection),
            message: rejection.to_string(),
            data: Some(envelope(&rejection.response)?),
        }),
    }
}

fn envelope(response: &Response) -> Result<Value, CallFailure> {
    serde_json::to_value(response).map_err(|e| CallFailure::new(INTERNAL_ERROR, e.to_string()))
}

/// Undecodable cart params are reported like a rejected request.
fn invalid_params(message: String) -> CallFailure {
    let failure = Response {
        ok: false,
        description: message.clone(),
        result: None,
    };
    CallFailure {
        code: INVALID_PARAMS,
        data: serde_json::to_value(&failure).ok(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handle_call_aggregation() {
        let state = AppState::new();

        let first = handle_call(&state, METHOD_ADD, json!({ "productId": 42, "quantity": 5 }))
            .await
            .unwrap();
        assert_eq!(first["result"]["item"]["quantity"], 5);

        let second = handle_call(&state, METHOD_ADD, json!({ "productId": 42, "quantity": 24 }))
            .await
            .unwrap();
        assert_eq!(second["ok"], true);
        assert_eq!(second["result"]["item"], json!({ "productId": 42, "quantity": 29 }));
    }

    #[tokio::test]
    async fn test_handle_call_failures() {
        let state = AppState::new();

        let missing = handle_call(&state, METHOD_REMOVE, json!({ "productId": 42 }))
            .await
            .unwrap_err();
        assert_eq!(missing.code, ITEM_NOT_FOUND);
        let data = missing.data.unwrap();
        assert_eq!(data["ok"], false);
        assert_eq!(data["description"], missing.message);

        let bad = handle_call(&state, METHOD_ADD, json!({ "productId": -1 }))
            .await
            .unwrap_err();
        assert_eq!(bad.code, INVALID_PARAMS);
        let data = bad.data.unwrap();
        assert_eq!(data["ok"], false);
        assert_eq!(data["description"], bad.message);
        assert!(data["result"].is_null());

        let unknown = handle_call(&state, "Checkout", Value::Null).await.unwrap_err();
        assert_eq!(unknown.code, METHOD_NOT_FOUND);
    }
}
