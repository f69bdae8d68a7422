//! Minimal blocking Ethereum JSON-RPC client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ibc_harness::ChainError;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// JSON-RPC error code nodes use for a reverted `eth_call`/`eth_estimateGas`.
const EXECUTION_REVERTED_CODE: i64 = 3;

#[derive(Debug, Serialize)]
struct Request<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ErrorObject>,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// Sends JSON-RPC 2.0 requests to a single endpoint.
#[derive(Debug)]
pub struct JsonRpcClient {
    url: String,
    http: Client,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ChainError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChainError::Transport {
                description: e.to_string(),
            })?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            http,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Calls `method` and deserializes its result. A `null` result is handed
    /// to `R` as is, so callers expecting one ask for an `Option`.
    pub fn request<P, R>(&self, method: &str, params: P) -> Result<R, ChainError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = Request {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!("-> {method} (id {})", request.id);

        let response: Response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| ChainError::Transport {
                description: format!("{method}: {e}"),
            })?;

        into_result(method, response)
    }
}

fn into_result<R>(method: &str, response: Response) -> Result<R, ChainError>
where
    R: DeserializeOwned,
{
    if let Some(error) = response.error {
        debug!("<- {method} failed: {} {}", error.code, error.message);
        return Err(rejection(method, error));
    }

    serde_json::from_value(response.result.unwrap_or(Value::Null)).map_err(|e| {
        ChainError::InvalidResponse {
            description: format!("{method}: {e}"),
        }
    })
}

/// Maps a node-side error to a revert when the node says execution reverted,
/// decoding an `Error(string)` payload when one is attached.
fn rejection(method: &str, error: ErrorObject) -> ChainError {
    let reverted = error.code == EXECUTION_REVERTED_CODE
        || error.message.to_ascii_lowercase().contains("revert");

    if !reverted {
        return ChainError::Rejected {
            method: method.to_string(),
            code: error.code,
            message: error.message,
        };
    }

    let reason = error
        .data
        .as_ref()
        .and_then(revert_data)
        .filter(|data| !data.is_empty())
        .and_then(|data| alloy_sol_types::decode_revert_reason(&data))
        .unwrap_or(error.message);

    ChainError::Reverted { reason }
}

/// Revert data is either the hex string itself or, on some nodes, nested
/// under a `data` key.
fn revert_data(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::String(hex) => alloy_primitives::hex::decode(hex).ok(),
        Value::Object(map) => map.get("data").and_then(revert_data),
        _ => None,
    }
}
