//! Minimal JSON-RPC client for read-only probes
//!
//! One provider per chain, one HTTP POST per call. No retries and no
//! fallback endpoints: every transient failure surfaces as an error that
//! the probe layer turns into a descriptive placeholder string.

use eyre::{eyre, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

const USER_AGENT_STRING: &str = concat!("ContractSentinel/", env!("CARGO_PKG_VERSION"));

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Read-only JSON-RPC provider for a single endpoint.
#[derive(Clone)]
pub struct RpcProvider {
    url: String,
    client: reqwest::Client,
}

impl RpcProvider {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Execute a single JSON-RPC call.
    pub async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| eyre!("Request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(eyre!("HTTP error: {}", status));
        }

        let json: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| eyre!("Failed to parse response: {}", e))?;

        if let Some(error) = json.error {
            return Err(eyre!("RPC error: {} (code: {})", error.message, error.code));
        }

        json.result.ok_or_else(|| eyre!("No result in response"))
    }

    /// `eth_chainId` — doubles as the connectivity check.
    pub async fn chain_id(&self) -> Result<String> {
        self.call::<String>("eth_chainId", serde_json::json!([])).await
    }

    /// Deployed bytecode at `address` (`eth_getCode`, latest block).
    pub async fn get_code(&self, address: &str) -> Result<String> {
        let params = serde_json::json!([address, "latest"]);
        self.call::<String>("eth_getCode", params).await
    }

    /// Read-only `eth_call` with raw hex calldata.
    pub async fn eth_call(&self, to: &str, data: &str) -> Result<String> {
        let params = serde_json::json!([
            { "to": to, "data": data },
            "latest"
        ]);
        self.call::<String>("eth_call", params).await
    }

    #[cfg(test)]
    pub fn url(&self) -> &str {
        &self.url
    }
}
