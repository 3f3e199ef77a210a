//! Blockscout explorer client - verified source fetching
//!
//! One GET per lookup, no retries, no caching. Every failure mode collapses
//! to an empty string so callers only distinguish "got source" from
//! "unverified or unavailable". The explorer's `result` field is
//! polymorphic (array of objects, bare object, or an error string), so the
//! response is walked as loose JSON rather than a fixed struct.

use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

/// Timeout for explorer requests
const EXPLORER_TIMEOUT_SECS: u64 = 15;

/// Client for Blockscout-style `getsourcecode` lookups.
pub struct ExplorerClient {
    client: reqwest::Client,
}

impl Default for ExplorerClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch verified contract source for `address` on `chain`.
    ///
    /// Returns the flattened `SourceCode` string, or an empty string if the
    /// contract is unverified, the address is unknown, or anything on the
    /// network path fails.
    pub async fn fetch_source(&self, address: &str, chain: &str) -> String {
        let host = crate::config::explorer_host_for(chain);
        let url = format!(
            "https://{}/api?module=contract&action=getsourcecode&address={}",
            host, address
        );

        let response = match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(EXPLORER_TIMEOUT_SECS))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!("❌ Explorer request to {} failed: {}", host, e);
                return String::new();
            }
        };

        let data: Value = match response.json().await {
            Ok(json) => json,
            Err(e) => {
                warn!("❌ Explorer returned non-JSON response: {}", e);
                return String::new();
            }
        };

        Self::extract_source(&data, host)
    }

    /// Walk the explorer payload down to a non-empty `SourceCode` string.
    fn extract_source(data: &Value, host: &str) -> String {
        let Some(result) = data.get("result") else {
            warn!("❌ Unexpected explorer response (no result field)");
            return String::new();
        };

        let entry = match result {
            Value::Array(items) => match items.first() {
                Some(first) => first,
                None => return String::new(),
            },
            // Explorers put error text directly in `result`
            Value::String(msg) => {
                warn!("⚠️ Explorer returned message: {}", msg);
                return String::new();
            }
            Value::Object(_) => result,
            other => {
                warn!("❌ Unexpected result format: {:?}", other);
                return String::new();
            }
        };

        match entry.get("SourceCode").and_then(Value::as_str) {
            Some(source) if !source.is_empty() => {
                info!("✅ Contract source fetched from {}", host);
                source.to_string()
            }
            _ => {
                info!("⚠️ Contract found but not verified on {}", host);
                String::new()
            }
        }
    }
}
