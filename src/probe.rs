//! On-Chain Prober - read-only honeypot and ownership checks
//!
//! Issues a handful of independent JSON-RPC reads against a contract:
//! code presence, ERC-20 name/symbol, owner(), and transfer() presence
//! (detected by scanning the deployed bytecode for the function selector).
//! Each probe degrades to a descriptive placeholder on failure; only the
//! preconditions and a missing-code result stop the sequence early.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::Address;
use eyre::{eyre, Result};
use tracing::info;

use crate::config::Chain;
use crate::rpc::RpcProvider;

/// Calldata for `name()`
const SELECTOR_NAME: &str = "0x06fdde03";
/// Calldata for `symbol()`
const SELECTOR_SYMBOL: &str = "0x95d89b41";
/// Calldata for `owner()`
const SELECTOR_OWNER: &str = "0x8da5cb5b";
/// Selector of `transfer(address,uint256)`, searched for in bytecode
const SELECTOR_TRANSFER: &str = "a9059cbb";

const FALLBACK_TOKEN: &str = "Unknown Token";
const FALLBACK_OWNER: &str = "⚠️ Owner() not found (may use custom access control).";
const FALLBACK_TRANSFER: &str = "⚠️ Transfer check failed";

/// Ordered key/value result of an on-chain probe. Never persisted as
/// structured data; report files carry only its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnChainReport {
    entries: Vec<(&'static str, String)>,
}

impl OnChainReport {
    fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Single-entry error report (unsupported chain, bad address, EOA...).
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            entries: vec![("error", message.into())],
        }
    }

    fn push(&mut self, key: &'static str, value: String) {
        self.entries.push((key, value));
    }

    pub fn entries(&self) -> &[(&'static str, String)] {
        &self.entries
    }

    pub fn is_error(&self) -> bool {
        self.entries.len() == 1 && self.entries[0].0 == "error"
    }
}

impl fmt::Display for OnChainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

/// Decode an ABI-encoded `string` return value (offset word, length word,
/// then bytes). Lossy UTF-8; trailing padding is dropped via the length.
pub fn decode_abi_string(hex_result: &str) -> Result<String> {
    let raw = hex::decode(hex_result.trim_start_matches("0x"))
        .map_err(|e| eyre!("Invalid hex in call result: {}", e))?;

    if raw.len() < 64 {
        return Err(eyre!("Return data too short for a string: {} bytes", raw.len()));
    }

    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&raw[56..64]);
    let len = u64::from_be_bytes(len_bytes) as usize;

    // The length word comes straight off the wire; guard the addition so a
    // hostile value cannot overflow the slice bound.
    let data = len
        .checked_add(64)
        .and_then(|end| raw.get(64..end))
        .ok_or_else(|| eyre!("String length {} exceeds return data", len))?;

    Ok(String::from_utf8_lossy(data).into_owned())
}

/// Decode an ABI-encoded `address` return value: last 20 bytes of the
/// 32-byte word, rendered in EIP-55 checksum form.
pub fn decode_abi_address(hex_result: &str) -> Result<String> {
    let raw = hex::decode(hex_result.trim_start_matches("0x"))
        .map_err(|e| eyre!("Invalid hex in call result: {}", e))?;

    if raw.len() < 32 {
        return Err(eyre!("Return data too short for an address: {} bytes", raw.len()));
    }

    let addr = Address::from_slice(&raw[12..32]);
    Ok(addr.to_checksum(None))
}

/// Bytecode-level transfer() presence check. `None` means the bytecode was
/// unavailable for scanning (the code read itself failed).
fn transfer_entry(code_hex: Option<&str>) -> String {
    match code_hex {
        Some(code) if code.to_lowercase().contains(SELECTOR_TRANSFER) => {
            "✅ Transfer function exists".to_string()
        }
        Some(_) => "❌ Missing transfer()".to_string(),
        None => FALLBACK_TRANSFER.to_string(),
    }
}

/// Read-only chain access the probe sequence needs. Seam between the probe
/// logic and the JSON-RPC transport.
pub(crate) trait EthReader {
    async fn get_code(&self, address: &str) -> Result<String>;
    async fn eth_call(&self, to: &str, data: &str) -> Result<String>;
}

impl EthReader for RpcProvider {
    async fn get_code(&self, address: &str) -> Result<String> {
        RpcProvider::get_code(self, address).await
    }

    async fn eth_call(&self, to: &str, data: &str) -> Result<String> {
        RpcProvider::eth_call(self, to, data).await
    }
}

/// Runs the read-only probe sequence against a contract address.
pub struct OnChainProber;

impl Default for OnChainProber {
    fn default() -> Self {
        Self::new()
    }
}

impl OnChainProber {
    pub fn new() -> Self {
        Self
    }

    /// Probe `address` on `chain`. Always returns a report; failures show
    /// up as an `error` entry or per-check fallback strings, never as an
    /// `Err`.
    pub async fn probe(&self, address: &str, chain_name: &str) -> OnChainReport {
        let Some((chain, rpc_url)) = Chain::from_alias(chain_name)
            .and_then(|c| c.rpc_url().map(|url| (c, url)))
        else {
            return OnChainReport::error(format!(
                "Unsupported chain '{}'. Use 'ethereum' or 'bsc'.",
                chain_name
            ));
        };

        info!("🔗 Connecting to {} RPC...", chain.title());
        let provider = match RpcProvider::new(rpc_url) {
            Ok(p) => p,
            Err(_) => {
                return OnChainReport::error(format!(
                    "Cannot connect to {} RPC node.",
                    chain.title()
                ))
            }
        };

        if provider.chain_id().await.is_err() {
            return OnChainReport::error(format!("Cannot connect to {} RPC node.", chain.title()));
        }

        let Ok(parsed) = Address::from_str(address) else {
            return OnChainReport::error("Invalid address format.");
        };
        let address = parsed.to_checksum(None);

        self.run_checks(&provider, &address).await
    }

    /// The probe sequence after the preconditions: code presence, token
    /// metadata, owner, transfer. An empty-code (EOA) result stops here with
    /// a single error entry; a failed code *read* is not an EOA and only
    /// degrades the transfer check.
    async fn run_checks<R: EthReader>(&self, reader: &R, address: &str) -> OnChainReport {
        let code = reader.get_code(address).await.ok();

        if let Some(code) = code.as_deref() {
            if code.is_empty() || code == "0x" {
                return OnChainReport::error("No contract code found (EOA address).");
            }
        }

        let mut report = OnChainReport::new();
        report.push("token", self.token_entry(reader, address).await);
        report.push("owner", self.owner_entry(reader, address).await);

        let transfer = transfer_entry(code.as_deref());
        let transfer_ok = transfer.starts_with('✅');
        report.push("transfer_test", transfer);
        report.push(
            "honeypot_risk",
            if transfer_ok {
                "🟢 Transfer function present".to_string()
            } else {
                "🔴 Possible Honeypot (transfer() missing)".to_string()
            },
        );

        report
    }

    /// `name()` + `symbol()` rendered as "Name (SYM)".
    async fn token_entry<R: EthReader>(&self, reader: &R, address: &str) -> String {
        let name = self.call_string(reader, address, SELECTOR_NAME).await;
        let symbol = self.call_string(reader, address, SELECTOR_SYMBOL).await;

        match (name, symbol) {
            (Ok(name), Ok(symbol)) => format!("{} ({})", name, symbol),
            _ => FALLBACK_TOKEN.to_string(),
        }
    }

    async fn owner_entry<R: EthReader>(&self, reader: &R, address: &str) -> String {
        match reader.eth_call(address, SELECTOR_OWNER).await {
            Ok(result) => decode_abi_address(&result)
                .unwrap_or_else(|_| FALLBACK_OWNER.to_string()),
            Err(_) => FALLBACK_OWNER.to_string(),
        }
    }

    async fn call_string<R: EthReader>(
        &self,
        reader: &R,
        address: &str,
        selector: &str,
    ) -> Result<String> {
        let result = reader.eth_call(address, selector).await?;
        decode_abi_string(&result)
    }
}
