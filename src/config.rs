//! Chain registry for Smart Contract Sentinel
//!
//! Maps user-supplied chain names (and their common aliases) to the
//! Blockscout explorer host used for source fetching and the JSON-RPC
//! endpoint used for on-chain probes. RPC endpoints can be overridden
//! via environment variables; public nodes are the default.

/// Chains the sentinel knows about.
///
/// Source fetching works on all three; on-chain probing is limited to
/// Ethereum and BSC (Polygon has no configured RPC endpoint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Ethereum,
    Bsc,
    Polygon,
}

impl Chain {
    /// Resolve a user-supplied chain name, accepting common aliases.
    /// Matching is case-insensitive. Unknown names return `None`.
    pub fn from_alias(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "ethereum" | "eth" => Some(Self::Ethereum),
            "bsc" | "bnb" => Some(Self::Bsc),
            "polygon" | "matic" => Some(Self::Polygon),
            _ => None,
        }
    }

    /// Canonical lowercase name, used in report filenames and replies.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Bsc => "bsc",
            Self::Polygon => "polygon",
        }
    }

    /// Display name for user-facing messages.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::Bsc => "BSC",
            Self::Polygon => "Polygon",
        }
    }

    /// Blockscout explorer host for verified source lookups.
    pub fn explorer_host(&self) -> &'static str {
        match self {
            Self::Ethereum => "eth.blockscout.com",
            Self::Bsc => "bsc.blockscout.com",
            Self::Polygon => "polygon.blockscout.com",
        }
    }

    /// JSON-RPC endpoint for this chain.
    ///
    /// Checks the chain's environment variable first, then falls back to a
    /// public node. Returns `None` for chains without probe support.
    pub fn rpc_url(&self) -> Option<String> {
        let (env_var, default) = match self {
            Self::Ethereum => ("ETH_RPC_URL", "https://eth.llamarpc.com"),
            Self::Bsc => ("BSC_RPC_URL", "https://bsc-dataseed.binance.org"),
            Self::Polygon => return None,
        };

        Some(std::env::var(env_var).unwrap_or_else(|_| default.to_string()))
    }
}

/// Explorer host for a free-form chain name.
/// Unknown chains fall back to the Ethereum explorer rather than failing.
pub fn explorer_host_for(chain: &str) -> &'static str {
    Chain::from_alias(chain)
        .map(|c| c.explorer_host())
        .unwrap_or("eth.blockscout.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_normalization() {
        assert_eq!(Chain::from_alias("eth"), Some(Chain::Ethereum));
        assert_eq!(Chain::from_alias("Ethereum"), Some(Chain::Ethereum));
        assert_eq!(Chain::from_alias("bnb"), Some(Chain::Bsc));
        assert_eq!(Chain::from_alias("BSC"), Some(Chain::Bsc));
        assert_eq!(Chain::from_alias("solana"), None);
    }

    #[test]
    fn test_alias_pairs_share_endpoints() {
        // The bot's `eth` shortcut must hit the same endpoints as `ethereum`
        let a = Chain::from_alias("eth").unwrap();
        let b = Chain::from_alias("ethereum").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.explorer_host(), b.explorer_host());
        assert_eq!(a.rpc_url(), b.rpc_url());
    }

    #[test]
    fn test_unknown_chain_falls_back_to_eth_explorer() {
        assert_eq!(explorer_host_for("dogechain"), "eth.blockscout.com");
        assert_eq!(explorer_host_for("bsc"), "bsc.blockscout.com");
    }

    #[test]
    fn test_polygon_has_no_rpc() {
        assert!(Chain::Polygon.rpc_url().is_none());
        assert!(Chain::Ethereum.rpc_url().is_some());
    }
}
