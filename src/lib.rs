//! Smart Contract Sentinel
//!
//! Heuristic risk scanner for deployed EVM contracts:
//! - Static analysis: scans verified source (via Blockscout) for risky
//!   patterns and computes a 0-100 risk score
//! - On-chain probes: code presence, ERC-20 metadata, owner(), and
//!   transfer() existence to flag honeypot-like contracts
//!
//! Results are surfaced through a CLI and a Telegram bot, and persisted as
//! timestamped JSON reports.

pub mod config;
pub mod explorer;
pub mod probe;
pub mod report;
pub mod rpc;
pub mod scanner;

pub use config::Chain;
pub use explorer::ExplorerClient;
pub use probe::{OnChainProber, OnChainReport};
pub use report::save_scan_report;
pub use rpc::RpcProvider;
pub use scanner::{score_source, summary_message, ContractScanner, Finding, Severity};
