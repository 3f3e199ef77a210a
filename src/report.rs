//! Report Writer - timestamped JSON scan reports
//!
//! Each scan produces a fresh file under `reports/`; nothing is ever
//! merged or rewritten.

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use eyre::{eyre, Result};
use tracing::info;

use crate::scanner::Finding;

/// Directory all reports land in, relative to the working directory.
const REPORTS_DIR: &str = "reports";

/// Filename for a scan: `{chain}_{first-6-chars-of-address}_{timestamp}.json`.
pub fn report_filename(address: &str, chain: &str, timestamp: &str) -> String {
    let prefix: String = address.chars().take(6).collect();
    format!("{}_{}_{}.json", chain, prefix, timestamp)
}

/// Serialize findings to a timestamped JSON file and return its path.
pub fn save_scan_report(address: &str, chain: &str, findings: &[Finding]) -> Result<PathBuf> {
    fs::create_dir_all(REPORTS_DIR)
        .map_err(|e| eyre!("Failed to create reports directory: {}", e))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let path = PathBuf::from(REPORTS_DIR).join(report_filename(address, chain, &timestamp));

    let json = serde_json::to_string_pretty(findings)?;
    fs::write(&path, json).map_err(|e| eyre!("Failed to save report: {}", e))?;

    info!("📝 Report saved → {}", path.display());
    Ok(path)
}
