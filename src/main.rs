//! Smart Contract Sentinel - CLI entry point
//!
//! Scans a deployed contract for potential risks such as honeypots,
//! blacklist logic, unrestricted minting, or missing ownership
//! renouncement. Performs both:
//! - Static analysis (verified source inspection)
//! - Live on-chain checks (RPC-based metadata)

use clap::Parser;
use colored::Colorize;
use contract_sentinel::config::Chain;
use contract_sentinel::probe::OnChainProber;
use contract_sentinel::report::save_scan_report;
use contract_sentinel::scanner::{ContractScanner, Finding, Severity};
use eyre::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// 🛡️ Smart Contract Sentinel – Analyze deployed contracts for potential risks.
#[derive(Parser)]
#[command(name = "sentinel", version)]
struct Cli {
    /// Contract address to analyze (e.g., 0x1234...)
    #[arg(long)]
    address: String,

    /// Target blockchain (ethereum, bsc, polygon)
    #[arg(long, default_value = "ethereum")]
    chain: String,
}

fn severity_colored(finding: &Finding) -> colored::ColoredString {
    match finding.severity {
        Severity::High => finding.status.red(),
        Severity::Medium => finding.status.yellow(),
        Severity::Low => finding.status.green(),
        Severity::Info => finding.status.cyan(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let chain = Chain::from_alias(&cli.chain)
        .map(|c| c.name().to_string())
        .unwrap_or(cli.chain.clone());

    println!(
        "{}",
        format!("🔍 Scanning {} on {}...", cli.address, chain).cyan()
    );

    let scanner = ContractScanner::new();
    let results = scanner.analyze(&cli.address, &chain).await;

    println!("\n{}", "=== Static Scan Results ===".white());
    for finding in &results {
        println!("{} - {}", severity_colored(finding), finding.message);
    }

    println!("\n{}", "=== On-Chain Analysis ===".magenta());
    let prober = OnChainProber::new();
    let onchain = prober.probe(&cli.address, &chain).await;
    for (key, value) in onchain.entries() {
        println!("{} {}", format!("{}:", key).magenta(), value);
    }

    // Combined report: static findings plus the stringified on-chain result
    let mut combined = results;
    combined.push(Finding {
        status: "🔗 On-chain".to_string(),
        message: onchain.to_string(),
        severity: Severity::Info,
    });

    match save_scan_report(&cli.address, &chain, &combined) {
        Ok(path) => println!("\n📝 Report saved successfully → {}", path.display()),
        Err(e) => eprintln!("{} {}", "❌ Failed to save report:".red(), e),
    }

    println!("\n{}", "Scan complete ✅".cyan());
    Ok(())
}
