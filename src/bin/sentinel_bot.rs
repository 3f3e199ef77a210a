//! Smart Contract Sentinel - Telegram bot front end
//!
//! Commands: /start /help /about /scan /score /last. Each chat keeps its
//! most recent scan reply (most-recent-wins) so /last can replay it.
//! Every command handler catches its own failures and answers with plain
//! text; a bad scan never takes the dispatcher down.

use std::sync::Arc;

use contract_sentinel::probe::OnChainProber;
use contract_sentinel::report::save_scan_report;
use contract_sentinel::scanner::{summary_message, ContractScanner, Finding, Severity};
use dashmap::DashMap;
use eyre::{eyre, Result};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use teloxide::utils::command::BotCommands;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const WELCOME: &str = "🛡️ *Smart Contract Sentinel Bot*\n\
Welcome! I can analyze verified token contracts on *Ethereum* and *BNB Chain*.\n\n\
📘 *Commands:*\n\
`/scan <address> <chain>` – Full static + on-chain analysis\n\
`/score <address> <chain>` – Quick risk score only\n\
`/last` – Show your most recent scan\n\
`/help` – Display this help message\n\
`/about` – Learn about this project\n\n\
💡 Example:\n\
`/scan 0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2 eth`\n\
`/scan 0x55d398326f99059fF775485246999027B3197955 bsc`";

const ABOUT: &str = "🧠 *About Smart Contract Sentinel*\n\
Detects potential *rug pulls*, *honeypots*, and risky Solidity code.\n\n\
✅ Supports Ethereum & BNB Chain\n\
⚙️ Static pattern scoring + live on-chain probes over JSON-RPC.";

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum Command {
    Start,
    Help,
    About,
    /// Full static + on-chain analysis: /scan <address> [chain]
    Scan(String),
    /// Quick risk score only: /score <address> [chain]
    Score(String),
    Last,
}

/// Most recent scan reply for a chat.
#[derive(Clone)]
struct LastReport {
    address: String,
    chain: String,
    summary: String,
}

type LastReports = Arc<DashMap<ChatId, LastReport>>;

/// Split "/scan <address> [chain]" arguments and normalize chain aliases.
/// Returns `Err` with a user-facing message on misuse.
fn parse_scan_args(args: &str, usage: &str) -> Result<(String, String)> {
    let mut parts = args.split_whitespace();
    let address = parts
        .next()
        .ok_or_else(|| eyre!("⚠️ Usage: {}", usage))?
        .to_string();

    let chain = match parts.next().map(|c| c.to_lowercase()) {
        None => "ethereum".to_string(),
        Some(alias) => match alias.as_str() {
            "eth" | "ethereum" => "ethereum".to_string(),
            "bnb" | "bsc" => "bsc".to_string(),
            _ => return Err(eyre!("⚠️ Unsupported chain. Use 'eth' or 'bsc'.")),
        },
    };

    Ok((address, chain))
}

fn title_case(chain: &str) -> String {
    let mut chars = chain.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

async fn run_scan(address: &str, chain: &str) -> Result<String> {
    let scanner = ContractScanner::new();
    let results = scanner.analyze(address, chain).await;

    let prober = OnChainProber::new();
    let onchain = prober.probe(address, chain).await;

    let static_summary = summary_message(&results).unwrap_or("No summary.");

    let mut reply = format!("✅ *Static Analysis:*\n{}\n\n", static_summary);
    reply += &format!("🔗 *On-Chain Checks ({}):*\n", title_case(chain));
    for (key, value) in onchain.entries() {
        reply += &format!("• {}: {}\n", key, value);
    }

    let mut combined = results;
    combined.push(Finding {
        status: "🔗 On-chain".to_string(),
        message: onchain.to_string(),
        severity: Severity::Info,
    });
    save_scan_report(address, chain, &combined)?;

    Ok(reply)
}

async fn run_score(address: &str, chain: &str) -> Result<String> {
    let scanner = ContractScanner::new();
    let results = scanner.analyze(address, chain).await;
    let summary = summary_message(&results).unwrap_or("No summary.");
    Ok(format!("✅ {}", summary))
}

async fn answer(
    bot: Bot,
    msg: Message,
    cmd: Command,
    last_reports: LastReports,
) -> ResponseResult<()> {
    match cmd {
        Command::Start | Command::Help => {
            bot.send_message(msg.chat.id, WELCOME)
                .parse_mode(ParseMode::Markdown)
                .await?;
        }
        Command::About => {
            bot.send_message(msg.chat.id, ABOUT)
                .parse_mode(ParseMode::Markdown)
                .await?;
        }
        Command::Scan(args) => {
            let (address, chain) = match parse_scan_args(&args, "/scan <contract_address> <chain>")
            {
                Ok(parsed) => parsed,
                Err(e) => {
                    bot.send_message(msg.chat.id, e.to_string()).await?;
                    return Ok(());
                }
            };

            bot.send_message(
                msg.chat.id,
                format!("🔍 Scanning {} on {}...", address, title_case(&chain)),
            )
            .await?;

            match run_scan(&address, &chain).await {
                Ok(reply) => {
                    last_reports.insert(
                        msg.chat.id,
                        LastReport {
                            address: address.clone(),
                            chain: chain.clone(),
                            summary: reply.clone(),
                        },
                    );
                    bot.send_message(msg.chat.id, reply)
                        .parse_mode(ParseMode::Markdown)
                        .await?;
                }
                Err(e) => {
                    bot.send_message(msg.chat.id, format!("❌ Scan failed: {}", e))
                        .await?;
                }
            }
        }
        Command::Score(args) => {
            let (address, chain) = match parse_scan_args(&args, "/score <contract_address> <chain>")
            {
                Ok(parsed) => parsed,
                Err(e) => {
                    bot.send_message(msg.chat.id, e.to_string()).await?;
                    return Ok(());
                }
            };

            bot.send_message(
                msg.chat.id,
                format!(
                    "📊 Calculating risk score for {} on {}...",
                    address,
                    title_case(&chain)
                ),
            )
            .await?;

            match run_score(&address, &chain).await {
                Ok(reply) => {
                    bot.send_message(msg.chat.id, reply).await?;
                }
                Err(e) => {
                    bot.send_message(msg.chat.id, format!("❌ Failed to get score: {}", e))
                        .await?;
                }
            }
        }
        Command::Last => match last_reports.get(&msg.chat.id) {
            Some(report) => {
                let reply = format!(
                    "📝 *Last Scan Summary*\nContract: `{}`\nChain: {}\n\n{}",
                    report.address,
                    title_case(&report.chain),
                    report.summary
                );
                bot.send_message(msg.chat.id, reply)
                    .parse_mode(ParseMode::Markdown)
                    .await?;
            }
            None => {
                bot.send_message(msg.chat.id, "📭 No previous scan found. Use /scan first.")
                    .await?;
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    let token = std::env::var("TELEGRAM_BOT_TOKEN")
        .map_err(|_| eyre!("TELEGRAM_BOT_TOKEN not configured"))?;
    let bot = Bot::new(token);

    let last_reports: LastReports = Arc::new(DashMap::new());

    info!("🤖 Bot running... Press Ctrl + C to stop.");

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(answer);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![last_reports])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
