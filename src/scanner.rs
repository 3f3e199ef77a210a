//! Pattern Scorer - static source analysis
//!
//! Scans verified Solidity source for a fixed table of risky textual
//! patterns and accumulates a 0-100 risk score. This is deliberately crude
//! substring triage, not a semantic analyzer: it will fire on comments,
//! string literals, and variable names (`mintable` matches `mint`). False
//! positives are acceptable for a flag-for-human-review tool.
//!
//! Score model: start at 100, apply each matched rule's delta once, grant
//! +10 when no negative-delta rule matched, clamp to [0,100].

use serde::{Deserialize, Serialize};

use crate::explorer::ExplorerClient;

/// Severity of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Info => "Info",
        }
    }
}

/// One entry in a scan report. Immutable; ordering is insertion order and
/// the summary finding is always last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub status: String,
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    fn new(status: &str, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            severity,
        }
    }
}

/// A single pattern rule: case-insensitive substring, fires at most once.
pub struct PatternRule {
    pub pattern: &'static str,
    pub status: &'static str,
    pub message: &'static str,
    pub severity: Severity,
    /// Score delta when the pattern matches. Negative deltas count as issues.
    pub delta: i32,
}

/// The fixed rule table. Order-independent for scoring; listed roughly by
/// how often the patterns appear in the wild.
pub const RULES: &[PatternRule] = &[
    PatternRule {
        pattern: "onlyOwner",
        status: "✅",
        message: "Contains access control using onlyOwner.",
        severity: Severity::Low,
        delta: 0,
    },
    PatternRule {
        pattern: "mint",
        status: "⚠️",
        message: "Mint function found (check if restricted).",
        severity: Severity::Medium,
        delta: -20,
    },
    PatternRule {
        pattern: "blacklist",
        status: "⚠️",
        message: "Blacklist logic detected (potential sell restriction).",
        severity: Severity::Medium,
        delta: -15,
    },
    PatternRule {
        pattern: "tx.origin",
        status: "🚨",
        message: "Uses tx.origin — potential phishing risk.",
        severity: Severity::High,
        delta: -40,
    },
    PatternRule {
        pattern: "renounceOwnership",
        status: "✅",
        message: "Ownership can be renounced.",
        severity: Severity::Low,
        delta: 20,
    },
];

/// Risk label for a clamped score.
fn risk_label(score: i32) -> &'static str {
    if score >= 80 {
        "🟢 Low Risk"
    } else if score >= 50 {
        "🟡 Moderate Risk"
    } else {
        "🔴 High Risk"
    }
}

/// Score already-fetched source text. Pure function, one finding per matched
/// rule plus a trailing summary.
pub fn score_source(source: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut score: i32 = 100;
    let mut issues = 0;

    let haystack = source.to_lowercase();

    for rule in RULES {
        if haystack.contains(&rule.pattern.to_lowercase()) {
            findings.push(Finding::new(rule.status, rule.message, rule.severity));
            score += rule.delta;
            if rule.delta < 0 {
                issues += 1;
            }
        }
    }

    // The clean bonus keys off negative matches only; a positive-delta match
    // like renounceOwnership does not suppress it.
    if issues == 0 {
        findings.push(Finding::new(
            "✅ Safe",
            "No known risk patterns detected.",
            Severity::Low,
        ));
        score += 10;
    }

    score = score.clamp(0, 100);

    findings.push(Finding::new(
        "📊 Summary",
        format!(
            "Verified: ✅ | Issues Found: {} | Overall Risk: {}/100 ({})",
            issues,
            score,
            risk_label(score)
        ),
        Severity::Info,
    ));

    findings
}

/// The two-finding report for a contract with no verified source.
fn unverified_findings() -> Vec<Finding> {
    let score = (100 - 80).max(0);
    vec![
        Finding::new(
            "❌ Critical",
            "Contract not verified — cannot review source.",
            Severity::High,
        ),
        Finding::new(
            "⚠️ Risk",
            format!("Overall Risk Score: {}/100 (Critical)", score),
            Severity::High,
        ),
    ]
}

/// Message of the trailing summary finding, if present.
pub fn summary_message(findings: &[Finding]) -> Option<&str> {
    findings
        .iter()
        .find(|f| f.status == "📊 Summary" || f.status == "⚠️ Risk")
        .map(|f| f.message.as_str())
}

/// Full static scan: fetch verified source, then score it.
pub struct ContractScanner {
    explorer: ExplorerClient,
}

impl Default for ContractScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractScanner {
    pub fn new() -> Self {
        Self {
            explorer: ExplorerClient::new(),
        }
    }

    /// Fetch and score. Unverified contracts short-circuit: no pattern
    /// checks run, and the report is exactly the critical notice plus a
    /// 20/100 summary.
    pub async fn analyze(&self, address: &str, chain: &str) -> Vec<Finding> {
        let source = self.explorer.fetch_source(address, chain).await;

        if source.is_empty() {
            return unverified_findings();
        }

        score_source(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_always_in_range() {
        // Even pathological input with every negative pattern stays clamped
        let worst = "mint blacklist tx.origin mint blacklist";
        let findings = score_source(worst);
        let summary = summary_message(&findings).unwrap();
        assert!(summary.contains("25/100"), "summary: {}", summary);

        let clean = score_source("contract Empty {}");
        assert!(summary_message(&clean).unwrap().contains("100/100"));
    }

    #[test]
    fn test_unverified_contract_path() {
        let findings = unverified_findings();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].severity, Severity::High);
        assert!(findings[1].message.contains("20/100 (Critical)"));
    }

    #[test]
    fn test_tx_origin_only() {
        let findings = score_source("function f() { require(tx.origin == msg.sender); }");
        let summary = summary_message(&findings).unwrap();
        assert!(summary.contains("Issues Found: 1"));
        assert!(summary.contains("60/100"));
        assert!(summary.contains("Moderate Risk"));
    }

    #[test]
    fn test_clean_source_gets_bonus_and_safe_finding() {
        let findings = score_source("contract Token { function foo() {} }");
        let summary = summary_message(&findings).unwrap();
        assert!(summary.contains("Issues Found: 0"));
        assert!(summary.contains("100/100"));
        assert!(summary.contains("Low Risk"));

        let safe: Vec<_> = findings
            .iter()
            .filter(|f| f.message.contains("No known risk patterns"))
            .collect();
        assert_eq!(safe.len(), 1);
    }

    #[test]
    fn test_renounce_plus_mint_cancels_out() {
        let findings = score_source("function mint() {} function renounceOwnership() {}");
        let summary = summary_message(&findings).unwrap();
        // +20 and -20 cancel; only the negative delta counts as an issue
        assert!(summary.contains("Issues Found: 1"));
        assert!(summary.contains("100/100"));
        assert!(summary.contains("Low Risk"));
    }

    #[test]
    fn test_rules_match_case_insensitively() {
        let findings = score_source("BLACKLIST[to] = true;");
        assert!(findings
            .iter()
            .any(|f| f.message.contains("Blacklist logic detected")));
    }

    #[test]
    fn test_each_rule_fires_at_most_once() {
        let findings = score_source("mint mint mint");
        let mint_hits = findings
            .iter()
            .filter(|f| f.message.contains("Mint function found"))
            .count();
        assert_eq!(mint_hits, 1);
        assert!(summary_message(&findings).unwrap().contains("80/100"));
    }

    #[test]
    fn test_only_owner_scores_zero() {
        let findings = score_source("modifier onlyOwner() { _; }");
        let summary = summary_message(&findings).unwrap();
        // matched rule with delta 0, no issues, so the +10 bonus still lands
        assert!(summary.contains("Issues Found: 0"));
        assert!(summary.contains("100/100"));
    }

    #[test]
    fn test_summary_is_last_finding() {
        let findings = score_source("function mint() {}");
        assert_eq!(findings.last().unwrap().status, "📊 Summary");
        assert_eq!(findings.last().unwrap().severity, Severity::Info);
    }
}
