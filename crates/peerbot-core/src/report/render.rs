//! Text serializations of a valuation report.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

use super::valuation::{similarity_pct, ValuationReport};
use crate::diagnostics::exclusion::format_eok;
use crate::types::Money;
use crate::PeerBotResult;

const JO: Decimal = dec!(1000000000000);
const EOK: Decimal = dec!(100000000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Markdown,
    Text,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "text" | "txt" | "plain" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(format!("unknown report format '{other}'")),
        }
    }
}

/// Render in the requested format.
pub fn render(report: &ValuationReport, format: ReportFormat) -> PeerBotResult<String> {
    match format {
        ReportFormat::Markdown => Ok(render_markdown(report)),
        ReportFormat::Text => Ok(render_plain_text(report)),
        ReportFormat::Csv => render_csv(report),
    }
}

/// Korean won with 조 / 억 units: `₩300.0조`, `₩5000억`, `₩12,345`.
pub fn format_krw(amount: Money) -> String {
    let abs = amount.abs();
    if abs >= JO {
        let jo = (amount / JO).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        format!("₩{jo:.1}조")
    } else if abs >= EOK {
        format_eok(amount)
    } else {
        format!("₩{}", group_thousands(amount.round_dp(0)))
    }
}

fn group_thousands(value: Decimal) -> String {
    let raw = value.abs().trunc().to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value.is_sign_negative() && !value.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn render_markdown(report: &ValuationReport) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# Valuation Report: {}\n", report.target_label);
    let _ = writeln!(md, "**Base Year:** {}\n", report.year);

    let _ = writeln!(md, "## 1. Selection Rationale\n{}\n", report.rationale_text);

    let _ = writeln!(md, "## 2. Peer Summary Table");
    let _ = writeln!(
        md,
        "| Company | Code | Market | Similarity | Revenue | Op. Income (est.) | Net Income (est.) |"
    );
    let _ = writeln!(md, "|---|---|---|---|---|---|---|");
    for row in &report.peers_table {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {:.1}% | {} | {} | {} |",
            row.corp_name,
            row.stock_code,
            row.market,
            similarity_pct(row.similarity),
            format_krw(row.revenue),
            format_krw(row.operating_income),
            format_krw(row.net_income),
        );
    }
    md.push('\n');

    let _ = writeln!(md, "## 3. Peer Explanations");
    for exp in &report.peer_explanations {
        let _ = writeln!(md, "### {}", exp.corp_name);
        let _ = writeln!(md, "- **Similarity:** {:.1}%", similarity_pct(exp.similarity));
        for bullet in &exp.bullet_points {
            let _ = writeln!(md, "- {bullet}");
        }
        let _ = writeln!(md, "- {}\n", exp.summary);
    }

    let _ = writeln!(md, "## 4. Limitations\n{}", report.limitations_text);
    if let Some(notes) = &report.notes_text {
        let _ = writeln!(md, "\n> {notes}");
    }
    md
}

pub fn render_plain_text(report: &ValuationReport) -> String {
    let mut txt = String::new();
    let _ = writeln!(txt, "VALUATION REPORT: {}", report.target_label);
    let _ = writeln!(txt, "================================================\n");

    let _ = writeln!(txt, "1. SELECTION RATIONALE\n{}\n", report.rationale_text);

    let _ = writeln!(txt, "2. PEER LIST");
    for row in &report.peers_table {
        let _ = writeln!(
            txt,
            "- {} ({}): Sim {:.1}%, Rev {}",
            row.corp_name,
            row.stock_code,
            similarity_pct(row.similarity),
            format_krw(row.revenue)
        );
    }
    txt.push('\n');

    let _ = writeln!(txt, "3. DETAILS");
    for exp in &report.peer_explanations {
        let _ = writeln!(txt, "[{}]\n{}\n", exp.corp_name, exp.summary);
    }

    let _ = writeln!(txt, "4. LIMITATIONS\n{}", report.limitations_text);
    txt
}

/// Peer table as CSV. Amounts are raw base-currency values.
pub fn render_csv(report: &ValuationReport) -> PeerBotResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "CorpName",
        "StockCode",
        "Market",
        "Similarity",
        "Revenue",
        "OperatingIncome",
        "NetIncome",
        "TotalAssets",
        "Estimated",
    ])?;
    for row in &report.peers_table {
        wtr.write_record([
            row.corp_name.clone(),
            row.stock_code.clone(),
            row.market.to_string(),
            row.similarity.to_string(),
            row.revenue.to_string(),
            row.operating_income.to_string(),
            row.net_income.to_string(),
            row.total_assets.to_string(),
            row.estimated.to_string(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| crate::error::PeerBotError::SerializationError(e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|e| crate::error::PeerBotError::SerializationError(e.to_string()))
}
