use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Scores and ratios expressed as decimals (0.75 = 75%). Never as percentages.
pub type Rate = Decimal;

/// Listing venue of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "KOSPI")]
    Kospi,
    #[serde(rename = "KOSDAQ")]
    Kosdaq,
    #[serde(rename = "OTHER")]
    Other,
    /// Unlisted company, typically a virtual profile
    Private,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::Kospi => write!(f, "KOSPI"),
            Market::Kosdaq => write!(f, "KOSDAQ"),
            Market::Other => write!(f, "OTHER"),
            Market::Private => write!(f, "Private"),
        }
    }
}

impl FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KOSPI" => Ok(Market::Kospi),
            "KOSDAQ" => Ok(Market::Kosdaq),
            "OTHER" => Ok(Market::Other),
            "PRIVATE" => Ok(Market::Private),
            other => Err(format!("unknown market '{other}'")),
        }
    }
}

/// Market restriction applied to a peer search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketFilter {
    #[default]
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "KOSPI")]
    Kospi,
    #[serde(rename = "KOSDAQ")]
    Kosdaq,
}

impl MarketFilter {
    /// True when a company listed on `market` passes this filter.
    pub fn admits(&self, market: Market) -> bool {
        match self {
            MarketFilter::All => true,
            MarketFilter::Kospi => market == Market::Kospi,
            MarketFilter::Kosdaq => market == Market::Kosdaq,
        }
    }
}

impl fmt::Display for MarketFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketFilter::All => write!(f, "ALL"),
            MarketFilter::Kospi => write!(f, "KOSPI"),
            MarketFilter::Kosdaq => write!(f, "KOSDAQ"),
        }
    }
}

impl FromStr for MarketFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" => Ok(MarketFilter::All),
            "KOSPI" => Ok(MarketFilter::Kospi),
            "KOSDAQ" => Ok(MarketFilter::Kosdaq),
            other => Err(format!("unknown market filter '{other}' (expected ALL, KOSPI or KOSDAQ)")),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
