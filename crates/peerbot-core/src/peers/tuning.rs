use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PeerBotError;
use crate::types::{MarketFilter, Rate};
use crate::PeerBotResult;

/// Default number of peers returned by a search.
pub const DEFAULT_TOP_K: usize = 5;

/// Caller-owned search dials, recreated per search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningParameters {
    /// Keyword weight (0..=1)
    pub alpha: Rate,
    /// Semantic / cosine weight (0..=1), kept independent of alpha
    pub beta: Rate,
    /// Lower bound of the acceptable scale band, as a multiple of target scale
    pub size_band_low: Decimal,
    /// Upper bound of the acceptable scale band
    pub size_band_high: Decimal,
    /// Maximum number of peers returned
    pub top_k: usize,
    #[serde(default)]
    pub market: MarketFilter,
}

impl Default for TuningParameters {
    fn default() -> Self {
        Self {
            alpha: dec!(0.7),
            beta: dec!(0.3),
            size_band_low: dec!(0.5),
            size_band_high: dec!(2.0),
            top_k: DEFAULT_TOP_K,
            market: MarketFilter::All,
        }
    }
}

impl TuningParameters {
    /// Check the documented ranges. Scoring itself accepts any values;
    /// this is for input boundaries.
    pub fn validate(&self) -> PeerBotResult<()> {
        for (field, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(PeerBotError::invalid(
                    field,
                    format!("must be within [0, 1], got {value}"),
                ));
            }
        }
        if self.size_band_low <= Decimal::ZERO {
            return Err(PeerBotError::invalid(
                "size_band_low",
                format!("must be positive, got {}", self.size_band_low),
            ));
        }
        if self.size_band_high <= self.size_band_low {
            return Err(PeerBotError::invalid(
                "size_band_high",
                format!(
                    "must exceed size_band_low ({}), got {}",
                    self.size_band_low, self.size_band_high
                ),
            ));
        }
        if self.top_k == 0 {
            return Err(PeerBotError::invalid("top_k", "must be a positive integer"));
        }
        Ok(())
    }
}
