//! Classifier feature vector

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::signal::{IndicatorSnapshot, Trend};

/// Pattern label when no candlestick pattern fired
pub const NO_PATTERN: &str = "unknown";
/// Breakout label when price is inside the range
pub const NO_BREAKOUT: &str = "none";

/// Features describing one candidate entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub pattern_name: String,
    pub breakout: String,
    pub trend: Trend,
    pub volume_ratio: f64,
    pub payout: Decimal,
    pub ema_cross: bool,
    pub rsi7: f64,
    pub macd_hist: f64,
    pub adx14: f64,
    pub atr14: f64,
}

impl FeatureVector {
    /// Build features from indicator outputs and the instrument's payout
    pub fn from_snapshot(snapshot: &IndicatorSnapshot, payout: Decimal) -> Self {
        Self {
            pattern_name: snapshot
                .pattern
                .clone()
                .unwrap_or_else(|| NO_PATTERN.to_string()),
            breakout: snapshot
                .breakout
                .map_or(NO_BREAKOUT, |b| b.as_str())
                .to_string(),
            trend: snapshot.trend,
            volume_ratio: snapshot.volume_ratio.max(0.0),
            payout,
            ema_cross: snapshot.ema_cross,
            rsi7: snapshot.rsi7(),
            macd_hist: snapshot.macd_hist(),
            adx14: snapshot.adx14(),
            atr14: snapshot.atr14(),
        }
    }
}
