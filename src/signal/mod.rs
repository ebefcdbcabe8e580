//! Signal generation module
//!
//! Confluence of indicator signals and the strength gate in front of staking

mod confluence;
mod detector;
mod types;

pub use confluence::{classify, EntryStrength};
pub use detector::SignalDetector;
pub use types::{
    Breakout, Direction, IndicatorSnapshot, SignalKind, Trend, ADX14_SENTINEL, ATR14_SENTINEL,
    MACD_HIST_SENTINEL, RSI7_SENTINEL,
};

use crate::feed::CandleFrame;

/// Trait for indicator implementations
pub trait IndicatorSource: Send + Sync {
    /// Compute last-candle indicator outputs for a candle frame
    fn analyze(&self, frame: &CandleFrame) -> anyhow::Result<IndicatorSnapshot>;
}
