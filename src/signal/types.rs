//! Signal types

use serde::{Deserialize, Serialize};

/// Fallback RSI(7) when the indicator is unavailable
pub const RSI7_SENTINEL: f64 = 50.0;
/// Fallback MACD histogram when the indicator is unavailable
pub const MACD_HIST_SENTINEL: f64 = 0.0;
/// Fallback ADX(14) when the indicator is unavailable
pub const ADX14_SENTINEL: f64 = 0.0;
/// Fallback ATR(14) when the indicator is unavailable
pub const ATR14_SENTINEL: f64 = 0.0;

/// Moving-average trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Flat => "flat",
        }
    }
}

/// Close beyond a twice-touched support or resistance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Breakout {
    #[serde(rename = "breakout_up")]
    Up,
    #[serde(rename = "breakout_down")]
    Down,
}

impl Breakout {
    pub fn as_str(self) -> &'static str {
        match self {
            Breakout::Up => "breakout_up",
            Breakout::Down => "breakout_down",
        }
    }
}

/// Option direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Price expected to finish higher
    Call,
    /// Price expected to finish lower
    Put,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Call => "call",
            Direction::Put => "put",
        }
    }
}

/// One independently detected signal contributing to confluence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Breakout,
    Pattern,
    Volume,
    Trend,
    EmaCross,
    Macd,
    Adx,
    Supertrend,
    Vwap,
    Ml,
}

/// Last-candle outputs of the indicator collaborator
///
/// Optional oscillators fall back to fixed sentinels when missing or NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Fast/slow moving-average trend
    pub trend: Trend,
    /// Support/resistance breakout, if any
    pub breakout: Option<Breakout>,
    /// First detected candlestick pattern, if any
    pub pattern: Option<String>,
    /// Last volume over its rolling mean (0 when the mean is 0)
    pub volume_ratio: f64,
    /// Fast EMA above slow EMA
    pub ema_cross: bool,
    pub rsi7: Option<f64>,
    pub macd_hist: Option<f64>,
    pub adx14: Option<f64>,
    pub atr14: Option<f64>,
    /// Last close
    pub close: f64,
    /// Supertrend line at the last candle
    pub supertrend: f64,
    /// VWAP at the last candle
    pub vwap: f64,
}

fn or_sentinel(value: Option<f64>, sentinel: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => sentinel,
    }
}

impl IndicatorSnapshot {
    pub fn rsi7(&self) -> f64 {
        or_sentinel(self.rsi7, RSI7_SENTINEL)
    }

    pub fn macd_hist(&self) -> f64 {
        or_sentinel(self.macd_hist, MACD_HIST_SENTINEL)
    }

    pub fn adx14(&self) -> f64 {
        or_sentinel(self.adx14, ADX14_SENTINEL)
    }

    pub fn atr14(&self) -> f64 {
        or_sentinel(self.atr14, ATR14_SENTINEL)
    }
}
