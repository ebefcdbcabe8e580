//! Signal detection

use super::{Direction, IndicatorSnapshot, SignalKind, Trend};

/// Volume ratio above which volume counts as a signal
const VOLUME_RATIO_THRESHOLD: f64 = 1.0;
/// ADX(14) above which the trend counts as strong
const ADX_THRESHOLD: f64 = 20.0;

/// Turns indicator outputs into a direction and agreeing signals
#[derive(Debug, Clone, Default)]
pub struct SignalDetector;

impl SignalDetector {
    /// Create a new signal detector
    pub fn new() -> Self {
        Self
    }

    /// Trade direction when trend and supertrend agree
    pub fn direction(&self, snapshot: &IndicatorSnapshot) -> Option<Direction> {
        let above_supertrend = snapshot.close > snapshot.supertrend;
        match (snapshot.trend, above_supertrend) {
            (Trend::Up, true) => Some(Direction::Call),
            (Trend::Down, false) => Some(Direction::Put),
            _ => None,
        }
    }

    /// Collect every signal present in the snapshot
    pub fn detect(&self, snapshot: &IndicatorSnapshot, ml_high_chance: bool) -> Vec<SignalKind> {
        let trend = snapshot.trend;
        let with_trend = |above: bool, below: bool| match trend {
            Trend::Up => above,
            Trend::Down => below,
            Trend::Flat => false,
        };

        let mut signals = Vec::with_capacity(10);
        if snapshot.breakout.is_some() {
            signals.push(SignalKind::Breakout);
        }
        if snapshot.pattern.is_some() {
            signals.push(SignalKind::Pattern);
        }
        if snapshot.volume_ratio > VOLUME_RATIO_THRESHOLD {
            signals.push(SignalKind::Volume);
        }
        if trend != Trend::Flat {
            signals.push(SignalKind::Trend);
        }
        if snapshot.ema_cross {
            signals.push(SignalKind::EmaCross);
        }
        let macd = snapshot.macd_hist();
        if with_trend(macd > 0.0, macd < 0.0) {
            signals.push(SignalKind::Macd);
        }
        if snapshot.adx14() > ADX_THRESHOLD {
            signals.push(SignalKind::Adx);
        }
        if with_trend(
            snapshot.close > snapshot.supertrend,
            snapshot.close < snapshot.supertrend,
        ) {
            signals.push(SignalKind::Supertrend);
        }
        if with_trend(snapshot.close > snapshot.vwap, snapshot.close < snapshot.vwap) {
            signals.push(SignalKind::Vwap);
        }
        if ml_high_chance {
            signals.push(SignalKind::Ml);
        }
        signals
    }
}
