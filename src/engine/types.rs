//! Engine report types

use rust_decimal::Decimal;
use serde::Serialize;

use crate::execution::OrderId;
use crate::risk::{StopReason, TradeOutcome};
use crate::signal::{Direction, EntryStrength};

/// Why an instrument was passed over this cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SkipReason {
    /// Payout outside the configured window (0 when not quoted)
    PayoutOutOfRange(Decimal),
    /// A stop ceiling is hit
    Stopped(StopReason),
    /// Candle acquisition exhausted its attempts
    CandlesUnavailable(String),
    /// Indicator collaborator failed
    IndicatorsFailed(String),
    /// Trend and supertrend disagree
    NoDirection,
    /// Too few agreeing signals
    InsufficientConfluence {
        signals: usize,
        strength: EntryStrength,
    },
}

/// A trade placed and settled during a cycle
#[derive(Debug, Clone, Serialize)]
pub struct TradeReport {
    pub instrument: String,
    pub direction: Direction,
    pub amount: Decimal,
    pub strength: EntryStrength,
    pub signals: usize,
    /// Broker order, absent when placement failed
    pub order_id: Option<OrderId>,
    pub outcome: TradeOutcome,
}

/// Per-instrument results of one full cycle
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleReport {
    pub trades: Vec<TradeReport>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl CycleReport {
    pub fn wins(&self) -> usize {
        self.trades.iter().filter(|t| t.outcome.is_win()).count()
    }

    /// Skip reason recorded for `instrument`, if it was skipped
    pub fn skip_reason(&self, instrument: &str) -> Option<&SkipReason> {
        self.skipped
            .iter()
            .find(|(i, _)| i == instrument)
            .map(|(_, reason)| reason)
    }
}

/// Result of one call to [`super::DecisionEngine::run_cycle`]
#[derive(Debug, Clone, Serialize)]
pub enum CycleOutcome {
    /// A high-impact news event is imminent
    PausedForNews,
    /// Daily win ceiling reached
    DailyStopWin { wins: u32 },
    /// Every instrument was evaluated
    Completed(CycleReport),
}
