//! Decision engine module
//!
//! The polling cycle: news gate, daily stop, payouts, then per instrument
//! candles -> indicators -> confluence -> stake -> order -> settlement

mod daily;
mod decision;
mod news;
mod types;

pub use daily::DailyWinTally;
pub use decision::{DecisionEngine, EngineSettings};
pub use news::{CalendarNewsGate, NewsEvent};
pub use types::{CycleOutcome, CycleReport, SkipReason, TradeReport};

use async_trait::async_trait;

/// Trait for economic-calendar gates
#[async_trait]
pub trait NewsGate: Send + Sync {
    /// Whether a high-impact event is close enough to pause trading
    async fn high_impact_imminent(&self) -> bool;
}

/// Gate for running without a calendar; never pauses
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNewsGate;

#[async_trait]
impl NewsGate for NoNewsGate {
    async fn high_impact_imminent(&self) -> bool {
        false
    }
}
