//! Per-instrument stake state

use super::{TradeOutcome, BASE_STAKE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a settled trade is waiting to be folded into the next stake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Settlement {
    /// Nothing settled since the last stake computation
    #[default]
    Idle,
    /// A trade settled and has not been consumed yet
    Settled(TradeOutcome),
}

impl Settlement {
    /// Consume the pending outcome, leaving `Idle` behind
    pub fn take(&mut self) -> Option<TradeOutcome> {
        match std::mem::take(self) {
            Settlement::Settled(outcome) => Some(outcome),
            Settlement::Idle => None,
        }
    }
}

/// Risk state for one tradable instrument
///
/// Only mutable through the crate; callers get copies via
/// [`crate::risk::StakeRiskManager::snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRiskState {
    current_stake: Decimal,
    cumulative_losses: Decimal,
    cumulative_wins: Decimal,
    consecutive_losses: u32,
    consecutive_wins: u32,
    settlement: Settlement,
}

impl InstrumentRiskState {
    /// Fresh state at the base stake
    pub fn new() -> Self {
        Self {
            current_stake: BASE_STAKE,
            cumulative_losses: Decimal::ZERO,
            cumulative_wins: Decimal::ZERO,
            consecutive_losses: 0,
            consecutive_wins: 0,
            settlement: Settlement::Idle,
        }
    }

    pub fn current_stake(&self) -> Decimal {
        self.current_stake
    }

    pub fn cumulative_losses(&self) -> Decimal {
        self.cumulative_losses
    }

    pub fn cumulative_wins(&self) -> Decimal {
        self.cumulative_wins
    }

    pub fn consecutive_losses(&self) -> u32 {
        self.consecutive_losses
    }

    pub fn consecutive_wins(&self) -> u32 {
        self.consecutive_wins
    }

    pub fn settlement(&self) -> Settlement {
        self.settlement
    }

    /// Book a settled trade at the current stake; totals saturate
    pub(crate) fn record(&mut self, outcome: TradeOutcome) {
        match outcome {
            TradeOutcome::Win => {
                self.cumulative_wins = self.cumulative_wins.saturating_add(self.current_stake);
                self.consecutive_wins = self.consecutive_wins.saturating_add(1);
                self.consecutive_losses = 0;
            }
            TradeOutcome::Loss => {
                self.cumulative_losses = self.cumulative_losses.saturating_add(self.current_stake);
                self.consecutive_losses = self.consecutive_losses.saturating_add(1);
                self.consecutive_wins = 0;
            }
        }
        self.settlement = Settlement::Settled(outcome);
    }

    /// Drop back to the base stake and forget any pending outcome
    pub(crate) fn reset_stake(&mut self) {
        self.current_stake = BASE_STAKE;
        self.settlement = Settlement::Idle;
    }

    pub(crate) fn take_settlement(&mut self) -> Option<TradeOutcome> {
        self.settlement.take()
    }

    /// Stakes never drop below the base unit
    pub(crate) fn set_stake(&mut self, stake: Decimal) {
        self.current_stake = stake.max(BASE_STAKE);
    }
}

impl Default for InstrumentRiskState {
    fn default() -> Self {
        Self::new()
    }
}
