//! Stop-loss and stop-win ceilings

use super::InstrumentRiskState;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-instrument stop ceilings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopLimits {
    /// Cumulative amount lost before trading stops
    pub stop_loss_amount: Decimal,
    /// Losses in a row before trading stops
    pub stop_loss_consecutive: u32,
    /// Cumulative amount won before trading stops
    pub stop_win_amount: Decimal,
    /// Wins in a row before trading stops
    pub stop_win_victories: u32,
}

/// Reason an instrument may not be traded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Cumulative losses reached the loss ceiling
    StopLossAmount(Decimal),
    /// Loss streak reached the consecutive-loss ceiling
    StopLossStreak(u32),
    /// Cumulative wins reached the win ceiling
    StopWinAmount(Decimal),
    /// Win streak reached the consecutive-win ceiling
    StopWinStreak(u32),
    /// Instrument is not in the configured asset set
    UntrackedInstrument,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::StopLossAmount(lost) => write!(f, "global stop loss reached (lost {lost})"),
            StopReason::StopLossStreak(n) => write!(f, "consecutive stop loss reached ({n} losses)"),
            StopReason::StopWinAmount(won) => write!(f, "global stop win reached (won {won})"),
            StopReason::StopWinStreak(n) => write!(f, "consecutive stop win reached ({n} wins)"),
            StopReason::UntrackedInstrument => write!(f, "instrument is not tracked"),
        }
    }
}

impl StopLimits {
    /// First ceiling the state has hit, checked loss-side first
    pub fn check(&self, state: &InstrumentRiskState) -> Option<StopReason> {
        if state.cumulative_losses() >= self.stop_loss_amount {
            return Some(StopReason::StopLossAmount(state.cumulative_losses()));
        }
        if state.consecutive_losses() >= self.stop_loss_consecutive {
            return Some(StopReason::StopLossStreak(state.consecutive_losses()));
        }
        if state.cumulative_wins() >= self.stop_win_amount {
            return Some(StopReason::StopWinAmount(state.cumulative_wins()));
        }
        if state.consecutive_wins() >= self.stop_win_victories {
            return Some(StopReason::StopWinStreak(state.consecutive_wins()));
        }
        None
    }
}
