//! Risk management types

use super::{StakePolicy, StopLimits};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stake used for a fresh cycle and after every reset
pub const BASE_STAKE: Decimal = Decimal::ONE;

/// Risk management errors
#[derive(Debug, Error)]
pub enum RiskError {
    /// Instrument was not part of the configured asset set
    #[error("Instrument not tracked by the risk manager: {0}")]
    UnknownInstrument(String),
}

/// Outcome of a settled trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOutcome {
    Win,
    Loss,
}

impl TradeOutcome {
    /// Whether the trade paid out
    pub fn is_win(self) -> bool {
        matches!(self, TradeOutcome::Win)
    }
}

impl From<bool> for TradeOutcome {
    fn from(won: bool) -> Self {
        if won {
            TradeOutcome::Win
        } else {
            TradeOutcome::Loss
        }
    }
}

/// Validated risk parameters for one run
///
/// Built by [`crate::config::RiskConfig::validate`]; holding one means every
/// ceiling is non-negative and every multiplier is above 1.
#[derive(Debug, Clone)]
pub struct RiskParams {
    /// Stop conditions
    pub limits: StopLimits,
    /// Stake escalation policy
    pub policy: StakePolicy,
    /// Instruments tracked by the manager
    pub assets: Vec<String>,
}
