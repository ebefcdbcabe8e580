//! Stake escalation after a loss
//!
//! Flat keeps the stake, martingale multiplies it to recover the loss on the
//! next win, soros compounds the running stake by its level. Both escalating
//! modes can be gated on trade quality.

use rust_decimal::Decimal;

use crate::config::Strategy;

/// Money-management policy applied when a loss is consumed
#[derive(Debug, Clone)]
pub struct StakePolicy {
    /// Money-management mode
    pub strategy: Strategy,
    /// Martingale multiplier (> 1)
    pub martingale_factor: Decimal,
    /// Soros multiplier (> 1)
    pub soros_level: Decimal,
    /// Only escalate martingale on high-chance entries
    pub use_martingale_if_high_chance: bool,
    /// Only escalate soros when the payout clears `min_payout_for_soros`
    pub use_soros_if_low_payout: bool,
    /// Payout threshold for soros escalation
    pub min_payout_for_soros: Decimal,
}

impl StakePolicy {
    /// Stake to use after a loss at `stake`
    ///
    /// Soros multiplies the current stake, so consecutive losses compound.
    /// Escalation saturates at `Decimal::MAX`.
    pub fn after_loss(&self, stake: Decimal, high_chance: bool, payout: Decimal) -> Decimal {
        match self.strategy {
            Strategy::Martingale if high_chance || !self.use_martingale_if_high_chance => {
                stake.saturating_mul(self.martingale_factor)
            }
            Strategy::Soros
                if !self.use_soros_if_low_payout || payout >= self.min_payout_for_soros =>
            {
                stake.saturating_mul(self.soros_level)
            }
            _ => stake,
        }
    }

    /// Get the strategy name
    pub fn mode_name(&self) -> &'static str {
        match self.strategy {
            Strategy::Flat => "flat",
            Strategy::Martingale => "martingale",
            Strategy::Soros => "soros",
        }
    }
}
