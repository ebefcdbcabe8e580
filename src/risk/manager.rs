//! Per-instrument stake risk manager
//!
//! Each instrument cycles through `can_trade -> next_amount -> register_trade`.
//! A settled outcome is parked in the instrument's [`Settlement`] and folded
//! into the stake by the next `next_amount` call; repeated calls without a new
//! settlement return the same stake.
//!
//! [`Settlement`]: super::Settlement

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::{
    InstrumentRiskState, RiskError, RiskParams, StakePolicy, StopLimits, StopReason,
    TradeOutcome, BASE_STAKE,
};

/// Tracks stake, P&L counters and streaks for every configured instrument
#[derive(Debug)]
pub struct StakeRiskManager {
    limits: StopLimits,
    policy: StakePolicy,
    instruments: HashMap<String, InstrumentRiskState>,
}

impl StakeRiskManager {
    /// Create a manager with fresh state for each asset in `params`
    pub fn new(params: RiskParams) -> Self {
        let instruments = params
            .assets
            .into_iter()
            .map(|asset| (asset, InstrumentRiskState::new()))
            .collect();

        Self {
            limits: params.limits,
            policy: params.policy,
            instruments,
        }
    }

    /// Stake escalation policy in use
    pub fn policy(&self) -> &StakePolicy {
        &self.policy
    }

    /// Whether `instrument` is tracked
    pub fn tracks(&self, instrument: &str) -> bool {
        self.instruments.contains_key(instrument)
    }

    /// Copy of the instrument's current state
    pub fn snapshot(&self, instrument: &str) -> Option<InstrumentRiskState> {
        self.instruments.get(instrument).cloned()
    }

    /// Why `instrument` may not be traded right now, if anything
    pub fn stop_reason(&self, instrument: &str) -> Option<StopReason> {
        match self.instruments.get(instrument) {
            Some(state) => self.limits.check(state),
            None => Some(StopReason::UntrackedInstrument),
        }
    }

    /// Check every stop ceiling for `instrument`
    pub fn can_trade(&self, instrument: &str) -> bool {
        match self.stop_reason(instrument) {
            Some(reason) => {
                tracing::info!(instrument, %reason, "Trading stopped");
                false
            }
            None => true,
        }
    }

    /// Stake for the next trade on `instrument`
    ///
    /// A stopped instrument is forced back to the base stake.
    pub fn next_amount(&mut self, instrument: &str, high_chance: bool, payout: Decimal) -> Decimal {
        if !self.can_trade(instrument) {
            if let Some(state) = self.instruments.get_mut(instrument) {
                state.reset_stake();
            }
            return BASE_STAKE;
        }

        let Some(state) = self.instruments.get_mut(instrument) else {
            return BASE_STAKE;
        };

        match state.take_settlement() {
            None => {}
            Some(TradeOutcome::Win) => state.set_stake(BASE_STAKE),
            Some(TradeOutcome::Loss) => {
                let next = self
                    .policy
                    .after_loss(state.current_stake(), high_chance, payout);
                state.set_stake(next);
            }
        }

        state.current_stake()
    }

    /// Book a settled trade on `instrument`
    pub fn register_trade(
        &mut self,
        instrument: &str,
        outcome: TradeOutcome,
    ) -> Result<(), RiskError> {
        let state = self
            .instruments
            .get_mut(instrument)
            .ok_or_else(|| RiskError::UnknownInstrument(instrument.to_string()))?;

        state.record(outcome);

        tracing::info!(
            instrument,
            ?outcome,
            stake = %state.current_stake(),
            losses = %state.cumulative_losses(),
            wins = %state.cumulative_wins(),
            consecutive_losses = state.consecutive_losses(),
            consecutive_wins = state.consecutive_wins(),
            "Trade registered"
        );

        Ok(())
    }
}
