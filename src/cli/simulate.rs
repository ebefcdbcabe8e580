//! Simulate command implementation

use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;

use crate::risk::{RiskParams, StakeRiskManager, TradeOutcome};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Outcome sequence, e.g. `LLWL` (W = win, L = loss)
    pub outcomes: String,

    /// Instrument to trade; defaults to the first configured asset
    #[arg(long)]
    pub instrument: Option<String>,

    /// Payout quoted for every trade
    #[arg(long, default_value = "0.87")]
    pub payout: Decimal,

    /// Treat every entry as high chance
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub high_chance: bool,
}

/// One replayed trade
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedTrade {
    pub stake: Decimal,
    pub outcome: TradeOutcome,
}

impl SimulateArgs {
    pub fn execute(&self, params: RiskParams) -> anyhow::Result<()> {
        let outcomes = parse_outcomes(&self.outcomes)?;
        let instrument = match &self.instrument {
            Some(i) => i.clone(),
            None => params
                .assets
                .first()
                .cloned()
                .context("No assets configured")?,
        };

        let mut manager = StakeRiskManager::new(params);
        println!("Mode: {}", manager.policy().mode_name());

        let trades = replay(
            &mut manager,
            &instrument,
            &outcomes,
            self.high_chance,
            self.payout,
        )?;

        for (i, trade) in trades.iter().enumerate() {
            println!("#{:<3} stake {:>10}  {:?}", i + 1, trade.stake, trade.outcome);
        }
        if trades.len() < outcomes.len() {
            if let Some(reason) = manager.stop_reason(&instrument) {
                println!("Stopped after {} trades: {}", trades.len(), reason);
            }
        }
        if let Some(state) = manager.snapshot(&instrument) {
            println!(
                "Lost {} / won {} / next stake {}",
                state.cumulative_losses(),
                state.cumulative_wins(),
                state.current_stake()
            );
        }
        Ok(())
    }
}

/// Parse a `W`/`L` sequence, ignoring whitespace and commas
pub fn parse_outcomes(sequence: &str) -> anyhow::Result<Vec<TradeOutcome>> {
    sequence
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c.to_ascii_uppercase() {
            'W' => Ok(TradeOutcome::Win),
            'L' => Ok(TradeOutcome::Loss),
            other => anyhow::bail!("Invalid outcome '{other}', expected W or L"),
        })
        .collect()
}

/// Feed `outcomes` through `manager`, stopping at the first stop ceiling
pub fn replay(
    manager: &mut StakeRiskManager,
    instrument: &str,
    outcomes: &[TradeOutcome],
    high_chance: bool,
    payout: Decimal,
) -> anyhow::Result<Vec<SimulatedTrade>> {
    let mut trades = Vec::with_capacity(outcomes.len());
    for &outcome in outcomes {
        if !manager.can_trade(instrument) {
            break;
        }
        let stake = manager.next_amount(instrument, high_chance, payout);
        manager.register_trade(instrument, outcome)?;
        trades.push(SimulatedTrade { stake, outcome });
    }
    Ok(trades)
}
