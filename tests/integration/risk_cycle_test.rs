//! Stake progression across full trade cycles

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use turbo_bot::config::Strategy;
use turbo_bot::risk::{
    RiskParams, Settlement, StakePolicy, StakeRiskManager, StopLimits, StopReason, TradeOutcome,
    BASE_STAKE,
};

fn manager(strategy: Strategy, limits: StopLimits) -> StakeRiskManager {
    StakeRiskManager::new(RiskParams {
        limits,
        policy: StakePolicy {
            strategy,
            martingale_factor: dec!(2),
            soros_level: dec!(1.5),
            use_martingale_if_high_chance: true,
            use_soros_if_low_payout: true,
            min_payout_for_soros: dec!(0.80),
        },
        assets: vec!["EURUSD".to_string(), "GBPUSD".to_string()],
    })
}

fn loose() -> StopLimits {
    StopLimits {
        stop_loss_amount: dec!(1000),
        stop_loss_consecutive: 100,
        stop_win_amount: dec!(1000),
        stop_win_victories: 100,
    }
}

/// Compute a stake and settle it
fn trade(m: &mut StakeRiskManager, instrument: &str, outcome: TradeOutcome, payout: Decimal) -> Decimal {
    let stake = m.next_amount(instrument, true, payout);
    m.register_trade(instrument, outcome).unwrap();
    stake
}

#[test]
fn test_martingale_recovers_after_win() {
    let mut m = manager(Strategy::Martingale, loose());
    let stakes: Vec<_> = [
        TradeOutcome::Loss,
        TradeOutcome::Loss,
        TradeOutcome::Loss,
        TradeOutcome::Win,
        TradeOutcome::Loss,
    ]
    .into_iter()
    .map(|o| trade(&mut m, "EURUSD", o, dec!(0.87)))
    .collect();

    assert_eq!(stakes, vec![dec!(1), dec!(2), dec!(4), dec!(8), dec!(1)]);
    let state = m.snapshot("EURUSD").unwrap();
    assert_eq!(state.cumulative_losses(), dec!(7));
    assert_eq!(state.cumulative_wins(), dec!(8));
}

#[test]
fn test_martingale_gated_on_high_chance() {
    let mut m = manager(Strategy::Martingale, loose());
    m.next_amount("EURUSD", false, dec!(0.87));
    m.register_trade("EURUSD", TradeOutcome::Loss).unwrap();
    // Low-chance entry keeps the stake
    assert_eq!(m.next_amount("EURUSD", false, dec!(0.87)), dec!(1));
}

#[test]
fn test_soros_compounds_running_stake() {
    let mut m = manager(Strategy::Soros, loose());
    trade(&mut m, "EURUSD", TradeOutcome::Loss, dec!(0.85));
    trade(&mut m, "EURUSD", TradeOutcome::Loss, dec!(0.85));
    assert_eq!(m.next_amount("EURUSD", true, dec!(0.85)), dec!(2.25));
}

#[test]
fn test_soros_gated_on_payout() {
    let mut m = manager(Strategy::Soros, loose());
    trade(&mut m, "EURUSD", TradeOutcome::Loss, dec!(0.70));
    assert_eq!(m.next_amount("EURUSD", true, dec!(0.70)), BASE_STAKE);
}

#[test]
fn test_flat_never_escalates() {
    let mut m = manager(Strategy::Flat, loose());
    for _ in 0..5 {
        assert_eq!(trade(&mut m, "EURUSD", TradeOutcome::Loss, dec!(0.87)), BASE_STAKE);
    }
}

#[test]
fn test_instruments_are_independent() {
    let mut m = manager(Strategy::Martingale, loose());
    trade(&mut m, "EURUSD", TradeOutcome::Loss, dec!(0.87));
    trade(&mut m, "EURUSD", TradeOutcome::Loss, dec!(0.87));

    assert_eq!(m.next_amount("GBPUSD", true, dec!(0.87)), BASE_STAKE);
    assert_eq!(m.next_amount("EURUSD", true, dec!(0.87)), dec!(4));
}

#[test]
fn test_next_amount_consumes_settlement_once() {
    let mut m = manager(Strategy::Martingale, loose());
    trade(&mut m, "EURUSD", TradeOutcome::Loss, dec!(0.87));

    assert_eq!(
        m.snapshot("EURUSD").unwrap().settlement(),
        Settlement::Settled(TradeOutcome::Loss)
    );
    assert_eq!(m.next_amount("EURUSD", true, dec!(0.87)), dec!(2));
    assert_eq!(m.next_amount("EURUSD", true, dec!(0.87)), dec!(2));
    assert_eq!(m.snapshot("EURUSD").unwrap().settlement(), Settlement::Idle);
}

#[test]
fn test_stop_loss_amount_resets_stake() {
    let limits = StopLimits {
        stop_loss_amount: dec!(7),
        ..loose()
    };
    let mut m = manager(Strategy::Martingale, limits);
    for _ in 0..3 {
        trade(&mut m, "EURUSD", TradeOutcome::Loss, dec!(0.87));
    }

    assert!(!m.can_trade("EURUSD"));
    assert_eq!(
        m.stop_reason("EURUSD"),
        Some(StopReason::StopLossAmount(dec!(7)))
    );
    assert_eq!(m.next_amount("EURUSD", true, dec!(0.87)), BASE_STAKE);
    assert_eq!(m.snapshot("EURUSD").unwrap().current_stake(), BASE_STAKE);
    // Accumulators survive the stop
    assert_eq!(m.snapshot("EURUSD").unwrap().cumulative_losses(), dec!(7));
}

#[test]
fn test_stop_win_streak() {
    let limits = StopLimits {
        stop_win_victories: 2,
        ..loose()
    };
    let mut m = manager(Strategy::Martingale, limits);
    trade(&mut m, "GBPUSD", TradeOutcome::Win, dec!(0.87));
    assert!(m.can_trade("GBPUSD"));
    trade(&mut m, "GBPUSD", TradeOutcome::Win, dec!(0.87));
    assert_eq!(m.stop_reason("GBPUSD"), Some(StopReason::StopWinStreak(2)));
    assert!(m.can_trade("EURUSD"));
}

#[test]
fn test_untracked_instrument() {
    let mut m = manager(Strategy::Martingale, loose());
    assert!(!m.can_trade("USDJPY"));
    assert_eq!(m.next_amount("USDJPY", true, dec!(0.87)), BASE_STAKE);
    assert!(m.register_trade("USDJPY", TradeOutcome::Win).is_err());
    assert!(!m.tracks("USDJPY"));
}

#[test]
fn test_runaway_martingale_saturates_then_stops() {
    let limits = StopLimits {
        stop_loss_amount: Decimal::MAX,
        stop_loss_consecutive: u32::MAX,
        stop_win_amount: Decimal::MAX,
        stop_win_victories: u32::MAX,
    };
    let mut m = StakeRiskManager::new(RiskParams {
        limits,
        policy: StakePolicy {
            strategy: Strategy::Martingale,
            martingale_factor: dec!(3),
            soros_level: dec!(1.5),
            use_martingale_if_high_chance: false,
            use_soros_if_low_payout: false,
            min_payout_for_soros: dec!(0.8),
        },
        assets: vec!["EURUSD".to_string()],
    });

    let mut stakes = Vec::new();
    for _ in 0..200 {
        if !m.can_trade("EURUSD") {
            break;
        }
        stakes.push(trade(&mut m, "EURUSD", TradeOutcome::Loss, dec!(0.87)));
    }

    // 3^61 no longer fits; the stake pins at the maximum and losses hit the ceiling
    assert_eq!(stakes.last(), Some(&Decimal::MAX));
    assert!(stakes.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(
        m.stop_reason("EURUSD"),
        Some(StopReason::StopLossAmount(Decimal::MAX))
    );
    assert_eq!(m.next_amount("EURUSD", true, dec!(0.87)), BASE_STAKE);
}
