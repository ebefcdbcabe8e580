//! Decision cycle against paper and failing collaborators

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use turbo_bot::config::Strategy;
use turbo_bot::data::{TrainingLog, TRAINING_COLUMNS};
use turbo_bot::engine::{
    CalendarNewsGate, CycleOutcome, CycleReport, DecisionEngine, EngineSettings, NewsEvent,
    SkipReason,
};
use turbo_bot::execution::{Broker, OrderId, OrderRequest, OrderStatus, PaperBroker};
use turbo_bot::feed::{CandleFetcher, CandleFrame, MarketDataProvider, RetryPolicy};
use turbo_bot::model::FeatureVector;
use turbo_bot::risk::{RiskParams, StakePolicy, StopLimits, TradeOutcome};
use turbo_bot::signal::{Direction, EntryStrength, IndicatorSnapshot, IndicatorSource, Trend};

struct CandleProvider {
    calls: AtomicU32,
}

#[async_trait]
impl MarketDataProvider for CandleProvider {
    async fn get_candles(
        &self,
        _instrument: &str,
        _timeframe_secs: u64,
        count: usize,
        end: DateTime<Utc>,
    ) -> anyhow::Result<serde_json::Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let last = end.timestamp() - end.timestamp() % 60;
        let rows: Vec<_> = (0..count as i64)
            .map(|i| {
                let price = 1.1 - i as f64 * 0.0001;
                json!({"from": last - i * 60, "open": price, "close": price, "min": price, "max": price})
            })
            .collect();
        Ok(json!(rows))
    }

    async fn reconnect(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Derives a bearish snapshot from the frame
struct BearishIndicators;

impl IndicatorSource for BearishIndicators {
    fn analyze(&self, frame: &CandleFrame) -> anyhow::Result<IndicatorSnapshot> {
        let close = frame.last().map(|c| c.close).unwrap_or_default();
        Ok(IndicatorSnapshot {
            trend: Trend::Down,
            breakout: None,
            pattern: Some("engulfing, bearish".to_string()),
            volume_ratio: 0.0,
            ema_cross: false,
            rsi7: Some(f64::NAN),
            macd_hist: Some(-0.0003),
            adx14: Some(27.0),
            atr14: None,
            close,
            supertrend: close + 0.001,
            vwap: close - 0.001,
        })
    }
}

/// Accepts orders but cannot report outcomes
struct BlindBroker;

#[async_trait]
impl Broker for BlindBroker {
    async fn payouts(&self) -> anyhow::Result<HashMap<String, Decimal>> {
        Ok(HashMap::from([("EURUSD".to_string(), dec!(0.9))]))
    }

    async fn buy(&self, _order: &OrderRequest) -> anyhow::Result<OrderStatus> {
        Ok(OrderStatus::Accepted(OrderId::new_v4()))
    }

    async fn check_win(&self, _id: OrderId) -> anyhow::Result<bool> {
        anyhow::bail!("connection lost")
    }
}

fn params() -> RiskParams {
    RiskParams {
        limits: StopLimits {
            stop_loss_amount: dec!(100),
            stop_loss_consecutive: 5,
            stop_win_amount: dec!(100),
            stop_win_victories: 5,
        },
        policy: StakePolicy {
            strategy: Strategy::Martingale,
            martingale_factor: dec!(2.5),
            soros_level: dec!(1.5),
            use_martingale_if_high_chance: true,
            use_soros_if_low_payout: false,
            min_payout_for_soros: dec!(0.8),
        },
        assets: vec!["EURUSD".to_string()],
    }
}

fn settings() -> EngineSettings {
    EngineSettings {
        timeframe_secs: 60,
        candle_count: 50,
        trade_duration_mins: 1,
        min_payout: dec!(0.8),
        max_payout: dec!(0.95),
        daily_win_limit: 10,
        loop_interval: Duration::ZERO,
        news_pause: Duration::ZERO,
        daily_stop_pause: Duration::ZERO,
    }
}

fn engine(broker: Box<dyn Broker>) -> DecisionEngine {
    DecisionEngine::new(
        settings(),
        params(),
        CandleFetcher::new(RetryPolicy {
            max_attempts: 3,
            delay: Duration::ZERO,
        }),
        Box::new(CandleProvider {
            calls: AtomicU32::new(0),
        }),
        broker,
        Box::new(BearishIndicators),
    )
}

fn completed(outcome: CycleOutcome) -> CycleReport {
    match outcome {
        CycleOutcome::Completed(report) => report,
        other => panic!("expected completed cycle, got {other:?}"),
    }
}

#[tokio::test]
async fn test_put_entry_is_logged_for_training() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("trade_data.csv");

    let broker = PaperBroker::new(HashMap::from([("EURUSD".to_string(), dec!(0.88))]))
        .with_outcomes([false, true]);
    let mut engine = engine(Box::new(broker)).with_training_log(TrainingLog::new(&log_path));

    // pattern, trend, macd, adx, supertrend, ml
    let first = completed(engine.run_cycle().await);
    let trade = &first.trades[0];
    assert_eq!(trade.direction, Direction::Put);
    assert_eq!(trade.signals, 6);
    assert_eq!(trade.strength, EntryStrength::Medium);
    assert_eq!(trade.amount, dec!(1));
    assert_eq!(trade.outcome, TradeOutcome::Loss);

    let second = completed(engine.run_cycle().await);
    assert_eq!(second.trades[0].amount, dec!(2.5));
    assert_eq!(second.wins(), 1);
    assert_eq!(engine.daily_wins(), 1);

    let content = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], TRAINING_COLUMNS.join(","));
    assert!(lines[1].starts_with("\"engulfing, bearish\",none,down,0,0.88,False,50,-0.0003,27,0,"));
    assert!(lines[1].ends_with(",0"));
    assert!(lines[2].ends_with(",1"));
}

#[tokio::test]
async fn test_classifier_vote_decides_entry() {
    let broker = PaperBroker::new(HashMap::from([("EURUSD".to_string(), dec!(0.88))]));
    let mut engine = engine(Box::new(broker)).with_classifier(Box::new(|f: &FeatureVector| {
        f.payout > dec!(0.9)
    }));

    // Without the model vote only five signals remain: still medium
    let report = completed(engine.run_cycle().await);
    assert_eq!(report.trades[0].signals, 5);
    assert_eq!(report.trades[0].strength, EntryStrength::Medium);
}

#[tokio::test]
async fn test_unknown_outcome_is_booked_as_loss() {
    let mut engine = engine(Box::new(BlindBroker));

    let report = completed(engine.run_cycle().await);
    let trade = &report.trades[0];
    assert!(trade.order_id.is_some());
    assert_eq!(trade.outcome, TradeOutcome::Loss);

    let state = engine.risk().snapshot("EURUSD").unwrap();
    assert_eq!(state.consecutive_losses(), 1);
    assert_eq!(state.cumulative_losses(), dec!(1));

    let report = completed(engine.run_cycle().await);
    assert_eq!(report.trades[0].amount, dec!(2.5));
}

#[tokio::test]
async fn test_payout_above_window_skips_everything() {
    let broker = PaperBroker::new(HashMap::from([("EURUSD".to_string(), dec!(0.97))]));
    let mut engine = engine(Box::new(broker));

    let report = completed(engine.run_cycle().await);
    assert!(report.trades.is_empty());
    assert_eq!(
        report.skip_reason("EURUSD"),
        Some(&SkipReason::PayoutOutOfRange(dec!(0.97)))
    );
}

#[tokio::test]
async fn test_engine_from_example_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config =
        turbo_bot::config::Config::from_toml(include_str!("../../config.toml.example")).unwrap();
    config.model.training_log = dir.path().join("trades.csv");
    config.risk.assets = vec!["EURUSD".to_string()];
    let params = config.validate().unwrap();

    let settings = EngineSettings::from_config(&config);
    assert_eq!(settings.daily_win_limit, 5);
    assert_eq!(settings.loop_interval, Duration::from_secs(5));

    let broker = PaperBroker::new(HashMap::from([("EURUSD".to_string(), dec!(0.88))]))
        .with_outcomes([true]);
    let mut engine = DecisionEngine::from_config(
        &config,
        params,
        Box::new(CandleProvider {
            calls: AtomicU32::new(0),
        }),
        Box::new(broker),
        Box::new(BearishIndicators),
    );

    let report = completed(engine.run_cycle().await);
    assert_eq!(report.wins(), 1);
    assert!(config.model.training_log.exists());
}

#[tokio::test]
async fn test_calendar_gate_pauses_cycle() {
    let config =
        turbo_bot::config::Config::from_toml(include_str!("../../config.toml.example")).unwrap();
    let event = NewsEvent {
        title: "FOMC Statement".to_string(),
        impact: "high".to_string(),
        time: Utc::now() + chrono::Duration::minutes(20),
    };
    let gate = CalendarNewsGate::new(vec![event], config.trading.news_buffer_minutes);

    let broker = PaperBroker::new(HashMap::new());
    let mut engine = engine(Box::new(broker)).with_news_gate(Box::new(gate));
    assert!(matches!(engine.run_cycle().await, CycleOutcome::PausedForNews));
}
