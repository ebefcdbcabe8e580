//! Decision cycle
//!
//! One instrument at a time, in configured order. Any per-instrument failure
//! skips only that instrument. Every placed order is settled in the risk
//! manager, as a loss when placement or the outcome check fails.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::time::sleep;

use super::{CycleOutcome, CycleReport, DailyWinTally, NewsGate, NoNewsGate, SkipReason, TradeReport};
use crate::config::Config;
use crate::data::{TrainingLog, TrainingRecord};
use crate::execution::{Broker, OrderId, OrderRequest, OrderStatus};
use crate::feed::{CandleFetcher, MarketDataProvider, RetryPolicy};
use crate::model::{FeatureVector, HighChanceClassifier, PermissiveClassifier};
use crate::risk::{RiskParams, StakeRiskManager, TradeOutcome};
use crate::signal::{classify, IndicatorSource, SignalDetector};

/// Loop timing and entry filters
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub timeframe_secs: u64,
    pub candle_count: usize,
    pub trade_duration_mins: u64,
    pub min_payout: Decimal,
    pub max_payout: Decimal,
    /// Wins per calendar day before the loop idles
    pub daily_win_limit: u32,
    pub loop_interval: Duration,
    pub news_pause: Duration,
    pub daily_stop_pause: Duration,
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeframe_secs: config.trading.timeframe_secs,
            candle_count: config.trading.candle_count,
            trade_duration_mins: config.trading.trade_duration_mins(),
            min_payout: config.trading.min_payout,
            max_payout: config.trading.max_payout,
            daily_win_limit: config.risk.stop_win_victories,
            loop_interval: Duration::from_secs(config.trading.loop_interval_secs),
            news_pause: Duration::from_secs(60),
            daily_stop_pause: Duration::from_secs(3600),
        }
    }
}

/// Drives the decision cycle over the configured instruments
pub struct DecisionEngine {
    settings: EngineSettings,
    assets: Vec<String>,
    risk: StakeRiskManager,
    fetcher: CandleFetcher,
    detector: SignalDetector,
    daily: DailyWinTally,
    provider: Box<dyn MarketDataProvider>,
    broker: Box<dyn Broker>,
    indicators: Box<dyn IndicatorSource>,
    classifier: Box<dyn HighChanceClassifier>,
    news: Box<dyn NewsGate>,
    training_log: Option<TrainingLog>,
}

impl DecisionEngine {
    /// Create an engine with a permissive classifier, no news gate and no training log
    pub fn new(
        settings: EngineSettings,
        params: RiskParams,
        fetcher: CandleFetcher,
        provider: Box<dyn MarketDataProvider>,
        broker: Box<dyn Broker>,
        indicators: Box<dyn IndicatorSource>,
    ) -> Self {
        Self {
            settings,
            assets: params.assets.clone(),
            risk: StakeRiskManager::new(params),
            fetcher,
            detector: SignalDetector::new(),
            daily: DailyWinTally::new(),
            provider,
            broker,
            indicators,
            classifier: Box::new(PermissiveClassifier),
            news: Box::new(NoNewsGate),
            training_log: None,
        }
    }

    /// Create an engine from a validated config, logging trades to `model.training_log`
    pub fn from_config(
        config: &Config,
        params: RiskParams,
        provider: Box<dyn MarketDataProvider>,
        broker: Box<dyn Broker>,
        indicators: Box<dyn IndicatorSource>,
    ) -> Self {
        Self::new(
            EngineSettings::from_config(config),
            params,
            CandleFetcher::new(RetryPolicy::from(&config.feed)),
            provider,
            broker,
            indicators,
        )
        .with_training_log(TrainingLog::new(config.model.training_log.clone()))
    }

    pub fn with_classifier(mut self, classifier: Box<dyn HighChanceClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_news_gate(mut self, news: Box<dyn NewsGate>) -> Self {
        self.news = news;
        self
    }

    pub fn with_training_log(mut self, log: TrainingLog) -> Self {
        self.training_log = Some(log);
        self
    }

    pub fn risk(&self) -> &StakeRiskManager {
        &self.risk
    }

    pub fn daily_wins(&self) -> u32 {
        self.daily.wins()
    }

    /// Poll forever, pausing between cycles according to their outcome
    pub async fn run(&mut self) {
        loop {
            let pause = match self.run_cycle().await {
                CycleOutcome::PausedForNews => {
                    tracing::info!("High-impact news imminent, waiting");
                    self.settings.news_pause
                }
                CycleOutcome::DailyStopWin { wins } => {
                    tracing::info!(wins, "Daily stop win reached, waiting for tomorrow");
                    self.settings.daily_stop_pause
                }
                CycleOutcome::Completed(report) => {
                    tracing::info!(
                        trades = report.trades.len(),
                        wins = report.wins(),
                        skipped = report.skipped.len(),
                        "Cycle complete"
                    );
                    self.settings.loop_interval
                }
            };
            sleep(pause).await;
        }
    }

    /// Run one cycle at the current time
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.run_cycle_at(Utc::now()).await
    }

    /// Run one cycle, using `now` for the daily rollover
    pub async fn run_cycle_at(&mut self, now: DateTime<Utc>) -> CycleOutcome {
        if self.news.high_impact_imminent().await {
            return CycleOutcome::PausedForNews;
        }

        self.daily.roll(now.date_naive());
        if self.daily.limit_reached(self.settings.daily_win_limit) {
            return CycleOutcome::DailyStopWin {
                wins: self.daily.wins(),
            };
        }

        let payouts = match self.broker.payouts().await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch payouts");
                Default::default()
            }
        };

        let mut report = CycleReport::default();
        for instrument in self.assets.clone() {
            let payout = payouts.get(&instrument).copied().unwrap_or(Decimal::ZERO);
            match self.evaluate(&instrument, payout).await {
                Ok(trade) => {
                    if trade.outcome.is_win() {
                        self.daily.record_win();
                    }
                    report.trades.push(trade);
                }
                Err(reason) => {
                    tracing::debug!(instrument = %instrument, ?reason, "Instrument skipped");
                    report.skipped.push((instrument, reason));
                }
            }
        }

        CycleOutcome::Completed(report)
    }

    async fn evaluate(&mut self, instrument: &str, payout: Decimal) -> Result<TradeReport, SkipReason> {
        if payout < self.settings.min_payout || payout > self.settings.max_payout {
            return Err(SkipReason::PayoutOutOfRange(payout));
        }

        if let Some(reason) = self.risk.stop_reason(instrument) {
            tracing::info!(instrument, %reason, "Trading stopped");
            return Err(SkipReason::Stopped(reason));
        }

        let frame = self
            .fetcher
            .fetch(
                self.provider.as_ref(),
                instrument,
                self.settings.timeframe_secs,
                self.settings.candle_count,
            )
            .await
            .map_err(|e| {
                tracing::error!(instrument, error = %e, "Skipping instrument this cycle");
                SkipReason::CandlesUnavailable(e.to_string())
            })?;

        let snapshot = self.indicators.analyze(&frame).map_err(|e| {
            tracing::error!(instrument, error = %e, "Indicator evaluation failed");
            SkipReason::IndicatorsFailed(e.to_string())
        })?;

        let features = FeatureVector::from_snapshot(&snapshot, payout);
        let ml_high_chance = self.classifier.predict(&features);

        let direction = self
            .detector
            .direction(&snapshot)
            .ok_or(SkipReason::NoDirection)?;

        let signals = self.detector.detect(&snapshot, ml_high_chance);
        let strength = classify(signals.len());
        tracing::debug!(instrument, ?signals, %strength, "Confluence");

        if !strength.is_actionable() {
            tracing::info!(instrument, signals = signals.len(), %strength, "Insufficient confluence, skipping");
            return Err(SkipReason::InsufficientConfluence {
                signals: signals.len(),
                strength,
            });
        }

        let amount = self
            .risk
            .next_amount(instrument, strength.is_high_chance(), payout);
        tracing::info!(
            instrument,
            direction = direction.as_str(),
            %amount,
            signals = signals.len(),
            %strength,
            "Entering trade"
        );

        let order = OrderRequest {
            instrument: instrument.to_string(),
            direction,
            amount,
            duration_mins: self.settings.trade_duration_mins,
        };
        let (order_id, outcome) = self.place_and_settle(&order).await;

        if let Err(e) = self.risk.register_trade(instrument, outcome) {
            tracing::error!(instrument, error = %e, "Failed to register trade");
        }
        if let Some(log) = &self.training_log {
            if let Err(e) = log.append(&TrainingRecord::new(features, outcome)) {
                tracing::warn!(error = %e, "Failed to append training record");
            }
        }

        Ok(TradeReport {
            instrument: instrument.to_string(),
            direction,
            amount,
            strength,
            signals: signals.len(),
            order_id,
            outcome,
        })
    }

    /// Submit the order and wait for its outcome; failures count as losses
    async fn place_and_settle(&self, order: &OrderRequest) -> (Option<OrderId>, TradeOutcome) {
        let instrument = order.instrument.as_str();

        let status = match self.broker.buy(order).await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(instrument, error = %e, "Order submission failed");
                OrderStatus::Rejected(e.to_string())
            }
        };

        let order_id = match status {
            OrderStatus::Accepted(id) => id,
            OrderStatus::Rejected(reason) => {
                tracing::error!(instrument, %reason, "Order not executed");
                return (None, TradeOutcome::Loss);
            }
        };
        tracing::info!(instrument, ?order_id, "Order placed");

        let outcome = match self.broker.check_win(order_id).await {
            Ok(won) => TradeOutcome::from(won),
            Err(e) => {
                tracing::error!(instrument, ?order_id, error = %e, "Outcome check failed, booking loss");
                TradeOutcome::Loss
            }
        };
        tracing::info!(instrument, ?order_id, ?outcome, "Order settled");

        (Some(order_id), outcome)
    }
}
