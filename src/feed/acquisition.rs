//! Candle acquisition with bounded retries
//!
//! Each fetch starts at attempt 1. A failed attempt is logged, the provider
//! session is re-established (best effort), and the fetch is retried after a
//! fixed delay until the attempt budget is spent.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::time::sleep;

use super::{CandleFrame, FeedError, MarketDataProvider};
use crate::config::FeedConfig;

/// Terminal acquisition failure for one instrument
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// Every attempt failed
    #[error("Could not fetch candles for {instrument} after {attempts} attempts: {last_error}")]
    Exhausted {
        instrument: String,
        attempts: u32,
        last_error: FeedError,
    },
}

/// Attempt budget and pause between attempts
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Fixed wait after a failed attempt
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl From<&FeedConfig> for RetryPolicy {
    fn from(config: &FeedConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            delay: config.retry_delay(),
        }
    }
}

/// Fetches and normalizes candles, reconnecting between failed attempts
#[derive(Debug, Clone, Default)]
pub struct CandleFetcher {
    policy: RetryPolicy,
}

impl CandleFetcher {
    /// Create a fetcher with the given retry policy
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch the latest `count` candles of `timeframe_secs` for `instrument`
    pub async fn fetch(
        &self,
        provider: &dyn MarketDataProvider,
        instrument: &str,
        timeframe_secs: u64,
        count: usize,
    ) -> Result<CandleFrame, AcquisitionError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let result = match provider
                .get_candles(instrument, timeframe_secs, count, Utc::now())
                .await
            {
                Ok(response) => CandleFrame::from_response(response),
                Err(e) => Err(FeedError::Provider(e)),
            };

            let error = match result {
                Ok(frame) => {
                    tracing::debug!(instrument, attempt, candles = frame.len(), "Candles fetched");
                    return Ok(frame);
                }
                Err(e) => e,
            };

            tracing::error!(instrument, attempt, error = %error, "Candle fetch failed, reconnecting");

            if let Err(e) = provider.reconnect().await {
                tracing::error!(instrument, error = %e, "Reconnect failed");
            }

            if attempt >= max_attempts {
                return Err(AcquisitionError::Exhausted {
                    instrument: instrument.to_string(),
                    attempts: attempt,
                    last_error: error,
                });
            }

            sleep(self.policy.delay).await;
            attempt += 1;
        }
    }
}
