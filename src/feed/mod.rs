//! Market data module
//!
//! Candle retrieval from the market-data provider, with retries and
//! normalization into time-ordered frames

mod acquisition;
mod types;

pub use acquisition::{AcquisitionError, CandleFetcher, RetryPolicy};
pub use types::{Candle, CandleFrame, RawCandle};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure of a single fetch attempt
#[derive(Debug, Error)]
pub enum FeedError {
    /// Provider call failed
    #[error("Provider error: {0}")]
    Provider(anyhow::Error),
    /// Provider returned no candles
    #[error("Empty candle response")]
    EmptyResponse,
    /// Provider returned something other than a list of candles
    #[error("Unexpected candle response: {0}")]
    UnexpectedShape(&'static str),
    /// A candle row could not be decoded
    #[error("Malformed candle: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Candle open time out of range
    #[error("Invalid candle timestamp: {0}")]
    InvalidTimestamp(i64),
}

/// Trait for market data providers
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Raw candle response: `count` candles of `timeframe_secs` ending at `end`
    async fn get_candles(
        &self,
        instrument: &str,
        timeframe_secs: u64,
        count: usize,
        end: DateTime<Utc>,
    ) -> anyhow::Result<serde_json::Value>;

    /// Re-establish the provider session
    async fn reconnect(&self) -> anyhow::Result<()>;
}
