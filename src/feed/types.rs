//! Candle types

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::FeedError;

/// Candle as the provider sends it
///
/// Providers disagree on names; `min`/`max` and `from` are accepted for
/// low/high and the open time.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCandle {
    /// Open time, unix seconds
    #[serde(alias = "from")]
    pub timestamp: i64,
    pub open: f64,
    #[serde(alias = "max")]
    pub high: f64,
    #[serde(alias = "min")]
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// A normalized OHLCV candle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Open time
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl TryFrom<RawCandle> for Candle {
    type Error = FeedError;

    fn try_from(raw: RawCandle) -> Result<Self, Self::Error> {
        let time = Utc
            .timestamp_opt(raw.timestamp, 0)
            .single()
            .ok_or(FeedError::InvalidTimestamp(raw.timestamp))?;

        Ok(Self {
            time,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
        })
    }
}

/// Candles for one instrument, ascending by open time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandleFrame {
    candles: Vec<Candle>,
}

impl CandleFrame {
    /// Sort candles into time order
    pub fn new(mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.time);
        Self { candles }
    }

    /// Normalize a raw provider response
    ///
    /// Anything other than a non-empty array of candle objects is rejected.
    pub fn from_response(response: serde_json::Value) -> Result<Self, FeedError> {
        let rows = match response {
            serde_json::Value::Array(rows) if !rows.is_empty() => rows,
            serde_json::Value::Array(_) | serde_json::Value::Null => {
                return Err(FeedError::EmptyResponse)
            }
            other => return Err(FeedError::UnexpectedShape(json_kind(&other))),
        };

        let candles = rows
            .into_iter()
            .map(|row| {
                let raw: RawCandle = serde_json::from_value(row)?;
                Candle::try_from(raw)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(candles))
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Most recent candle
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.candles.iter().map(|c| c.close)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
