//! Append-only CSV of labeled trades

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::FeatureVector;
use crate::risk::TradeOutcome;

/// Column order of every row; never reorder, the file is appended across runs
pub const TRAINING_COLUMNS: [&str; 12] = [
    "pattern_name",
    "breakout",
    "trend",
    "volume_ratio",
    "payout",
    "ema_cross",
    "rsi7",
    "macd_hist",
    "adx14",
    "atr14",
    "timestamp",
    "result",
];

/// Training log errors
#[derive(Debug, Error)]
pub enum TrainingLogError {
    #[error("Failed to write training log {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One labeled trade
#[derive(Debug, Clone)]
pub struct TrainingRecord {
    pub features: FeatureVector,
    pub timestamp: DateTime<Utc>,
    pub outcome: TradeOutcome,
}

impl TrainingRecord {
    pub fn new(features: FeatureVector, outcome: TradeOutcome) -> Self {
        Self {
            features,
            timestamp: Utc::now(),
            outcome,
        }
    }

    /// Integer label, 1 for a win
    pub fn result(&self) -> u8 {
        u8::from(self.outcome.is_win())
    }

    /// CSV line in [`TRAINING_COLUMNS`] order, without the newline
    pub fn csv_row(&self) -> String {
        let f = &self.features;
        let fields = [
            escape(&f.pattern_name),
            escape(&f.breakout),
            f.trend.as_str().to_string(),
            f.volume_ratio.to_string(),
            f.payout.to_string(),
            if f.ema_cross { "True" } else { "False" }.to_string(),
            f.rsi7.to_string(),
            f.macd_hist.to_string(),
            f.adx14.to_string(),
            f.atr14.to_string(),
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
            self.result().to_string(),
        ];
        fields.join(",")
    }
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Append-only training data file
#[derive(Debug, Clone)]
pub struct TrainingLog {
    path: PathBuf,
}

impl TrainingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header first if the file is new or empty
    pub fn append(&self, record: &TrainingRecord) -> Result<(), TrainingLogError> {
        let io_err = |source| TrainingLogError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;

        let mut buf = String::new();
        if file.metadata().map_err(io_err)?.len() == 0 {
            buf.push_str(&TRAINING_COLUMNS.join(","));
            buf.push('\n');
        }
        buf.push_str(&record.csv_row());
        buf.push('\n');

        file.write_all(buf.as_bytes()).map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), result = record.result(), "Training record appended");
        Ok(())
    }
}
