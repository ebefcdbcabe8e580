//! Configuration types for turbo-bot

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::risk::{RiskParams, StakePolicy, StopLimits};

/// Environment variable overriding `broker.email`
pub const EMAIL_ENV: &str = "BOT_EMAIL";
/// Environment variable overriding `broker.password`
pub const PASSWORD_ENV: &str = "BOT_PASSWORD";

/// Configuration errors, fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML or misses a required key
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A ceiling was negative
    #[error("{0} must not be negative, got {1}")]
    NegativeCeiling(&'static str, Decimal),
    /// A multiplier was not above 1
    #[error("{0} must be greater than 1, got {1}")]
    MultiplierTooSmall(&'static str, Decimal),
    /// A payout bound was negative
    #[error("{0} must not be negative, got {1}")]
    NegativePayout(&'static str, Decimal),
    /// Payout window is inverted
    #[error("min_payout ({min}) is above max_payout ({max})")]
    InvertedPayoutWindow { min: Decimal, max: Decimal },
    /// No assets configured
    #[error("risk.assets must list at least one instrument")]
    NoAssets,
    /// Retry policy allows no attempt
    #[error("feed.max_attempts must be at least 1")]
    NoAttempts,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub broker: BrokerConfig,
    pub trading: TradingConfig,
    pub risk: RiskConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub model: ModelConfig,
    pub telemetry: TelemetryConfig,
}

/// Broker account configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub account_type: AccountType,
}

/// Broker balance to trade against
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Practice,
    Real,
}

/// Decision loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TradingConfig {
    /// Candle size in seconds
    pub timeframe_secs: u64,
    /// Option expiry in minutes; defaults to one candle
    #[serde(default)]
    pub trade_duration_mins: Option<u64>,
    /// Pause between cycles
    #[serde(default = "default_loop_interval")]
    pub loop_interval_secs: u64,
    /// Candles requested per fetch
    #[serde(default = "default_candle_count")]
    pub candle_count: usize,
    /// Lowest acceptable payout
    pub min_payout: Decimal,
    /// Highest acceptable payout
    pub max_payout: Decimal,
    /// Minutes before a high-impact event during which trading pauses
    #[serde(default = "default_news_buffer")]
    pub news_buffer_minutes: u64,
}

fn default_loop_interval() -> u64 {
    5
}
fn default_candle_count() -> usize {
    100
}
fn default_news_buffer() -> u64 {
    60
}

impl TradingConfig {
    /// Expiry in minutes, one candle when unset
    pub fn trade_duration_mins(&self) -> u64 {
        self.trade_duration_mins
            .unwrap_or_else(|| (self.timeframe_secs / 60).max(1))
    }
}

/// Money-management strategy
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Flat,
    Martingale,
    Soros,
}

/// Risk management configuration, as written in the file
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    pub stop_loss_amount: Decimal,
    pub stop_loss_consecutive: u32,
    pub stop_win_amount: Decimal,
    pub stop_win_victories: u32,
    pub strategy: Strategy,
    pub martingale_factor: Decimal,
    pub soros_level: Decimal,
    pub use_martingale_if_high_chance: bool,
    pub use_soros_if_low_payout: bool,
    pub min_payout_for_soros: Decimal,
    pub assets: Vec<String>,
}

impl RiskConfig {
    /// Check ranges and build the parameters the risk manager runs on
    pub fn validate(&self) -> Result<RiskParams, ConfigError> {
        for (name, value) in [
            ("stop_loss_amount", self.stop_loss_amount),
            ("stop_win_amount", self.stop_win_amount),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigError::NegativeCeiling(name, value));
            }
        }

        for (name, value) in [
            ("martingale_factor", self.martingale_factor),
            ("soros_level", self.soros_level),
        ] {
            if value <= Decimal::ONE {
                return Err(ConfigError::MultiplierTooSmall(name, value));
            }
        }

        if self.min_payout_for_soros < Decimal::ZERO {
            return Err(ConfigError::NegativePayout(
                "min_payout_for_soros",
                self.min_payout_for_soros,
            ));
        }

        if self.assets.is_empty() {
            return Err(ConfigError::NoAssets);
        }

        Ok(RiskParams {
            limits: StopLimits {
                stop_loss_amount: self.stop_loss_amount,
                stop_loss_consecutive: self.stop_loss_consecutive,
                stop_win_amount: self.stop_win_amount,
                stop_win_victories: self.stop_win_victories,
            },
            policy: StakePolicy {
                strategy: self.strategy,
                martingale_factor: self.martingale_factor,
                soros_level: self.soros_level,
                use_martingale_if_high_chance: self.use_martingale_if_high_chance,
                use_soros_if_low_payout: self.use_soros_if_low_payout,
                min_payout_for_soros: self.min_payout_for_soros,
            },
            assets: self.assets.clone(),
        })
    }
}

/// Candle acquisition configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Attempts per fetch before giving up on the instrument
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed wait between attempts
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
}

fn default_max_attempts() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    1
}

impl FeedConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_secs: 1,
        }
    }
}

/// Classifier collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Append-only CSV of labeled trades
    #[serde(default = "default_training_log")]
    pub training_log: PathBuf,
}

fn default_training_log() -> PathBuf {
    PathBuf::from("trade_data.csv")
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            training_log: default_training_log(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl Config {
    /// Load configuration from a TOML file, applying environment overrides
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path`, falling back to `default` TOML only when the file does not exist
    ///
    /// A file that exists but fails to read or parse is an error.
    pub fn load_or_default(
        path: impl AsRef<std::path::Path>,
        default: &str,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!(
                    "Warning: {} not found, using default configuration",
                    path.display()
                );
                Self::from_toml(default)
            }
            other => other,
        }
    }

    /// Parse configuration from TOML text, applying environment overrides
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Replace broker credentials with `BOT_EMAIL` / `BOT_PASSWORD` when set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(email) = std::env::var(EMAIL_ENV) {
            self.broker.email = email;
        }
        if let Ok(password) = std::env::var(PASSWORD_ENV) {
            self.broker.password = password;
        }
    }

    /// Validate every section and return the risk parameters
    pub fn validate(&self) -> Result<RiskParams, ConfigError> {
        if self.trading.min_payout < Decimal::ZERO {
            return Err(ConfigError::NegativePayout(
                "min_payout",
                self.trading.min_payout,
            ));
        }
        if self.trading.min_payout > self.trading.max_payout {
            return Err(ConfigError::InvertedPayoutWindow {
                min: self.trading.min_payout,
                max: self.trading.max_payout,
            });
        }
        if self.feed.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        self.risk.validate()
    }
}
