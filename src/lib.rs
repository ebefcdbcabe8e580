//! turbo-bot: Short-duration binary options bot
//!
//! This library provides the core components for:
//! - Per-instrument stake progression (flat, martingale, soros)
//! - Stop-loss and stop-win ceilings
//! - Candle acquisition with bounded retries
//! - Signal confluence scoring
//! - The decision loop tying broker, feed and classifier together
//! - Training data capture to CSV

pub mod cli;
pub mod config;
pub mod data;
pub mod engine;
pub mod execution;
pub mod feed;
pub mod model;
pub mod risk;
pub mod signal;
pub mod telemetry;
