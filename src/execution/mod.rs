//! Execution module
//!
//! Order submission and settlement against the broker

mod paper;
mod types;

pub use paper::PaperBroker;
pub use types::{Fill, OrderId, OrderRequest, OrderStatus};

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Trait for broker implementations
#[async_trait]
pub trait Broker: Send + Sync {
    /// Current turbo payout per instrument, as a fraction of the stake
    async fn payouts(&self) -> anyhow::Result<HashMap<String, Decimal>>;
    /// Submit an order
    async fn buy(&self, order: &OrderRequest) -> anyhow::Result<OrderStatus>;
    /// Wait for an order to settle and report whether it won
    async fn check_win(&self, id: OrderId) -> anyhow::Result<bool>;
}
