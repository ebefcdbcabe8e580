//! Execution types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::risk::TradeOutcome;
use crate::signal::Direction;

/// Order identifier
pub type OrderId = Uuid;

/// A turbo-option order to be submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Instrument identifier
    pub instrument: String,
    /// Call or put
    pub direction: Direction,
    /// Stake
    pub amount: Decimal,
    /// Expiry in minutes
    pub duration_mins: u64,
}

/// Broker answer to an order submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order accepted and running
    Accepted(OrderId),
    /// Broker refused the order
    Rejected(String),
}

/// A settled order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    /// Order ID
    pub order_id: OrderId,
    /// Original request
    pub request: OrderRequest,
    /// Settlement outcome
    pub outcome: TradeOutcome,
    /// Settlement timestamp
    pub timestamp: DateTime<Utc>,
}
