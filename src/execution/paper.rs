//! Paper trading broker

use super::{Broker, Fill, OrderId, OrderRequest, OrderStatus};
use crate::risk::TradeOutcome;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct PaperBook {
    outcomes: VecDeque<bool>,
    pending: HashMap<OrderId, OrderRequest>,
    fills: Vec<Fill>,
}

/// Broker without a venue
///
/// Payouts are fixed, outcomes come from a scripted queue and settle as losses
/// once the queue runs dry.
pub struct PaperBroker {
    payouts: HashMap<String, Decimal>,
    closed: HashSet<String>,
    book: Arc<RwLock<PaperBook>>,
}

impl PaperBroker {
    /// Create a paper broker quoting `payouts`
    pub fn new(payouts: HashMap<String, Decimal>) -> Self {
        Self {
            payouts,
            closed: HashSet::new(),
            book: Arc::new(RwLock::new(PaperBook::default())),
        }
    }

    /// Queue settlement outcomes, consumed in order
    pub fn with_outcomes(self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        if let Ok(mut book) = self.book.try_write() {
            book.outcomes.extend(outcomes);
        }
        self
    }

    /// Refuse every order on `instrument`
    pub fn with_closed_market(mut self, instrument: impl Into<String>) -> Self {
        self.closed.insert(instrument.into());
        self
    }

    /// Get all settled orders
    pub async fn fills(&self) -> Vec<Fill> {
        self.book.read().await.fills.clone()
    }
}

#[async_trait]
impl Broker for PaperBroker {
    async fn payouts(&self) -> anyhow::Result<HashMap<String, Decimal>> {
        Ok(self.payouts.clone())
    }

    async fn buy(&self, order: &OrderRequest) -> anyhow::Result<OrderStatus> {
        if self.closed.contains(&order.instrument) {
            tracing::info!(instrument = %order.instrument, "Paper order rejected, market closed");
            return Ok(OrderStatus::Rejected("market closed".to_string()));
        }

        let order_id = OrderId::new_v4();
        self.book
            .write()
            .await
            .pending
            .insert(order_id, order.clone());

        tracing::info!(?order_id, instrument = %order.instrument, amount = %order.amount, "Paper order accepted");
        Ok(OrderStatus::Accepted(order_id))
    }

    async fn check_win(&self, id: OrderId) -> anyhow::Result<bool> {
        let mut book = self.book.write().await;
        let request = book
            .pending
            .remove(&id)
            .ok_or_else(|| anyhow::anyhow!("Unknown paper order {id}"))?;

        let won = book.outcomes.pop_front().unwrap_or(false);
        book.fills.push(Fill {
            order_id: id,
            request,
            outcome: TradeOutcome::from(won),
            timestamp: Utc::now(),
        });

        Ok(won)
    }
}
