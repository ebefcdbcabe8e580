//! Risk management module
//!
//! Stop conditions, stake escalation, and the per-instrument stake state machine

mod limits;
mod manager;
mod sizing;
mod state;
mod types;

pub use limits::{StopLimits, StopReason};
pub use manager::StakeRiskManager;
pub use sizing::StakePolicy;
pub use state::{InstrumentRiskState, Settlement};
pub use types::{RiskError, RiskParams, TradeOutcome, BASE_STAKE};
