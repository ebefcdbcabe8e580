//! Telemetry module
//!
//! Structured logging for the trading loop

mod logging;

pub use logging::init_logging;

use crate::config::TelemetryConfig;

/// Held for the lifetime of the process
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize logging from the telemetry section
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level, config.log_format)?;
    Ok(TelemetryGuard { _priv: () })
}
