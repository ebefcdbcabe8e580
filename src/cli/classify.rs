//! Classify command implementation

use clap::Args;

use crate::signal::classify;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Number of agreeing signals
    pub count: usize,
}

impl ClassifyArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let strength = classify(self.count);
        let verdict = if strength.is_actionable() {
            "trade"
        } else {
            "skip"
        };
        println!("{} signals -> {} ({})", self.count, strength, verdict);
        Ok(())
    }
}
