//! Data persistence module
//!
//! Labeled trade records for offline classifier training

mod training_log;

pub use training_log::{TrainingLog, TrainingLogError, TrainingRecord, TRAINING_COLUMNS};
