//! Classifier module
//!
//! The learned model is an external capability: it sees a feature vector and
//! answers whether the entry is high chance. Training happens elsewhere from
//! the rows written by [`crate::data::TrainingLog`].

mod features;

pub use features::{FeatureVector, NO_BREAKOUT, NO_PATTERN};

/// Trait for high-chance classifiers
pub trait HighChanceClassifier: Send + Sync {
    /// Whether the entry described by `features` is high chance
    fn predict(&self, features: &FeatureVector) -> bool;
}

/// Classifier used before any model is available; lets every entry through
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveClassifier;

impl HighChanceClassifier for PermissiveClassifier {
    fn predict(&self, _features: &FeatureVector) -> bool {
        true
    }
}

impl<F> HighChanceClassifier for F
where
    F: Fn(&FeatureVector) -> bool + Send + Sync,
{
    fn predict(&self, features: &FeatureVector) -> bool {
        self(features)
    }
}
