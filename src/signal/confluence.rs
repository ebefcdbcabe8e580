//! Confluence scoring

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry strength, ordered weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStrength {
    None,
    Weak,
    Medium,
    Strong,
}

impl EntryStrength {
    /// Whether a stake should be requested at all
    pub fn is_actionable(self) -> bool {
        self >= EntryStrength::Medium
    }

    /// Whether the entry counts as high chance for stake escalation
    pub fn is_high_chance(self) -> bool {
        self > EntryStrength::Weak
    }
}

impl fmt::Display for EntryStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryStrength::None => "none",
            EntryStrength::Weak => "weak",
            EntryStrength::Medium => "medium",
            EntryStrength::Strong => "strong",
        };
        f.write_str(label)
    }
}

/// Map a confluence count to an entry strength
pub fn classify(signal_count: usize) -> EntryStrength {
    match signal_count {
        7.. => EntryStrength::Strong,
        5..=6 => EntryStrength::Medium,
        3..=4 => EntryStrength::Weak,
        _ => EntryStrength::None,
    }
}
