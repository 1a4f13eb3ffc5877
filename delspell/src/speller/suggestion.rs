//! Suggestion for a spelling correction.
use crate::types::{Distance, Frequency};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Suggestion for a spelling correction
pub struct Suggestion {
    /// the suggested dictionary term
    pub value: SmolStr,
    /// edit distance between the query and the term
    pub distance: Distance,
    /// dictionary frequency of the term
    pub frequency: Frequency,
}

impl Suggestion {
    /// creates a spelling correction suggestion
    pub fn new(value: SmolStr, distance: Distance, frequency: Frequency) -> Suggestion {
        Suggestion {
            value,
            distance,
            frequency,
        }
    }

    /// gets the suggested term
    pub fn value(&self) -> &str {
        &self.value
    }

    /// gets the edit distance to the query
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// gets the dictionary frequency
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best first: closer, then more frequent, then lexically smaller.
impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.frequency.cmp(&self.frequency))
            .then_with(|| self.value.cmp(&other.value))
    }
}
