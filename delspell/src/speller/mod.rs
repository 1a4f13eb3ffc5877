use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::worker::SpellerWorker;
use crate::constants::{DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_N_BEST};
use crate::index::DeletionIndex;
use crate::speller::suggestion::Suggestion;
use crate::tokenizer::normalize;
use crate::types::Distance;

pub mod suggestion;
mod worker;

/// How many of the ranked candidates a lookup returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// only the best candidate
    Top,
    /// every candidate at the smallest distance found
    Closest,
    /// every candidate within the maximum distance
    All,
}

/// Error returned when parsing an unknown [`Verbosity`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown verbosity {0:?} (expected top, closest or all)")]
pub struct ParseVerbosityError(String);

impl FromStr for Verbosity {
    type Err = ParseVerbosityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Verbosity::Top),
            "closest" => Ok(Verbosity::Closest),
            "all" => Ok(Verbosity::All),
            _ => Err(ParseVerbosityError(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellerConfig {
    pub max_edit_distance: Distance,
    pub verbosity: Verbosity,
    pub n_best: Option<usize>,
}

impl SpellerConfig {
    pub const fn default() -> SpellerConfig {
        SpellerConfig {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            verbosity: Verbosity::Closest,
            n_best: Some(DEFAULT_N_BEST),
        }
    }
}

pub trait Speller {
    fn is_correct(&self, word: &str) -> bool;
    fn suggest(&self, word: &str) -> Vec<Suggestion>;
    fn suggest_with_config(&self, word: &str, config: &SpellerConfig) -> Vec<Suggestion>;
}

impl Speller for DeletionIndex {
    /// A word is correct when its normalized form is a dictionary term. Words
    /// without any alphanumeric character are always correct.
    fn is_correct(&self, word: &str) -> bool {
        let word = normalize(word);
        word.is_empty() || self.contains(&word)
    }

    #[inline]
    fn suggest(&self, word: &str) -> Vec<Suggestion> {
        self.suggest_with_config(word, &SpellerConfig::default())
    }

    fn suggest_with_config(&self, word: &str, config: &SpellerConfig) -> Vec<Suggestion> {
        let mut suggestions = lookup(self, word, config.max_edit_distance, config.verbosity);

        if let Some(n_best) = config.n_best {
            suggestions.truncate(n_best);
        }

        suggestions
    }
}

/// Ranked dictionary terms within `max_edits` of `query`.
///
/// The query is normalized like dictionary terms are. Candidates are ordered
/// by distance, then descending frequency, then term; `verbosity` decides how
/// many are kept. An empty result means there is no suggestion.
///
/// `max_edits` above the index's build-time distance is lowered to it.
pub fn lookup(
    index: &DeletionIndex,
    query: &str,
    max_edits: Distance,
    verbosity: Verbosity,
) -> Vec<Suggestion> {
    SpellerWorker::new(index, query, max_edits, verbosity).suggest()
}
