//! The symmetric-delete dictionary index.
//!
//! Every dictionary term is stored under each of its deletion variants (up to
//! the configured edit distance), so a lookup only has to generate the same
//! variants for the query and read the terms filed under them.

use std::cmp::max;

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::constants::DEFAULT_MAX_EDIT_DISTANCE;
use crate::tokenizer::normalize;
use crate::types::{Distance, Frequency};

pub mod deletes;
pub mod error;

pub use self::deletes::generate_deletions;
pub use self::error::IndexError;

/// Parameters fixed at index build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// how many deletions are precomputed per term; lookups cannot go deeper
    pub max_edit_distance: Distance,
}

impl IndexConfig {
    /// Index config with [`DEFAULT_MAX_EDIT_DISTANCE`].
    pub const fn default() -> IndexConfig {
        IndexConfig {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
        }
    }
}

/// A dictionary term and its frequency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// the term
    pub term: SmolStr,
    /// occurrence count of the term
    pub frequency: Frequency,
}

impl DictionaryEntry {
    /// creates a dictionary entry
    pub fn new(term: impl Into<SmolStr>, frequency: Frequency) -> DictionaryEntry {
        DictionaryEntry {
            term: term.into(),
            frequency,
        }
    }

    /// splits the entry into the `(term, frequency)` pair [`build_index`] takes
    pub fn into_pair(self) -> (SmolStr, Frequency) {
        (self.term, self.frequency)
    }
}

/// An input entry that did not make it into the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    /// zero-based position of the entry in the input sequence
    pub position: usize,
    /// why it was skipped
    pub error: IndexError,
}

/// Aggregate outcome of an index build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// number of entries read from the input
    pub entries: usize,
    /// number of distinct terms in the index
    pub indexed: usize,
    /// entries whose normalized term was already present
    pub duplicates: usize,
    /// entries that were skipped
    pub skipped: Vec<SkippedEntry>,
}

impl BuildReport {
    /// number of skipped entries
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// A built index together with the report of its build.
#[derive(Debug)]
pub struct IndexBuild {
    /// the usable index
    pub index: DeletionIndex,
    /// what happened to the input entries
    pub report: BuildReport,
}

/// Immutable symmetric-delete index over a term/frequency dictionary.
///
/// Read-only once built, so it can be shared between threads by reference or
/// behind an `Arc` without any locking.
#[derive(Debug)]
pub struct DeletionIndex {
    /// Deletion key to the terms it was derived from. Each term appears at
    /// most once per key.
    deletes: HashMap<SmolStr, Vec<SmolStr>>,
    words: HashMap<SmolStr, Frequency>,
    max_edit_distance: Distance,
    max_term_length: usize,
}

impl DeletionIndex {
    /// whether `term` (already normalized) is a dictionary term
    pub fn contains(&self, term: &str) -> bool {
        self.words.contains_key(term)
    }

    /// frequency of `term` (already normalized), if it is a dictionary term
    pub fn frequency(&self, term: &str) -> Option<Frequency> {
        self.words.get(term).copied()
    }

    /// number of distinct terms
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// whether the index holds no terms at all
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// number of distinct deletion keys
    pub fn deletion_key_count(&self) -> usize {
        self.deletes.len()
    }

    /// the deletion depth the index was built with
    pub fn max_edit_distance(&self) -> Distance {
        self.max_edit_distance
    }

    /// length in characters of the longest term
    pub fn max_term_length(&self) -> usize {
        self.max_term_length
    }

    /// iterates all terms with their frequencies, in no particular order
    pub fn entries(&self) -> impl Iterator<Item = DictionaryEntry> + '_ {
        self.words
            .iter()
            .map(|(term, frequency)| DictionaryEntry::new(term.clone(), *frequency))
    }

    pub(crate) fn terms_for(&self, key: &str) -> &[SmolStr] {
        self.deletes.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Builds a [`DeletionIndex`] one entry at a time.
pub struct IndexBuilder {
    config: IndexConfig,
    deletes: HashMap<SmolStr, Vec<SmolStr>>,
    words: HashMap<SmolStr, Frequency>,
    max_term_length: usize,
    report: BuildReport,
}

impl IndexBuilder {
    /// creates an empty builder
    pub fn new(config: IndexConfig) -> IndexBuilder {
        IndexBuilder {
            config,
            deletes: HashMap::new(),
            words: HashMap::new(),
            max_term_length: 0,
            report: BuildReport::default(),
        }
    }

    /// Adds one entry. The term is normalized first; a term that normalizes
    /// to nothing is recorded in the report and returned as
    /// [`IndexError::InvalidTerm`], the builder stays usable.
    ///
    /// A term seen before keeps the larger of the two frequencies.
    pub fn add_entry(&mut self, term: &str, frequency: Frequency) -> Result<(), IndexError> {
        let position = self.report.entries;
        self.report.entries += 1;

        let normalized = normalize(term);
        if normalized.is_empty() {
            let error = IndexError::InvalidTerm {
                term: term.to_string(),
            };
            log::debug!("skipping entry {}: {}", position, error);
            self.report.skipped.push(SkippedEntry {
                position,
                error: error.clone(),
            });
            return Err(error);
        }

        match self.words.entry(normalized.clone()) {
            Entry::Occupied(mut entry) => {
                self.report.duplicates += 1;
                if frequency > *entry.get() {
                    entry.insert(frequency);
                }
                return Ok(());
            }
            Entry::Vacant(entry) => {
                entry.insert(frequency);
            }
        }

        self.max_term_length = max(self.max_term_length, normalized.chars().count());

        for key in generate_deletions(&normalized, self.config.max_edit_distance) {
            self.deletes.entry(key).or_default().push(normalized.clone());
        }

        Ok(())
    }

    /// Finishes the build. Fails with [`IndexError::EmptyDictionary`] if no
    /// entry was ever added.
    pub fn finish(self) -> Result<IndexBuild, IndexError> {
        let IndexBuilder {
            config,
            deletes,
            words,
            max_term_length,
            mut report,
        } = self;

        if report.entries == 0 {
            return Err(IndexError::EmptyDictionary);
        }

        report.indexed = words.len();

        log::info!(
            "indexed {} terms under {} deletion keys ({} entries, {} duplicates, {} skipped)",
            report.indexed,
            deletes.len(),
            report.entries,
            report.duplicates,
            report.skipped_count()
        );

        let index = DeletionIndex {
            deletes,
            words,
            max_edit_distance: config.max_edit_distance,
            max_term_length,
        };

        Ok(IndexBuild { index, report })
    }
}

/// Builds an index from an ordered sequence of `(term, frequency)` pairs.
///
/// Entries whose term normalizes to nothing are skipped and listed in the
/// returned [`BuildReport`]; only an empty input fails the build.
pub fn build_index<I, S>(entries: I, config: IndexConfig) -> Result<IndexBuild, IndexError>
where
    I: IntoIterator<Item = (S, Frequency)>,
    S: AsRef<str>,
{
    let mut builder = IndexBuilder::new(config);

    for (term, frequency) in entries {
        // Invalid terms are already recorded in the builder's report.
        let _ = builder.add_entry(term.as_ref(), frequency);
    }

    builder.finish()
}
