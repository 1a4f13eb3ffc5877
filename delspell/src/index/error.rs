//! Error types for dictionary index construction.

/// Errors that can occur while building a [`DeletionIndex`](super::DeletionIndex).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum IndexError {
    /// No entries were supplied to the build
    #[error("Dictionary has no entries")]
    EmptyDictionary,

    /// A term normalized to the empty string; the entry is skipped, not fatal
    #[error("Term {term:?} is empty after normalization")]
    InvalidTerm {
        /// the term as it was supplied
        term: String,
    },
}
