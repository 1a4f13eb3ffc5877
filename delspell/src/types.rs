//! Scalar types shared across the index, speller and corrector.

/// Occurrence count of a dictionary term. Higher counts rank first at equal distance.
pub type Frequency = u64;

/// Levenshtein edit distance, counted in Unicode scalar values.
pub type Distance = usize;
