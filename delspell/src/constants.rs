use crate::types::Distance;

/// Deletion depth used when no [`IndexConfig`](crate::index::IndexConfig) is given.
pub const DEFAULT_MAX_EDIT_DISTANCE: Distance = 2;

/// Edit distance the token correction pass looks up with.
pub const CORRECTION_MAX_EDIT_DISTANCE: Distance = 2;

/// Number of suggestions kept by the default speller config.
pub const DEFAULT_N_BEST: usize = 10;
