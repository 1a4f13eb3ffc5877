//! Correction of free text, token by token.
//!
//! Text is split on whitespace, every token is looked up by its normalized
//! key and replaced by the best suggestion when that differs from the key.
//! The output is always joined with single spaces.

use hashbrown::HashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::constants::CORRECTION_MAX_EDIT_DISTANCE;
use crate::index::DeletionIndex;
use crate::speller::{lookup, Verbosity};
use crate::tokenizer::case_handling::CaseMutation;
use crate::tokenizer::{normalize, split_affixes, Tokenize};
use crate::types::Distance;

/// Replacements made by a correction pass, keyed by the original surface
/// token. A token occurring several times is recorded once.
pub type CorrectionRecord = HashMap<String, SmolStr>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectorConfig {
    pub max_edit_distance: Distance,
    /// Keep the replaced token's punctuation and casing (`"Helo,"` becomes
    /// `"Hello,"`). When off, a replaced token becomes the bare dictionary term.
    pub preserve_surface: bool,
}

impl CorrectorConfig {
    pub const fn default() -> CorrectorConfig {
        CorrectorConfig {
            max_edit_distance: CORRECTION_MAX_EDIT_DISTANCE,
            preserve_surface: false,
        }
    }
}

/// Corrected text and the replacements that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// the corrected text, tokens joined by single spaces
    pub text: String,
    /// original surface token to replacement
    pub record: CorrectionRecord,
}

impl Correction {
    /// splits into the corrected text and the record
    pub fn into_parts(self) -> (String, CorrectionRecord) {
        (self.text, self.record)
    }

    /// whether no token was replaced
    pub fn is_unchanged(&self) -> bool {
        self.record.is_empty()
    }
}

/// Corrects `text` with the default [`CorrectorConfig`].
pub fn correct(index: &DeletionIndex, text: &str) -> Correction {
    correct_with_config(index, text, &CorrectorConfig::default())
}

pub fn correct_with_config(
    index: &DeletionIndex,
    text: &str,
    config: &CorrectorConfig,
) -> Correction {
    let mut record = CorrectionRecord::new();

    let text = text
        .tokens()
        .map(|token| match correct_token(index, token, config) {
            Some(replacement) => {
                let out = replacement.to_string();
                record.insert(token.to_string(), replacement);
                out
            }
            None => token.to_string(),
        })
        .join(" ");

    Correction { text, record }
}

/// The replacement for `token`, or `None` when it stays as it is.
fn correct_token(index: &DeletionIndex, token: &str, config: &CorrectorConfig) -> Option<SmolStr> {
    let key = normalize(token);
    if key.is_empty() {
        return None;
    }

    let best = lookup(index, &key, config.max_edit_distance, Verbosity::Top)
        .into_iter()
        .next()?;

    if best.value == key {
        return None;
    }

    if config.preserve_surface {
        Some(restore_surface(token, best.value()))
    } else {
        Some(best.value)
    }
}

fn restore_surface(token: &str, term: &str) -> SmolStr {
    let (prefix, core, suffix) = split_affixes(token);
    let term = CaseMutation::of(core).apply(term);

    let mut out = String::with_capacity(prefix.len() + term.len() + suffix.len());
    out.push_str(prefix);
    out.push_str(&term);
    out.push_str(suffix);
    SmolStr::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{build_index, IndexConfig};

    fn index() -> DeletionIndex {
        build_index(
            vec![("like", 90), ("world", 80), ("hello", 100)],
            IndexConfig::default(),
        )
        .unwrap()
        .index
    }

    fn record(pairs: &[(&str, &str)]) -> CorrectionRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), SmolStr::new(v)))
            .collect()
    }

    #[test]
    fn corrects_misspellings() {
        let (text, corrections) = correct(&index(), "I lik the wrold").into_parts();

        assert_eq!(text, "I like the world");
        assert_eq!(corrections, record(&[("lik", "like"), ("wrold", "world")]));
    }

    #[test]
    fn replacement_is_the_bare_term() {
        let correction = correct(&index(), "Helo, Wrold!");

        assert_eq!(correction.text, "hello world");
        assert_eq!(
            correction.record,
            record(&[("Helo,", "hello"), ("Wrold!", "world")])
        );
    }

    #[test]
    fn correct_tokens_keep_their_surface() {
        let correction = correct(&index(), "Hello, World!");

        assert_eq!(correction.text, "Hello, World!");
        assert!(correction.is_unchanged());
    }

    #[test]
    fn punctuation_passes_through() {
        let correction = correct(&index(), "hello -- world ...");

        assert_eq!(correction.text, "hello -- world ...");
        assert!(correction.record.is_empty());
    }

    #[test]
    fn whitespace_is_collapsed() {
        let correction = correct(&index(), "  lik\n\n\twrold  ");
        assert_eq!(correction.text, "like world");
        assert_eq!(correct(&index(), "").text, "");
        assert_eq!(correct(&index(), " \n ").text, "");
    }

    #[test]
    fn repeated_tokens_are_recorded_once() {
        let correction = correct(&index(), "lik lik LIK");

        assert_eq!(correction.text, "like like like");
        assert_eq!(correction.record, record(&[("lik", "like"), ("LIK", "like")]));
    }

    #[test]
    fn preserves_surface_when_asked() {
        let config = CorrectorConfig {
            preserve_surface: true,
            ..CorrectorConfig::default()
        };

        let correction = correct_with_config(&index(), "\"Helo, WROLD!\" i lik", &config);

        assert_eq!(correction.text, "\"Hello, WORLD!\" i like");
        assert_eq!(
            correction.record,
            record(&[("\"Helo,", "\"Hello,"), ("WROLD!\"", "WORLD!\""), ("lik", "like")])
        );
    }

    #[test]
    fn unknown_tokens_without_candidates_stay() {
        let correction = correct(&index(), "zzzzzz qqq");
        assert_eq!(correction.text, "zzzzzz qqq");
        assert!(correction.is_unchanged());
    }

    #[test]
    fn respects_distance() {
        let config = CorrectorConfig {
            max_edit_distance: 1,
            ..CorrectorConfig::default()
        };

        let correction = correct_with_config(&index(), "lik wrold", &config);
        assert_eq!(correction.text, "like wrold");
    }
}
