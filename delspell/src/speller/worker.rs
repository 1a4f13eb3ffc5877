use hashbrown::HashSet;
use smol_str::SmolStr;

use super::Verbosity;
use crate::distance::bounded_levenshtein;
use crate::index::{generate_deletions, DeletionIndex};
use crate::speller::suggestion::Suggestion;
use crate::tokenizer::normalize;
use crate::types::Distance;

pub(crate) struct SpellerWorker<'a> {
    index: &'a DeletionIndex,
    input: SmolStr,
    max_edits: Distance,
    verbosity: Verbosity,
}

impl<'a> SpellerWorker<'a> {
    #[inline(always)]
    pub(crate) fn new(
        index: &'a DeletionIndex,
        query: &str,
        max_edits: Distance,
        verbosity: Verbosity,
    ) -> SpellerWorker<'a> {
        let max_edits = if max_edits > index.max_edit_distance() {
            log::debug!(
                "max edit distance {} lowered to the index's {}",
                max_edits,
                index.max_edit_distance()
            );
            index.max_edit_distance()
        } else {
            max_edits
        };

        SpellerWorker {
            index,
            input: normalize(query),
            max_edits,
            verbosity,
        }
    }

    pub(crate) fn suggest(&self) -> Vec<Suggestion> {
        log::trace!("Beginning suggest for {:?}", self.input);

        if self.input.is_empty() {
            return vec![];
        }

        let input = self.input.chars().collect::<Vec<_>>();

        // Nothing in the index can be within reach of a query this long.
        if input.len() > self.index.max_term_length().saturating_add(self.max_edits) {
            log::trace!(
                "query of length {} exceeds longest term {} + {}",
                input.len(),
                self.index.max_term_length(),
                self.max_edits
            );
            return vec![];
        }

        let mut suggestions = self.collect_candidates(&input);
        suggestions.sort();

        match self.verbosity {
            Verbosity::Top => suggestions.truncate(1),
            Verbosity::Closest => {
                if let Some(best) = suggestions.first().map(Suggestion::distance) {
                    suggestions.retain(|x| x.distance == best);
                }
            }
            Verbosity::All => {}
        }

        log::trace!("{} suggestions for {:?}", suggestions.len(), self.input);
        suggestions
    }

    /// Terms sharing a deletion key with the input, each verified against the
    /// distance bound exactly once.
    fn collect_candidates(&self, input: &[char]) -> Vec<Suggestion> {
        let mut seen: HashSet<&'a str> = HashSet::new();
        let mut suggestions = vec![];

        for key in generate_deletions(&self.input, self.max_edits) {
            for term in self.index.terms_for(&key) {
                if !seen.insert(term.as_str()) {
                    continue;
                }

                let term_chars = term.chars().collect::<Vec<_>>();
                let distance = match bounded_levenshtein(input, &term_chars, self.max_edits) {
                    Some(v) => v,
                    None => continue,
                };

                if let Some(frequency) = self.index.frequency(term) {
                    suggestions.push(Suggestion::new(term.clone(), distance, frequency));
                }
            }
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::super::lookup;
    use super::*;
    use crate::index::{build_index, IndexConfig};

    fn index() -> DeletionIndex {
        build_index(
            vec![("hello", 100), ("help", 50), ("world", 10)],
            IndexConfig::default(),
        )
        .unwrap()
        .index
    }

    fn values(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(Suggestion::value).collect()
    }

    #[test]
    fn top() {
        let suggestions = lookup(&index(), "helo", 2, Verbosity::Top);
        assert_eq!(suggestions, vec![Suggestion::new("hello".into(), 1, 100)]);
    }

    #[test]
    fn closest() {
        let suggestions = lookup(&index(), "helo", 2, Verbosity::Closest);
        assert_eq!(
            suggestions,
            vec![
                Suggestion::new("hello".into(), 1, 100),
                Suggestion::new("help".into(), 1, 50),
            ]
        );
    }

    #[test]
    fn all() {
        let suggestions = lookup(&index(), "hell", 2, Verbosity::All);
        assert_eq!(values(&suggestions), vec!["hello", "help"]);
        assert_eq!(suggestions[0].distance, 1);
        assert_eq!(suggestions[1].distance, 1);

        let suggestions = lookup(&index(), "wold", 2, Verbosity::All);
        assert_eq!(values(&suggestions), vec!["world"]);
    }

    #[test]
    fn known_term_is_distance_zero() {
        for verbosity in [Verbosity::Top, Verbosity::Closest] {
            assert_eq!(
                lookup(&index(), "help", 2, verbosity),
                vec![Suggestion::new("help".into(), 0, 50)]
            );
        }

        let all = lookup(&index(), "help", 2, Verbosity::All);
        assert_eq!(all[0], Suggestion::new("help".into(), 0, 50));
        assert_eq!(values(&all), vec!["help", "hello"]);
    }

    #[test]
    fn query_is_normalized() {
        assert_eq!(
            values(&lookup(&index(), "\"Helo!\"", 2, Verbosity::Top)),
            vec!["hello"]
        );
    }

    #[test]
    fn no_candidates() {
        assert!(lookup(&index(), "xyzzy", 2, Verbosity::All).is_empty());
        assert!(lookup(&index(), "", 2, Verbosity::All).is_empty());
        assert!(lookup(&index(), "?!", 2, Verbosity::All).is_empty());
    }

    #[test]
    fn zero_edits_only_finds_exact_terms() {
        assert!(lookup(&index(), "helo", 0, Verbosity::All).is_empty());
        assert_eq!(values(&lookup(&index(), "world", 0, Verbosity::All)), vec!["world"]);
    }

    #[test]
    fn tie_break_is_lexical() {
        let index = build_index(
            vec![("cart", 5), ("care", 5), ("card", 5)],
            IndexConfig::default(),
        )
        .unwrap()
        .index;

        assert_eq!(
            values(&lookup(&index, "carx", 1, Verbosity::Closest)),
            vec!["card", "care", "cart"]
        );
        assert_eq!(values(&lookup(&index, "carx", 1, Verbosity::Top)), vec!["card"]);
    }

    #[test]
    fn distance_is_clamped_to_index() {
        let index = build_index(vec![("hello", 1)], IndexConfig { max_edit_distance: 1 })
            .unwrap()
            .index;

        assert!(lookup(&index, "hlo", 3, Verbosity::All).is_empty());
        assert_eq!(values(&lookup(&index, "helo", 3, Verbosity::All)), vec!["hello"]);
    }

    #[test]
    fn long_queries_short_circuit() {
        let query = "hellohellohellohello";
        assert!(lookup(&index(), query, 2, Verbosity::All).is_empty());
        // Within the length window the query is still looked up normally.
        assert_eq!(values(&lookup(&index(), "helloxx", 2, Verbosity::All)), vec!["hello"]);
    }

    #[test]
    fn unbounded_depth_does_not_overflow() {
        let index = build_index(
            vec![("hello", 1)],
            IndexConfig {
                max_edit_distance: usize::MAX,
            },
        )
        .unwrap()
        .index;

        assert_eq!(
            values(&lookup(&index, "helo", usize::MAX, Verbosity::All)),
            vec!["hello"]
        );
    }
}
