//! Deletion-variant generation shared by index construction and lookup.

use hashbrown::HashSet;
use smol_str::SmolStr;

use crate::types::Distance;

/// Every distinct string reachable from `term` by deleting between zero and
/// `max_edits` characters, `term` itself included.
///
/// Expansion is breadth-first, one deletion per round. A variant reached by
/// several deletion paths is stored and expanded once: all paths to a variant
/// have the same length, so expanding it a second time cannot add anything.
/// Terms shorter than `max_edits` bottom out at the empty string.
pub fn generate_deletions(term: &str, max_edits: Distance) -> HashSet<SmolStr> {
    let mut deletions = HashSet::new();
    let mut frontier = vec![SmolStr::new(term)];
    deletions.insert(SmolStr::new(term));

    for _ in 0..max_edits {
        let mut next = Vec::new();

        for edit in frontier.iter() {
            for (i, ch) in edit.char_indices() {
                let end = i + ch.len_utf8();
                let mut variant = String::with_capacity(edit.len() - ch.len_utf8());
                variant.push_str(&edit[..i]);
                variant.push_str(&edit[end..]);

                let variant = SmolStr::from(variant);
                if deletions.insert(variant.clone()) {
                    next.push(variant);
                }
            }
        }

        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    deletions
}
