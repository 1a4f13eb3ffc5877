//! Bounded Levenshtein distance.
//!
//! Candidates gathered through shared deletion keys are only *likely* matches,
//! every one of them is confirmed here before it is returned. The computation
//! gives up as soon as the distance is known to exceed the bound.

use std::cmp::min;
use std::mem;

use crate::types::Distance;

/// Levenshtein distance between `a` and `b` (insertions, deletions and
/// substitutions, no transpositions), or `None` if it is greater than `max`.
///
/// Exact for every distance up to and including `max`. Strings are compared
/// by Unicode scalar value; an empty string is at the length of the other.
pub fn distance(a: &str, b: &str, max: Distance) -> Option<Distance> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    bounded_levenshtein(&a, &b, max)
}

pub(crate) fn bounded_levenshtein(a: &[char], b: &[char], max: Distance) -> Option<Distance> {
    // Keep the shorter string in the inner loop.
    let (a, b) = if a.len() < b.len() { (b, a) } else { (a, b) };

    if a.len() - b.len() > max {
        return None;
    }

    if b.is_empty() {
        return Some(a.len());
    }

    let mut prev_row: Vec<Distance> = (0..=b.len()).collect();
    let mut curr_row: Vec<Distance> = vec![0; b.len() + 1];

    for (i, a_char) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut row_min = curr_row[0];

        for (j, b_char) in b.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = min(
                min(
                    prev_row[j + 1] + 1, // deletion
                    curr_row[j] + 1,     // insertion
                ),
                prev_row[j] + cost, // substitution
            );
            row_min = min(row_min, curr_row[j + 1]);
        }

        // Values never decrease going down the matrix.
        if row_min > max {
            return None;
        }

        mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[b.len()];
    if distance <= max {
        Some(distance)
    } else {
        None
    }
}
