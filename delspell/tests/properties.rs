use std::sync::Arc;
use std::thread;

use delspell::corrector::correct;
use delspell::index::{build_index, DeletionIndex, IndexConfig, IndexError};
use delspell::speller::{lookup, Verbosity};
use delspell::types::Frequency;

const WORDS: &[(&str, Frequency)] = &[
    ("the", 23135851162),
    ("of", 13151942776),
    ("and", 12997637966),
    ("to", 12136980858),
    ("a", 9081174698),
    ("in", 8469404971),
    ("for", 5933321709),
    ("is", 4705743816),
    ("on", 3750423199),
    ("that", 3400031103),
    ("by", 3350048871),
    ("this", 3228469771),
    ("with", 3183110675),
    ("i", 3086225277),
    ("you", 2996181025),
    ("it", 2813163874),
    ("not", 2633487141),
    ("or", 2590739907),
    ("be", 2398724162),
    ("are", 2393614870),
    ("like", 390251688),
    ("world", 401290210),
    ("word", 236523283),
    ("words", 174932488),
    ("hello", 24906614),
    ("help", 611538832),
    ("held", 60416183),
    ("spelling", 8329316),
    ("spell", 7817049),
    ("spells", 2353826),
    ("correction", 22587916),
    ("corrections", 10328226),
    ("collection", 94837622),
    ("tomorrow", 45187361),
    ("receive", 84427633),
    ("believe", 64546632),
    ("separate", 53938014),
];

const QUERIES: &[&str] = &[
    "teh", "wrold", "wrd", "helo", "hel", "lik", "speling", "spelll", "corection", "colection",
    "tommorow", "recieve", "beleive", "seperate", "x", "", "zzzzzzzzzz", "thsi", "wirh", "correctionss",
];

fn index() -> DeletionIndex {
    build_index(WORDS.iter().copied(), IndexConfig::default())
        .unwrap()
        .index
}

#[test]
fn every_term_finds_itself() {
    let index = index();

    for (term, frequency) in WORDS {
        for max_edits in 0..=2 {
            let suggestions = lookup(&index, term, max_edits, Verbosity::Closest);
            assert_eq!(suggestions.len(), 1, "{}", term);
            assert_eq!(suggestions[0].value(), *term);
            assert_eq!(suggestions[0].distance(), 0);
            assert_eq!(suggestions[0].frequency(), *frequency);
        }
    }
}

#[test]
fn suggestions_are_within_bound() {
    let index = index();

    for query in QUERIES {
        for max_edits in 0..=2 {
            for suggestion in lookup(&index, query, max_edits, Verbosity::All) {
                let reference = strsim::levenshtein(query, suggestion.value());
                assert_eq!(suggestion.distance(), reference, "{} -> {}", query, suggestion.value());
                assert!(reference <= max_edits);
            }
        }
    }
}

#[test]
fn lookup_is_complete() {
    let index = index();

    // An empty query has no lookup key and never yields suggestions.
    for query in QUERIES.iter().filter(|q| !q.is_empty()) {
        let found = lookup(&index, query, 2, Verbosity::All);

        for (term, _) in WORDS {
            let within = strsim::levenshtein(query, term) <= 2;
            let listed = found.iter().any(|s| s.value() == *term);
            assert_eq!(within, listed, "{} vs {}", query, term);
        }
    }
}

#[test]
fn candidates_grow_with_distance() {
    let index = index();

    for query in QUERIES {
        let mut previous: Vec<String> = vec![];

        for max_edits in 0..=2 {
            let current = lookup(&index, query, max_edits, Verbosity::All)
                .into_iter()
                .map(|s| s.value().to_string())
                .collect::<Vec<_>>();

            for term in previous.iter() {
                assert!(current.contains(term), "{} lost {} at {}", query, term, max_edits);
            }
            previous = current;
        }
    }
}

#[test]
fn results_are_ranked_and_deterministic() {
    let index = index();

    for query in QUERIES {
        let first = lookup(&index, query, 2, Verbosity::All);
        let second = lookup(&index, query, 2, Verbosity::All);
        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(first, sorted);
    }
}

#[test]
fn verbosity_modes_agree() {
    let index = index();

    for query in QUERIES {
        let all = lookup(&index, query, 2, Verbosity::All);
        let closest = lookup(&index, query, 2, Verbosity::Closest);
        let top = lookup(&index, query, 2, Verbosity::Top);

        assert_eq!(top.first(), all.first());
        assert!(top.len() <= 1);
        assert!(closest.iter().all(|s| Some(s.distance()) == all.first().map(|a| a.distance())));
        assert_eq!(closest[..], all[..closest.len()]);
    }
}

#[test]
fn helo_prefers_hello_over_help() {
    let index = build_index(
        vec![("hello", 100), ("help", 50), ("world", 10)],
        IndexConfig::default(),
    )
    .unwrap()
    .index;

    let top = lookup(&index, "helo", 2, Verbosity::Top);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].value(), "hello");
    assert_eq!(top[0].distance(), 1);
}

#[test]
fn corrects_sentence() {
    let index = build_index(vec![("like", 90), ("world", 80)], IndexConfig::default())
        .unwrap()
        .index;

    let (text, record) = correct(&index, "I lik the wrold").into_parts();
    assert_eq!(text, "I like the world");
    assert_eq!(record.len(), 2);
    assert_eq!(record.get("lik").map(|x| x.as_str()), Some("like"));
    assert_eq!(record.get("wrold").map(|x| x.as_str()), Some("world"));
}

#[test]
fn correction_is_idempotent() {
    let index = index();

    let text = "teh wrold is like a spelling corection";
    let once = correct(&index, text);
    assert_eq!(once.text, "the world is like a spelling correction");

    let twice = correct(&index, &once.text);
    assert_eq!(twice.text, once.text);
    assert!(twice.is_unchanged());
}

#[test]
fn empty_dictionary_fails() {
    let entries: Vec<(String, Frequency)> = vec![];
    assert_eq!(
        build_index(entries, IndexConfig::default()).unwrap_err(),
        IndexError::EmptyDictionary
    );
}

#[test]
fn shared_between_threads() {
    let index = Arc::new(index());

    let handles = QUERIES
        .iter()
        .map(|query| {
            let index = Arc::clone(&index);
            thread::spawn(move || lookup(&index, query, 2, Verbosity::All))
        })
        .collect::<Vec<_>>();

    for (query, handle) in QUERIES.iter().zip(handles) {
        assert_eq!(handle.join().unwrap(), lookup(&index, query, 2, Verbosity::All));
    }
}
