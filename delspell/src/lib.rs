/*! Spelling correction with the symmetric delete algorithm.

Every dictionary term is indexed under all strings reachable from it by
deleting up to *k* characters. A query generates the same deletions, so
finding the terms within edit distance *k* comes down to hash lookups
followed by an exact, bounded Levenshtein check of each candidate.

# Usage examples

```
use delspell::corrector::correct;
use delspell::index::{build_index, IndexConfig};
use delspell::speller::{lookup, Verbosity};

let build = build_index(
    vec![("hello", 100), ("help", 50), ("world", 10)],
    IndexConfig::default(),
)
.unwrap();
let index = build.index;

let suggestions = lookup(&index, "helo", 2, Verbosity::Top);
assert_eq!(suggestions[0].value(), "hello");

let correction = correct(&index, "helo wrold");
assert_eq!(correction.text, "hello world");
```

Dictionaries in the usual `term count` text format can be read with
[`dictionary::load_dictionary`]. The `delspell` command line tool in the
same repository shows the pieces wired together.
*/

#![warn(missing_docs)]
pub mod corrector;
pub mod dictionary;
pub mod distance;
pub mod index;
pub mod speller;
pub mod tokenizer;
pub mod types;

pub(crate) mod constants;

pub use crate::constants::{CORRECTION_MAX_EDIT_DISTANCE, DEFAULT_MAX_EDIT_DISTANCE};
