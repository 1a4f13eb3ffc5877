//! Whitespace tokenization and lookup-key normalization.
//!
//! The same [`normalize`] function produces dictionary terms at index build
//! time and lookup keys at query time, so both sides derive their deletion
//! keys from identically shaped strings.

use smol_str::SmolStr;

pub mod case_handling;

/// Strips every non-alphanumeric character and lowercases the rest.
///
/// Returns an empty string for tokens made only of punctuation or symbols.
pub fn normalize(token: &str) -> SmolStr {
    token
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Splits a token into its leading punctuation, its core and its trailing
/// punctuation. The core runs from the first to the last alphanumeric
/// character and may itself contain punctuation (`"don't"`).
///
/// A token without any alphanumeric character is returned whole as the prefix.
pub fn split_affixes(token: &str) -> (&str, &str, &str) {
    let start = match token.find(char::is_alphanumeric) {
        Some(i) => i,
        None => return (token, "", ""),
    };

    let end = token
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_alphanumeric())
        .map(|(i, ch)| i + ch.len_utf8())
        .unwrap_or(token.len());

    (&token[..start], &token[start..end], &token[end..])
}

/// Iterator over whitespace-delimited tokens and their byte offsets.
#[derive(Debug, Clone)]
pub struct TokenIndices<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> TokenIndices<'a> {
    fn new(source: &'a str) -> TokenIndices<'a> {
        TokenIndices { source, offset: 0 }
    }
}

impl<'a> Iterator for TokenIndices<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.source[self.offset..];
        let start = self.offset + rest.find(|ch: char| !ch.is_whitespace())?;
        let end = self.source[start..]
            .find(char::is_whitespace)
            .map(|i| start + i)
            .unwrap_or(self.source.len());

        self.offset = end;
        Some((start, &self.source[start..end]))
    }
}

/// Whitespace tokenization that keeps each token's surface form intact,
/// punctuation included.
pub trait Tokenize {
    /// Tokens with the byte offset they start at.
    fn token_indices(&self) -> TokenIndices<'_>;

    /// Tokens only.
    fn tokens(&self) -> std::str::SplitWhitespace<'_>;
}

impl Tokenize for str {
    fn token_indices(&self) -> TokenIndices<'_> {
        TokenIndices::new(self)
    }

    fn tokens(&self) -> std::str::SplitWhitespace<'_> {
        self.split_whitespace()
    }
}
