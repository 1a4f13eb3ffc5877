//! Casing helpers used to carry a token's capitalization over to its
//! replacement when surface preservation is enabled.

use smol_str::SmolStr;

#[inline(always)]
pub fn upper_case(s: &str) -> SmolStr {
    s.chars().flat_map(char::to_uppercase).collect::<SmolStr>()
}

#[inline(always)]
pub fn upper_first(s: &str) -> SmolStr {
    let mut c = s.chars();
    match c.next() {
        None => SmolStr::new(""),
        Some(f) => SmolStr::from(f.to_uppercase().collect::<String>() + c.as_str()),
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Case {
    Upper,
    Lower,
    Neither,
}

impl Case {
    #[inline(always)]
    fn new(ch: char) -> Case {
        if ch.is_lowercase() {
            Case::Lower
        } else if ch.is_uppercase() {
            Case::Upper
        } else {
            Case::Neither
        }
    }
}

/// A word is mixed case when capitals follow its first letter while it is not
/// entirely uppercase (`"McDonald"`, `"iPhone"`). Words containing anything
/// other than cased letters are never mixed.
pub fn is_mixed_case(word: &str) -> bool {
    let cases = word.chars().map(Case::new).collect::<Vec<_>>();

    let (first, tail) = match cases.split_first() {
        Some(v) => v,
        None => return false,
    };

    if cases.contains(&Case::Neither) {
        return false;
    }

    let tail_upper = tail.contains(&Case::Upper);
    let tail_lower = tail.contains(&Case::Lower);

    (tail_upper && tail_lower) || (*first == Case::Lower && tail_upper)
}

pub fn is_all_caps(word: &str) -> bool {
    upper_case(word) == word
}

pub fn is_first_caps(word: &str) -> bool {
    upper_first(word) == word
}

/// How a replacement term has to be recased to look like the token it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMutation {
    FirstCaps,
    AllCaps,
    None,
}

impl CaseMutation {
    /// Detects the mutation for a token core (punctuation already split off).
    ///
    /// Tokens without any uppercase letter, and mixed-case tokens that do not
    /// start with a capital (`"iPhone"`), get no mutation. A single capital
    /// letter counts as first caps rather than all caps.
    pub fn of(word: &str) -> CaseMutation {
        if !word.chars().any(char::is_uppercase) {
            return CaseMutation::None;
        }

        if is_mixed_case(word) {
            return match word.chars().next() {
                Some(ch) if ch.is_uppercase() => CaseMutation::FirstCaps,
                _ => CaseMutation::None,
            };
        }

        if is_all_caps(word) && word.chars().filter(|ch| ch.is_alphabetic()).count() > 1 {
            CaseMutation::AllCaps
        } else if is_first_caps(word) {
            CaseMutation::FirstCaps
        } else {
            CaseMutation::None
        }
    }

    pub fn apply(self, word: &str) -> SmolStr {
        match self {
            CaseMutation::FirstCaps => upper_first(word),
            CaseMutation::AllCaps => upper_case(word),
            CaseMutation::None => SmolStr::new(word),
        }
    }
}
