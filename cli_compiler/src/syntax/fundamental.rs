//! Fundamental (built-in) type specifiers
//!
//! Keyword sequences are consumed greedily: a keyword is accepted while the
//! words read so far plus that keyword are a prefix of one of the permitted
//! orderings below. The accepted words are then spelled canonically as
//! `[signed|unsigned] [short|long|long long] [int|char|double]`.

use crate::tokens::Keyword;

/// `S` stands for either `signed` or `unsigned`
#[rustfmt::skip]
const PERMUTATIONS: &[&[&str]] = &[
    &["S", "short", "int"],
    &["S", "long", "int"],
    &["S", "long", "long", "int"],
    &["S", "int", "short"],
    &["S", "int", "long", "long"],
    &["S", "char"],
    &["short", "S", "int"],
    &["short", "int", "S"],
    &["short", "long", "S", "int"],
    &["short", "long", "int", "S"],
    &["long", "S", "int"],
    &["long", "long", "S", "int"],
    &["long", "long", "int", "S"],
    &["long", "int", "S"],
    &["long", "double"],
    &["int", "S", "short"],
    &["int", "S", "long", "long"],
    &["int", "short", "S"],
    &["int", "long", "S"],
    &["int", "long", "long", "S"],
    &["char", "S"],
    &["bool"],
    &["wchar_t"],
    &["float"],
    &["double", "long"],
];

fn word_matches(pattern: &str, keyword: Keyword) -> bool {
    match pattern {
        "S" => matches!(keyword, Keyword::Signed | Keyword::Unsigned),
        word => keyword.as_str() == word,
    }
}

/// Keywords of one fundamental type specifier, collected token by token
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FundamentalType {
    words: Vec<Keyword>,
}

impl FundamentalType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `keyword` can extend the specifier read so far
    pub fn accepts(&self, keyword: Keyword) -> bool {
        if !keyword.is_fundamental_type() {
            return false;
        }

        let next = self.words.len();
        PERMUTATIONS.iter().any(|pattern| {
            pattern.len() > next
                && self
                    .words
                    .iter()
                    .zip(pattern.iter())
                    .all(|(word, p)| word_matches(p, *word))
                && word_matches(pattern[next], keyword)
        })
    }

    pub fn push(&mut self, keyword: Keyword) {
        self.words.push(keyword);
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words as written, in source order
    pub fn written(&self) -> String {
        self.words
            .iter()
            .map(Keyword::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn canonical(&self) -> String {
        let count = |k: Keyword| self.words.iter().filter(|w| **w == k).count();

        let mut parts: Vec<&str> = Vec::with_capacity(self.words.len());

        if count(Keyword::Signed) > 0 {
            parts.push("signed");
        } else if count(Keyword::Unsigned) > 0 {
            parts.push("unsigned");
        }

        if count(Keyword::Short) > 0 {
            parts.push("short");
        }
        for _ in 0..count(Keyword::Long) {
            parts.push("long");
        }

        for base in [
            Keyword::Int,
            Keyword::Char,
            Keyword::Double,
            Keyword::Bool,
            Keyword::WcharT,
            Keyword::Float,
        ] {
            if count(base) > 0 {
                parts.push(base.as_str());
            }
        }

        parts.join(" ")
    }
}

/// Read a fundamental type from a keyword sequence, returning the number of
/// keywords consumed and the canonical spelling.
pub fn parse_keywords(keywords: &[Keyword]) -> Option<(usize, String)> {
    let mut ty = FundamentalType::new();
    for &keyword in keywords {
        if !ty.accepts(keyword) {
            break;
        }
        ty.push(keyword);
    }

    (!ty.is_empty()).then(|| (ty.words.len(), ty.canonical()))
}
