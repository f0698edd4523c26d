use std::collections::HashSet;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

/// StopWords struct
/// A set of lowercase words dropped from token streams.
///
/// The list itself comes from outside (a file, a sheet, a constant);
/// this type only normalizes and stores it.
///
/// # Examples
/// ```
/// use title_similarity::StopWords;
/// let stopwords = StopWords::parse("yang\nDAN\n\n  pada  \n");
/// assert!(stopwords.contains("dan"));
/// assert!(stopwords.contains("pada"));
/// assert_eq!(stopwords.len(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String, RandomState>,
}

impl StopWords {
    /// Create an empty set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a newline-separated word list
    /// Each line is trimmed and lowercased, blank lines are skipped.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Add a word, lowercased
    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_lowercase())
    }

    /// Check membership of an already lowercased token
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S> FromIterator<S> for StopWords
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut stopwords = StopWords::empty();
        for word in iter {
            stopwords.insert(word.as_ref());
        }
        stopwords
    }
}
