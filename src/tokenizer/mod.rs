pub mod stopwords;

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use stopwords::StopWords;

/// Characters kept inside tokens
/// Everything else except whitespace is replaced by a space before splitting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WordChars {
    /// `A-Z`, `a-z`, `0-9` and `_`
    /// Non-Latin letters and accented letters are treated as punctuation.
    #[default]
    Ascii,
    /// Any Unicode word character (letters, marks, digits, connectors)
    Unicode,
    /// Body of a regex character class, e.g. `\p{Latin}\d_`
    Custom(String),
}

impl WordChars {
    /// Regex matching one character that must be stripped
    fn strip_pattern(&self) -> String {
        match self {
            WordChars::Ascii => r"[^A-Za-z0-9_\s]".to_string(),
            WordChars::Unicode => r"[^\w\s]".to_string(),
            WordChars::Custom(body) => format!(r"[^{body}\s]"),
        }
    }

    fn compile(&self) -> Result<Regex> {
        if let WordChars::Custom(body) = self {
            if !class_body_is_closed(body) {
                return Err(Error::UnbalancedWordClass { pattern: body.clone() });
            }
        }
        let pattern = self.strip_pattern();
        Regex::new(&pattern).map_err(|source| Error::InvalidWordPattern {
            pattern: match self {
                WordChars::Custom(body) => body.clone(),
                _ => pattern.clone(),
            },
            source,
        })
    }
}

/// True when every `]` in `body` closes a `[` opened inside it,
/// so the body cannot end the surrounding class.
fn class_body_is_closed(body: &str) -> bool {
    let mut depth = 0usize;
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' => depth += 1,
            ']' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    true
}

static ASCII_STRIP: OnceLock<Regex> = OnceLock::new();

fn ascii_strip() -> &'static Regex {
    ASCII_STRIP.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9_\s]").expect("ascii strip pattern is a valid regex")
    })
}

/// Tokenizer
/// Turns a raw title into lowercase word tokens.
///
/// 1. lowercase the text
/// 2. replace every character that is neither a word character nor whitespace by a space
/// 3. split on runs of whitespace
/// 4. drop stopwords
///
/// Token order and repetition are preserved.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    word_chars: WordChars,
    strip: Regex,
    stopwords: StopWords,
}

impl Tokenizer {
    /// Build a tokenizer
    /// Fails only when a `WordChars::Custom` body is not a valid character class.
    pub fn new(word_chars: WordChars, stopwords: StopWords) -> Result<Self> {
        let strip = match word_chars {
            WordChars::Ascii => ascii_strip().clone(),
            _ => word_chars.compile()?,
        };
        Ok(Self {
            word_chars,
            strip,
            stopwords,
        })
    }

    /// Replace the stopword set
    pub fn with_stopwords(mut self, stopwords: StopWords) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        split_tokens(&self.strip, text, &self.stopwords)
    }

    pub fn word_chars(&self) -> &WordChars {
        &self.word_chars
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            word_chars: WordChars::Ascii,
            strip: ascii_strip().clone(),
            stopwords: StopWords::empty(),
        }
    }
}

/// Tokenize with ASCII word characters
/// Pass `&StopWords::empty()` for raw tokens.
///
/// # Examples
/// ```
/// use title_similarity::{tokenize, StopWords};
/// let tokens = tokenize("Sistem Pakar, Diagnosa-Penyakit!", &StopWords::empty());
/// assert_eq!(tokens, vec!["sistem", "pakar", "diagnosa", "penyakit"]);
/// ```
pub fn tokenize(text: &str, stopwords: &StopWords) -> Vec<String> {
    split_tokens(ascii_strip(), text, stopwords)
}

fn split_tokens(strip: &Regex, text: &str, stopwords: &StopWords) -> Vec<String> {
    let lower = text.to_lowercase();
    strip
        .replace_all(&lower, " ")
        .split_whitespace()
        .filter(|token| !stopwords.contains(token))
        .map(str::to_string)
        .collect()
}
