//! This crate ranks reference titles by TF-IDF cosine similarity to a query
//! title, to flag titles that duplicate or overlap an existing one.
//!
//! Pipeline: Tokenizer -> TF-IDF (over the query plus every reference title)
//! -> cosine similarity ranking. Every stage is a pure function of its input.

pub mod checker;
pub mod config;
pub mod error;
pub mod tokenizer;
pub mod vectorizer;

/// Similarity Checker
/// The top-level entry point. Tokenizes the query and every title with the
/// configured tokenizer and returns a ranked `SimilarityReport` whose keys
/// borrow the metadata of each `TitleRecord`.
///
/// The title list is passed on every call, never stored. For repeated checks
/// against the same list, build a `TitleIndex` with `SimilarityChecker::index`.
pub use checker::{SimilarityChecker, TitleRecord};

/// Checker settings: result count, word characters, stopword filtering and
/// the percent thresholds for `SimilarityLevel`.
pub use config::CheckConfig;

pub use error::{Error, Result};

/// Tokenizer
/// Lowercases, replaces punctuation with spaces, splits on whitespace and
/// optionally drops stopwords. `WordChars` makes the notion of a word
/// character explicit (ASCII by default).
pub use tokenizer::{tokenize, StopWords, Tokenizer, WordChars};

/// Term Frequency structure
/// Occurrence counts of each term in one document.
pub use vectorizer::term::TermFrequency;

/// Corpus
/// Document count and document frequency of each term, the base data for IDF.
pub use vectorizer::corpus::{Corpus, QueryIdf};

/// TF-IDF calculation
/// `compute_tf`, `compute_idf` and `compute_tfidf` build sparse weight
/// vectors. `TFIDFEngine` is the seam for other weighting schemes;
/// `DefaultTFIDFEngine` is textbook tf = count / total, idf = ln(N / df).
pub use vectorizer::tfidf::{
    compute_idf, compute_tf, compute_tfidf, DefaultTFIDFEngine, IdfLookup, TFIDFEngine, TermWeights,
};

/// Vector comparison
/// Cosine similarity over sparse weights and the shared-term explanation.
pub use vectorizer::compare::{cosine_similarity, matching_terms, MatchingTerms};

/// Ranking
/// `rank` scores candidates against a query and returns them best first,
/// ties in input order, cut to `top_k` (`DEFAULT_TOP_K` is 10).
pub use vectorizer::evaluate::scoring::{
    rank, rank_with, LevelThresholds, SimilarityLevel, SimilarityReport, SimilarityResult, DEFAULT_TOP_K,
};

/// Title Index
/// Tokenized titles with cached TF vectors and document frequencies.
/// `TitleIndex::check` gives the same report as `rank`.
pub use vectorizer::{IndexedTitle, TitleIndex};
