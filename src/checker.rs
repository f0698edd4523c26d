//! Title-level entry point: tokenize, weight, rank

use serde::{Deserialize, Serialize};

use crate::{
    config::CheckConfig,
    error::Result,
    tokenizer::{StopWords, Tokenizer},
    vectorizer::{
        evaluate::scoring::{rank, SimilarityReport},
        TitleIndex,
    },
};

/// One reference title plus whatever the caller wants back in the results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleRecord<M> {
    pub title: String,
    pub meta: M,
}

impl<M> TitleRecord<M> {
    pub fn new(title: impl Into<String>, meta: M) -> Self {
        Self {
            title: title.into(),
            meta,
        }
    }
}

/// Similarity checker
/// Ties a tokenizer and a `CheckConfig` together. The title list is passed
/// to every call; the checker keeps no corpus of its own.
///
/// # Examples
/// ```
/// use title_similarity::{SimilarityChecker, TitleRecord};
/// let checker = SimilarityChecker::default();
/// let records = vec![
///     TitleRecord::new("Sistem Pakar Diagnosa Penyakit Anjing", 1),
///     TitleRecord::new("Metode Forward Chaining", 2),
/// ];
/// let report = checker.check("Sistem pakar anjing", &records);
/// assert_eq!(*report.list[0].key, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimilarityChecker {
    tokenizer: Tokenizer,
    config: CheckConfig,
}

impl SimilarityChecker {
    /// Build a checker
    /// `stopwords` is ignored when `config.filter_stopwords` is false.
    pub fn new(config: CheckConfig, stopwords: StopWords) -> Result<Self> {
        config.validate()?;
        let stopwords = if config.filter_stopwords {
            stopwords
        } else {
            StopWords::empty()
        };
        let tokenizer = Tokenizer::new(config.word_chars.clone(), stopwords)?;
        Ok(Self { tokenizer, config })
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    /// Rank `records` against `query`, keeping `config.top_k` results
    /// Results borrow each record's metadata.
    pub fn check<'a, M>(&self, query: &str, records: &'a [TitleRecord<M>]) -> SimilarityReport<&'a M>
    where
        M: Sync,
    {
        let query_tokens = self.tokenize(query);
        if query_tokens.is_empty() {
            tracing::debug!("query has no tokens, every title scores 0");
        }
        let candidates: Vec<(&'a M, Vec<String>)> = records
            .iter()
            .map(|record| (&record.meta, self.tokenize(&record.title)))
            .collect();
        rank(&query_tokens, &candidates, self.config.top_k)
    }

    /// Tokenize `records` once for repeated checks
    pub fn index<'a, M>(&self, records: &'a [TitleRecord<M>]) -> TitleIndex<&'a M> {
        records
            .iter()
            .map(|record| (&record.meta, self.tokenize(&record.title)))
            .collect()
    }

    /// `check` against a prebuilt index
    pub fn check_indexed<'i, K>(&self, query: &str, index: &'i TitleIndex<K>) -> SimilarityReport<&'i K>
    where
        K: Sync,
    {
        index.check(&self.tokenize(query), self.config.top_k)
    }
}
