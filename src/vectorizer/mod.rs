pub mod compare;
pub mod corpus;
pub mod evaluate;
pub mod term;
pub mod tfidf;

use std::marker::PhantomData;

use rayon::prelude::*;

use crate::vectorizer::{
    compare::{cosine_similarity, matching_terms},
    corpus::Corpus,
    evaluate::scoring::{SimilarityReport, SimilarityResult},
    term::TermFrequency,
    tfidf::{compute_tfidf, tf_from_freq, DefaultTFIDFEngine, TFIDFEngine, TermWeights},
};

/// One title held by a `TitleIndex`
#[derive(Debug, Clone)]
pub struct IndexedTitle<K> {
    pub key: K,
    pub tokens: Vec<String>,
    /// TF vector, computed once at build time
    pub tf: TermWeights,
}

/// Title index
/// Holds a fixed list of tokenized titles with their TF vectors and the
/// document frequencies of the whole list, so repeated checks only pay for
/// the query's own contribution to IDF.
///
/// `check` returns exactly what `rank` returns over the same titles.
/// The index is immutable once built; build a new one when the list changes.
///
/// `TitleIndex<K, E>` has the following generic parameters:
/// - `K`: key or metadata attached to each title
/// - `E`: TF-IDF calculation engine (default `DefaultTFIDFEngine`)
#[derive(Debug, Clone)]
pub struct TitleIndex<K, E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    documents: Vec<IndexedTitle<K>>,
    corpus: Corpus,
    _marker: PhantomData<fn() -> E>,
}

impl<K, E> TitleIndex<K, E>
where
    E: TFIDFEngine,
{
    /// Build from keyed, already tokenized titles
    pub fn build<I>(titles: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
    {
        let mut corpus = Corpus::new();
        let documents: Vec<IndexedTitle<K>> = titles
            .into_iter()
            .map(|(key, tokens)| {
                let freq = TermFrequency::from(&tokens[..]);
                corpus.add_freq(&freq);
                let mut tf = tf_from_freq::<E>(&freq);
                tf.shrink_to_fit();
                IndexedTitle { key, tokens, tf }
            })
            .collect();
        tracing::debug!(titles = documents.len(), vocab = corpus.vocab_size(), "title index built");
        Self {
            documents,
            corpus,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IndexedTitle<K>> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedTitle<K>> {
        self.documents.iter()
    }

    /// Document frequencies of the indexed titles (query not included)
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }
}

impl<K, E> TitleIndex<K, E>
where
    K: Sync,
    E: TFIDFEngine,
{
    /// Rank the indexed titles against `query`
    /// Same ordering and tie rules as `rank`.
    #[tracing::instrument(level = "debug", skip_all, fields(query_len = query.len(), titles = self.documents.len(), top_k = top_k))]
    pub fn check<Q>(&self, query: &[Q], top_k: usize) -> SimilarityReport<&K>
    where
        Q: AsRef<str> + Sync,
    {
        let query_freq = TermFrequency::from(query);
        let idf = self.corpus.with_query::<E>(&query_freq);
        let query_weights = compute_tfidf(&tf_from_freq::<E>(&query_freq), &idf);

        let list: Vec<SimilarityResult<&K>> = self
            .documents
            .par_iter()
            .enumerate()
            .map(|(index, title)| {
                let weights = compute_tfidf(&title.tf, &idf);
                let similarity = cosine_similarity(&query_weights, &weights);
                tracing::trace!(index, similarity, "scored title");
                SimilarityResult {
                    key: &title.key,
                    index,
                    similarity,
                    matching_terms: matching_terms(query, &title.tokens),
                }
            })
            .collect();

        let mut report = SimilarityReport::new(list);
        report.sort_by_score().truncate(top_k);
        report
    }
}

impl<K, E> FromIterator<(K, Vec<String>)> for TitleIndex<K, E>
where
    E: TFIDFEngine,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        Self::build(iter)
    }
}
