use ahash::RandomState;
use indexmap::IndexMap;

use crate::vectorizer::{corpus::Corpus, term::TermFrequency};

/// Sparse term weight vector
/// Keys are the terms with a weight; absent terms weigh 0.
/// Insertion order is kept so sums over a vector are reproducible.
pub type TermWeights = IndexMap<String, f64, RandomState>;

/// TF-IDF calculation engine
/// Plug a different weighting scheme into the ranker by implementing this trait.
pub trait TFIDFEngine {
    /// Term frequency of a term seen `count` times in a document of `total` terms
    fn tf(count: u64, total: u64) -> f64;
    /// Inverse document frequency of a term found in `doc_freq` of `doc_num` documents
    fn idf(doc_num: u64, doc_freq: u64) -> f64;
}

/// Textbook TF-IDF
/// tf(t) = count(t) / total
/// idf(t) = ln(N / df(t))
///
/// A term present in every document gets idf 0 and so no weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn tf(count: u64, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        count as f64 / total as f64
    }

    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        if doc_num == 0 || doc_freq == 0 {
            return 0.0;
        }
        (doc_num as f64 / doc_freq as f64).ln()
    }
}

/// Source of idf values for `compute_tfidf`
pub trait IdfLookup {
    /// idf of `term`, `None` when the term is unknown
    fn idf(&self, term: &str) -> Option<f64>;
}

impl IdfLookup for TermWeights {
    #[inline]
    fn idf(&self, term: &str) -> Option<f64> {
        self.get(term).copied()
    }
}

/// TF vector of one document
/// An empty document gives an empty vector.
pub fn compute_tf<T>(document: &[T]) -> TermWeights
where
    T: AsRef<str>,
{
    tf_from_freq::<DefaultTFIDFEngine>(&TermFrequency::from(document))
}

/// TF vector from precounted terms, using engine `E`
pub fn tf_from_freq<E>(freq: &TermFrequency) -> TermWeights
where
    E: TFIDFEngine,
{
    let total = freq.term_sum();
    let mut tf = TermWeights::with_capacity_and_hasher(freq.term_num(), RandomState::new());
    if total == 0 {
        return tf;
    }
    for (term, count) in freq.iter() {
        tf.insert(term.to_string(), E::tf(count, total));
    }
    tf
}

/// IDF over a set of documents
/// The query must be one of `corpus` so that its terms are counted.
/// `df` counts documents, not occurrences.
pub fn compute_idf<T>(corpus: &[Vec<T>]) -> TermWeights
where
    T: AsRef<str>,
{
    let mut counts = Corpus::new();
    for document in corpus {
        counts.add_doc(document);
    }
    counts.idf_weights::<DefaultTFIDFEngine>()
}

/// Multiply each tf entry by its idf
/// Terms missing from `idf` get weight 0.
pub fn compute_tfidf<I>(tf: &TermWeights, idf: &I) -> TermWeights
where
    I: IdfLookup + ?Sized,
{
    tf.iter()
        .map(|(term, &tf_val)| (term.clone(), tf_val * idf.idf(term).unwrap_or(0.0)))
        .collect()
}
