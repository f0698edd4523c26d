use std::collections::HashSet;
use std::marker::PhantomData;

use ahash::RandomState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::{
    term::TermFrequency,
    tfidf::{IdfLookup, TFIDFEngine, TermWeights},
};

/// Document count and per-term document frequency
/// Each document contributes at most 1 to a term's count, however often
/// the term repeats inside it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// number of documents added
    pub doc_num: u64,
    /// number of documents containing each term
    pub term_counts: IndexMap<Box<str>, u64, RandomState>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::with_hasher(RandomState::new()),
        }
    }

    /// Add one tokenized document
    pub fn add_doc<T>(&mut self, document: &[T])
    where
        T: AsRef<str>,
    {
        let mut seen: HashSet<&str, RandomState> = HashSet::with_hasher(RandomState::new());
        let distinct = document
            .iter()
            .map(AsRef::as_ref)
            .filter(|term| seen.insert(*term));
        self.add_set(distinct);
    }

    /// Add one document given as counted terms
    pub fn add_freq(&mut self, freq: &TermFrequency) {
        self.add_set(freq.term_set_iter());
    }

    fn add_set<'t>(&mut self, distinct_terms: impl Iterator<Item = &'t str>) {
        self.doc_num += 1;
        for term in distinct_terms {
            if let Some(count) = self.term_counts.get_mut(term) {
                *count += 1;
            } else {
                self.term_counts.insert(term.into(), 1);
            }
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the document frequency of a term
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// Materialize idf for every known term
    pub fn idf_weights<E>(&self) -> TermWeights
    where
        E: TFIDFEngine,
    {
        self.term_counts
            .iter()
            .map(|(term, &df)| (term.to_string(), E::idf(self.doc_num, df)))
            .collect()
    }

    /// View of this corpus with `query` counted as one more document
    /// Nothing is copied; idf values are derived per lookup.
    pub fn with_query<'a, E>(&'a self, query: &'a TermFrequency) -> QueryIdf<'a, E>
    where
        E: TFIDFEngine,
    {
        QueryIdf {
            corpus: self,
            query,
            _marker: PhantomData,
        }
    }
}

/// idf over `corpus ∪ {query}` without rebuilding the corpus counts
#[derive(Debug)]
pub struct QueryIdf<'a, E> {
    corpus: &'a Corpus,
    query: &'a TermFrequency,
    _marker: PhantomData<fn() -> E>,
}

impl<E> QueryIdf<'_, E> {
    /// Document count including the query
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.corpus.doc_num + 1
    }

    /// Document frequency including the query
    #[inline]
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.corpus.term_count(term) + u64::from(self.query.contains_term(term))
    }
}

impl<E> IdfLookup for QueryIdf<'_, E>
where
    E: TFIDFEngine,
{
    fn idf(&self, term: &str) -> Option<f64> {
        match self.doc_freq(term) {
            0 => None,
            df => Some(E::idf(self.doc_num(), df)),
        }
    }
}
