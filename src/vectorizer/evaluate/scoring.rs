use std::fmt::{self, Debug, Display};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    vectorizer::{
        compare::{cosine_similarity, matching_terms, MatchingTerms},
        corpus::Corpus,
        term::TermFrequency,
        tfidf::{compute_tfidf, tf_from_freq, DefaultTFIDFEngine, TFIDFEngine},
    },
};

/// Number of results kept when the caller does not choose
pub const DEFAULT_TOP_K: usize = 10;

/// One scored candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult<K> {
    /// caller supplied key or metadata, passed through untouched
    pub key: K,
    /// position of the candidate in the input
    pub index: usize,
    /// cosine similarity in [0, 1]
    pub similarity: f64,
    /// distinct query terms also found in the candidate, in query order
    pub matching_terms: MatchingTerms,
}

impl<K> SimilarityResult<K> {
    /// Similarity on a 0 - 100 scale
    #[inline]
    pub fn percent(&self) -> f64 {
        self.similarity * 100.0
    }

    pub fn level(&self, thresholds: &LevelThresholds) -> SimilarityLevel {
        thresholds.classify(self.percent())
    }

    /// Replace the key, keeping the score
    pub fn map_key<L>(self, f: impl FnOnce(K) -> L) -> SimilarityResult<L> {
        SimilarityResult {
            key: f(self.key),
            index: self.index,
            similarity: self.similarity,
            matching_terms: self.matching_terms,
        }
    }
}

/// How alarming a score is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityLevel {
    /// likely duplicate
    High,
    /// noticeable overlap
    Medium,
    Low,
}

impl Display for SimilarityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimilarityLevel::High => "high",
            SimilarityLevel::Medium => "medium",
            SimilarityLevel::Low => "low",
        };
        f.write_str(name)
    }
}

/// Percent bounds for `SimilarityLevel`
/// `percent >= high` is High, `percent >= medium` is Medium, anything else is Low.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            high: 70.0,
            medium: 40.0,
        }
    }
}

impl LevelThresholds {
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.high) || !in_range(self.medium) || self.medium > self.high {
            return Err(Error::InvalidThresholds {
                high: self.high,
                medium: self.medium,
            });
        }
        Ok(())
    }

    pub fn classify(&self, percent: f64) -> SimilarityLevel {
        if percent >= self.high {
            SimilarityLevel::High
        } else if percent >= self.medium {
            SimilarityLevel::Medium
        } else {
            SimilarityLevel::Low
        }
    }
}

/// Ranked similarity results
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport<K> {
    pub list: Vec<SimilarityResult<K>>,
}

impl<K> SimilarityReport<K> {
    pub fn new(list: Vec<SimilarityResult<K>>) -> Self {
        Self { list }
    }

    /// Sort results by descending similarity
    /// Stable: equal scores keep their input order. A NaN score ranks as 0;
    /// no result is ever dropped.
    pub fn sort_by_score(&mut self) -> &mut Self {
        let score = |r: &SimilarityResult<K>| if r.similarity.is_nan() { 0.0 } else { r.similarity };
        self.list.sort_by(|a, b| score(b).total_cmp(&score(a)));
        self
    }

    /// Keep the first `k` results
    pub fn truncate(&mut self, k: usize) -> &mut Self {
        self.list.truncate(k);
        self
    }

    /// First `k` results without consuming the report
    pub fn top(&self, k: usize) -> &[SimilarityResult<K>] {
        &self.list[..k.min(self.list.len())]
    }

    /// Best result, if any
    pub fn best(&self) -> Option<&SimilarityResult<K>> {
        self.list.first()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimilarityResult<K>> {
        self.list.iter()
    }

    pub fn map_keys<L>(self, mut f: impl FnMut(K) -> L) -> SimilarityReport<L> {
        SimilarityReport {
            list: self.list.into_iter().map(|r| r.map_key(&mut f)).collect(),
        }
    }
}

impl<K> IntoIterator for SimilarityReport<K> {
    type Item = SimilarityResult<K>;
    type IntoIter = std::vec::IntoIter<SimilarityResult<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a, K> IntoIterator for &'a SimilarityReport<K> {
    type Item = &'a SimilarityResult<K>;
    type IntoIter = std::slice::Iter<'a, SimilarityResult<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl<K> Debug for SimilarityReport<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "SimilarityReport [")?;
            for r in &self.list {
                writeln!(f, "    {:?}: {:.6} (#{}, shared: {:?})", r.key, r.similarity, r.index, r.matching_terms)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl<K> Display for SimilarityReport<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let thresholds = LevelThresholds::default();
        for (rank, r) in self.list.iter().enumerate() {
            write!(f, "{:>3}. {:>5.1}% [{}] {}", rank + 1, r.percent(), r.level(&thresholds), r.key)?;
            if !r.matching_terms.is_empty() {
                let shared: Vec<&str> = r.matching_terms.iter().map(String::as_str).collect();
                write!(f, " (shared: {})", shared.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Rank candidates by TF-IDF cosine similarity to `query`
///
/// IDF is computed over the query plus every candidate, so it changes with
/// each query. Candidates are scored in parallel; the result is sorted by
/// descending similarity with ties kept in input order, then cut to `top_k`.
///
/// Never fails: an empty candidate list gives an empty report and a query
/// without tokens scores every candidate 0.
///
/// # Examples
/// ```
/// use title_similarity::{rank, DEFAULT_TOP_K};
/// let query = ["sistem", "pakar", "anjing"];
/// let candidates = vec![
///     ("a", vec!["sistem", "pakar", "diagnosa", "penyakit", "anjing"]),
///     ("b", vec!["metode", "forward", "chaining"]),
/// ];
/// let report = rank(&query, &candidates, DEFAULT_TOP_K);
/// assert_eq!(report.list[0].key, "a");
/// assert!(report.list[0].similarity > 0.0);
/// assert_eq!(report.list[1].similarity, 0.0);
/// ```
pub fn rank<K, Q, T>(query: &[Q], candidates: &[(K, Vec<T>)], top_k: usize) -> SimilarityReport<K>
where
    K: Clone + Send + Sync,
    Q: AsRef<str> + Sync,
    T: AsRef<str> + Sync,
{
    rank_with::<DefaultTFIDFEngine, K, Q, T>(query, candidates, top_k)
}

/// `rank` with a custom weighting engine
#[tracing::instrument(level = "debug", skip_all, fields(query_len = query.len(), candidates = candidates.len(), top_k = top_k))]
pub fn rank_with<E, K, Q, T>(query: &[Q], candidates: &[(K, Vec<T>)], top_k: usize) -> SimilarityReport<K>
where
    E: TFIDFEngine,
    K: Clone + Send + Sync,
    Q: AsRef<str> + Sync,
    T: AsRef<str> + Sync,
{
    let mut corpus = Corpus::new();
    corpus.add_doc(query);
    for (_, document) in candidates {
        corpus.add_doc(document);
    }
    let idf = corpus.idf_weights::<E>();
    tracing::debug!(docs = corpus.doc_num(), vocab = idf.len(), "idf computed");

    let query_weights = compute_tfidf(&tf_from_freq::<E>(&TermFrequency::from(query)), &idf);

    let list: Vec<SimilarityResult<K>> = candidates
        .par_iter()
        .enumerate()
        .map(|(index, (key, document))| {
            let weights = compute_tfidf(&tf_from_freq::<E>(&TermFrequency::from(&document[..])), &idf);
            let similarity = cosine_similarity(&query_weights, &weights);
            tracing::trace!(index, similarity, "scored candidate");
            SimilarityResult {
                key: key.clone(),
                index,
                similarity,
                matching_terms: matching_terms(query, document),
            }
        })
        .collect();

    let mut report = SimilarityReport::new(list);
    report.sort_by_score().truncate(top_k);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn keyed(titles: &[&str]) -> Vec<(usize, Vec<String>)> {
        titles.iter().enumerate().map(|(i, t)| (i, doc(t))).collect()
    }

    #[test]
    fn ranks_overlapping_title_first() {
        let candidates = keyed(&["metode forward chaining", "sistem pakar diagnosa penyakit anjing"]);
        let report = rank(&doc("sistem pakar anjing"), &candidates, DEFAULT_TOP_K);
        assert_eq!(report.len(), 2);
        assert_eq!(report.list[0].key, 1);
        assert!(report.list[0].similarity > 0.0);
        assert_eq!(report.list[1].key, 0);
        assert_eq!(report.list[1].similarity, 0.0);
        let shared: Vec<&str> = report.list[0].matching_terms.iter().map(String::as_str).collect();
        assert_eq!(shared, vec!["sistem", "pakar", "anjing"]);
    }

    #[test]
    fn output_is_non_increasing() {
        let candidates = keyed(&[
            "aplikasi web sekolah",
            "sistem informasi sekolah berbasis web",
            "sistem pakar",
            "jaringan syaraf tiruan",
            "sistem informasi perpustakaan",
            "sistem informasi sekolah",
        ]);
        let report = rank(&doc("sistem informasi sekolah"), &candidates, usize::MAX);
        assert_eq!(report.len(), candidates.len());
        for pair in report.list.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
        assert_eq!(report.list[0].key, 5);
        assert!((report.list[0].percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_input_order_and_reverse_with_it() {
        let titles = ["alpha beta", "gamma delta", "alpha beta", "epsilon"];
        let candidates = keyed(&titles);
        let report = rank(&doc("alpha beta"), &candidates, DEFAULT_TOP_K);
        let order: Vec<usize> = report.iter().map(|r| r.key).collect();
        assert_eq!(order, vec![0, 2, 1, 3]);

        let mut reversed = candidates.clone();
        reversed.reverse();
        let report = rank(&doc("alpha beta"), &reversed, DEFAULT_TOP_K);
        let order: Vec<usize> = report.iter().map(|r| r.key).collect();
        assert_eq!(order, vec![2, 0, 3, 1]);
    }

    #[test]
    fn truncates_to_top_k() {
        let candidates = keyed(&["a b", "a c", "a d", "e f", "g h"]);
        let report = rank(&doc("a"), &candidates, 2);
        assert_eq!(report.len(), 2);
        assert!(rank(&doc("a"), &candidates, 0).is_empty());
    }

    #[test]
    fn default_top_k_is_ten() {
        let titles: Vec<String> = (0..25).map(|i| format!("judul nomor {i}")).collect();
        let candidates: Vec<(usize, Vec<String>)> = titles.iter().enumerate().map(|(i, t)| (i, doc(t))).collect();
        assert_eq!(rank(&doc("judul"), &candidates, DEFAULT_TOP_K).len(), 10);
    }

    #[test]
    fn empty_candidates_give_empty_report() {
        let candidates: Vec<(usize, Vec<String>)> = Vec::new();
        assert!(rank(&doc("sistem pakar"), &candidates, DEFAULT_TOP_K).is_empty());
    }

    #[test]
    fn empty_query_scores_everything_zero() {
        let candidates = keyed(&["sistem pakar", "metode", ""]);
        let report = rank(&doc(""), &candidates, DEFAULT_TOP_K);
        assert_eq!(report.len(), 3);
        assert!(report.iter().all(|r| r.similarity == 0.0 && r.matching_terms.is_empty()));
        let order: Vec<usize> = report.iter().map(|r| r.key).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn term_in_every_document_carries_no_weight() {
        // "sistem" occurs in the query and both candidates, so idf("sistem") = 0
        let candidates = keyed(&["sistem pakar", "sistem informasi"]);
        let report = rank(&doc("sistem"), &candidates, DEFAULT_TOP_K);
        assert!(report.iter().all(|r| r.similarity == 0.0));
        assert!(report.iter().all(|r| r.matching_terms.contains("sistem")));
    }

    #[test]
    fn levels_follow_thresholds() {
        let t = LevelThresholds::default();
        assert_eq!(t.classify(70.0), SimilarityLevel::High);
        assert_eq!(t.classify(69.9), SimilarityLevel::Medium);
        assert_eq!(t.classify(40.0), SimilarityLevel::Medium);
        assert_eq!(t.classify(39.99), SimilarityLevel::Low);
        assert_eq!(t.classify(0.0), SimilarityLevel::Low);
    }

    #[test]
    fn thresholds_are_validated() {
        assert!(LevelThresholds::default().validate().is_ok());
        assert!(LevelThresholds { high: 30.0, medium: 50.0 }.validate().is_err());
        assert!(LevelThresholds { high: 120.0, medium: 50.0 }.validate().is_err());
        assert!(LevelThresholds { high: 50.0, medium: -1.0 }.validate().is_err());
        assert!(LevelThresholds { high: 50.0, medium: 50.0 }.validate().is_ok());
    }

    #[test]
    fn report_helpers() {
        let candidates = keyed(&["a b", "a", "c"]);
        let report = rank(&doc("a b"), &candidates, DEFAULT_TOP_K);
        assert_eq!(report.best().map(|r| r.key), Some(0));
        assert_eq!(report.top(2).len(), 2);
        assert_eq!(report.top(99).len(), 3);
        let names = report.map_keys(|k| format!("doc{k}"));
        assert_eq!(names.list[0].key, "doc0");
    }

    /// Weighs every term infinitely, so cosine hits inf / inf
    struct InfiniteIdf;

    impl TFIDFEngine for InfiniteIdf {
        fn tf(count: u64, total: u64) -> f64 {
            DefaultTFIDFEngine::tf(count, total)
        }

        fn idf(_doc_num: u64, _doc_freq: u64) -> f64 {
            f64::INFINITY
        }
    }

    #[test]
    fn non_finite_engine_keeps_every_candidate() {
        let candidates = keyed(&["a", "b", "a c"]);
        let report = rank_with::<InfiniteIdf, _, _, _>(&doc("a"), &candidates, DEFAULT_TOP_K);
        assert_eq!(report.len(), candidates.len());
        assert!(report.iter().all(|r| (0.0..=1.0).contains(&r.similarity)));
    }

    #[test]
    fn nan_scores_rank_as_zero_without_being_dropped() {
        let result = |index: usize, similarity: f64| SimilarityResult {
            key: index,
            index,
            similarity,
            matching_terms: MatchingTerms::default(),
        };
        let mut report = SimilarityReport::new(vec![result(0, f64::NAN), result(1, 0.5), result(2, 0.0)]);
        report.sort_by_score();
        let order: Vec<usize> = report.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn display_lists_percent_and_shared_terms() {
        let candidates = vec![("Sistem Pakar Anjing", doc("sistem pakar anjing")), ("Metode", doc("metode"))];
        let report = rank(&doc("sistem pakar anjing"), &candidates, DEFAULT_TOP_K);
        let text = report.to_string();
        let first = text.lines().next().unwrap();
        assert!(first.contains("100.0%"), "{first}");
        assert!(first.contains("[high]"), "{first}");
        assert!(first.contains("(shared: sistem, pakar, anjing)"), "{first}");
        assert_eq!(text.lines().count(), 2);
    }
}
