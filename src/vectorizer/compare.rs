use std::collections::HashSet;

use ahash::RandomState;
use indexmap::IndexSet;

use crate::vectorizer::tfidf::TermWeights;

/// Terms shared by two documents
pub type MatchingTerms = IndexSet<String, RandomState>;

/// dot積
/// d(a, b) = Σ(a_i * b_i)
/// A key missing on either side contributes 0. Products are summed in
/// ascending order, which makes `dot(a, b) == dot(b, a)` hold bit for bit.
pub fn dot(a: &TermWeights, b: &TermWeights) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut products: Vec<f64> = small
        .iter()
        .filter_map(|(term, &ws)| large.get(term).map(|&wl| ws * wl))
        .collect();
    products.sort_by(f64::total_cmp);
    products.into_iter().sum()
}

/// ||a|| = sqrt(Σ(a_i^2))
pub fn norm(a: &TermWeights) -> f64 {
    a.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// コサイン類似度
/// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
///
/// Computed over the union of both key sets. Returns 0 when either
/// vector has zero magnitude or the ratio is not finite (infinite weights),
/// and is clamped to [0, 1].
pub fn cosine_similarity(a: &TermWeights, b: &TermWeights) -> f64 {
    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let cos = dot(a, b) / (norm_a * norm_b);
    if !cos.is_finite() {
        return 0.0;
    }
    cos.clamp(0.0, 1.0)
}

/// Distinct terms of `doc_a` also present in `doc_b`, in `doc_a` order
/// Frequency is ignored. Used to explain a score, not to compute it.
pub fn matching_terms<A, B>(doc_a: &[A], doc_b: &[B]) -> MatchingTerms
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let in_b: HashSet<&str, RandomState> = doc_b.iter().map(AsRef::as_ref).collect();
    doc_a
        .iter()
        .map(AsRef::as_ref)
        .filter(|term| in_b.contains(term))
        .map(str::to_string)
        .collect()
}
