//! Similarity engine: TF-IDF over the reference plus its candidates, cosine
//! similarity from the reference to each candidate.
//!
//! The weighting space is built per call from exactly the documents passed in.
//! Scores from different calls are not comparable.

use std::collections::{BTreeMap, HashMap};

use crate::screening::normalizer::normalize;

/// Sparse, L2-normalized term weights for one document, keyed by term id.
/// Ordered so that float sums are reproducible across calls.
type TermVector = BTreeMap<usize, f64>;

/// TF-IDF weighting fitted on one corpus.
///
/// `tf` is the raw term count, `idf(t) = ln((1 + n) / (1 + df(t))) + 1`.
#[derive(Debug)]
pub struct TermWeighting {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TermWeighting {
    /// Fits the vocabulary and IDF weights on already-normalized documents.
    pub fn fit(documents: &[String]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for document in documents {
            let mut seen = vec![false; document_frequency.len()];
            for token in document.split_whitespace() {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(token.to_string()).or_insert(next_id);
                if id == document_frequency.len() {
                    document_frequency.push(0);
                    seen.push(false);
                }
                if !seen[id] {
                    seen[id] = true;
                    document_frequency[id] += 1;
                }
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Projects a normalized document into the fitted space. Terms outside the
    /// fitted vocabulary are ignored. An empty document yields an empty vector.
    pub fn transform(&self, document: &str) -> TermVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in document.split_whitespace() {
            if let Some(&id) = self.vocabulary.get(token) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }

        let mut weights: TermVector = counts
            .into_iter()
            .map(|(id, tf)| (id, tf * self.idf[id]))
            .collect();

        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            weights.values_mut().for_each(|w| *w /= norm);
        }
        weights
    }
}

/// Cosine similarity between two sparse vectors. Zero vectors score 0.
pub fn cosine_similarity(v1: &TermVector, v2: &TermVector) -> f64 {
    let (small, large) = if v1.len() <= v2.len() { (v1, v2) } else { (v2, v1) };

    let dot: f64 = small
        .iter()
        .filter_map(|(id, a)| large.get(id).map(|b| a * b))
        .sum();
    let magnitude_v1 = v1.values().map(|w| w * w).sum::<f64>().sqrt();
    let magnitude_v2 = v2.values().map(|w| w * w).sum::<f64>().sqrt();

    if magnitude_v1 == 0.0 || magnitude_v2 == 0.0 {
        return 0.0;
    }

    dot / (magnitude_v1 * magnitude_v2)
}

/// Scores `reference` against every candidate, returning percentages in
/// `[0, 100]` aligned with `candidates`.
///
/// Returns an empty vector when the reference is blank or there are no
/// candidates.
pub fn similarity<S: AsRef<str>>(reference: &str, candidates: &[S]) -> Vec<f64> {
    if reference.trim().is_empty() || candidates.is_empty() {
        return Vec::new();
    }

    let corpus: Vec<String> = std::iter::once(reference)
        .chain(candidates.iter().map(AsRef::as_ref))
        .map(normalize)
        .collect();

    let weighting = TermWeighting::fit(&corpus);
    tracing::debug!(
        documents = corpus.len(),
        terms = weighting.vocabulary_len(),
        "fitted term weighting"
    );

    let reference_vector = weighting.transform(&corpus[0]);
    corpus[1..]
        .iter()
        .map(|candidate| {
            let candidate_vector = weighting.transform(candidate);
            (cosine_similarity(&reference_vector, &candidate_vector) * 100.0).clamp(0.0, 100.0)
        })
        .collect()
}
