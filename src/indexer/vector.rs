//! TF-IDF vector space over a fixed set of normalized documents.
//!
//! Terms are whitespace-delimited. Weights are raw term counts scaled by a
//! smoothed inverse document frequency, `ln((1 + n) / (1 + df)) + 1`, and each
//! vector is scaled to unit length so cosine similarity reduces to a dot product.

use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Sparse term-weight vector, entries sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build a unit-length vector from raw term counts
    fn weighted(counts: HashMap<usize, f64>, idf: &[f64]) -> Self {
        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(term, count)| (term, count * idf[term]))
            .collect();
        entries.sort_unstable_by_key(|&(term, _)| term);

        let mut vector = Self { entries };
        vector.normalize();
        vector
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_weight) = self.entries[i];
            let (b_term, b_weight) = other.entries[j];
            match a_term.cmp(&b_term) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable TF-IDF index, one vector per document in input order.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    /// term → dimension
    vocabulary: HashMap<String, usize>,
    /// IDF weight per dimension
    idf: Vec<f64>,
    documents: Vec<SparseVector>,
}

impl VectorIndex {
    /// Build the index from normalized documents.
    ///
    /// Fails with [`Error::InvalidCorpus`] when there are no documents or
    /// when the documents contain no terms at all.
    pub fn build<S: AsRef<str>>(documents: &[S]) -> Result<Self> {
        if documents.is_empty() {
            return Err(Error::InvalidCorpus(
                "cannot build an index over an empty corpus".to_string(),
            ));
        }

        // Sorted term order keeps dimension ids stable across runs
        let terms: BTreeSet<&str> = documents
            .iter()
            .flat_map(|doc| tokenize(doc.as_ref()))
            .collect();

        if terms.is_empty() {
            return Err(Error::InvalidCorpus(
                "corpus documents contain no terms".to_string(),
            ));
        }

        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| ((*term).to_string(), idx))
            .collect();

        let counts: Vec<HashMap<usize, f64>> = documents
            .iter()
            .map(|doc| count_terms(&vocabulary, doc.as_ref()))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for doc_counts in &counts {
            for &term in doc_counts.keys() {
                doc_freq[term] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let documents: Vec<SparseVector> = counts
            .into_iter()
            .map(|doc_counts| SparseVector::weighted(doc_counts, &idf))
            .collect();

        info!(
            "Vector index built: {} documents, {} terms",
            documents.len(),
            vocabulary.len()
        );

        Ok(Self {
            vocabulary,
            idf,
            documents,
        })
    }

    /// Project text into the index's vocabulary.
    /// Terms never seen at build time are dropped.
    pub fn vectorize(&self, normalized_text: &str) -> SparseVector {
        let counts = count_terms(&self.vocabulary, normalized_text);
        debug!("Vectorized query: {} known terms", counts.len());
        SparseVector::weighted(counts, &self.idf)
    }

    /// Cosine similarity of `query` against every document, in document order
    pub fn score(&self, query: &SparseVector) -> Vec<f64> {
        if query.is_empty() {
            return vec![0.0; self.documents.len()];
        }

        let query_norm = query.norm();
        self.documents
            .iter()
            .map(|doc| {
                let doc_norm = doc.norm();
                if doc_norm == 0.0 {
                    0.0
                } else {
                    (query.dot(doc) / (query_norm * doc_norm)).clamp(0.0, 1.0)
                }
            })
            .collect()
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }

    pub fn document(&self, position: usize) -> Option<&SparseVector> {
        self.documents.get(position)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

fn count_terms(vocabulary: &HashMap<String, usize>, text: &str) -> HashMap<usize, f64> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        if let Some(&idx) = vocabulary.get(token) {
            *counts.entry(idx).or_insert(0.0) += 1.0;
        }
    }
    counts
}
