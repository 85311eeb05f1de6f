//! TF-IDF vectorizer producing L2-normalized sparse vectors.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::is_tfidf_stopword;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern"));

/// Sparse vector: `(column, weight)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVec {
    entries: Vec<(usize, f64)>,
}

impl SparseVec {
    /// Build from pairs; sorts by column and drops zero weights.
    pub fn from_pairs(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_unstable_by_key(|&(col, _)| col);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Squared L2 norm.
    pub fn norm_sq(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum()
    }

    /// Dot product by merging the two sorted column lists.
    pub fn dot(&self, other: &SparseVec) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Scale in place to unit L2 norm. Zero vectors are left untouched.
    fn normalize(&mut self) {
        let norm = self.norm_sq().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Lowercased tokens of at least two word characters, stopwords removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !is_tfidf_stopword(t))
        .map(str::to_string)
        .collect()
}

/// A TF-IDF model fit once over a document collection and then frozen.
///
/// Weights are raw term counts times the smoothed idf
/// `ln((1 + n) / (1 + df)) + 1`; each vector is L2-normalized.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    /// term -> column. Columns follow lexicographic term order.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
    n_documents: usize,
}

impl TfIdfVectorizer {
    /// Fit vocabulary and idf over `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: BTreeSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (col, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, col);
        }

        Self {
            vocabulary,
            idf,
            n_documents: documents.len(),
        }
    }

    /// Fit and transform in one pass.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<SparseVec>) {
        let vectorizer = Self::fit(documents);
        let vectors = documents
            .iter()
            .map(|d| vectorizer.transform(d.as_ref()))
            .collect();
        (vectorizer, vectors)
    }

    /// Vector for `document`. Terms outside the fitted vocabulary are ignored.
    pub fn transform(&self, document: &str) -> SparseVec {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(document) {
            if let Some(&col) = self.vocabulary.get(&token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }
        let mut vec = SparseVec::from_pairs(
            counts
                .into_iter()
                .map(|(col, tf)| (col, tf * self.idf[col]))
                .collect(),
        );
        vec.normalize();
        vec
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Column of `term`, if it is in the vocabulary.
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Idf weight of `term`, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column(term).map(|col| self.idf[col])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_drops_short_tokens_and_stopwords() {
        assert_eq!(
            tokenize("The 8 GB Phone, is a-ok!"),
            vec!["gb".to_string(), "phone".to_string(), "ok".to_string()]
        );
    }

    #[test]
    fn rarer_terms_get_higher_idf() {
        let docs = ["phone black", "phone white", "laptop silver"];
        let v = TfIdfVectorizer::fit(&docs);
        assert_eq!(v.vocabulary_size(), 5);
        assert!(v.idf("laptop").unwrap() > v.idf("phone").unwrap());
        // df = n gives ln(1) + 1
        let all = TfIdfVectorizer::fit(&["x1 phone", "phone"]);
        assert!((all.idf("phone").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn vectors_are_unit_length() {
        let docs = ["red phone phone", "blue laptop"];
        let (_, vecs) = TfIdfVectorizer::fit_transform(&docs);
        for v in &vecs {
            assert!((v.norm_sq() - 1.0).abs() < 1e-9);
        }
        assert_eq!(vecs[0].dot(&vecs[1]), 0.0);
    }

    #[test]
    fn unknown_terms_are_ignored() {
        let v = TfIdfVectorizer::fit(&["phone"]);
        assert!(v.transform("tablet stylus").is_empty());
    }
}
