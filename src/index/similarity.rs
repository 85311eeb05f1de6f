//! Pairwise cosine similarity over a feature matrix.

use super::feature_space::FeatureMatrix;

/// Dense, symmetric `n x n` similarity matrix stored row-major.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute similarities for every pair of rows.
    ///
    /// The diagonal is exactly 1.0 for rows with a non-zero feature vector and
    /// 0.0 for all-zero rows.
    pub fn build(features: &FeatureMatrix) -> Self {
        let rows = features.rows();
        let n = rows.len();
        let norms: Vec<f64> = rows.iter().map(|r| r.norm()).collect();
        let mut values = vec![0.0f64; n * n];

        for i in 0..n {
            values[i * n + i] = if norms[i] > 0.0 { 1.0 } else { 0.0 };
            for j in (i + 1)..n {
                let denom = norms[i] * norms[j];
                let sim = if denom == 0.0 {
                    0.0
                } else {
                    (rows[i].dot(&rows[j]) / denom).clamp(-1.0, 1.0)
                };
                values[i * n + j] = sim;
                values[j * n + i] = sim;
            }
        }

        Self { n, values }
    }

    /// Similarities of row `index` against every row, in catalog order.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index < self.n {
            Some(&self.values[index * self.n..(index + 1) * self.n])
        } else {
            None
        }
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.values[i * self.n + j])
        } else {
            None
        }
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.n
    }
}

/// Compute cosine similarity between two dense vectors.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for i in 0..a.len().min(b.len()) {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}
