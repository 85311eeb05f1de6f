//! Hybrid feature space: TF-IDF text block fused with scaled price and rating.

use crate::types::{CatalogRow, LensError, LensResult};

use super::scaler::MinMaxScaler;
use super::tfidf::{SparseVec, TfIdfVectorizer};

/// One catalog row in feature space.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Unit-length TF-IDF vector over the row's combined text.
    pub lexical: SparseVec,
    /// `[normalized price, normalized rating]`.
    pub numeric: [f64; 2],
}

impl FeatureRow {
    pub fn normalized_price(&self) -> f64 {
        self.numeric[0]
    }

    pub fn normalized_rating(&self) -> f64 {
        self.numeric[1]
    }

    /// Dot product across both blocks.
    pub fn dot(&self, other: &FeatureRow) -> f64 {
        self.lexical.dot(&other.lexical)
            + self.numeric[0] * other.numeric[0]
            + self.numeric[1] * other.numeric[1]
    }

    /// L2 norm across both blocks.
    pub fn norm(&self) -> f64 {
        (self.lexical.norm_sq() + self.numeric[0].powi(2) + self.numeric[1].powi(2)).sqrt()
    }

    /// Cosine similarity with `other`; 0.0 if either row is all zeros.
    pub fn cosine(&self, other: &FeatureRow) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            0.0
        } else {
            (self.dot(other) / denom).clamp(-1.0, 1.0)
        }
    }
}

/// Feature rows for a whole catalog plus the frozen models that produced them.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    rows: Vec<FeatureRow>,
    vectorizer: TfIdfVectorizer,
    price_scaler: MinMaxScaler,
    rating_scaler: MinMaxScaler,
}

impl FeatureMatrix {
    /// Fit the vectorizer and scalers over `catalog` and embed every row.
    ///
    /// Any malformed row fails the whole build.
    pub fn build(catalog: &[CatalogRow]) -> LensResult<Self> {
        if catalog.is_empty() {
            return Err(LensError::EmptyCatalog);
        }
        for (i, row) in catalog.iter().enumerate() {
            row.validate().map_err(|reason| LensError::InvalidRow {
                row: i as u64 + 1,
                reason,
            })?;
        }

        let texts: Vec<String> = catalog.iter().map(CatalogRow::combined_text).collect();
        let (vectorizer, lexical) = TfIdfVectorizer::fit_transform(&texts);

        let prices: Vec<f64> = catalog.iter().map(|r| r.price).collect();
        let ratings: Vec<f64> = catalog.iter().map(|r| r.rating).collect();
        let price_scaler = MinMaxScaler::fit(&prices);
        let rating_scaler = MinMaxScaler::fit(&ratings);

        let rows = lexical
            .into_iter()
            .zip(catalog)
            .map(|(lexical, row)| FeatureRow {
                lexical,
                numeric: [
                    price_scaler.transform(row.price),
                    rating_scaler.transform(row.rating),
                ],
            })
            .collect();

        log::info!(
            "Built feature space: {} rows, {} vocabulary terms",
            catalog.len(),
            vectorizer.vocabulary_size()
        );

        Ok(Self {
            rows,
            vectorizer,
            price_scaler,
            rating_scaler,
        })
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&FeatureRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row `index` expanded to all `column_count()` columns, lexical block first.
    pub fn dense_row(&self, index: usize) -> Option<Vec<f64>> {
        let row = self.rows.get(index)?;
        let vocab = self.vectorizer.vocabulary_size();
        let mut dense = vec![0.0; vocab + 2];
        for &(col, w) in row.lexical.entries() {
            dense[col] = w;
        }
        dense[vocab] = row.numeric[0];
        dense[vocab + 1] = row.numeric[1];
        Some(dense)
    }

    /// Lexical columns plus the two numeric columns.
    pub fn column_count(&self) -> usize {
        self.vectorizer.vocabulary_size() + 2
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn price_scaler(&self) -> &MinMaxScaler {
        &self.price_scaler
    }

    pub fn rating_scaler(&self) -> &MinMaxScaler {
        &self.rating_scaler
    }
}
