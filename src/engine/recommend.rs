//! Content-based recommendations with a distinct-base-model constraint.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::catalog::{load_catalog, Catalog};
use crate::index::{FeatureMatrix, SimilarityMatrix};
use crate::types::{LensResult, Recommendation};

/// A recommended row with its similarity to the query product.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    /// Catalog row index.
    pub index: usize,
    pub similarity: f64,
}

/// Catalog, feature space and similarity matrix, built once and read-only.
#[derive(Debug)]
pub struct Recommender {
    catalog: Catalog,
    features: FeatureMatrix,
    similarity: SimilarityMatrix,
    /// Base model per catalog row, precomputed for the diversity filter.
    base_models: Vec<String>,
}

impl Recommender {
    /// Build the feature space and similarity matrix for `catalog`.
    pub fn build(catalog: Catalog) -> LensResult<Self> {
        let features = FeatureMatrix::build(catalog.rows())?;
        let similarity = SimilarityMatrix::build(&features);
        let base_models = catalog
            .rows()
            .iter()
            .map(|r| r.base_model().to_string())
            .collect();
        Ok(Self {
            catalog,
            features,
            similarity,
            base_models,
        })
    }

    /// Load a CSV catalog and build a recommender over it.
    pub fn from_csv(path: &Path) -> LensResult<Self> {
        Self::build(load_catalog(path)?)
    }

    /// Up to `top_n` products similar to `product_name`, at most one per base
    /// model, never sharing the query's own base model.
    ///
    /// An unknown product name yields an empty list.
    pub fn recommend(&self, product_name: &str, top_n: usize) -> Vec<Recommendation> {
        self.recommend_scored(product_name, top_n)
            .iter()
            .filter_map(|m| self.catalog.get(m.index))
            .map(Recommendation::from)
            .collect()
    }

    /// Like [`recommend`](Self::recommend) but keeps row indices and scores.
    pub fn recommend_scored(&self, product_name: &str, top_n: usize) -> Vec<ScoredMatch> {
        let Some(query) = self.catalog.position(product_name) else {
            log::debug!("No catalog entry named {product_name:?}");
            return Vec::new();
        };
        let Some(scores) = self.similarity.row(query) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
        // Stable: equal scores keep catalog order.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(self.base_models[query].as_str());

        let mut matches = Vec::with_capacity(top_n);
        for (index, similarity) in ranked {
            if matches.len() >= top_n {
                break;
            }
            if seen.insert(self.base_models[index].as_str()) {
                matches.push(ScoredMatch { index, similarity });
            }
        }
        matches
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}

/// The live recommender, replaceable as a whole without blocking readers
/// for longer than a pointer copy.
#[derive(Debug)]
pub struct SharedRecommender {
    current: RwLock<Arc<Recommender>>,
}

impl SharedRecommender {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            current: RwLock::new(Arc::new(recommender)),
        }
    }

    /// The snapshot to serve the current request from.
    pub fn current(&self) -> Arc<Recommender> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Replace the live recommender. Readers holding the old snapshot keep it.
    pub fn swap(&self, recommender: Recommender) -> Arc<Recommender> {
        let next = Arc::new(recommender);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::clone(&next);
        next
    }

    /// Rebuild from a CSV file, swapping only if the rebuild succeeds.
    pub fn reload(&self, path: &Path) -> LensResult<Arc<Recommender>> {
        let rebuilt = Recommender::from_csv(path)?;
        log::info!(
            "Reloaded catalog from {}: {} products",
            path.display(),
            rebuilt.catalog().len()
        );
        Ok(self.swap(rebuilt))
    }
}
