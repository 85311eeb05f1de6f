//! Fluent API for building a Lexicon from seeds and a synonym source.

use std::collections::BTreeSet;

use super::seeds::{SEED_BRANDS, SEED_PRODUCT_TYPES, SEED_SPECIFICATIONS};
use super::synonyms::SynonymSource;
use super::Lexicon;

/// Fluent builder for constructing a Lexicon.
pub struct LexiconBuilder {
    product_types: Vec<String>,
    brands: Vec<String>,
    specifications: Vec<String>,
}

impl LexiconBuilder {
    /// Create a builder with no seeds.
    pub fn new() -> Self {
        Self {
            product_types: Vec::new(),
            brands: Vec::new(),
            specifications: Vec::new(),
        }
    }

    /// Create a builder pre-loaded with the curated electronics seeds.
    pub fn with_default_seeds() -> Self {
        let mut builder = Self::new();
        builder
            .product_types(SEED_PRODUCT_TYPES.iter().copied())
            .brands(SEED_BRANDS.iter().copied())
            .specifications(SEED_SPECIFICATIONS.iter().copied());
        builder
    }

    /// Add product-type seeds.
    pub fn product_types<I, S>(&mut self, seeds: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.product_types
            .extend(seeds.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Add brand seeds.
    pub fn brands<I, S>(&mut self, seeds: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.brands
            .extend(seeds.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Add specification seeds.
    pub fn specifications<I, S>(&mut self, seeds: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.specifications
            .extend(seeds.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Build the final Lexicon, expanding product types through `source`.
    ///
    /// A source failure for one term is logged and skipped; the seed itself
    /// is always kept.
    pub fn build<S: SynonymSource + ?Sized>(&self, source: &S) -> Lexicon {
        let mut product_types = BTreeSet::new();
        for seed in &self.product_types {
            let Some(term) = normalize_term(seed) else {
                continue;
            };
            match source.synonyms(&term) {
                Ok(alternates) => {
                    product_types.extend(alternates.iter().filter_map(|a| normalize_term(a)));
                }
                Err(e) => {
                    log::warn!("Synonym lookup failed for '{term}': {e}");
                }
            }
            product_types.insert(term);
        }

        let brands = self
            .brands
            .iter()
            .filter_map(|b| normalize_term(b))
            .collect();
        let specifications = self
            .specifications
            .iter()
            .filter_map(|s| normalize_term(s))
            .collect();

        let lexicon = Lexicon {
            product_types,
            brands,
            specifications,
        };
        log::info!(
            "Built lexicon: {} product types, {} brands, {} specifications",
            lexicon.product_types.len(),
            lexicon.brands.len(),
            lexicon.specifications.len()
        );
        lexicon
    }
}

impl Default for LexiconBuilder {
    fn default() -> Self {
        Self::with_default_seeds()
    }
}

/// Lowercase, map `_` and `-` to spaces, trim. Empty terms are dropped.
fn normalize_term(raw: &str) -> Option<String> {
    let term = raw.to_lowercase().replace(['_', '-'], " ");
    let term = term.trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_string())
    }
}
