//! Canonical product vocabulary: product types, brands and specification
//! tokens, plus the stopword set and transliteration map used alongside it.

pub mod builder;
pub mod seeds;
pub mod stopwords;
pub mod synonyms;
pub mod transliteration;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::LensResult;

pub use builder::LexiconBuilder;
pub use stopwords::{is_stopword, is_tfidf_stopword};
pub use synonyms::{NoSynonyms, StaticThesaurus, SynonymSource};
pub use transliteration::TransliterationMap;

/// The role a vocabulary term plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermRole {
    ProductType,
    Brand,
    Specification,
}

impl TermRole {
    /// Parse a role from its CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "product" | "product_type" | "product-type" | "products" => Some(Self::ProductType),
            "brand" | "brands" => Some(Self::Brand),
            "spec" | "specification" | "specifications" => Some(Self::Specification),
            _ => None,
        }
    }

    /// Stable name used in output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProductType => "product_type",
            Self::Brand => "brand",
            Self::Specification => "specification",
        }
    }
}

/// Immutable vocabulary. Every member is lowercase and trimmed.
///
/// Sets are ordered so that substring scans over them are reproducible.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Lexicon {
    product_types: BTreeSet<String>,
    brands: BTreeSet<String>,
    specifications: BTreeSet<String>,
}

impl Lexicon {
    /// Build a lexicon from explicit seeds and a synonym source.
    pub fn build<P, B, S, Src>(
        seed_product_types: P,
        seed_brands: B,
        seed_specifications: S,
        source: &Src,
    ) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
        Src: SynonymSource + ?Sized,
    {
        let mut builder = LexiconBuilder::new();
        builder
            .product_types(seed_product_types)
            .brands(seed_brands)
            .specifications(seed_specifications);
        builder.build(source)
    }

    /// The curated seeds expanded through the built-in thesaurus, optionally
    /// extended from a JSON thesaurus file.
    pub fn standard(thesaurus_path: Option<&std::path::Path>) -> LensResult<Self> {
        let mut thesaurus = StaticThesaurus::builtin();
        if let Some(path) = thesaurus_path {
            thesaurus.merge(StaticThesaurus::from_json_file(path)?);
        }
        Ok(LexiconBuilder::with_default_seeds().build(&thesaurus))
    }

    pub fn is_product_type(&self, term: &str) -> bool {
        self.product_types.contains(term)
    }

    pub fn is_brand(&self, term: &str) -> bool {
        self.brands.contains(term)
    }

    pub fn is_specification(&self, term: &str) -> bool {
        self.specifications.contains(term)
    }

    /// Product types in lexicographic order.
    pub fn product_types(&self) -> impl Iterator<Item = &str> {
        self.product_types.iter().map(String::as_str)
    }

    /// Brands in lexicographic order.
    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.brands.iter().map(String::as_str)
    }

    /// Specifications in lexicographic order.
    pub fn specifications(&self) -> impl Iterator<Item = &str> {
        self.specifications.iter().map(String::as_str)
    }

    /// Terms of a single role in lexicographic order.
    pub fn terms(&self, role: TermRole) -> Vec<&str> {
        match role {
            TermRole::ProductType => self.product_types().collect(),
            TermRole::Brand => self.brands().collect(),
            TermRole::Specification => self.specifications().collect(),
        }
    }

    /// Number of terms per role: (product types, brands, specifications).
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.product_types.len(),
            self.brands.len(),
            self.specifications.len(),
        )
    }
}
