//! Product Lens: product-intent keyword extraction and content-based recommendations.
//!
//! Turns image captions or free text into a short list of canonical shopping keywords,
//! and recommends similar catalog products from description, brand, category, price
//! and rating features.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod index;
pub mod lexicon;
pub mod server;
pub mod types;

// Re-export commonly used types at the crate root
pub use catalog::{load_catalog, load_catalog_from_reader, Catalog};
pub use config::{load_config, resolve_config, ServiceConfig};
pub use engine::{
    extract_keywords, Extraction, KeywordExtractor, MatchStage, Recommender, ScoredMatch,
    SharedRecommender,
};
pub use index::{cosine_similarity, FeatureMatrix, MinMaxScaler, SimilarityMatrix, TfIdfVectorizer};
pub use lexicon::{
    Lexicon, LexiconBuilder, NoSynonyms, StaticThesaurus, SynonymSource, TermRole,
    TransliterationMap,
};
pub use server::{router, serve, AppState, Captioner, FixedCaptioner, HttpCaptioner};
pub use types::{
    CatalogRow, LensError, LensResult, Recommendation, DEFAULT_TOP_N, KEYWORD_CAP,
};
