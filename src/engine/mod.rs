//! High-level operations: keyword extraction and recommendation.

pub mod extract;
pub mod recommend;

pub use extract::{extract_keywords, Extraction, KeywordExtractor, MatchStage};
pub use recommend::{Recommender, ScoredMatch, SharedRecommender};
