//! Feature-space structures built once over the catalog and read-only after.

pub mod feature_space;
pub mod scaler;
pub mod similarity;
pub mod tfidf;

pub use feature_space::{FeatureMatrix, FeatureRow};
pub use scaler::MinMaxScaler;
pub use similarity::{cosine_similarity, SimilarityMatrix};
pub use tfidf::{tokenize, SparseVec, TfIdfVectorizer};
