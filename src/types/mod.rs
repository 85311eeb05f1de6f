//! Shared data types for the product-lens library.

pub mod error;
pub mod product;

pub use error::{LensError, LensResult};
pub use product::{CatalogRow, Recommendation};

/// Maximum number of keywords returned by a single extraction.
pub const KEYWORD_CAP: usize = 5;

/// Default number of recommendations per query.
pub const DEFAULT_TOP_N: usize = 5;

/// Image file extensions accepted by the captioning endpoint.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Catalog columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "name",
    "brand",
    "description",
    "category",
    "price",
    "rating",
    "image_url",
];
