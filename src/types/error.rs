//! Error types for the product-lens library.

use thiserror::Error;

/// All errors that can occur in the product-lens library.
#[derive(Error, Debug)]
pub enum LensError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file could not be parsed as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required catalog column is absent from the header row.
    #[error("Catalog is missing required column: {0}")]
    MissingColumn(String),

    /// A catalog row has a missing or mistyped field. `row` is 1-based and
    /// does not count the header.
    #[error("Invalid catalog row {row}: {reason}")]
    InvalidRow { row: u64, reason: String },

    /// The catalog contains no products.
    #[error("Catalog contains no products")]
    EmptyCatalog,

    /// No catalog product carries this name.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The captioning collaborator failed.
    #[error("Captioning failed: {0}")]
    Caption(String),

    /// Uploaded bytes are not a decodable image of an allowed type.
    #[error("Invalid image file")]
    InvalidImage,

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for product-lens operations.
pub type LensResult<T> = Result<T, LensError>;
