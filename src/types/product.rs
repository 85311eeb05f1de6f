//! Catalog rows and the projection returned to recommendation callers.

use serde::{Deserialize, Serialize};

/// One product in the catalog. Identity is its `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub name: String,
    pub brand: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub rating: f64,
    pub image_url: String,
}

impl CatalogRow {
    /// Name truncated before the first `(`, trimmed.
    ///
    /// "Galaxy S21 (Black, 128GB)" and "Galaxy S21 (White, 256GB)" share the
    /// base model "Galaxy S21".
    pub fn base_model(&self) -> &str {
        base_model_of(&self.name)
    }

    /// Name, brand, description and category joined with single spaces.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name, self.brand, self.description, self.category
        )
    }

    /// Check the invariants feature building relies on.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("empty name".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("price must be a finite number >= 0, got {}", self.price));
        }
        if !self.rating.is_finite() {
            return Err(format!("rating must be a finite number, got {}", self.rating));
        }
        Ok(())
    }
}

/// Base model of an arbitrary product name.
pub fn base_model_of(name: &str) -> &str {
    match name.find('(') {
        Some(pos) => name[..pos].trim(),
        None => name.trim(),
    }
}

/// A recommended product as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub price: f64,
    pub image_url: String,
}

impl From<&CatalogRow> for Recommendation {
    fn from(row: &CatalogRow) -> Self {
        Self {
            name: row.name.clone(),
            price: row.price,
            image_url: row.image_url.clone(),
        }
    }
}
