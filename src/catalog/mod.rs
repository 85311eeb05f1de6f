//! The in-memory product catalog, immutable once loaded.

pub mod loader;

use std::collections::HashMap;

use crate::types::{CatalogRow, LensError, LensResult};

pub use loader::{load_catalog, load_catalog_from_reader};

/// Typed catalog rows plus a name lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    rows: Vec<CatalogRow>,
    /// name -> index of its first occurrence.
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Wrap validated rows. An empty row list is rejected.
    ///
    /// When names repeat, lookups resolve to the first row with that name.
    pub fn new(rows: Vec<CatalogRow>) -> LensResult<Self> {
        if rows.is_empty() {
            return Err(LensError::EmptyCatalog);
        }
        let mut by_name = HashMap::with_capacity(rows.len());
        let mut duplicates = 0usize;
        for (i, row) in rows.iter().enumerate() {
            if by_name.contains_key(&row.name) {
                duplicates += 1;
            } else {
                by_name.insert(row.name.clone(), i);
            }
        }
        if duplicates > 0 {
            log::warn!("Catalog has {duplicates} rows with duplicate names; first occurrence wins");
        }
        Ok(Self { rows, by_name })
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&CatalogRow> {
        self.rows.get(index)
    }

    /// Index of the first row named exactly `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
