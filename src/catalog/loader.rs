//! CSV catalog ingestion with typed, fail-fast row parsing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::types::{CatalogRow, LensError, LensResult, REQUIRED_COLUMNS};

use super::Catalog;

/// Column positions of the required fields, in `REQUIRED_COLUMNS` order.
struct ColumnMap([usize; 7]);

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> LensResult<Self> {
        let mut positions = [0usize; 7];
        for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column))
                .ok_or_else(|| LensError::MissingColumn(column.to_string()))?;
        }
        Ok(Self(positions))
    }

    fn field<'r>(&self, record: &'r StringRecord, which: usize, row: u64) -> LensResult<&'r str> {
        record
            .get(self.0[which])
            .map(str::trim)
            .ok_or_else(|| LensError::InvalidRow {
                row,
                reason: format!("missing field '{}'", REQUIRED_COLUMNS[which]),
            })
    }

    fn number(&self, record: &StringRecord, which: usize, row: u64) -> LensResult<f64> {
        let raw = self.field(record, which, row)?;
        raw.parse::<f64>().map_err(|_| LensError::InvalidRow {
            row,
            reason: format!("'{}' is not a number: {raw:?}", REQUIRED_COLUMNS[which]),
        })
    }

    fn parse(&self, record: &StringRecord, row: u64) -> LensResult<CatalogRow> {
        let parsed = CatalogRow {
            name: self.field(record, 0, row)?.to_string(),
            brand: self.field(record, 1, row)?.to_string(),
            description: self.field(record, 2, row)?.to_string(),
            category: self.field(record, 3, row)?.to_string(),
            price: self.number(record, 4, row)?,
            rating: self.number(record, 5, row)?,
            image_url: self.field(record, 6, row)?.to_string(),
        };
        parsed
            .validate()
            .map_err(|reason| LensError::InvalidRow { row, reason })?;
        Ok(parsed)
    }
}

/// Load a catalog from a CSV file.
pub fn load_catalog(path: &Path) -> LensResult<Catalog> {
    let file = File::open(path)?;
    let catalog = load_catalog_from_reader(file)?;
    log::info!("Loaded {} products from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load a catalog from any CSV source with a header row.
///
/// Extra columns are ignored. The first malformed row rejects the catalog.
pub fn load_catalog_from_reader(reader: impl Read) -> LensResult<Catalog> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let columns = ColumnMap::from_headers(reader.headers()?)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(columns.parse(&record, i as u64 + 1)?);
    }
    Catalog::new(rows)
}
