//! Reference table loading.
//!
//! The default table is the embedded ISO-3166 CSV. A replacement file can be
//! named with `ISO3166_REFERENCE_FILE` or passed explicitly.

use std::collections::HashSet;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::attribute::ReferenceAttribute;
use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::paths::reference_override;
use crate::table::{ReferenceEntry, ReferenceTable};

/// Load the table named by `ISO3166_REFERENCE_FILE`, or the embedded one.
pub fn load_reference() -> Result<ReferenceTable> {
    match reference_override() {
        Some(path) => load_from_path(&path),
        None => load_default(),
    }
}

/// Load the embedded ISO-3166 table.
pub fn load_default() -> Result<ReferenceTable> {
    load_from_str(embedded::ISO3166_COUNTRIES, embedded::ISO3166_SOURCE)
}

/// Load a reference table from a CSV file on disk.
pub fn load_from_path(path: &Path) -> Result<ReferenceTable> {
    if !path.exists() {
        return Err(StandardsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| StandardsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&content, &path.display().to_string())
}

/// Load a reference table from CSV text.
///
/// Required headers: `name`, `official`, `alpha-2`; `alpha-3` is optional.
/// Every field is read as a string, so a code such as `NA` stays `NA`.
pub fn load_from_str(content: &str, origin: &str) -> Result<ReferenceTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|source| csv_error(origin, source))?
        .clone();
    let columns = ColumnPositions::locate(&headers, origin)?;

    let mut entries = Vec::new();
    let mut seen_codes = HashSet::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| csv_error(origin, source))?;
        let row = idx + 1;
        let entry = columns.entry(&record, row, origin)?;

        if !seen_codes.insert(entry.alpha2.to_ascii_uppercase()) {
            warn!(
                origin = %origin,
                row,
                alpha2 = %entry.alpha2,
                "Duplicate alpha-2 code in reference table"
            );
        }
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(StandardsError::Empty {
            origin: origin.to_string(),
        });
    }

    debug!(origin = %origin, entries = entries.len(), "Loaded reference table");
    Ok(ReferenceTable::new(entries, origin))
}

fn csv_error(origin: &str, source: csv::Error) -> StandardsError {
    StandardsError::CsvRead {
        origin: origin.to_string(),
        source,
    }
}

/// Header positions of the reference columns.
struct ColumnPositions {
    name: usize,
    official: usize,
    alpha2: usize,
    alpha3: Option<usize>,
}

impl ColumnPositions {
    fn locate(headers: &StringRecord, origin: &str) -> Result<Self> {
        let find = |attr: ReferenceAttribute| {
            headers.iter().position(|header| {
                header
                    .trim_matches('\u{feff}')
                    .trim()
                    .eq_ignore_ascii_case(attr.column_name())
            })
        };
        let require = |attr: ReferenceAttribute| {
            find(attr).ok_or_else(|| StandardsError::MissingColumn {
                column: attr.column_name(),
                origin: origin.to_string(),
            })
        };

        Ok(Self {
            name: require(ReferenceAttribute::Name)?,
            official: require(ReferenceAttribute::Official)?,
            alpha2: require(ReferenceAttribute::Alpha2)?,
            alpha3: find(ReferenceAttribute::Alpha3),
        })
    }

    fn entry(&self, record: &StringRecord, row: usize, origin: &str) -> Result<ReferenceEntry> {
        let field = |pos: usize| record.get(pos).unwrap_or("").to_string();

        let alpha2 = field(self.alpha2);
        if alpha2.is_empty() {
            return Err(StandardsError::InvalidValue {
                field: "alpha-2",
                value: alpha2,
                row,
                origin: origin.to_string(),
            });
        }

        Ok(ReferenceEntry {
            name: field(self.name),
            official_name: field(self.official),
            alpha2,
            alpha3: self.alpha3.map(field).filter(|value| !value.is_empty()),
        })
    }
}
