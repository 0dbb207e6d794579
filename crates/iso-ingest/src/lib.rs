//! Dataset ingestion for the standardizer.
//!
//! Finds input files and reads them into Polars DataFrames. The reader is
//! picked from the file extension:
//!
//! | Extension                             | Reader                         |
//! |---------------------------------------|--------------------------------|
//! | `.csv`                                | Polars CSV, one header row     |
//! | `.json`                               | Polars JSON, array of records  |
//! | `.parquet`                            | Polars Parquet                 |
//! | `.txt`                                | fixed-width text               |
//! | `.xlsx` `.xlsm` `.xlsb` `.xls` `.ods` | first worksheet via calamine   |
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use iso_ingest::{discover_datasets, read_dataset};
//!
//! for path in discover_datasets(Path::new("data/"))? {
//!     let df = read_dataset(&path)?;
//!     println!("{}: {} rows", path.display(), df.height());
//! }
//! ```

mod discovery;
mod error;
mod format;
mod readers;

// === Error Types ===
pub use error::{IngestError, Result};

// === Formats ===
pub use format::SourceFormat;

// === Readers ===
pub use readers::{
    parse_fixed_width, read_csv, read_dataset, read_dataset_as, read_excel, read_fixed_width,
    read_json, read_parquet,
};

// === File Discovery ===
pub use discovery::{discover_datasets, list_dataset_files};
