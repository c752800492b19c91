//! Catalog loading errors.

use std::path::PathBuf;

use crate::domain::DomainError;

/// Errors that can occur while loading an activity catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be opened
    #[error("failed to open catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV structure could not be read
    #[error("malformed catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    /// An activity names a station the transit network does not know
    #[error("row {row}: unknown station {station:?}")]
    UnknownStation { row: usize, station: String },

    /// A field holds an invalid value
    #[error("row {row}: {source}")]
    InvalidField {
        row: usize,
        #[source]
        source: DomainError,
    },
}
