//! Transit error types.

use std::path::PathBuf;

use crate::domain::StationId;

/// No transit edge exists between two locations.
///
/// This is local to one candidate ride: the tour being extended rejects the
/// activity and the search carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no route between {from} and {to}")]
pub struct RouteNotFound {
    pub from: String,
    pub to: String,
}

/// Errors raised while loading a transit network file.
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    /// Network file could not be read
    #[error("failed to read transit network {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network file is not valid JSON for the expected shape
    #[error("failed to parse transit network: {0}")]
    Json(#[from] serde_json::Error),

    /// Two stations share a name or an id
    #[error("duplicate station {name:?} ({id})")]
    DuplicateStation { name: String, id: StationId },

    /// A route references a station id that is not listed
    #[error("route references unknown station {0}")]
    UnknownStationId(StationId),
}
