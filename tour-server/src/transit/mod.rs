//! Transit network lookup.
//!
//! Provides the station directory used when loading catalogs, and the
//! resolver that turns a pair of locations into a ride with a duration and
//! a fare.

mod error;
mod resolver;
mod table;

pub use error::{RouteNotFound, TransitError};
pub use resolver::{ResolverConfig, TransitResolver, TransportSegment};
pub use table::{
    NetworkFile, RouteRecord, StationDirectory, StationRecord, TransitEdge, TransitSource,
    TransitTable,
};
