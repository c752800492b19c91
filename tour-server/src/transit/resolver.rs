//! Resolving pairs of locations into transport segments.
//!
//! Transit costs are static, so resolved pairs are memoized in a concurrent
//! cache keyed by the unordered station pair. Branches of a parallel search
//! share one resolver; racing lookups of the same pair compute the value once.

use chrono::Duration;
use moka::sync::Cache as MokaCache;
use tracing::{trace, warn};

use crate::domain::{Location, Station, StationId};

use super::error::RouteNotFound;
use super::table::{TransitEdge, TransitSource};

/// Unordered station pair, smaller id first.
type PairKey = (StationId, StationId);

/// Duration, cost and transfer count of a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportSegment {
    pub duration: Duration,
    pub cost: u64,
    pub transfers: u32,
}

impl TransportSegment {
    /// The degenerate segment for staying put.
    pub fn zero() -> Self {
        Self {
            duration: Duration::zero(),
            cost: 0,
            transfers: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.duration.is_zero() && self.cost == 0
    }
}

impl From<TransitEdge> for TransportSegment {
    fn from(edge: TransitEdge) -> Self {
        Self {
            duration: Duration::minutes(i64::from(edge.minutes)),
            cost: edge.cost,
            transfers: edge.transfers,
        }
    }
}

/// Configuration for the resolver cache.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum number of cached station pairs.
    pub max_capacity: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

/// Transit source with memoized, orientation-free lookups.
pub struct TransitResolver<S> {
    source: S,
    /// `None` records a pair known to have no route.
    cache: MokaCache<PairKey, Option<TransportSegment>>,
}

impl<S: TransitSource> TransitResolver<S> {
    /// Create a resolver over `source`.
    pub fn new(source: S, config: &ResolverConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();
        Self { source, cache }
    }

    /// Resolve the ride between two stations.
    ///
    /// The same station resolves to the zero segment without consulting the
    /// source.
    pub fn resolve(&self, a: &Station, b: &Station) -> Result<TransportSegment, RouteNotFound> {
        if a.id() == b.id() {
            return Ok(TransportSegment::zero());
        }

        let key = pair_key(a.id(), b.id());
        let segment = self.cache.get_with(key, || self.lookup(key));

        segment.ok_or_else(|| {
            trace!(from = %a, to = %b, "no transit edge");
            RouteNotFound {
                from: a.to_string(),
                to: b.to_string(),
            }
        })
    }

    /// Resolve the ride between two arbitrary locations.
    ///
    /// Locations naming the same place need no ride. A plain place has no
    /// transit connection to anywhere else.
    pub fn resolve_locations(
        &self,
        from: &Location,
        to: &Location,
    ) -> Result<TransportSegment, RouteNotFound> {
        if from.same_place(to) {
            return Ok(TransportSegment::zero());
        }
        match (from.as_station(), to.as_station()) {
            (Some(a), Some(b)) => self.resolve(a, b),
            _ => Err(RouteNotFound {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    /// Query the source in both orientations.
    fn lookup(&self, (a, b): PairKey) -> Option<TransportSegment> {
        let segment = self
            .source
            .route(a, b)
            .or_else(|| self.source.route(b, a))
            .map(TransportSegment::from);
        if segment.is_none() {
            warn!(from = %a, to = %b, "transit network has no route between stations");
        }
        segment
    }

    /// Access the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Approximate number of cached pairs (for monitoring).
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

fn pair_key(a: StationId, b: StationId) -> PairKey {
    if a <= b { (a, b) } else { (b, a) }
}
