//! In-memory transit network.
//!
//! Holds the station directory (name to network id) and the static route
//! table. Each undirected route is stored once, in whatever orientation the
//! data file gave it.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Station, StationId};

use super::error::TransitError;

/// Static average cost of riding between two stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitEdge {
    pub minutes: u32,
    pub cost: u64,
    pub transfers: u32,
}

/// A queryable source of transit edges.
///
/// Implementations only need to answer for the orientation they store;
/// callers try both.
pub trait TransitSource: Send + Sync {
    /// Look up the edge stored under `(from, to)`.
    fn route(&self, from: StationId, to: StationId) -> Option<TransitEdge>;
}

/// Maps station names to network stations.
pub trait StationDirectory {
    /// Look up a station by its display name.
    fn station(&self, name: &str) -> Option<Station>;
}

/// Station entry in a network file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    pub id: u32,
}

/// Route entry in a network file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRecord {
    pub from_id: u32,
    pub to_id: u32,
    pub minutes: u32,
    pub cost: u64,
    #[serde(default)]
    pub transfers: u32,
}

/// On-disk shape of a transit network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkFile {
    pub stations: Vec<StationRecord>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
}

/// Stations and routes held in memory.
#[derive(Debug, Clone, Default)]
pub struct TransitTable {
    stations: HashMap<String, StationId>,
    routes: HashMap<(StationId, StationId), TransitEdge>,
}

impl TransitTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a station name.
    pub fn add_station(&mut self, name: impl Into<String>, id: StationId) {
        self.stations.insert(name.into(), id);
    }

    /// Register a route in the orientation given.
    pub fn add_route(&mut self, from: StationId, to: StationId, edge: TransitEdge) {
        self.routes.insert((from, to), edge);
    }

    /// Look up a station id by name.
    pub fn station_id(&self, name: &str) -> Option<StationId> {
        self.stations.get(name).copied()
    }

    /// Number of registered stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of stored routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Build a table from the network file format, validating references.
    pub fn from_network(network: NetworkFile) -> Result<Self, TransitError> {
        let mut table = Self::new();
        let mut ids = HashSet::new();

        for record in network.stations {
            let id = StationId(record.id);
            if table.stations.contains_key(&record.name) || ids.contains(&id) {
                return Err(TransitError::DuplicateStation {
                    name: record.name,
                    id,
                });
            }
            ids.insert(id);
            table.add_station(record.name, id);
        }

        for route in network.routes {
            let from = StationId(route.from_id);
            let to = StationId(route.to_id);
            for id in [from, to] {
                if !ids.contains(&id) {
                    return Err(TransitError::UnknownStationId(id));
                }
            }
            table.add_route(
                from,
                to,
                TransitEdge {
                    minutes: route.minutes,
                    cost: route.cost,
                    transfers: route.transfers,
                },
            );
        }

        Ok(table)
    }

    /// Parse a network from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, TransitError> {
        let network: NetworkFile = serde_json::from_str(json)?;
        Self::from_network(network)
    }

    /// Load a network from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TransitError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TransitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl TransitSource for TransitTable {
    fn route(&self, from: StationId, to: StationId) -> Option<TransitEdge> {
        self.routes.get(&(from, to)).copied()
    }
}

impl StationDirectory for TransitTable {
    fn station(&self, name: &str) -> Option<Station> {
        self.station_id(name).map(|id| Station::new(name, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const NETWORK: &str = r#"{
        "stations": [
            {"name": "Ueno", "id": 1},
            {"name": "Shibuya", "id": 2},
            {"name": "Asakusa", "id": 3}
        ],
        "routes": [
            {"from_id": 1, "to_id": 2, "minutes": 30, "cost": 200, "transfers": 1},
            {"from_id": 3, "to_id": 1, "minutes": 10, "cost": 170}
        ]
    }"#;

    #[test]
    fn parse_network() {
        let table = TransitTable::from_json_str(NETWORK).unwrap();
        assert_eq!(table.station_count(), 3);
        assert_eq!(table.route_count(), 2);
        assert_eq!(table.station_id("Shibuya"), Some(StationId(2)));
        assert!(table.station_id("Odaiba").is_none());
    }

    #[test]
    fn routes_keep_file_orientation() {
        let table = TransitTable::from_json_str(NETWORK).unwrap();
        let edge = table.route(StationId(1), StationId(2)).unwrap();
        assert_eq!(
            edge,
            TransitEdge {
                minutes: 30,
                cost: 200,
                transfers: 1
            }
        );
        assert!(table.route(StationId(2), StationId(1)).is_none());
        // transfers default to zero
        assert_eq!(table.route(StationId(3), StationId(1)).unwrap().transfers, 0);
    }

    #[test]
    fn directory_builds_stations() {
        let table = TransitTable::from_json_str(NETWORK).unwrap();
        let ueno = table.station("Ueno").unwrap();
        assert_eq!(ueno.id(), StationId(1));
        assert_eq!(ueno.name(), "Ueno");
        assert!(table.station("Nowhere").is_none());
    }

    #[test]
    fn rejects_unknown_route_station() {
        let json = r#"{
            "stations": [{"name": "Ueno", "id": 1}],
            "routes": [{"from_id": 1, "to_id": 9, "minutes": 5, "cost": 100}]
        }"#;
        let err = TransitTable::from_json_str(json).unwrap_err();
        assert!(matches!(err, TransitError::UnknownStationId(StationId(9))));
    }

    #[test]
    fn rejects_duplicate_station() {
        let json = r#"{
            "stations": [{"name": "Ueno", "id": 1}, {"name": "Ueno", "id": 2}]
        }"#;
        let err = TransitTable::from_json_str(json).unwrap_err();
        assert!(matches!(err, TransitError::DuplicateStation { .. }));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(NETWORK.as_bytes()).unwrap();

        let table = TransitTable::load(file.path()).unwrap();
        assert_eq!(table.station_count(), 3);
    }

    #[test]
    fn load_missing_file() {
        let err = TransitTable::load("/nonexistent/network.json").unwrap_err();
        assert!(matches!(err, TransitError::Io { .. }));
    }
}
