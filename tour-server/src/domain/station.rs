//! Places, stations and transit-network identifiers.

use std::fmt;

/// Identifier of a station in the transit network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named place that is also a stop on the transit network.
///
/// Stations are only ever built from a station directory lookup, so every
/// `Station` carries an id the transit source knows about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Station {
    name: String,
    id: StationId,
}

impl Station {
    /// Create a station from its display name and network id.
    pub fn new(name: impl Into<String>, id: StationId) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> StationId {
        self.id
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Station", self.name)
    }
}

/// Where an event takes place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// A plain place with no transit connection.
    Place { name: String },
    /// A transit station.
    Station(Station),
}

impl Location {
    /// Create a plain place.
    pub fn place(name: impl Into<String>) -> Self {
        Location::Place { name: name.into() }
    }

    /// Returns the bare name of the location.
    pub fn name(&self) -> &str {
        match self {
            Location::Place { name } => name,
            Location::Station(station) => station.name(),
        }
    }

    /// Returns the station if this location is on the transit network.
    pub fn as_station(&self) -> Option<&Station> {
        match self {
            Location::Place { .. } => None,
            Location::Station(station) => Some(station),
        }
    }

    /// True if both locations name the same place.
    ///
    /// Moving between the same place needs no transport.
    pub fn same_place(&self, other: &Location) -> bool {
        self.name() == other.name()
    }
}

impl From<Station> for Location {
    fn from(station: Station) -> Self {
        Location::Station(station)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Place { name } => f.write_str(name),
            Location::Station(station) => write!(f, "{station}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_display() {
        let shibuya = Station::new("Shibuya", StationId(7));
        assert_eq!(shibuya.to_string(), "Shibuya Station");
        assert_eq!(Location::from(shibuya).to_string(), "Shibuya Station");
        assert_eq!(Location::place("Hotel").to_string(), "Hotel");
    }

    #[test]
    fn same_place_compares_names() {
        let a = Location::from(Station::new("Ueno", StationId(1)));
        let b = Location::from(Station::new("Ueno", StationId(1)));
        let c = Location::from(Station::new("Asakusa", StationId(2)));
        assert!(a.same_place(&b));
        assert!(!a.same_place(&c));
        assert!(Location::place("Ueno").same_place(&a));
    }

    #[test]
    fn as_station() {
        let station = Station::new("Ueno", StationId(1));
        assert_eq!(Location::from(station.clone()).as_station(), Some(&station));
        assert!(Location::place("Park").as_station().is_none());
    }
}
