//! Activity catalog loading.
//!
//! Parses the activity spreadsheet into `Activity` values. Every activity's
//! station is resolved against the transit network while loading, so a
//! catalog that names an unknown station fails before any search starts.

mod error;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use chrono::Duration;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{Activity, Category, ClockTime, DomainError, Location};
use crate::transit::StationDirectory;

pub use error::CatalogError;

/// One row of the activity spreadsheet.
///
/// Unknown columns (e.g. "Station Valid") are ignored.
#[derive(Debug, Clone, Deserialize)]
struct ActivityRecord {
    #[serde(rename = "Place Name")]
    name: String,
    #[serde(rename = "Train Station")]
    station: String,
    #[serde(rename = "Time at Place (hours)", default)]
    duration: String,
    #[serde(rename = "Cost (per person)", default)]
    cost: String,
    #[serde(rename = "Opens", default)]
    opens: String,
    #[serde(rename = "Closes", default)]
    closes: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Description", default)]
    description: String,
}

impl ActivityRecord {
    fn into_activity(
        self,
        row: usize,
        directory: &impl StationDirectory,
    ) -> Result<Activity, CatalogError> {
        let station_name = self.station.trim();
        let station = directory
            .station(station_name)
            .ok_or_else(|| CatalogError::UnknownStation {
                row,
                station: station_name.to_string(),
            })?;

        let invalid = |source: DomainError| CatalogError::InvalidField { row, source };

        let duration = parse_hours(&self.duration).map_err(invalid)?;
        let cost = parse_cost(&self.cost).map_err(invalid)?;
        let opens = ClockTime::parse_or(&self.opens, ClockTime::start_of_day())
            .map_err(|e| invalid(e.into()))?;
        let closes = ClockTime::parse_or(&self.closes, ClockTime::end_of_day())
            .map_err(|e| invalid(e.into()))?;

        let activity = Activity::new(
            self.name.trim(),
            Location::Station(station),
            duration,
            cost,
        )
        .and_then(|a| a.with_window(opens, closes))
        .map_err(invalid)?
        .with_category(Category::new(self.category))
        .with_description(self.description);

        Ok(activity)
    }
}

/// Parse a decimal number of hours, e.g. "1.5". Blank means zero.
pub fn parse_hours(s: &str) -> Result<Duration, DomainError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Duration::zero());
    }
    let hours: f64 = s
        .parse()
        .map_err(|_| DomainError::InvalidDuration(s.to_string()))?;
    if !hours.is_finite() || hours < 0.0 {
        return Err(DomainError::InvalidDuration(s.to_string()));
    }
    let secs = (hours * 3600.0).round();
    if secs > i64::MAX as f64 {
        return Err(DomainError::InvalidDuration(s.to_string()));
    }
    Duration::try_seconds(secs as i64).ok_or_else(|| DomainError::InvalidDuration(s.to_string()))
}

/// Parse a whole-number cost. Blank means free.
pub fn parse_cost(s: &str) -> Result<u64, DomainError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0);
    }
    s.parse().map_err(|_| DomainError::InvalidCost(s.to_string()))
}

/// The ordered set of candidate activities for a search.
///
/// Catalog order is the order the search tries activities in.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    activities: Vec<Arc<Activity>>,
}

impl Catalog {
    /// Build a catalog from already-constructed activities.
    pub fn new(activities: impl IntoIterator<Item = Activity>) -> Self {
        Self {
            activities: activities.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse a catalog from CSV, resolving stations against `directory`.
    ///
    /// Row numbers in errors are 1-based file lines (the header is line 1).
    pub fn from_reader<R: Read>(
        reader: R,
        directory: &impl StationDirectory,
    ) -> Result<Self, CatalogError> {
        let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
        let mut activities = Vec::new();

        for (index, record) in csv.deserialize::<ActivityRecord>().enumerate() {
            let row = index + 2;
            let record = record?;
            activities.push(Arc::new(record.into_activity(row, directory)?));
        }

        debug!(activities = activities.len(), "loaded activity catalog");
        Ok(Self { activities })
    }

    /// Load a catalog CSV file.
    pub fn load(
        path: impl AsRef<Path>,
        directory: &impl StationDirectory,
    ) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, directory)
    }

    pub fn activities(&self) -> &[Arc<Activity>] {
        &self.activities
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Activity>> {
        self.activities.get(index)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Activity>> {
        self.activities.iter()
    }
}

impl FromIterator<Arc<Activity>> for Catalog {
    fn from_iter<I: IntoIterator<Item = Arc<Activity>>>(iter: I) -> Self {
        Self {
            activities: iter.into_iter().collect(),
        }
    }
}
