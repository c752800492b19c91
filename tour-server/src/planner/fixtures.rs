//! Shared test fixtures: a small transit network and activity builders.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::{Activity, Category, ClockTime, Location, Station, StationId};
use crate::transit::{ResolverConfig, TransitEdge, TransitResolver, TransitTable};

pub const UENO: u32 = 1;
pub const SHIBUYA: u32 = 2;
pub const ASAKUSA: u32 = 3;
/// Has no routes at all.
pub const ODAIBA: u32 = 4;

pub fn t(s: &str) -> ClockTime {
    ClockTime::parse_hhmm(s).unwrap()
}

fn name(id: u32) -> &'static str {
    match id {
        UENO => "Ueno",
        SHIBUYA => "Shibuya",
        ASAKUSA => "Asakusa",
        ODAIBA => "Odaiba",
        _ => panic!("unknown fixture station {id}"),
    }
}

pub fn station(id: u32) -> Location {
    Location::from(Station::new(name(id), StationId(id)))
}

fn edge(minutes: u32, cost: u64) -> TransitEdge {
    TransitEdge {
        minutes,
        cost,
        transfers: 1,
    }
}

/// Ueno-Shibuya 30m/200, Asakusa-Ueno 10m/170, Shibuya-Asakusa 40m/250.
pub fn table() -> TransitTable {
    let mut table = TransitTable::new();
    for id in [UENO, SHIBUYA, ASAKUSA, ODAIBA] {
        table.add_station(name(id), StationId(id));
    }
    table.add_route(StationId(UENO), StationId(SHIBUYA), edge(30, 200));
    table.add_route(StationId(ASAKUSA), StationId(UENO), edge(10, 170));
    table.add_route(StationId(SHIBUYA), StationId(ASAKUSA), edge(40, 250));
    table
}

pub fn resolver() -> TransitResolver<TransitTable> {
    TransitResolver::new(table(), &ResolverConfig::default())
}

/// An all-day activity of `hours` at station `at`.
pub fn activity(title: &str, at: u32, hours: i64, cost: u64, category: &str) -> Arc<Activity> {
    Arc::new(
        Activity::new(title, station(at), Duration::hours(hours), cost)
            .unwrap()
            .with_category(Category::new(category)),
    )
}

/// Like `activity` but only open `[from, until)`.
pub fn windowed(
    title: &str,
    at: u32,
    hours: i64,
    cost: u64,
    from: &str,
    until: &str,
) -> Arc<Activity> {
    let base = Activity::new(title, station(at), Duration::hours(hours), cost).unwrap();
    Arc::new(base.with_window(t(from), t(until)).unwrap())
}
