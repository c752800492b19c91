//! Events that make up a tour: the opening meet, activities, and the
//! transport rides between them.

use std::sync::Arc;

use chrono::Duration;

use super::{Activity, Location};

/// The synthetic first event of every tour: meeting at the first activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meet {
    pub location: Location,
}

impl Meet {
    /// How long the meet takes.
    pub const DURATION_MINS: i64 = 15;

    pub fn new(location: Location) -> Self {
        Self { location }
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(Self::DURATION_MINS)
    }
}

/// A ride between two locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    pub from: Location,
    pub to: Location,
    pub duration: Duration,
    pub cost: u64,
    pub transfers: u32,
}

/// A single entry in a tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Meet(Meet),
    Activity(Arc<Activity>),
    Transport(Transport),
}

impl Event {
    /// Category tag: "meet", "ride", or the activity's own tag.
    pub fn category(&self) -> &str {
        match self {
            Event::Meet(_) => "meet",
            Event::Activity(activity) => activity.category.as_str(),
            Event::Transport(_) => "ride",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Event::Meet(meet) => meet.duration(),
            Event::Activity(activity) => activity.duration,
            Event::Transport(transport) => transport.duration,
        }
    }

    pub fn cost(&self) -> u64 {
        match self {
            Event::Meet(_) => 0,
            Event::Activity(activity) => activity.cost,
            Event::Transport(transport) => transport.cost,
        }
    }

    /// Where the tour is once this event finishes.
    pub fn location(&self) -> &Location {
        match self {
            Event::Meet(meet) => &meet.location,
            Event::Activity(activity) => &activity.location,
            Event::Transport(transport) => &transport.to,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Event::Meet(meet) => meet.location.name().to_string(),
            Event::Activity(activity) => activity.title.clone(),
            Event::Transport(transport) => format!("{} -> {}", transport.from, transport.to),
        }
    }

    pub fn as_activity(&self) -> Option<&Arc<Activity>> {
        match self {
            Event::Activity(activity) => Some(activity),
            _ => None,
        }
    }

    pub fn is_meet(&self) -> bool {
        matches!(self, Event::Meet(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Event::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Station, StationId};

    fn station(name: &str, id: u32) -> Location {
        Location::from(Station::new(name, StationId(id)))
    }

    #[test]
    fn meet_is_free_and_short() {
        let meet = Event::Meet(Meet::new(station("Ueno", 1)));
        assert_eq!(meet.duration(), Duration::minutes(15));
        assert_eq!(meet.cost(), 0);
        assert_eq!(meet.category(), "meet");
        assert_eq!(meet.title(), "Ueno");
    }

    #[test]
    fn transport_ends_at_destination() {
        let ride = Event::Transport(Transport {
            from: station("Ueno", 1),
            to: station("Shibuya", 2),
            duration: Duration::minutes(25),
            cost: 200,
            transfers: 1,
        });
        assert_eq!(ride.location().name(), "Shibuya");
        assert_eq!(ride.category(), "ride");
        assert_eq!(ride.title(), "Ueno Station -> Shibuya Station");
        assert!(ride.is_transport());
    }

    #[test]
    fn activity_category_passes_through() {
        let activity = Activity::new("Ramen", station("Ueno", 1), Duration::hours(1), 900)
            .unwrap()
            .with_category(Category::new("food"));
        let event = Event::Activity(Arc::new(activity));
        assert_eq!(event.category(), "food");
        assert_eq!(event.cost(), 900);
        assert!(event.as_activity().is_some());
    }
}
