//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Activity, ClockTime, Event, MealSlot, TimeError};
use crate::planner::{ConstraintSpec, SearchOutcome, TourState, render_itinerary};

fn default_people() -> u32 {
    1
}

/// Request to search for tours.
#[derive(Debug, Deserialize)]
pub struct SearchToursRequest {
    /// Number of people on the tour
    #[serde(default = "default_people")]
    pub people_count: u32,

    /// Start time in HH:MM format
    pub start_time: String,

    /// Maximum cost per person
    pub max_cost: u64,

    /// Minimum cost per person
    pub min_cost: Option<u64>,

    /// Tours must not finish before this time (HH:MM)
    pub earliest_end_time: Option<String>,

    /// Tours must finish by this time (HH:MM)
    pub latest_end_time: Option<String>,

    pub include_breakfast: Option<bool>,
    pub include_lunch: Option<bool>,
    pub include_dinner: Option<bool>,
    pub include_coffee: Option<bool>,

    /// Overrides the server's result cap
    pub max_results: Option<usize>,
}

impl SearchToursRequest {
    /// Build the constraints this request describes.
    pub fn to_spec(&self) -> Result<ConstraintSpec, TimeError> {
        let mut spec = ConstraintSpec::new(self.people_count, ClockTime::parse_hhmm(&self.start_time)?);
        spec.set_max_cost(self.max_cost);
        if let Some(min) = self.min_cost {
            spec.set_min_cost(min);
        }
        if let Some(end) = &self.earliest_end_time {
            spec.set_earliest_end_time(ClockTime::parse_hhmm(end)?);
        }
        if let Some(end) = &self.latest_end_time {
            spec.set_latest_end_time(ClockTime::parse_hhmm(end)?);
        }

        let meals = [
            (MealSlot::Breakfast, self.include_breakfast),
            (MealSlot::Lunch, self.include_lunch),
            (MealSlot::Dinner, self.include_dinner),
            (MealSlot::Coffee, self.include_coffee),
        ];
        for (slot, include) in meals {
            if let Some(include) = include {
                spec.set_meal_requirement(slot, include);
            }
        }

        Ok(spec)
    }
}

/// A catalog activity.
#[derive(Debug, Serialize)]
pub struct ActivityResult {
    pub title: String,

    /// Station name
    pub station: String,

    pub duration_mins: i64,

    /// Cost per person
    pub cost: u64,

    /// Opening time (HH:MM)
    pub opens: String,

    /// Closing time (HH:MM)
    pub closes: String,

    pub category: String,
    pub description: String,
}

/// Response listing the catalog.
#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivityResult>,
}

/// One event in a tour.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventResult {
    Meet {
        location: String,
        duration_mins: i64,
        cost: u64,
    },
    Activity {
        title: String,
        location: String,
        category: String,
        duration_mins: i64,
        cost: u64,
    },
    Transport {
        from: String,
        to: String,
        transfers: u32,
        duration_mins: i64,
        cost: u64,
    },
}

/// A tour option.
#[derive(Debug, Serialize)]
pub struct TourResult {
    /// Cost per person
    pub cost: u64,

    /// Cost for the whole group
    pub group_cost: u64,

    pub duration_mins: i64,

    pub events: Vec<EventResult>,

    /// Meal slot of each meal event, keyed by event index
    pub meals: BTreeMap<usize, String>,

    /// Printable itinerary
    pub text: String,
}

/// Response for tour search.
#[derive(Debug, Serialize)]
pub struct SearchToursResponse {
    pub tours: Vec<TourResult>,
    pub tour_count: usize,
    pub branches_explored: usize,

    /// The search hit its deadline and the tours are partial
    pub cancelled: bool,

    /// More tours existed than the result cap
    pub truncated: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl ActivityResult {
    /// Create from a catalog activity.
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            title: activity.title.clone(),
            station: activity.location.name().to_string(),
            duration_mins: activity.duration.num_minutes(),
            cost: activity.cost,
            opens: activity.available_from.to_string(),
            closes: activity.available_until.to_string(),
            category: activity.category.to_string(),
            description: activity.description.clone(),
        }
    }
}

impl EventResult {
    /// Create from a tour event.
    pub fn from_event(event: &Event) -> Self {
        let duration_mins = event.duration().num_minutes();
        let cost = event.cost();
        match event {
            Event::Meet(meet) => EventResult::Meet {
                location: meet.location.to_string(),
                duration_mins,
                cost,
            },
            Event::Activity(activity) => EventResult::Activity {
                title: activity.title.clone(),
                location: activity.location.to_string(),
                category: activity.category.to_string(),
                duration_mins,
                cost,
            },
            Event::Transport(ride) => EventResult::Transport {
                from: ride.from.to_string(),
                to: ride.to.to_string(),
                transfers: ride.transfers,
                duration_mins,
                cost,
            },
        }
    }
}

impl TourResult {
    /// Create from a finished tour for a group of `people`.
    pub fn from_tour(tour: &TourState, people: u32) -> Self {
        Self {
            cost: tour.cost(),
            group_cost: tour.cost().saturating_mul(u64::from(people)),
            duration_mins: tour.duration().num_minutes(),
            events: tour.events().iter().map(EventResult::from_event).collect(),
            meals: tour
                .meals()
                .iter()
                .map(|(index, slot)| (*index, slot.to_string()))
                .collect(),
            text: render_itinerary(tour),
        }
    }
}

impl SearchToursResponse {
    /// Create from a search outcome.
    pub fn from_outcome(outcome: &SearchOutcome, people: u32) -> Self {
        let tours: Vec<TourResult> = outcome
            .tours
            .iter()
            .map(|tour| TourResult::from_tour(tour, people))
            .collect();
        Self {
            tour_count: tours.len(),
            tours,
            branches_explored: outcome.branches_explored,
            cancelled: outcome.cancelled,
            truncated: outcome.truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Location, Station, StationId};
    use crate::transit::{ResolverConfig, TransitEdge, TransitResolver, TransitTable};
    use chrono::Duration;
    use std::sync::Arc;

    fn request(json: &str) -> SearchToursRequest {
        serde_json::from_str(json).unwrap()
    }

    fn ueno() -> Location {
        Location::from(Station::new("Ueno", StationId(1)))
    }

    #[test]
    fn request_to_spec() {
        let req = request(
            r#"{"people_count": 3, "start_time": "08:00", "max_cost": 9000,
                "min_cost": 1000, "earliest_end_time": "16:00",
                "latest_end_time": "17:00", "include_lunch": true,
                "include_coffee": false}"#,
        );
        let spec = req.to_spec().unwrap();

        assert_eq!(spec.people(), 3);
        assert_eq!(spec.max_cost(), Some(9000));
        assert_eq!(spec.min_cost(), Some(1000));
        assert_eq!(spec.min_duration(), Some(Duration::hours(8)));
        assert_eq!(spec.max_duration(), Some(Duration::hours(9)));
        assert_eq!(spec.meal_requirement(MealSlot::Lunch), Some(true));
        assert_eq!(spec.meal_requirement(MealSlot::Coffee), Some(false));
        assert_eq!(spec.meal_requirement(MealSlot::Dinner), None);
    }

    #[test]
    fn request_defaults() {
        let req = request(r#"{"start_time": "09:30", "max_cost": 100}"#);
        assert_eq!(req.people_count, 1);
        assert!(req.max_results.is_none());

        let spec = req.to_spec().unwrap();
        assert_eq!(spec.max_duration(), None);
        assert_eq!(spec.min_cost(), None);
    }

    #[test]
    fn invalid_times_rejected() {
        let req = request(r#"{"start_time": "8am", "max_cost": 100}"#);
        assert!(req.to_spec().is_err());

        let req = request(r#"{"start_time": "08:00", "max_cost": 100, "latest_end_time": "25:00"}"#);
        assert!(req.to_spec().is_err());
    }

    #[test]
    fn activity_result_fields() {
        let activity = Activity::new("Museum", ueno(), Duration::minutes(90), 620)
            .unwrap()
            .with_category(Category::new("Cultural"));
        let result = ActivityResult::from_activity(&activity);

        assert_eq!(result.station, "Ueno");
        assert_eq!(result.duration_mins, 90);
        assert_eq!(result.opens, "00:00");
        assert_eq!(result.closes, "23:59");
        assert_eq!(result.category, "cultural");
    }

    #[test]
    fn tour_result_serializes_events_and_meals() {
        let mut table = TransitTable::new();
        table.add_station("Ueno", StationId(1));
        table.add_station("Shibuya", StationId(2));
        table.add_route(
            StationId(1),
            StationId(2),
            TransitEdge {
                minutes: 30,
                cost: 200,
                transfers: 0,
            },
        );
        let resolver = TransitResolver::new(table, &ResolverConfig::default());

        let mut spec = ConstraintSpec::new(2, ClockTime::parse_hhmm("08:00").unwrap());
        spec.set_max_cost(10_000);
        let mut tour = TourState::new(&spec);
        let museum = Activity::new("Museum", ueno(), Duration::hours(1), 500).unwrap();
        let cafe = Activity::new(
            "Cafe",
            Location::from(Station::new("Shibuya", StationId(2))),
            Duration::minutes(30),
            300,
        )
        .unwrap()
        .with_category(Category::new("coffee"));
        assert!(tour.add_activity(&Arc::new(museum), &spec, &resolver));
        assert!(tour.add_activity(&Arc::new(cafe), &spec, &resolver));

        let result = TourResult::from_tour(&tour, spec.people());
        assert_eq!(result.cost, 1000);
        assert_eq!(result.group_cost, 2000);
        assert_eq!(result.duration_mins, 15 + 60 + 30 + 30);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["events"][0]["kind"], "meet");
        assert_eq!(json["events"][1]["kind"], "activity");
        assert_eq!(json["events"][2]["kind"], "transport");
        assert_eq!(json["events"][2]["from"], "Ueno Station");
        assert_eq!(json["events"][2]["cost"], 200);
        assert_eq!(json["meals"]["3"], "coffee");
        assert!(json["text"].as_str().unwrap().contains("Coffee at Cafe"));
    }
}
