//! Plain-text tour itineraries.

use std::fmt::Write;

use chrono::Duration;

use crate::domain::Event;

use super::tour::TourState;

/// Format a per-person cost, e.g. "¥1200" or "free".
pub fn cost_string(cost: u64) -> String {
    if cost == 0 {
        "free".to_string()
    } else {
        format!("¥{cost}")
    }
}

/// Format a duration as "1h 15m", "2h" or "45m".
pub fn duration_string(duration: Duration) -> String {
    let hours = duration.num_hours();
    let minutes = duration.num_minutes() % 60;
    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

fn verb(category: &str) -> Option<&'static str> {
    match category {
        "food" => Some("Eat at"),
        "cultural" => Some("See"),
        "coffee" => Some("Grab a drink at"),
        "shopping" => Some("Shop at"),
        "meet" => Some("Meet at"),
        "ride" => Some("Ride from"),
        _ => None,
    }
}

fn event_line(tour: &TourState, index: usize, event: &Event) -> String {
    let title = event.title();
    if let Some(slot) = tour.meals().get(&index) {
        return format!("{} at {title}", slot.title());
    }
    match verb(event.category()) {
        Some(verb) => format!("{verb} {title}"),
        None => title,
    }
}

/// Render a tour as a clocked, human-readable itinerary.
///
/// ```text
///  - Total cost: ¥1000
///  - Total time: 1h 15m
///  - Included meals: none
///  - Itinerary:
///      08:00: Meet at Ueno
///      08:15: See National Museum
///      09:15: Finish tour at Ueno Station
/// ```
pub fn render_itinerary(tour: &TourState) -> String {
    let mut out = String::new();
    let meals: Vec<&str> = tour.meal_slots().map(|slot| slot.as_str()).collect();
    let meals = if meals.is_empty() {
        "none".to_string()
    } else {
        meals.join(", ")
    };

    // Writing to a String cannot fail.
    let _ = writeln!(out, " - Total cost: {}", cost_string(tour.cost()));
    let _ = writeln!(out, " - Total time: {}", duration_string(tour.duration()));
    let _ = writeln!(out, " - Included meals: {meals}");
    let _ = writeln!(out, " - Itinerary:");

    let mut clock = tour.start_time();
    for (index, event) in tour.events().iter().enumerate() {
        let _ = writeln!(out, "     {clock}: {}", event_line(tour, index, event));
        clock = clock + event.duration();
    }
    if let Some(last) = tour.events().last() {
        let _ = writeln!(out, "     {clock}: Finish tour at {}", last.location());
    }
    out
}
