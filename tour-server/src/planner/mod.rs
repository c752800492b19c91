//! Tour planner using backtracking search.
//!
//! This module answers: "given these activities and this budget, which day
//! tours are possible?"
//!
//! A tour grows one activity at a time. Each admission checks opening hours,
//! meal rules and the budget, inserting the ride from the previous stop. The
//! search explores every admissible ordering of the catalog.

mod config;
mod constraint;
mod itinerary;
mod search;
mod tour;

#[cfg(test)]
mod fixtures;

pub use config::SearchConfig;
pub use constraint::ConstraintSpec;
pub use itinerary::{cost_string, duration_string, render_itinerary};
pub use search::{CancelToken, SearchEngine, SearchError, SearchOutcome};
pub use tour::{Rejection, TourState};
