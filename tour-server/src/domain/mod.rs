//! Domain types for the tour planner.
//!
//! This module contains the value types the itinerary search works on.
//! Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod activity;
mod error;
mod event;
mod meal;
mod station;
mod time;

pub use activity::Activity;
pub use error::DomainError;
pub use event::{Event, Meet, Transport};
pub use meal::{Category, MealSlot, is_food_family};
pub use station::{Location, Station, StationId};
pub use time::{ClockTime, TimeError};
