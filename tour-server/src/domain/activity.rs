//! Bookable activities.

use chrono::Duration;

use super::{Category, ClockTime, DomainError, Location};

/// A bookable event in the catalog.
///
/// Activities are immutable once loaded and shared by reference between
/// every candidate tour that includes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub title: String,
    pub location: Location,
    /// Time spent at the activity.
    pub duration: Duration,
    /// Cost per person.
    pub cost: u64,
    /// Earliest start time, inclusive.
    pub available_from: ClockTime,
    /// Closing time; the activity must finish by then.
    pub available_until: ClockTime,
    pub category: Category,
    pub description: String,
}

impl Activity {
    /// Create an activity open all day with no category.
    pub fn new(
        title: impl Into<String>,
        location: Location,
        duration: Duration,
        cost: u64,
    ) -> Result<Self, DomainError> {
        if duration < Duration::zero() {
            return Err(DomainError::NegativeDuration);
        }
        Ok(Self {
            title: title.into(),
            location,
            duration,
            cost,
            available_from: ClockTime::start_of_day(),
            available_until: ClockTime::end_of_day(),
            category: Category::default(),
            description: String::new(),
        })
    }

    /// Restrict the activity to `[from, until)`.
    pub fn with_window(mut self, from: ClockTime, until: ClockTime) -> Result<Self, DomainError> {
        if until < from {
            return Err(DomainError::InvalidWindow { from, until });
        }
        self.available_from = from;
        self.available_until = until;
        Ok(self)
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// True if the activity can run from `start` without overrunning closing.
    pub fn is_open_for(&self, start: ClockTime) -> bool {
        start >= self.available_from && start + self.duration <= self.available_until
    }
}
