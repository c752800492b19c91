//! The partial-tour accumulator and its admission rules.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use tracing::trace;

use crate::domain::{Activity, ClockTime, Event, MealSlot, Meet, Transport, is_food_family};
use crate::transit::{RouteNotFound, TransitResolver, TransitSource};

use super::constraint::ConstraintSpec;

/// Why an activity could not be appended to a tour.
///
/// Rejections are the normal outcome of admission, not failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The activity has not opened yet.
    TooEarly { opens: ClockTime, clock: ClockTime },
    /// The activity would still be running at closing time.
    ClosesTooSoon { closes: ClockTime, finish: ClockTime },
    /// Coffee outside the coffee window.
    CoffeeOutOfHours,
    /// Two food or coffee activities in a row.
    ConsecutiveIndulgence,
    /// The tour already has this meal.
    MealAlreadyIncluded(MealSlot),
    /// The constraints forbid this meal.
    MealExcluded(MealSlot),
    /// No ride from the previous location.
    NoRoute(RouteNotFound),
    /// Cost or duration would exceed the upper bounds.
    OverBudget { cost: u64, duration: Duration },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooEarly { opens, clock } => {
                write!(f, "tour is at {clock}, before opening at {opens}")
            }
            Rejection::ClosesTooSoon { closes, finish } => {
                write!(f, "would finish at {finish} after closing at {closes}")
            }
            Rejection::CoffeeOutOfHours => f.write_str("coffee outside coffee hours"),
            Rejection::ConsecutiveIndulgence => f.write_str("follows another food or coffee stop"),
            Rejection::MealAlreadyIncluded(slot) => write!(f, "{slot} already included"),
            Rejection::MealExcluded(slot) => write!(f, "{slot} excluded by constraints"),
            Rejection::NoRoute(err) => write!(f, "{err}"),
            Rejection::OverBudget { cost, duration } => write!(
                f,
                "cost {cost} / {} minutes exceeds maximum",
                duration.num_minutes()
            ),
        }
    }
}

/// One partial or complete itinerary.
///
/// Each search branch owns its own `TourState`; forking a branch clones it.
/// The state only changes through a successful admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourState {
    start_time: ClockTime,
    events: Vec<Event>,
    cost: u64,
    duration: Duration,
    /// Event index of each meal activity.
    meals: BTreeMap<usize, MealSlot>,
}

impl TourState {
    /// Create an empty tour starting at the constraints' start time.
    pub fn new(spec: &ConstraintSpec) -> Self {
        Self {
            start_time: spec.start_time(),
            events: Vec::new(),
            cost: 0,
            duration: Duration::zero(),
            meals: BTreeMap::new(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Total cost per person.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn start_time(&self) -> ClockTime {
        self.start_time
    }

    /// Current wall-clock time: start plus everything so far.
    pub fn clock(&self) -> ClockTime {
        self.start_time + self.duration
    }

    /// Meal slot of each meal event, keyed by event index.
    pub fn meals(&self) -> &BTreeMap<usize, MealSlot> {
        &self.meals
    }

    pub fn meal_slots(&self) -> impl Iterator<Item = &MealSlot> {
        self.meals.values()
    }

    /// The activities in visiting order.
    pub fn activities(&self) -> impl Iterator<Item = &Arc<Activity>> {
        self.events.iter().filter_map(Event::as_activity)
    }

    pub fn activity_count(&self) -> usize {
        self.activities().count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Try to append `activity`, returning whether it was admitted.
    ///
    /// A rejected activity leaves the tour untouched.
    pub fn add_activity<S: TransitSource>(
        &mut self,
        activity: &Arc<Activity>,
        spec: &ConstraintSpec,
        resolver: &TransitResolver<S>,
    ) -> bool {
        match self.try_add_activity(activity, spec, resolver) {
            Ok(()) => true,
            Err(reason) => {
                trace!(activity = %activity.title, %reason, "activity rejected");
                false
            }
        }
    }

    /// Like [`add_activity`](Self::add_activity), reporting why on rejection.
    ///
    /// Availability and meal slot are judged at the tour's current clock,
    /// before the opening meet or the ride there. The meet and the ride still
    /// count toward the budget.
    pub fn try_add_activity<S: TransitSource>(
        &mut self,
        activity: &Arc<Activity>,
        spec: &ConstraintSpec,
        resolver: &TransitResolver<S>,
    ) -> Result<(), Rejection> {
        let clock = self.clock();
        if !activity.is_open_for(clock) {
            return Err(if clock < activity.available_from {
                Rejection::TooEarly {
                    opens: activity.available_from,
                    clock,
                }
            } else {
                Rejection::ClosesTooSoon {
                    closes: activity.available_until,
                    finish: clock + activity.duration,
                }
            });
        }

        let meal = MealSlot::classify(&activity.category, clock);
        if meal.is_none() && activity.category.is_coffee() {
            return Err(Rejection::CoffeeOutOfHours);
        }

        // The last event is always an activity (or nothing): rides are only
        // ever appended together with the activity they lead to.
        if activity.category.is_food_family()
            && self
                .events
                .last()
                .is_some_and(|previous| is_food_family(previous.category()))
        {
            return Err(Rejection::ConsecutiveIndulgence);
        }

        if let Some(slot) = meal {
            if !spec.allows_meal(slot) {
                return Err(Rejection::MealExcluded(slot));
            }
            if self.meals.values().any(|included| *included == slot) {
                return Err(Rejection::MealAlreadyIncluded(slot));
            }
        }

        let lead = self.lead_event(activity, resolver).map_err(Rejection::NoRoute)?;
        let (lead_cost, lead_duration) = lead
            .as_ref()
            .map_or((0, Duration::zero()), |e| (e.cost(), e.duration()));

        let cost = self
            .cost
            .saturating_add(lead_cost)
            .saturating_add(activity.cost);
        let duration = self.duration + lead_duration + activity.duration;
        if !spec.below_maximum(cost, duration) {
            return Err(Rejection::OverBudget { cost, duration });
        }

        if let Some(lead) = lead {
            self.events.push(lead);
        }
        if let Some(slot) = meal {
            self.meals.insert(self.events.len(), slot);
        }
        self.events.push(Event::Activity(Arc::clone(activity)));
        self.cost = cost;
        self.duration = duration;
        Ok(())
    }

    /// The event that gets the tour to `activity`: the opening meet, a ride,
    /// or nothing when already there.
    fn lead_event<S: TransitSource>(
        &self,
        activity: &Activity,
        resolver: &TransitResolver<S>,
    ) -> Result<Option<Event>, RouteNotFound> {
        let Some(previous) = self.events.last() else {
            return Ok(Some(Event::Meet(Meet::new(activity.location.clone()))));
        };

        let from = previous.location();
        let segment = resolver.resolve_locations(from, &activity.location)?;
        if segment.is_zero() {
            return Ok(None);
        }

        Ok(Some(Event::Transport(Transport {
            from: from.clone(),
            to: activity.location.clone(),
            duration: segment.duration,
            cost: segment.cost,
            transfers: segment.transfers,
        })))
    }

    /// True if cost and duration satisfy every bound of `spec`.
    pub fn within_spec(&self, spec: &ConstraintSpec) -> bool {
        spec.within_spec(self.cost, self.duration)
    }

    /// True if the tour can be reported as a finished result.
    pub fn is_acceptable(&self, spec: &ConstraintSpec) -> bool {
        self.within_spec(spec) && spec.meals_satisfied(self.meal_slots())
    }

    pub fn remaining_money(&self, spec: &ConstraintSpec) -> Option<u64> {
        spec.remaining_money(self.cost)
    }

    pub fn remaining_time(&self, spec: &ConstraintSpec) -> Option<Duration> {
        spec.remaining_time(self.duration)
    }
}

impl fmt::Display for TourState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tour with {} events", self.events.len())
    }
}
