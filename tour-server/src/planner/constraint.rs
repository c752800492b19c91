//! Budget, time-window and meal constraints for a search run.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::domain::{ClockTime, MealSlot};

use super::search::SearchError;

/// The policy every tour found by one search must satisfy.
///
/// Unset bounds never constrain. Upper bounds gate admission while a tour is
/// being built; lower bounds are only checked once a tour is a candidate
/// result, since a prefix may still accrue more cost and time.
///
/// # Examples
///
/// ```
/// use tour_server::domain::ClockTime;
/// use tour_server::planner::ConstraintSpec;
/// use chrono::Duration;
///
/// let mut spec = ConstraintSpec::new(1, ClockTime::parse_hhmm("08:00").unwrap());
/// spec.set_max_cost(100_000);
/// spec.set_latest_end_time(ClockTime::parse_hhmm("17:00").unwrap());
///
/// assert!(spec.below_maximum(5_000, Duration::hours(8)));
/// assert!(spec.too_long(Duration::hours(10)));
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintSpec {
    people: u32,
    start_time: ClockTime,
    max_cost: Option<u64>,
    min_cost: Option<u64>,
    latest_end: Option<ClockTime>,
    earliest_end: Option<ClockTime>,
    max_duration: Option<Duration>,
    min_duration: Option<Duration>,
    /// `true` requires the slot in every tour, `false` forbids it.
    meals: BTreeMap<MealSlot, bool>,
}

impl ConstraintSpec {
    /// Create unconstrained limits for `people` starting at `start_time`.
    pub fn new(people: u32, start_time: ClockTime) -> Self {
        Self {
            people,
            start_time,
            max_cost: None,
            min_cost: None,
            latest_end: None,
            earliest_end: None,
            max_duration: None,
            min_duration: None,
            meals: BTreeMap::new(),
        }
    }

    pub fn set_max_cost(&mut self, cost: u64) {
        self.max_cost = Some(cost);
    }

    pub fn set_min_cost(&mut self, cost: u64) {
        self.min_cost = Some(cost);
    }

    /// Tours must finish by `end`; sets the maximum duration.
    pub fn set_latest_end_time(&mut self, end: ClockTime) {
        self.latest_end = Some(end);
        self.max_duration = Some(end - self.start_time);
    }

    /// Tours must not finish before `end`; sets the minimum duration.
    pub fn set_earliest_end_time(&mut self, end: ClockTime) {
        self.earliest_end = Some(end);
        self.min_duration = Some(end - self.start_time);
    }

    /// Require (`true`) or forbid (`false`) a meal slot.
    pub fn set_meal_requirement(&mut self, slot: MealSlot, include: bool) {
        self.meals.insert(slot, include);
    }

    pub fn people(&self) -> u32 {
        self.people
    }

    pub fn start_time(&self) -> ClockTime {
        self.start_time
    }

    pub fn max_cost(&self) -> Option<u64> {
        self.max_cost
    }

    pub fn min_cost(&self) -> Option<u64> {
        self.min_cost
    }

    pub fn max_duration(&self) -> Option<Duration> {
        self.max_duration
    }

    pub fn min_duration(&self) -> Option<Duration> {
        self.min_duration
    }

    pub fn meal_requirement(&self, slot: MealSlot) -> Option<bool> {
        self.meals.get(&slot).copied()
    }

    pub fn too_expensive(&self, cost: u64) -> bool {
        self.max_cost.is_some_and(|max| cost > max)
    }

    pub fn too_cheap(&self, cost: u64) -> bool {
        self.min_cost.is_some_and(|min| cost < min)
    }

    pub fn too_long(&self, duration: Duration) -> bool {
        self.max_duration.is_some_and(|max| duration > max)
    }

    pub fn too_short(&self, duration: Duration) -> bool {
        self.min_duration.is_some_and(|min| duration < min)
    }

    /// Admission gate: upper bounds only.
    pub fn below_maximum(&self, cost: u64, duration: Duration) -> bool {
        !self.too_expensive(cost) && !self.too_long(duration)
    }

    /// Acceptance gate for a finished tour: every bound.
    pub fn within_spec(&self, cost: u64, duration: Duration) -> bool {
        self.below_maximum(cost, duration) && !self.too_cheap(cost) && !self.too_short(duration)
    }

    /// False if `slot` is forbidden.
    pub fn allows_meal(&self, slot: MealSlot) -> bool {
        self.meal_requirement(slot) != Some(false)
    }

    /// True if every required slot appears in `included`.
    pub fn meals_satisfied<'a>(&self, included: impl IntoIterator<Item = &'a MealSlot>) -> bool {
        let included: Vec<MealSlot> = included.into_iter().copied().collect();
        self.meals
            .iter()
            .filter(|(_, required)| **required)
            .all(|(slot, _)| included.contains(slot))
    }

    /// Budget left after spending `cost`, or `None` if unbounded.
    pub fn remaining_money(&self, cost: u64) -> Option<u64> {
        self.max_cost.map(|max| max.saturating_sub(cost))
    }

    /// Time left after `duration`, or `None` if unbounded.
    pub fn remaining_time(&self, duration: Duration) -> Option<Duration> {
        self.max_duration.map(|max| max - duration)
    }

    /// Check that each min/max pair is ordered.
    pub fn validate(&self) -> Result<(), SearchError> {
        if let (Some(min), Some(max)) = (self.min_cost, self.max_cost)
            && min > max
        {
            return Err(SearchError::InvalidSpec(format!(
                "minimum cost {min} exceeds maximum cost {max}"
            )));
        }
        if let (Some(earliest), Some(latest)) = (self.earliest_end, self.latest_end)
            && earliest > latest
        {
            return Err(SearchError::InvalidSpec(format!(
                "earliest end time {earliest} is after latest end time {latest}"
            )));
        }
        if let Some(latest) = self.latest_end
            && latest < self.start_time
        {
            return Err(SearchError::InvalidSpec(format!(
                "latest end time {latest} is before start time {}",
                self.start_time
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    fn spec() -> ConstraintSpec {
        let mut spec = ConstraintSpec::new(2, t("08:00"));
        spec.set_max_cost(100_000);
        spec.set_min_cost(5_000);
        spec.set_earliest_end_time(t("16:00"));
        spec.set_latest_end_time(t("17:00"));
        spec
    }

    #[test]
    fn unset_bounds_never_constrain() {
        let spec = ConstraintSpec::new(1, t("08:00"));
        assert!(!spec.too_expensive(u64::MAX));
        assert!(!spec.too_cheap(0));
        assert!(!spec.too_long(Duration::hours(100)));
        assert!(!spec.too_short(Duration::zero()));
        assert!(spec.within_spec(0, Duration::zero()));
        assert_eq!(spec.remaining_money(10), None);
        assert_eq!(spec.remaining_time(Duration::hours(1)), None);
    }

    #[test]
    fn durations_derive_from_end_times() {
        let spec = spec();
        assert_eq!(spec.min_duration(), Some(Duration::hours(8)));
        assert_eq!(spec.max_duration(), Some(Duration::hours(9)));
        assert_eq!(spec.people(), 2);
        assert_eq!(spec.start_time(), t("08:00"));
    }

    #[test]
    fn bounds_are_inclusive() {
        let spec = spec();
        assert!(!spec.too_expensive(100_000));
        assert!(spec.too_expensive(100_001));
        assert!(!spec.too_cheap(5_000));
        assert!(spec.too_cheap(4_999));
        assert!(!spec.too_long(Duration::hours(9)));
        assert!(spec.too_long(Duration::hours(9) + Duration::seconds(1)));
        assert!(!spec.too_short(Duration::hours(8)));
        assert!(spec.too_short(Duration::hours(8) - Duration::seconds(1)));
    }

    #[test]
    fn admission_ignores_lower_bounds() {
        let spec = spec();
        assert!(spec.below_maximum(0, Duration::zero()));
        assert!(!spec.within_spec(0, Duration::zero()));
        assert!(spec.within_spec(10_000, Duration::hours(8) + Duration::minutes(30)));
    }

    #[test]
    fn remaining_budget() {
        let spec = spec();
        assert_eq!(spec.remaining_money(40_000), Some(60_000));
        assert_eq!(spec.remaining_money(200_000), Some(0));
        assert_eq!(
            spec.remaining_time(Duration::hours(2)),
            Some(Duration::hours(7))
        );
    }

    #[test]
    fn meal_requirements() {
        let mut spec = spec();
        assert!(spec.meals_satisfied(&[]));

        spec.set_meal_requirement(MealSlot::Lunch, true);
        spec.set_meal_requirement(MealSlot::Coffee, false);

        assert!(!spec.meals_satisfied(&[MealSlot::Breakfast]));
        assert!(spec.meals_satisfied(&[MealSlot::Breakfast, MealSlot::Lunch]));
        assert!(spec.allows_meal(MealSlot::Lunch));
        assert!(spec.allows_meal(MealSlot::Dinner));
        assert!(!spec.allows_meal(MealSlot::Coffee));
    }

    #[test]
    fn validate_ordering() {
        assert!(spec().validate().is_ok());

        let mut bad = spec();
        bad.set_min_cost(200_000);
        assert!(matches!(bad.validate(), Err(SearchError::InvalidSpec(_))));

        let mut bad = spec();
        bad.set_earliest_end_time(t("18:00"));
        assert!(bad.validate().is_err());

        let mut bad = ConstraintSpec::new(1, t("10:00"));
        bad.set_latest_end_time(t("09:00"));
        assert!(bad.validate().is_err());
    }
}
