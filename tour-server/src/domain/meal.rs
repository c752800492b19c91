//! Activity categories and meal-slot classification.
//!
//! Food and coffee activities occupy a meal slot decided by the time of day
//! the activity starts, and each slot may be used at most once per tour.

use std::fmt;

use chrono::Duration;

use super::ClockTime;

/// Free-form activity tag, e.g. "cultural", "shopping", "food".
///
/// The tags "food" and "coffee" are reserved and drive meal-slot logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Category(String);

impl Category {
    pub const FOOD: &'static str = "food";
    pub const COFFEE: &'static str = "coffee";

    /// Tags are trimmed and lowercased, so " Food " is the food tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_food(&self) -> bool {
        self.0 == Self::FOOD
    }

    pub fn is_coffee(&self) -> bool {
        self.0 == Self::COFFEE
    }

    /// True for the indulgence family (food or coffee).
    pub fn is_food_family(&self) -> bool {
        is_food_family(&self.0)
    }
}

/// True if `tag` is in the food/coffee family.
pub fn is_food_family(tag: &str) -> bool {
    tag == Category::FOOD || tag == Category::COFFEE
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A time-of-day meal slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Coffee,
}

impl MealSlot {
    /// Food slots in the order they are tried.
    const FOOD_SLOTS: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    /// The open interval `(start, end)` during which this slot applies.
    pub fn window(&self) -> (ClockTime, ClockTime) {
        let at = |mins: i64| ClockTime::start_of_day() + Duration::minutes(mins);
        match self {
            MealSlot::Breakfast => (ClockTime::start_of_day(), at(10 * 60 + 30)),
            MealSlot::Lunch => (at(10 * 60 + 30), at(15 * 60 + 30)),
            MealSlot::Dinner => (at(15 * 60 + 30), ClockTime::end_of_day()),
            MealSlot::Coffee => (ClockTime::start_of_day(), at(17 * 60)),
        }
    }

    /// True if `clock` lies strictly inside this slot's window.
    pub fn contains(&self, clock: ClockTime) -> bool {
        let (start, end) = self.window();
        clock > start && clock < end
    }

    /// Classify an activity of `category` starting at `clock`.
    ///
    /// Returns `None` for categories outside the food family, and for food or
    /// coffee when `clock` falls outside every applicable window.
    ///
    /// # Examples
    ///
    /// ```
    /// use tour_server::domain::{Category, ClockTime, MealSlot};
    ///
    /// let noon = ClockTime::parse_hhmm("12:00").unwrap();
    /// assert_eq!(MealSlot::classify(&Category::new("food"), noon), Some(MealSlot::Lunch));
    /// assert_eq!(MealSlot::classify(&Category::new("coffee"), noon), Some(MealSlot::Coffee));
    /// assert_eq!(MealSlot::classify(&Category::new("cultural"), noon), None);
    /// ```
    pub fn classify(category: &Category, clock: ClockTime) -> Option<MealSlot> {
        if category.is_food() {
            Self::FOOD_SLOTS.into_iter().find(|slot| slot.contains(clock))
        } else if category.is_coffee() {
            MealSlot::Coffee.contains(clock).then_some(MealSlot::Coffee)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Coffee => "coffee",
        }
    }

    /// Capitalised name for itineraries, e.g. "Lunch".
    pub fn title(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Coffee => "Coffee",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_clock() -> impl Strategy<Value = ClockTime> {
        (0u32..24, 0u32..60).prop_map(|(h, m)| ClockTime::from_hms(h, m, 0).unwrap())
    }

    proptest! {
        /// Food never lands in the coffee slot
        #[test]
        fn food_is_never_coffee(clock in any_clock()) {
            let slot = MealSlot::classify(&Category::new("food"), clock);
            prop_assert_ne!(slot, Some(MealSlot::Coffee));
        }

        /// Coffee only ever lands in the coffee slot
        #[test]
        fn coffee_is_coffee_or_none(clock in any_clock()) {
            let slot = MealSlot::classify(&Category::new("coffee"), clock);
            prop_assert!(slot.is_none() || slot == Some(MealSlot::Coffee));
        }

        /// Categories outside the food family are never meals
        #[test]
        fn other_categories_never_meals(tag in "[a-z]{1,10}", clock in any_clock()) {
            prop_assume!(!is_food_family(&tag));
            prop_assert_eq!(MealSlot::classify(&Category::new(tag), clock), None);
        }

        /// A classified slot always contains the clock
        #[test]
        fn classified_slot_contains_clock(clock in any_clock()) {
            if let Some(slot) = MealSlot::classify(&Category::new("food"), clock) {
                prop_assert!(slot.contains(clock));
            }
        }
    }
}
