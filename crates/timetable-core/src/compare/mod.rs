//! Day-level comparison of two timetables.
//!
//! For every date on which both timetables have classes this module works out:
//! - which classes are identical (same course, group and times)
//! - whether the two people can travel to or from school together
//! - whether they share a free gap for lunch or dinner
//!
//! # Example
//!
//! ```
//! use timetable_core::compare::{compare_timetables, CompareConfig};
//! use timetable_core::{expand_events, DateContext, TimetableEvent};
//!
//! let ctx = DateContext::new(2026);
//! let mine = vec![TimetableEvent::new("ABC123", "0800".parse().unwrap(), "1000".parse().unwrap())
//!     .with_date("02/03")];
//! let theirs = vec![TimetableEvent::new("XYZ789", "0810".parse().unwrap(), "1200".parse().unwrap())
//!     .with_date("02/03")];
//!
//! let days = compare_timetables(
//!     &expand_events(&mine, &ctx),
//!     &expand_events(&theirs, &ctx),
//!     &CompareConfig::default(),
//! );
//! assert_eq!(days.len(), 1);
//! assert!(days[0].travel.can_travel_to);
//! ```

mod meal;
mod travel;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::EventItem;
use crate::time::format_date_display;

pub use meal::{
    DEFAULT_MIN_GAP_MINUTES, Gap, MEAL_BUFFER_MINUTES, MealInfo, MealType, MealWindow,
    calculate_meal_info, find_gaps, find_overlapping_gap, is_available_for_meal, shared_meal_gap,
};
pub use travel::{TravelDirection, TravelInfo, calculate_travel_info};

const DEFAULT_WAIT_MINUTES: u32 = 15;

/// Settings for the compare engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// How long one person is willing to wait for the other, in minutes.
    pub wait_minutes: u32,
    /// Which travel legs gate a day in the travel view.
    pub direction: TravelDirection,
    /// Lunch window.
    pub lunch: MealWindow,
    /// Dinner window.
    pub dinner: MealWindow,
    /// Which meal gates a day in the meal view.
    pub meal: MealType,
    /// Minimum shared gap for a meal, in minutes.
    pub min_gap_minutes: u32,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            wait_minutes: DEFAULT_WAIT_MINUTES,
            direction: TravelDirection::default(),
            lunch: MealWindow::lunch(),
            dinner: MealWindow::dinner(),
            meal: MealType::default(),
            min_gap_minutes: DEFAULT_MIN_GAP_MINUTES,
        }
    }
}

impl CompareConfig {
    /// Sets the wait tolerance.
    pub fn with_wait_minutes(mut self, wait_minutes: u32) -> Self {
        self.wait_minutes = wait_minutes;
        self
    }

    /// Sets the travel direction.
    pub fn with_direction(mut self, direction: TravelDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the meal used by the meal view.
    pub fn with_meal(mut self, meal: MealType) -> Self {
        self.meal = meal;
        self
    }

    /// Window for the given meal.
    pub fn window(&self, meal: MealType) -> &MealWindow {
        match meal {
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }
}

/// Which days a filtered comparison keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareView {
    /// Every common day.
    #[default]
    All,
    /// Days with at least one identical class.
    Identical,
    /// Days where travel is possible in the configured direction.
    Travel,
    /// Days with a shared gap for the configured meal.
    Meal,
}

impl std::str::FromStr for CompareView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "identical" => Ok(Self::Identical),
            "travel" => Ok(Self::Travel),
            "meal" => Ok(Self::Meal),
            other => Err(format!(
                "unknown view {other:?} (expected all, identical, travel or meal)"
            )),
        }
    }
}

/// Comparison of both timetables on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayComparison {
    pub date: NaiveDate,
    /// `YYYY-MM-DD` key.
    pub sort_key: String,
    /// Heading for the day.
    pub display: String,
    /// Left side's classes, sorted by start time.
    pub left: Vec<EventItem>,
    /// Right side's classes, sorted by start time.
    pub right: Vec<EventItem>,
    /// Index pairs `(left, right)` of identical classes.
    pub identical: Vec<(usize, usize)>,
    pub travel: TravelInfo,
    pub meal: MealInfo,
}

impl DayComparison {
    /// Returns `true` if at least one class appears on both sides.
    pub fn has_identical_class(&self) -> bool {
        !self.identical.is_empty()
    }

    /// Returns `true` if this day belongs in `view`.
    pub fn matches_view(&self, view: CompareView, config: &CompareConfig) -> bool {
        match view {
            CompareView::All => true,
            CompareView::Identical => self.has_identical_class(),
            CompareView::Travel => config.direction.allows(&self.travel),
            CompareView::Meal => self.meal.can_eat_together(config.meal),
        }
    }
}

/// Two occurrences are the same class when course, group and both times match.
///
/// Venue and tutor are ignored.
pub fn is_identical_class(a: &EventItem, b: &EventItem) -> bool {
    a.course == b.course
        && a.group == b.group
        && a.start_time == b.start_time
        && a.end_time == b.end_time
}

/// Index pairs of identical classes, left items outermost.
pub fn find_identical_classes(left: &[EventItem], right: &[EventItem]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (li, l) in left.iter().enumerate() {
        for (ri, r) in right.iter().enumerate() {
            if is_identical_class(l, r) {
                pairs.push((li, ri));
            }
        }
    }
    pairs
}

/// Groups occurrences by sort key, each day sorted by start time.
fn by_day(items: &[EventItem]) -> BTreeMap<&str, Vec<EventItem>> {
    let mut days: BTreeMap<&str, Vec<EventItem>> = BTreeMap::new();
    for item in items {
        days.entry(item.sort_key.as_str()).or_default().push(item.clone());
    }
    for day in days.values_mut() {
        day.sort_by_key(|item| item.start_time);
    }
    days
}

/// Sort keys of the days on which both sides have classes, ascending.
pub fn common_days(left: &[EventItem], right: &[EventItem]) -> Vec<String> {
    let right_days = by_day(right);
    by_day(left)
        .into_keys()
        .filter(|key| right_days.contains_key(key))
        .map(str::to_string)
        .collect()
}

/// Compares two expanded timetables day by day.
pub fn compare_timetables(
    left: &[EventItem],
    right: &[EventItem],
    config: &CompareConfig,
) -> Vec<DayComparison> {
    let mut right_days = by_day(right);

    by_day(left)
        .into_iter()
        .filter_map(|(key, left_items)| {
            let right_items = right_days.remove(key)?;
            let date = left_items.first()?.date;
            Some(DayComparison {
                date,
                sort_key: key.to_string(),
                display: format_date_display(date),
                identical: find_identical_classes(&left_items, &right_items),
                travel: calculate_travel_info(&left_items, &right_items, config.wait_minutes),
                meal: calculate_meal_info(
                    &left_items,
                    &right_items,
                    &config.lunch,
                    &config.dinner,
                    config.min_gap_minutes,
                ),
                left: left_items,
                right: right_items,
            })
        })
        .collect()
}

/// Days from `days` that belong in `view`.
pub fn filter_days<'a>(
    days: &'a [DayComparison],
    view: CompareView,
    config: &CompareConfig,
) -> Vec<&'a DayComparison> {
    days.iter().filter(|day| day.matches_view(view, config)).collect()
}
