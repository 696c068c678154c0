//! Free-gap search and shared meal detection.
//!
//! A person only counts as available for a meal window when classes bracket
//! it: one finishing near the start of the window and one starting near its
//! end. Spanning the window with an early and a late class is not enough.

use serde::{Deserialize, Serialize};

use crate::event::EventItem;
use crate::time::MINUTES_PER_DAY;

/// Slack around a meal window when looking for anchoring classes.
pub const MEAL_BUFFER_MINUTES: i64 = 30;

/// Default minimum length of a shared meal gap.
pub const DEFAULT_MIN_GAP_MINUTES: u32 = 60;

/// A free interval within a day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gap {
    pub start: u32,
    pub end: u32,
}

impl Gap {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// Lunch or dinner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    #[default]
    Lunch,
    Dinner,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

impl std::str::FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            other => Err(format!("unknown meal {other:?} (expected lunch or dinner)")),
        }
    }
}

/// Meal window bounded by whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl MealWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn lunch() -> Self {
        Self::new(11, 14)
    }

    pub fn dinner() -> Self {
        Self::new(17, 20)
    }

    /// Saturates for hours past what a day can hold; see [`Self::is_valid`].
    pub fn start_minutes(&self) -> u32 {
        self.start_hour.saturating_mul(60)
    }

    pub fn end_minutes(&self) -> u32 {
        self.end_hour.saturating_mul(60)
    }

    /// Start before end, both within the day.
    pub fn is_valid(&self) -> bool {
        self.start_hour < self.end_hour && self.end_hour <= 24
    }
}

/// Shared meal gaps found for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MealInfo {
    pub lunch: Option<Gap>,
    pub dinner: Option<Gap>,
}

impl MealInfo {
    pub fn gap(&self, meal: MealType) -> Option<Gap> {
        match meal {
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
        }
    }

    pub fn can_eat_together(&self, meal: MealType) -> bool {
        self.gap(meal).is_some()
    }
}

/// Maximal free intervals of a day around the given classes.
///
/// Covers midnight to the first class, every positive gap between classes
/// and the last class to midnight. Back-to-back or overlapping classes
/// produce no gap. A day without classes yields no gaps.
pub fn find_gaps(items: &[EventItem]) -> Vec<Gap> {
    let mut sorted: Vec<&EventItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.start_time);

    let Some((first, rest)) = sorted.split_first() else {
        return Vec::new();
    };

    let mut gaps = Vec::new();
    if first.start_time.minutes() > 0 {
        gaps.push(Gap::new(0, first.start_time.minutes()));
    }

    let mut busy_until = first.end_time.minutes();
    for next in rest {
        let next_start = next.start_time.minutes();
        if next_start > busy_until {
            gaps.push(Gap::new(busy_until, next_start));
        }
        busy_until = busy_until.max(next.end_time.minutes());
    }

    if busy_until < MINUTES_PER_DAY {
        gaps.push(Gap::new(busy_until, MINUTES_PER_DAY));
    }
    gaps
}

/// Whether one person's classes bracket the meal window.
///
/// All four must hold:
/// 1. the last class ends no earlier than `start - buffer`
/// 2. the first class starts no later than `end + buffer`
/// 3. some class ends in `[start - buffer, end + buffer]` or in
///    `[start - 2*buffer, start]`
/// 4. some class starts in `[start - buffer, end + buffer]` or in
///    `[end, end + 2*buffer]`
pub fn is_available_for_meal(items: &[EventItem], window: &MealWindow) -> bool {
    let buffer = MEAL_BUFFER_MINUTES;
    let meal_start = i64::from(window.start_minutes());
    let meal_end = i64::from(window.end_minutes());
    let reach_start = meal_start - buffer;
    let reach_end = meal_end + buffer;

    let Some(latest_end) = items.iter().map(|i| i64::from(i.end_time.minutes())).max() else {
        return false;
    };
    let Some(earliest_start) = items.iter().map(|i| i64::from(i.start_time.minutes())).min()
    else {
        return false;
    };

    if latest_end < reach_start || earliest_start > reach_end {
        return false;
    }

    let ends_near = items.iter().any(|i| {
        let end = i64::from(i.end_time.minutes());
        (reach_start..=reach_end).contains(&end)
            || (meal_start - 2 * buffer..=meal_start).contains(&end)
    });
    let starts_near = items.iter().any(|i| {
        let start = i64::from(i.start_time.minutes());
        (reach_start..=reach_end).contains(&start)
            || (meal_end..=meal_end + 2 * buffer).contains(&start)
    });

    ends_near && starts_near
}

/// First pair of gaps whose overlap with the window lasts `min_minutes`.
///
/// Left gaps are the outer loop and right gaps the inner loop, both in
/// ascending order; the first qualifying overlap is returned, not the
/// longest.
pub fn find_overlapping_gap(
    left_gaps: &[Gap],
    right_gaps: &[Gap],
    window: &MealWindow,
    min_minutes: u32,
) -> Option<Gap> {
    for left in left_gaps {
        for right in right_gaps {
            let start = left.start.max(right.start).max(window.start_minutes());
            let end = left.end.min(right.end).min(window.end_minutes());
            if end > start && end - start >= min_minutes {
                return Some(Gap::new(start, end));
            }
        }
    }
    None
}

/// Shared gap for one meal, if both sides are available for it.
pub fn shared_meal_gap(
    left: &[EventItem],
    right: &[EventItem],
    window: &MealWindow,
    min_minutes: u32,
) -> Option<Gap> {
    if !is_available_for_meal(left, window) || !is_available_for_meal(right, window) {
        return None;
    }
    find_overlapping_gap(&find_gaps(left), &find_gaps(right), window, min_minutes)
}

/// Lunch and dinner results for one day.
pub fn calculate_meal_info(
    left: &[EventItem],
    right: &[EventItem],
    lunch: &MealWindow,
    dinner: &MealWindow,
    min_minutes: u32,
) -> MealInfo {
    MealInfo {
        lunch: shared_meal_gap(left, right, lunch, min_minutes),
        dinner: shared_meal_gap(left, right, dinner, min_minutes),
    }
}
