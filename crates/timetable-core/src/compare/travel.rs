//! Travel-together feasibility for one shared day.

use serde::{Deserialize, Serialize};

use crate::event::EventItem;
use crate::time::ClockTime;

/// Which leg of the day two people want to travel together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelDirection {
    /// To school in the morning.
    To,
    /// Home from school in the evening.
    From,
    /// Both legs.
    #[default]
    Both,
    /// At least one leg.
    Either,
}

impl TravelDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::To => "to",
            Self::From => "from",
            Self::Both => "both",
            Self::Either => "either",
        }
    }

    /// Returns `true` if `info` satisfies this direction.
    pub fn allows(&self, info: &TravelInfo) -> bool {
        match self {
            Self::To => info.can_travel_to,
            Self::From => info.can_travel_from,
            Self::Both => info.can_travel_to && info.can_travel_from,
            Self::Either => info.can_travel_to || info.can_travel_from,
        }
    }
}

impl std::str::FromStr for TravelDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "to" => Ok(Self::To),
            "from" => Ok(Self::From),
            "both" => Ok(Self::Both),
            "either" => Ok(Self::Either),
            other => Err(format!(
                "unknown travel direction {other:?} (expected to, from, both or either)"
            )),
        }
    }
}

/// Arrival and departure comparison for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelInfo {
    /// Start of the left side's first class.
    pub left_earliest: Option<ClockTime>,
    /// Start of the right side's first class.
    pub right_earliest: Option<ClockTime>,
    /// End of the left side's last class.
    pub left_latest: Option<ClockTime>,
    /// End of the right side's last class.
    pub right_latest: Option<ClockTime>,
    /// Arrival times are within the wait tolerance.
    pub can_travel_to: bool,
    /// Departure times are within the wait tolerance.
    pub can_travel_from: bool,
    /// Minutes between the two arrivals.
    pub to_diff: u32,
    /// Minutes between the two departures.
    pub from_diff: u32,
}

/// Compares the first start and last end of both sides.
///
/// If either side has no classes the result is infeasible in every
/// direction with zero differences. On ties the first item wins.
pub fn calculate_travel_info(
    left: &[EventItem],
    right: &[EventItem],
    wait_minutes: u32,
) -> TravelInfo {
    let (Some(left_first), Some(right_first)) = (earliest(left), earliest(right)) else {
        return TravelInfo::default();
    };
    let (Some(left_last), Some(right_last)) = (latest(left), latest(right)) else {
        return TravelInfo::default();
    };

    let to_diff = left_first.start_time.abs_diff(right_first.start_time);
    let from_diff = left_last.end_time.abs_diff(right_last.end_time);

    TravelInfo {
        left_earliest: Some(left_first.start_time),
        right_earliest: Some(right_first.start_time),
        left_latest: Some(left_last.end_time),
        right_latest: Some(right_last.end_time),
        can_travel_to: to_diff <= wait_minutes,
        can_travel_from: from_diff <= wait_minutes,
        to_diff,
        from_diff,
    }
}

/// Item with the smallest start time.
fn earliest(items: &[EventItem]) -> Option<&EventItem> {
    items
        .iter()
        .reduce(|best, item| if item.start_time < best.start_time { item } else { best })
}

/// Item with the largest end time.
fn latest(items: &[EventItem]) -> Option<&EventItem> {
    items
        .iter()
        .reduce(|best, item| if item.end_time > best.end_time { item } else { best })
}
