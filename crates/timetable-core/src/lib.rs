//! Core types: time, events, grouping, filters, compare engine

pub mod compare;
pub mod event;
pub mod group;
pub mod render;
pub mod time;
pub mod tracing;

pub use compare::{
    CompareConfig, CompareView, DayComparison, Gap, MealInfo, MealType, MealWindow,
    TravelDirection, TravelInfo, compare_timetables, filter_days,
};
pub use event::{
    EventItem, TimetableEvent, course_codes, expand_events, overlay_custom_events,
};
pub use group::{EventFilters, GroupedEvent, GroupedEvents, filter_and_group, filter_and_group_at};
pub use render::{render_comparison, render_grouped};
pub use time::{ClockTime, DateContext, TimeError, create_sort_key, is_today};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
