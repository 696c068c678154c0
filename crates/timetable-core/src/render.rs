//! Plain-text rendering of grouped events and day comparisons.

use crate::compare::{CompareConfig, DayComparison, Gap};
use crate::event::EventItem;
use crate::group::GroupedEvent;
use crate::time::{ClockTime, minutes_to_time};

/// One line per occurrence, e.g. `08:30-10:30  ABC123 G1  @ LT1  (Dr. Tan)`.
pub fn render_item(item: &EventItem) -> String {
    let mut line = format!(
        "{}-{}  {}",
        item.start_time.to_display(),
        item.end_time.to_display(),
        item.label()
    );
    if !item.venue.is_empty() {
        line.push_str(&format!("  @ {}", item.venue));
    }
    if !item.tutor.is_empty() {
        line.push_str(&format!("  ({})", item.tutor));
    }
    line
}

/// Agenda view: a heading per day followed by its occurrences.
pub fn render_grouped(groups: &[GroupedEvent]) -> String {
    let mut out = String::new();
    for (idx, group) in groups.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}\n", group.date));
        for item in &group.events {
            out.push_str(&format!("  {}\n", render_item(item)));
        }
    }
    out
}

fn gap_display(gap: Gap) -> String {
    let as_clock = |m: u32| {
        ClockTime::from_minutes(m)
            .map(ClockTime::to_display)
            .unwrap_or_else(|_| minutes_to_time(m))
    };
    format!("{}-{}", as_clock(gap.start), as_clock(gap.end))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Summary of one compared day.
pub fn render_comparison(day: &DayComparison, config: &CompareConfig) -> String {
    let mut out = format!("{}\n", day.display);

    for (label, items) in [("left", &day.left), ("right", &day.right)] {
        out.push_str(&format!("  {label}:\n"));
        for (idx, item) in items.iter().enumerate() {
            let same = day.identical.iter().any(|&(l, r)| {
                if label == "left" { l == idx } else { r == idx }
            });
            let marker = if same { "=" } else { " " };
            out.push_str(&format!("   {marker} {}\n", render_item(item)));
        }
    }

    out.push_str(&format!(
        "  travel to: {} ({} min apart), from: {} ({} min apart), wait {} min\n",
        yes_no(day.travel.can_travel_to),
        day.travel.to_diff,
        yes_no(day.travel.can_travel_from),
        day.travel.from_diff,
        config.wait_minutes
    ));
    for (name, gap) in [("lunch", day.meal.lunch), ("dinner", day.meal.dinner)] {
        let line = match gap {
            Some(gap) => format!("  {name}: together {}\n", gap_display(gap)),
            None => format!("  {name}: no shared gap\n"),
        };
        out.push_str(&line);
    }
    out
}
