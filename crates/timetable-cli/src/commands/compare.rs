//! `compare` command.

use timetable_core::{
    CompareConfig, DateContext, DayComparison, compare_timetables, expand_events, filter_days,
    render_comparison,
};

use crate::cli::CompareArgs;
use crate::commands::load_timetable;
use crate::config::validate_compare;
use crate::error::{CliError, CliResult};

/// Compares two timetables and prints the days kept by `args.view`.
///
/// The settings are checked after overrides and before any input is read.
pub fn run(args: &CompareArgs, base: &CompareConfig, ctx: &DateContext) -> CliResult<()> {
    let config = effective_config(base, args);
    validate_compare(&config).map_err(CliError::Config)?;

    let left = load_timetable(&args.left)?;
    let right = load_timetable(&args.right)?;

    let days = compare_timetables(
        &expand_events(&left.events, ctx),
        &expand_events(&right.events, ctx),
        &config,
    );
    let shown = filter_days(&days, args.view, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        print!("{}", render_text(&shown, days.len(), &config));
    }
    Ok(())
}

/// Applies command-line overrides on top of the configured settings.
pub fn effective_config(base: &CompareConfig, args: &CompareArgs) -> CompareConfig {
    let mut config = base.clone();
    if let Some(direction) = args.direction {
        config = config.with_direction(direction);
    }
    if let Some(wait) = args.wait {
        config = config.with_wait_minutes(wait);
    }
    if let Some(meal) = args.meal {
        config = config.with_meal(meal);
    }
    config
}

fn render_text(shown: &[&DayComparison], total: usize, config: &CompareConfig) -> String {
    if total == 0 {
        return "No days in common.\n".to_string();
    }

    let mut out = String::new();
    for day in shown {
        out.push_str(&render_comparison(day, config));
        out.push('\n');
    }
    out.push_str(&format!("Showing {} of {} common days\n", shown.len(), total));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use timetable_core::{
        ClockTime, CompareView, MealType, MealWindow, TimetableEvent, TravelDirection,
    };

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn compare_args(extra: &[&str]) -> CompareArgs {
        let argv = ["timetable", "compare", "a.html", "b.html"].iter().chain(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Compare(args) => args,
            other => panic!("expected compare, got {other:?}"),
        }
    }

    fn days(config: &CompareConfig) -> Vec<DayComparison> {
        let ctx = DateContext::new(2026);
        let left = vec![
            TimetableEvent::new("ABC123", t("0800"), t("1000"))
                .with_group("G1")
                .with_dates(["02/03", "03/03"]),
            TimetableEvent::new("DEF456", t("1500"), t("1700")).with_date("02/03"),
        ];
        let right = vec![
            TimetableEvent::new("ABC123", t("0800"), t("1000"))
                .with_group("G1")
                .with_date("02/03"),
            TimetableEvent::new("XYZ789", t("0900"), t("1100")).with_date("03/03"),
        ];
        compare_timetables(
            &expand_events(&left, &ctx),
            &expand_events(&right, &ctx),
            config,
        )
    }

    #[test]
    fn overrides_replace_config_values() {
        let base = CompareConfig::default().with_wait_minutes(30);
        let config = effective_config(
            &base,
            &compare_args(&["--direction", "to", "--meal", "dinner"]),
        );
        assert_eq!(config.direction, TravelDirection::To);
        assert_eq!(config.meal, MealType::Dinner);
        assert_eq!(config.wait_minutes, 30);

        assert_eq!(effective_config(&base, &compare_args(&[])), base);
    }

    #[test]
    fn invalid_settings_are_rejected_before_loading() {
        let ctx = DateContext::new(2026);
        let mut base = CompareConfig::default();
        base.lunch = MealWindow::new(100_000_000, 100_000_001);
        let err = run(&compare_args(&[]), &base, &ctx).unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("compare.lunch")));

        let err = run(&compare_args(&["--wait", "5000"]), &CompareConfig::default(), &ctx)
            .unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("wait_minutes")));
    }

    #[test]
    fn identical_view() {
        let config = CompareConfig::default();
        let days = days(&config);
        assert_eq!(days.len(), 2);

        let shown = filter_days(&days, CompareView::Identical, &config);
        insta::assert_snapshot!(render_text(&shown, days.len(), &config), @r"
        Monday, 2 March 2026
          left:
           = 08:00-10:00  ABC123 G1
             15:00-17:00  DEF456
          right:
           = 08:00-10:00  ABC123 G1
          travel to: yes (0 min apart), from: no (420 min apart), wait 15 min
          lunch: no shared gap
          dinner: no shared gap

        Showing 1 of 2 common days
        ");
    }

    #[test]
    fn no_common_days() {
        let config = CompareConfig::default();
        assert_eq!(render_text(&[], 0, &config), "No days in common.\n");
    }
}
