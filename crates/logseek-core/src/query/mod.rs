//! Query construction: time-window resolution and filter building.

pub mod time;

use chrono::{DateTime, Duration, Local};
use tracing::warn;

use crate::types::RepoDescriptor;
use crate::Result;

/// Fallback default time range in minutes.
pub const DEFAULT_RANGE_MINUTES: u32 = 5;

// Relative durations are floats; a sum at or below this is "not provided".
const RELATIVE_EPSILON_MINUTES: f64 = 0.05;

/// User-supplied time flags, prior to resolution.
#[derive(Debug, Clone, Default)]
pub struct TimeArgs {
    pub start: Option<String>,
    pub end: Option<String>,
    pub day: f64,
    pub hour: f64,
    pub minute: f64,
}

/// A resolved query window. `start == None` means open-ended (earliest).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<DateTime<Local>>,
    pub end: DateTime<Local>,
}

/// Final filter string and sort expression for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub query: String,
    pub sort: String,
}

/// Resolve user start/end/relative flags into a concrete window.
///
/// - explicit start/end are parsed across the accepted layouts;
/// - only end given: open-ended start;
/// - neither given: `day*1440 + hour*60 + minute` minutes before `now`,
///   falling back to the profile default range (and then 5 minutes);
/// - a start after the end is swapped so the window always satisfies
///   `start <= end`.
pub fn resolve_window(
    args: &TimeArgs,
    default_range_minutes: u32,
    now: DateTime<Local>,
) -> Result<TimeWindow> {
    let start = match args.start.as_deref() {
        Some(s) if !s.is_empty() => Some(time::parse_user_time(s)?),
        _ => None,
    };
    let end = match args.end.as_deref() {
        Some(s) if !s.is_empty() => Some(time::parse_user_time(s)?),
        _ => None,
    };

    let (start, end) = match (start, end) {
        (None, Some(end)) => {
            return Ok(TimeWindow { start: None, end });
        }
        (Some(start), end) => {
            let end = end.unwrap_or(now);
            if start > end {
                (end, start)
            } else {
                (start, end)
            }
        }
        (None, None) => {
            let minutes = args.day * 1440.0 + args.hour * 60.0 + args.minute;
            let minutes = if minutes > RELATIVE_EPSILON_MINUTES {
                minutes
            } else if default_range_minutes < 1 {
                DEFAULT_RANGE_MINUTES as f64
            } else {
                default_range_minutes as f64
            };
            (now - Duration::seconds((minutes * 60.0) as i64), now)
        }
    };

    Ok(TimeWindow {
        start: Some(start),
        end,
    })
}

/// Compose the final filter string and sort expression.
///
/// When the repository has no date-typed field the window is dropped and
/// the query degrades to an unscoped one; the service's default sort
/// applies unless an explicit override was given.
pub fn build(
    user_query: &str,
    window: &TimeWindow,
    repo: &RepoDescriptor,
    sort_override: Option<&str>,
) -> BuiltQuery {
    let sort_override = sort_override.filter(|s| !s.is_empty());

    let Some(date_field) = repo.date_field() else {
        warn!(
            repo = %repo.name,
            "no date-typed field in schema; querying without a time window"
        );
        return BuiltQuery {
            query: user_query.to_string(),
            sort: sort_override.unwrap_or_default().to_string(),
        };
    };

    let start = window
        .start
        .map(time::format_local)
        .unwrap_or_else(|| "*".to_string());
    let end = time::format_local(window.end);
    let range = format!("{}:[{} TO {}]", date_field, start, end);

    let query = if user_query.is_empty() {
        range
    } else {
        // Parenthesize the user filter to preserve operator precedence.
        format!("({}) AND {}", user_query, range)
    };

    let sort = sort_override
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}:desc", date_field));

    BuiltQuery { query, sort }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Retention, SchemaField};
    use chrono::TimeZone;

    fn repo_with_date_field() -> RepoDescriptor {
        RepoDescriptor {
            name: "applogs".to_string(),
            region: "z0".to_string(),
            retention: Retention("30d".to_string()),
            schema: vec![
                SchemaField::new("timestamp", "date"),
                SchemaField::new("status", "long"),
            ],
        }
    }

    fn repo_without_date_field() -> RepoDescriptor {
        RepoDescriptor {
            name: "metrics".to_string(),
            region: "z0".to_string(),
            retention: Retention("-1".to_string()),
            schema: vec![SchemaField::new("status", "long")],
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn default_range_window_appended() {
        let now = fixed_now();
        let window = resolve_window(&TimeArgs::default(), 5, now).unwrap();
        let built = build("status:500", &window, &repo_with_date_field(), None);

        let start = time::format_local(now - Duration::minutes(5));
        let end = time::format_local(now);
        assert_eq!(
            built.query,
            format!("(status:500) AND timestamp:[{} TO {}]", start, end)
        );
        assert_eq!(built.sort, "timestamp:desc");
    }

    #[test]
    fn empty_filter_gets_bare_range() {
        let now = fixed_now();
        let window = resolve_window(&TimeArgs::default(), 5, now).unwrap();
        let built = build("", &window, &repo_with_date_field(), None);
        assert!(built.query.starts_with("timestamp:["));
        assert!(!built.query.contains("AND"));
    }

    #[test]
    fn building_twice_is_idempotent() {
        let now = fixed_now();
        let window = resolve_window(&TimeArgs::default(), 5, now).unwrap();
        let repo = repo_with_date_field();
        let first = build("status:500", &window, &repo, None);
        let second = build("status:500", &window, &repo, None);
        assert_eq!(first, second);
    }

    #[test]
    fn swaps_start_after_end() {
        let args = TimeArgs {
            start: Some("2024-05-10 12:00:00".to_string()),
            end: Some("2024-05-10 11:00:00".to_string()),
            ..Default::default()
        };
        let window = resolve_window(&args, 5, fixed_now()).unwrap();
        let start = window.start.unwrap();
        assert!(start <= window.end);
        assert_eq!((window.end - start).num_hours(), 1);
    }

    #[test]
    fn only_end_gives_open_start() {
        let args = TimeArgs {
            end: Some("2024-05-10 11:00:00".to_string()),
            ..Default::default()
        };
        let window = resolve_window(&args, 5, fixed_now()).unwrap();
        assert!(window.start.is_none());

        let built = build("a:b", &window, &repo_with_date_field(), None);
        assert!(built.query.contains(":[* TO "));
    }

    #[test]
    fn relative_duration_sums_units() {
        let now = fixed_now();
        let args = TimeArgs {
            day: 1.0,
            hour: 2.0,
            minute: 30.0,
            ..Default::default()
        };
        let window = resolve_window(&args, 5, now).unwrap();
        let start = window.start.unwrap();
        assert_eq!((now - start).num_minutes(), 1440 + 120 + 30);
        assert_eq!(window.end, now);
    }

    #[test]
    fn tiny_relative_sum_falls_back_to_default_range() {
        let now = fixed_now();
        let args = TimeArgs {
            minute: 0.01,
            ..Default::default()
        };
        let window = resolve_window(&args, 30, now).unwrap();
        assert_eq!((now - window.start.unwrap()).num_minutes(), 30);
    }

    #[test]
    fn zero_default_range_floors_to_five_minutes() {
        let now = fixed_now();
        let window = resolve_window(&TimeArgs::default(), 0, now).unwrap();
        assert_eq!((now - window.start.unwrap()).num_minutes(), 5);
    }

    #[test]
    fn no_date_field_skips_window_and_sort() {
        let now = fixed_now();
        let window = resolve_window(&TimeArgs::default(), 5, now).unwrap();
        let built = build("status:500", &window, &repo_without_date_field(), None);
        assert_eq!(built.query, "status:500");
        assert_eq!(built.sort, "");
    }

    #[test]
    fn explicit_sort_override_wins() {
        let now = fixed_now();
        let window = resolve_window(&TimeArgs::default(), 5, now).unwrap();
        let built = build("", &window, &repo_with_date_field(), Some("status:asc"));
        assert_eq!(built.sort, "status:asc");
    }

    #[test]
    fn unparseable_start_is_an_error() {
        let args = TimeArgs {
            start: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(resolve_window(&args, 5, fixed_now()).is_err());
    }
}
