//! User-supplied time parsing.

use chrono::{DateTime, Local, NaiveDateTime, offset::LocalResult};

use crate::{Error, Result};

/// Layout used for timestamps inside filter strings and in user-facing
/// output, e.g. `2017-04-06T17:40:30+0800`.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

// Layouts without a zone are interpreted in the local zone.
const LOCAL_LAYOUTS: &[&str] = &[
    "%Y%m%dT%H:%M",
    "%Y%m%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

const ZONED_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%#z", "%Y-%m-%d %H:%M:%S%#z"];

/// Format a timestamp the way filter strings expect it.
pub fn format_local(t: DateTime<Local>) -> String {
    t.format(DISPLAY_FORMAT).to_string()
}

/// Parse a user-supplied date across the fixed list of accepted layouts.
pub fn parse_user_time(s: &str) -> Result<DateTime<Local>> {
    for layout in LOCAL_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            match naive.and_local_timezone(Local) {
                LocalResult::Single(t) => return Ok(t),
                // DST fold: pick the earlier instant.
                LocalResult::Ambiguous(t, _) => return Ok(t),
                LocalResult::None => {}
            }
        }
    }
    for layout in ZONED_LAYOUTS {
        if let Ok(t) = DateTime::parse_from_str(s, layout) {
            return Ok(t.with_timezone(&Local));
        }
    }
    Err(Error::TimeParse(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_compact_layout() {
        let t = parse_user_time("20170406T17:40").unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2017, 4, 6));
        assert_eq!((t.hour(), t.minute(), t.second()), (17, 40, 0));
    }

    #[test]
    fn parses_layout_with_seconds() {
        let t = parse_user_time("2017-04-06 17:40:30").unwrap();
        assert_eq!(t.second(), 30);
    }

    #[test]
    fn parses_zoned_layout() {
        let t = parse_user_time("2017-04-06T17:40:30+0800").unwrap();
        // Same instant regardless of the local zone.
        assert_eq!(t.timestamp(), 1491471630);
    }

    #[test]
    fn parses_short_zone() {
        let t = parse_user_time("2017-04-06T17:40:30+08").unwrap();
        assert_eq!(t.timestamp(), 1491471630);
    }

    #[test]
    fn rejects_unknown_layout() {
        assert!(matches!(
            parse_user_time("06/04/2017"),
            Err(Error::TimeParse(_))
        ));
        assert!(matches!(parse_user_time(""), Err(Error::TimeParse(_))));
    }
}
