//! Request-identifier decoding.
//!
//! A request id is 12 bytes, URL-safe base64 encoded. Bytes 4..12 carry
//! the issue time as a little-endian nanosecond epoch timestamp; the
//! first 4 bytes are opaque.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use chrono::{DateTime, Duration, Local};

use crate::types::{RepoDescriptor, Retention};
use crate::{Error, Result};

/// Half-width of the search window centred on the decoded time.
pub const SEARCH_SLACK_MINUTES: i64 = 2;

// Schema fields a request id is looked up in, in preference order.
const MATCH_FIELDS: &[&str] = &["reqid", "respheader"];

/// Split a pasted request id into an optional field prefix and the id.
///
/// Accepts forms like `reqid:AQIDBAAAFnsNEtEU`, quoted values, and
/// surrounding whitespace. The text before the last colon is returned as
/// the prefix so a `field:<id>` argument can name the match field.
pub fn normalize(raw: &str) -> (Option<&str>, &str) {
    let trimmed = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    match trimmed.rsplit_once(':') {
        Some((prefix, id)) => {
            let prefix = prefix.trim();
            ((!prefix.is_empty()).then_some(prefix), id.trim())
        }
        None => (None, trimmed),
    }
}

/// Decode the nanosecond timestamp embedded in a request id.
pub fn timestamp_ns(reqid: &str) -> Result<i64> {
    let bytes = URL_SAFE
        .decode(reqid)
        .map_err(|_| Error::MalformedReqid(reqid.to_string()))?;
    if bytes.len() != 12 {
        return Err(Error::MalformedReqid(reqid.to_string()));
    }
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[4..12]);
    i64::try_from(u64::from_le_bytes(raw)).map_err(|_| Error::MalformedReqid(reqid.to_string()))
}

/// Decode a request id into the local-time instant it was issued.
pub fn issue_time(reqid: &str) -> Result<DateTime<Local>> {
    let ns = timestamp_ns(reqid)?;
    let t = DateTime::from_timestamp(ns.div_euclid(1_000_000_000), (ns.rem_euclid(1_000_000_000)) as u32)
        .ok_or_else(|| Error::MalformedReqid(reqid.to_string()))?;
    Ok(t.with_timezone(&Local))
}

/// The window a request id is searched in: issue time plus/minus slack.
pub fn search_window(t: DateTime<Local>) -> (DateTime<Local>, DateTime<Local>) {
    let slack = Duration::minutes(SEARCH_SLACK_MINUTES);
    (t - slack, t + slack)
}

/// The schema field a request id lookup should match against.
///
/// Prefers a literal `reqid` field, then `respheader` (substring match on
/// the raw response headers); `None` when the schema carries neither.
pub fn match_field<'a>(repo: &'a RepoDescriptor) -> Option<&'a str> {
    MATCH_FIELDS.iter().find_map(|candidate| {
        repo.schema
            .iter()
            .find(|f| f.key.eq_ignore_ascii_case(candidate))
            .map(|f| f.key.as_str())
    })
}

/// Resolve the match field for a lookup whose id carried a prefix.
///
/// A prefix naming a schema field wins; anything else (pasted
/// `X-Reqid:`-style decoration) falls back to [`match_field`].
pub fn resolve_field<'a>(prefix: Option<&str>, repo: &'a RepoDescriptor) -> Option<&'a str> {
    prefix
        .and_then(|p| repo.schema.iter().find(|f| f.key.eq_ignore_ascii_case(p)))
        .map(|f| f.key.as_str())
        .or_else(|| match_field(repo))
}

/// Whether the decoded time predates the repository's retention window.
///
/// Unlimited retention never rules a time out.
pub fn outside_retention(t: DateTime<Local>, retention: &Retention, now: DateTime<Local>) -> bool {
    match retention.days() {
        Some(days) => t < now - Duration::days(i64::from(days)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SchemaField;
    use chrono::{TimeZone, Utc};

    // 12 bytes whose tail encodes 1500000000000000000 ns.
    const JULY_2017: &str = "AQIDBAAAFnsNEtEU";
    // Tail encodes 1693526400123456789 ns.
    const SEPT_2023: &str = "3q2-7xXNGslJnYAX";

    #[test]
    fn decodes_embedded_nanoseconds() {
        assert_eq!(timestamp_ns(JULY_2017).unwrap(), 1_500_000_000_000_000_000);
        assert_eq!(timestamp_ns(SEPT_2023).unwrap(), 1_693_526_400_123_456_789);
    }

    #[test]
    fn issue_time_matches_known_instants() {
        let t = issue_time(JULY_2017).unwrap().with_timezone(&Utc);
        assert_eq!(t, Utc.with_ymd_and_hms(2017, 7, 14, 2, 40, 0).unwrap());

        let t = issue_time(SEPT_2023).unwrap().with_timezone(&Utc);
        assert_eq!(t.timestamp(), 1_693_526_400);
        assert_eq!(t.timestamp_subsec_nanos(), 123_456_789);
    }

    #[test]
    fn rejects_wrong_length() {
        // Valid base64 but only 8 bytes.
        assert!(matches!(
            timestamp_ns("MTIzNDU2Nzg="),
            Err(Error::MalformedReqid(_))
        ));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            timestamp_ns("not base64!!"),
            Err(Error::MalformedReqid(_))
        ));
    }

    #[test]
    fn normalizes_pasted_forms() {
        assert_eq!(normalize("AQIDBAAAFnsNEtEU"), (None, "AQIDBAAAFnsNEtEU"));
        assert_eq!(
            normalize("  reqid:AQIDBAAAFnsNEtEU "),
            (Some("reqid"), "AQIDBAAAFnsNEtEU")
        );
        assert_eq!(
            normalize("\"X-Reqid: AQIDBAAAFnsNEtEU\""),
            (Some("X-Reqid"), "AQIDBAAAFnsNEtEU")
        );
    }

    #[test]
    fn inline_prefix_selects_match_field() {
        let repo = RepoDescriptor {
            name: "applogs".to_string(),
            region: "z0".to_string(),
            retention: Retention("30d".to_string()),
            schema: vec![
                SchemaField::new("reqid", "string"),
                SchemaField::new("upstream_reqid", "string"),
            ],
        };

        // A prefix naming a schema field is honoured.
        let (prefix, id) = normalize("upstream_reqid:AQIDBAAAFnsNEtEU");
        assert_eq!(id, "AQIDBAAAFnsNEtEU");
        assert_eq!(resolve_field(prefix, &repo), Some("upstream_reqid"));

        // Pasted header decoration is not a schema field; default applies.
        let (prefix, _) = normalize("X-Reqid: AQIDBAAAFnsNEtEU");
        assert_eq!(resolve_field(prefix, &repo), Some("reqid"));

        assert_eq!(resolve_field(None, &repo), Some("reqid"));
    }

    #[test]
    fn search_window_is_centred() {
        let t = Local.with_ymd_and_hms(2023, 9, 1, 8, 0, 0).unwrap();
        let (start, end) = search_window(t);
        assert_eq!(end - start, Duration::minutes(2 * SEARCH_SLACK_MINUTES));
        assert_eq!(t - start, end - t);
    }

    #[test]
    fn prefers_reqid_field_over_respheader() {
        let repo = RepoDescriptor {
            name: "applogs".to_string(),
            region: "z0".to_string(),
            retention: Retention("30d".to_string()),
            schema: vec![
                SchemaField::new("respheader", "string"),
                SchemaField::new("reqid", "string"),
            ],
        };
        assert_eq!(match_field(&repo), Some("reqid"));

        let repo = RepoDescriptor {
            schema: vec![SchemaField::new("respheader", "string")],
            ..repo
        };
        assert_eq!(match_field(&repo), Some("respheader"));

        let repo = RepoDescriptor {
            schema: vec![SchemaField::new("status", "long")],
            ..repo
        };
        assert_eq!(match_field(&repo), None);
    }

    #[test]
    fn retention_check() {
        let now = Local.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let recent = now - Duration::days(5);
        let ancient = now - Duration::days(90);

        let bounded = Retention("30d".to_string());
        assert!(!outside_retention(recent, &bounded, now));
        assert!(outside_retention(ancient, &bounded, now));

        let unlimited = Retention("-1".to_string());
        assert!(!outside_retention(ancient, &unlimited, now));
    }
}
