use serde::{Deserialize, Serialize};

pub type Id = i64;

/// How a newly created product gets its identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdAssignment {
    /// `len + 1`. Collides with a surviving id once anything has been deleted.
    Sequential,
    /// `max(id) + 1`, or 1 for an empty catalog.
    #[default]
    NextAfterMax,
}

/// Parse an id from a path segment the way the storefront clients expect:
/// leading whitespace and an optional sign are accepted, parsing stops at the
/// first non-digit, and a segment with no leading digits yields `None`.
pub fn parse_id_lenient(raw: &str) -> Option<Id> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: Id = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
