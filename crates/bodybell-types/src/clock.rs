//! Timestamp helpers for catalog documents

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Current time truncated to microseconds, the precision the store keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for an update made at `now` to a document last written at `previous`.
///
/// Always strictly later than `previous`, even when the clock has not advanced.
pub fn advance_past(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
