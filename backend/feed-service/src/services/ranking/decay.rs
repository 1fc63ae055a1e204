//! Time decay: freshness multiplier in (0, 1].

use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Fractional hours between `created_at` and `now`, floored at zero.
///
/// A post stamped in the future (clock skew) counts as brand new.
pub fn hours_elapsed(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - created_at).num_milliseconds().max(0);
    millis as f64 / MILLIS_PER_HOUR
}

/// `1 / (hours_elapsed + 1)`
pub fn time_decay(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    1.0 / (hours_elapsed(created_at, now) + 1.0)
}
