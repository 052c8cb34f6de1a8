//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `created_at`, cache entries, and ranking input.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
