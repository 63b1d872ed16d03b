//! Domain model for migration-tracker projections.
//!
//! # Responsibility
//! - Define canonical records shared by board, timeline and metrics views.
//! - Replace string lookup tables with closed enums and fixed style mappings.
//!
//! # Invariants
//! - `completed_tasks <= total_tasks` and
//!   `blocked_tasks <= total_tasks - completed_tasks` for every `Project`.
//! - Risk level is derived from health score; it is never stored.
//!
//! # See also
//! - `crate::metrics` for values derived from these records.
//! - `crate::board` for phase moves.

pub mod blocker;
pub mod comment;
pub mod ids;
pub mod phase;
pub mod project;
pub mod task;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Returns UTC midnight at the start of `date`.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Whole days from `now` until the start of `date`, rounded up.
///
/// Matches dashboard countdown semantics: a deadline later today reports
/// `1`, a deadline whose midnight already passed reports `0` or less.
pub fn days_until(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let diff_ms = (start_of_day_utc(date) - now).num_milliseconds();
    let whole = diff_ms / MILLIS_PER_DAY;
    if diff_ms % MILLIS_PER_DAY > 0 {
        whole + 1
    } else {
        whole
    }
}

/// Error returned when a wire string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    /// Enum name used in diagnostics, e.g. `phase`.
    pub kind: &'static str,
    /// Rejected input value.
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl Display for ParseEnumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: `{}`", self.kind, self.value)
    }
}

impl Error for ParseEnumError {}

#[cfg(test)]
mod tests {
    use super::days_until;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn days_until_rounds_partial_days_up() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(days_until(date, now), 5);
    }

    #[test]
    fn days_until_is_zero_once_midnight_passed() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(days_until(date, now), 0);
    }

    #[test]
    fn days_until_is_negative_for_past_dates() {
        let now = Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(days_until(date, now), -5);
    }
}
