//! Day-boundary helpers shared by the resolver, the geometry mapper, and the
//! layout facade.
//!
//! All values are naive wall-clock datetimes. The engine never converts
//! between timezones and never reads the system clock.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Midnight (00:00:00) at the start of `date`.
pub fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Midnight at the start of the following calendar day.
///
/// Used as an exclusive upper bound. Saturates at [`NaiveDateTime::MAX`] for
/// the last representable date.
pub fn day_end(date: NaiveDate) -> NaiveDateTime {
    date.checked_add_days(Days::new(1))
        .map_or(NaiveDateTime::MAX, day_start)
}

/// Whether two instants fall on the same calendar day (year, month and day).
pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Whole minutes from the start of `anchor_date` to `time`.
///
/// Negative when `time` falls before the anchor day. Seconds are truncated
/// toward zero.
pub fn minutes_since_day_start(time: NaiveDateTime, anchor_date: NaiveDate) -> i64 {
    (time - day_start(anchor_date)).num_minutes()
}

// ── Tests ───────────────────────────────────────────────────────────────────
