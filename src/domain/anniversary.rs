//! Distance to the next occurrence of a birthday.

use chrono::{Datelike, NaiveDate};

/// Returns the next anniversary of `birthday` on or after `today`.
///
/// A 29 February birthday falls on 28 February in non-leap years.
///
/// `None` if the next anniversary lies beyond the last representable date.
#[must_use]
pub fn next_anniversary(birthday: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    match anniversary_in(birthday, today.year()) {
        Some(this_year) if this_year >= today => Some(this_year),
        _ => anniversary_in(birthday, today.year().checked_add(1)?),
    }
}

/// Whole days from `today` until the next anniversary of `birthday`.
///
/// Zero when the anniversary is today; never negative.
#[must_use]
pub fn days_until(birthday: NaiveDate, today: NaiveDate) -> Option<i64> {
    next_anniversary(birthday, today).map(|next| (next - today).num_days())
}

fn anniversary_in(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    birthday
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}
