//! Shared traits and calendar utilities for expense primitives.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Number of days in a calendar week bucket.
pub const DAYS_PER_WEEK: usize = 7;

/// Returns true when `timestamp` falls on the calendar day `day`.
pub fn same_day(timestamp: NaiveDateTime, day: NaiveDate) -> bool {
    timestamp.date() == day
}

/// Returns the first day of the week containing `date`, where weeks begin on `first_weekday`.
///
/// Clamps to [`NaiveDate::MIN`] when that day precedes the supported calendar.
pub fn start_of_week(date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
    let current = date.weekday().num_days_from_sunday() as i64;
    let first = first_weekday.num_days_from_sunday() as i64;
    let delta = (current - first).rem_euclid(DAYS_PER_WEEK as i64) as u64;
    date.checked_sub_days(Days::new(delta)).unwrap_or(NaiveDate::MIN)
}

/// Lists the seven calendar days of the week containing `date`, in order.
///
/// Days past the end of the supported calendar repeat [`NaiveDate::MAX`].
pub fn week_days(date: NaiveDate, first_weekday: Weekday) -> [NaiveDate; DAYS_PER_WEEK] {
    let start = start_of_week(date, first_weekday);
    let mut days = [start; DAYS_PER_WEEK];
    for (offset, day) in days.iter_mut().enumerate() {
        *day = start
            .checked_add_days(Days::new(offset as u64))
            .unwrap_or(NaiveDate::MAX);
    }
    days
}

/// True when every week containing `date` lies inside the supported calendar,
/// whichever weekday the week starts on.
pub fn has_full_week(date: NaiveDate) -> bool {
    let span = Days::new(DAYS_PER_WEEK as u64 - 1);
    date.checked_sub_days(span).is_some() && date.checked_add_days(span).is_some()
}
