//! Calendar age arithmetic

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Elapsed calendar time between a birth date and another date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgeDuration {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl AgeDuration {
    pub const ZERO: AgeDuration = AgeDuration {
        years: 0,
        months: 0,
        days: 0,
    };

    pub fn new(years: u32, months: u32, days: u32) -> Self {
        AgeDuration {
            years,
            months,
            days,
        }
    }
}

impl fmt::Display for AgeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_age(self))
    }
}

/// Number of days in the month before `date`'s month.
fn days_in_previous_month(date: NaiveDate) -> i32 {
    // Stepping back `day` days always lands on the last day of the previous month
    let last_of_previous = date - Duration::days(date.day() as i64);
    last_of_previous.day() as i32
}

/// Decompose the time from `birth_date` to `target_date` into years, months and days.
///
/// Days are borrowed from the month preceding the target month. If the count is
/// still negative after borrowing (born on the 31st, borrowing from February)
/// the anniversary is taken as that month's last day and the days are the
/// target day of the month.
///
/// A target date before the birth date yields [`AgeDuration::ZERO`].
pub fn calculate_age(birth_date: NaiveDate, target_date: NaiveDate) -> AgeDuration {
    if target_date < birth_date {
        return AgeDuration::ZERO;
    }

    let mut years = target_date.year() - birth_date.year();
    let mut months = target_date.month() as i32 - birth_date.month() as i32;
    let mut days = target_date.day() as i32 - birth_date.day() as i32;

    if days < 0 {
        months -= 1;
        days += days_in_previous_month(target_date);
        if days < 0 {
            days = target_date.day() as i32;
        }
    }

    if months < 0 {
        years -= 1;
        months += 12;
    }

    AgeDuration::new(years as u32, months as u32, days as u32)
}

/// Render an age as text, e.g. `1 years 2 months 3 days`.
///
/// Zero components are left out, except that an all-zero age reads `0 days`.
pub fn format_age(age: &AgeDuration) -> String {
    let mut parts = Vec::new();
    if age.years > 0 {
        parts.push(format!("{} years", age.years));
    }
    if age.months > 0 {
        parts.push(format!("{} months", age.months));
    }
    if age.days > 0 || parts.is_empty() {
        parts.push(format!("{} days", age.days));
    }
    parts.join(" ")
}
