//! Enumeration of calendar dates falling on a given weekday

use std::mem::replace;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::DateToken;

/// Inclusive range of days, iterated in ascending order
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 > self.1 {
            return None;
        }
        match self.0.checked_add_days(Days::new(1)) {
            Some(next) => Some(replace(&mut self.0, next)),
            None => {
                // NaiveDate::MAX has no successor
                let last = self.0;
                self.1 = last.pred_opt().unwrap_or(NaiveDate::MIN);
                Some(last)
            }
        }
    }
}

impl DateRange {
    /// January 1 of `start_year` through December 31 of `end_year`
    #[must_use]
    pub fn years(start_year: i32, end_year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(start_year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(end_year, 12, 31)?;
        Some(Self(start, end))
    }
}

/// Every date between January 1 of `start_year` and December 31 of
/// `end_year` (inclusive) that falls on `weekday`, ascending.
///
/// Empty when `start_year > end_year` or either year is out of range.
#[must_use]
pub fn weekdays_between(start_year: i32, end_year: i32, weekday: Weekday) -> Vec<DateToken> {
    let Some(range) = DateRange::years(start_year, end_year) else {
        return Vec::new();
    };

    range
        .filter(|day| day.weekday() == weekday)
        .map(DateToken::from)
        .collect()
}

#[must_use]
pub fn thursdays_between(start_year: i32, end_year: i32) -> Vec<DateToken> {
    weekdays_between(start_year, end_year, Weekday::Thu)
}
