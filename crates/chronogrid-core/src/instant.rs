// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, Weekday};

use crate::View;

pub const MILLIS_PER_MINUTE: i64 = 60_000;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Wall-clock milliseconds since the epoch.
///
/// The value carries no zone: its components are read as if the epoch were
/// local midnight, so a day is always exactly [`MILLIS_PER_DAY`] long.
/// Values outside the calendar range supported by `time` (years -9999 through
/// 9999) saturate at the nearest bound.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Instant(i64);

impl Instant {
    pub const EPOCH: Self = Self(0);

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn millis(self) -> i64 {
        self.0
    }

    pub fn from_datetime(datetime: PrimitiveDateTime) -> Self {
        let nanos = datetime.assume_utc().unix_timestamp_nanos();
        Self(nanos.div_euclid(1_000_000) as i64)
    }

    /// Builds an instant from wall-clock components, rejecting impossible dates.
    pub fn from_parts(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        let date = Date::from_calendar_date(year, month, day).ok()?;
        let time = Time::from_hms(hour, minute, 0).ok()?;
        Some(Self::from_datetime(PrimitiveDateTime::new(date, time)))
    }

    pub fn datetime(self) -> PrimitiveDateTime {
        let (min, max) = calendar_bounds();
        let millis = self.0.clamp(min, max);
        match OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000) {
            Ok(datetime) => PrimitiveDateTime::new(datetime.date(), datetime.time()),
            Err(_) if millis < 0 => PrimitiveDateTime::MIN,
            Err(_) => PrimitiveDateTime::MAX,
        }
    }

    pub fn year(self) -> i32 {
        self.datetime().year()
    }

    pub fn month(self) -> Month {
        self.datetime().month()
    }

    pub fn day(self) -> u8 {
        self.datetime().day()
    }

    pub fn hour(self) -> u8 {
        self.datetime().hour()
    }

    pub fn minute(self) -> u8 {
        self.datetime().minute()
    }

    pub fn weekday(self) -> Weekday {
        self.datetime().weekday()
    }

    /// Start of the unit containing `self` at the given granularity.
    pub fn truncate(self, view: View) -> Self {
        match view {
            View::Minute => self.floor_to(MILLIS_PER_MINUTE),
            View::Hour => self.floor_to(MILLIS_PER_HOUR),
            View::Day => self.floor_to(MILLIS_PER_DAY),
            View::Month => {
                let date = self.datetime().date();
                Self::from_calendar(date.year(), date.month(), 1)
            }
            View::Year => Self::from_calendar(self.year(), Month::January, 1),
        }
    }

    /// Jan 1 of the decade containing `self`.
    pub fn start_of_decade(self) -> Self {
        let year = self.year().div_euclid(10) * 10;
        Self::from_calendar(year, Month::January, 1)
    }

    /// Exclusive end of the unit that starts at `self`.
    pub fn span_end(self, view: View) -> Self {
        match view {
            View::Minute => self.add_minutes(1),
            View::Hour => self.add_hours(1),
            View::Day => self.add_days(1),
            View::Month => self.add_months(1),
            View::Year => self.add_years(1),
        }
    }

    pub fn add_millis(self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis)).saturate()
    }

    pub fn add_minutes(self, minutes: i64) -> Self {
        self.add_millis(minutes.saturating_mul(MILLIS_PER_MINUTE))
    }

    pub fn add_hours(self, hours: i64) -> Self {
        self.add_millis(hours.saturating_mul(MILLIS_PER_HOUR))
    }

    pub fn add_days(self, days: i64) -> Self {
        self.add_millis(days.saturating_mul(MILLIS_PER_DAY))
    }

    /// Shifts by calendar months, clamping the day to the target month's length.
    pub fn add_months(self, months: i32) -> Self {
        let datetime = self.datetime();
        let date = datetime.date();
        let total_month = i64::from(date.month() as u8) - 1 + i64::from(months);
        let year = i64::from(date.year()) + total_month.div_euclid(12);
        let month_number = (total_month.rem_euclid(12) + 1) as u8;
        let Ok(month) = Month::try_from(month_number) else {
            return self;
        };
        let Some(year) = i32::try_from(year).ok().filter(|year| in_calendar_range(*year)) else {
            return if months < 0 {
                Self(calendar_bounds().0)
            } else {
                Self(calendar_bounds().1)
            };
        };
        let day = date.day().min(days_in_month(year, month));
        let clock = self.0.rem_euclid(MILLIS_PER_DAY);
        Self::from_calendar(year, month, day).add_millis(clock)
    }

    pub fn add_years(self, years: i32) -> Self {
        self.add_months(years.saturating_mul(12))
    }

    fn floor_to(self, unit: i64) -> Self {
        let millis = self.saturate().0;
        Self(millis.div_euclid(unit) * unit).saturate()
    }

    fn saturate(self) -> Self {
        let (min, max) = calendar_bounds();
        Self(self.0.clamp(min, max))
    }

    /// Midnight of a calendar date, saturating outside the supported range.
    pub(crate) fn from_calendar(year: i32, month: Month, day: u8) -> Self {
        let (min, max) = calendar_bounds();
        if !in_calendar_range(year) {
            return if year < 0 { Self(min) } else { Self(max) };
        }
        let day = day.clamp(1, days_in_month(year, month));
        match Date::from_calendar_date(year, month, day) {
            Ok(date) => Self::from_datetime(date.midnight()),
            Err(_) => Self(min),
        }
    }
}

impl From<PrimitiveDateTime> for Instant {
    fn from(value: PrimitiveDateTime) -> Self {
        Self::from_datetime(value)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .datetime()
            .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Two-letter abbreviation used for Day view column headers.
pub fn weekday_abbreviation(weekday: Weekday) -> &'static str {
    WEEKDAY_ABBREVIATIONS[usize::from(weekday.number_days_from_monday())]
}

/// The seven weekdays starting at `first`.
pub fn week_from(first: Weekday) -> [Weekday; 7] {
    std::array::from_fn(|offset| first.nth_next(offset as u8))
}

pub fn parse_weekday(value: &str) -> Option<Weekday> {
    match value.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" | "mo" => Some(Weekday::Monday),
        "tuesday" | "tue" | "tu" => Some(Weekday::Tuesday),
        "wednesday" | "wed" | "we" => Some(Weekday::Wednesday),
        "thursday" | "thu" | "th" => Some(Weekday::Thursday),
        "friday" | "fri" | "fr" => Some(Weekday::Friday),
        "saturday" | "sat" | "sa" => Some(Weekday::Saturday),
        "sunday" | "sun" | "su" => Some(Weekday::Sunday),
        _ => None,
    }
}

/// Length of a month: the day before the first of the following month.
pub fn days_in_month(year: i32, month: Month) -> u8 {
    let (next_year, next_month) = if month == Month::December {
        (year + 1, Month::January)
    } else {
        (year, month.next())
    };
    Date::from_calendar_date(next_year, next_month, 1)
        .ok()
        .and_then(Date::previous_day)
        .map_or(31, |last| last.day())
}

fn in_calendar_range(year: i32) -> bool {
    (Date::MIN.year()..=Date::MAX.year()).contains(&year)
}

fn calendar_bounds() -> (i64, i64) {
    let min = PrimitiveDateTime::MIN.assume_utc().unix_timestamp_nanos() / 1_000_000;
    let max = PrimitiveDateTime::MAX.assume_utc().unix_timestamp_nanos() / 1_000_000;
    (min as i64, max as i64)
}
