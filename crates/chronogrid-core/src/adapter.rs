// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::Instant;

/// Converts between the host's notion of a point in time and [`Instant`].
pub trait ValueAdapter {
    type Value;

    /// `None` means the value is absent or unusable; the picker then anchors
    /// on its default value or the clock.
    fn to_instant(&self, value: &Self::Value) -> Option<Instant>;

    fn from_instant(&self, instant: Instant) -> Self::Value;
}

/// Source of "now" for the `now` cell flag.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<F> Clock for F
where
    F: Fn() -> Instant,
{
    fn now(&self) -> Instant {
        self()
    }
}

/// Local wall clock, or UTC when the local offset cannot be determined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Instant::from_datetime(PrimitiveDateTime::new(now.date(), now.time()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Instant);

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}

/// Raw wall-clock milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct MillisAdapter;

impl ValueAdapter for MillisAdapter {
    type Value = i64;

    fn to_instant(&self, value: &i64) -> Option<Instant> {
        Some(Instant::from_millis(*value))
    }

    fn from_instant(&self, instant: Instant) -> i64 {
        instant.millis()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeAdapter;

impl ValueAdapter for DateTimeAdapter {
    type Value = PrimitiveDateTime;

    fn to_instant(&self, value: &PrimitiveDateTime) -> Option<Instant> {
        Some(Instant::from_datetime(*value))
    }

    fn from_instant(&self, instant: Instant) -> PrimitiveDateTime {
        instant.datetime()
    }
}

/// `YYYY-MM-DD HH:MM` text. Bare `YYYY-MM-DD` dates parse as midnight; blank
/// or unparseable text is treated as no value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextAdapter;

impl TextAdapter {
    pub fn parse(raw: &str) -> Option<Instant> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(datetime) = PrimitiveDateTime::parse(
            raw,
            format_description!("[year]-[month]-[day] [hour]:[minute]"),
        ) {
            return Some(Instant::from_datetime(datetime));
        }
        if let Ok(datetime) = PrimitiveDateTime::parse(
            raw,
            format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        ) {
            return Some(Instant::from_datetime(datetime));
        }
        Date::parse(raw, format_description!("[year]-[month]-[day]"))
            .ok()
            .map(|date| Instant::from_datetime(date.midnight()))
    }
}

impl ValueAdapter for TextAdapter {
    type Value = String;

    fn to_instant(&self, value: &String) -> Option<Instant> {
        Self::parse(value)
    }

    fn from_instant(&self, instant: Instant) -> String {
        instant.to_string()
    }
}

impl<A: ValueAdapter> ValueAdapter for &A {
    type Value = A::Value;

    fn to_instant(&self, value: &Self::Value) -> Option<Instant> {
        (**self).to_instant(value)
    }

    fn from_instant(&self, instant: Instant) -> Self::Value {
        (**self).from_instant(instant)
    }
}
