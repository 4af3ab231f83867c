// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use time::Weekday;

use crate::{Cell, Instant, View};

pub const DEFAULT_MINUTE_STEP: u8 = 5;

/// Minutes between cells in the Minute view.
///
/// Anything outside `1..=59` (zero, negatives, 60 and above, non-finite or
/// non-numeric input) falls back to [`DEFAULT_MINUTE_STEP`]. Fractional steps
/// are truncated first, so `0.5` also falls back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawMinuteStep", into = "u8")]
pub struct MinuteStep(u8);

impl MinuteStep {
    pub fn new(step: i64) -> Self {
        match u8::try_from(step) {
            Ok(step @ 1..=59) => Self(step),
            _ => Self::default(),
        }
    }

    pub fn from_f64(step: f64) -> Self {
        if step.is_finite() {
            Self::new(step.trunc() as i64)
        } else {
            Self::default()
        }
    }

    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(step) = raw.parse::<i64>() {
            return Self::new(step);
        }
        raw.parse::<f64>().map(Self::from_f64).unwrap_or_default()
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn minutes(self) -> i64 {
        self.0 as i64
    }

    /// Number of stepped offsets that fit in one hour.
    pub const fn cell_count(self) -> usize {
        60usize.div_ceil(self.0 as usize)
    }
}

impl Default for MinuteStep {
    fn default() -> Self {
        Self(DEFAULT_MINUTE_STEP)
    }
}

impl From<MinuteStep> for u8 {
    fn from(value: MinuteStep) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMinuteStep {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl From<RawMinuteStep> for MinuteStep {
    fn from(value: RawMinuteStep) -> Self {
        match value {
            RawMinuteStep::Integer(step) => Self::new(step),
            RawMinuteStep::Float(step) => Self::from_f64(step),
            RawMinuteStep::Text(raw) => Self::parse(&raw),
            RawMinuteStep::Other(_) => Self::default(),
        }
    }
}

/// Host predicate deciding whether a cell may be selected.
pub type SelectFilter = Arc<dyn Fn(&Cell, View) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct PickerConfig {
    pub minute_step: MinuteStep,
    pub min_view: View,
    pub max_view: View,
    pub start_view: View,
    pub week_start: Weekday,
    pub default_value: Option<Instant>,
    pub select_filter: Option<SelectFilter>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            minute_step: MinuteStep::default(),
            min_view: View::Minute,
            max_view: View::Year,
            start_view: View::Day,
            week_start: Weekday::Monday,
            default_value: None,
            select_filter: None,
        }
    }
}

impl fmt::Debug for PickerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerConfig")
            .field("minute_step", &self.minute_step)
            .field("min_view", &self.min_view)
            .field("max_view", &self.max_view)
            .field("start_view", &self.start_view)
            .field("week_start", &self.week_start)
            .field("default_value", &self.default_value)
            .field("select_filter", &self.select_filter.is_some())
            .finish()
    }
}

impl PickerConfig {
    /// View shown first and after every commit.
    pub fn initial_view(&self) -> View {
        self.min_view.max(self.start_view)
    }

    pub fn with_select_filter(
        mut self,
        filter: impl Fn(&Cell, View) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.select_filter = Some(Arc::new(filter));
        self
    }

    /// Checks `min_view <= start_view <= max_view`. The picker itself never
    /// calls this; hosts that load config from outside should.
    pub fn validate(&self) -> Result<()> {
        if self.min_view > self.max_view {
            bail!(
                "min_view {} is coarser than max_view {}",
                self.min_view.as_str(),
                self.max_view.as_str()
            );
        }
        if self.start_view < self.min_view || self.start_view > self.max_view {
            bail!(
                "start_view {} must be between min_view {} and max_view {}",
                self.start_view.as_str(),
                self.min_view.as_str(),
                self.max_view.as_str()
            );
        }
        Ok(())
    }

    pub fn apply(&mut self, change: ConfigChange) {
        match change {
            ConfigChange::MinuteStep(step) => self.minute_step = step,
            ConfigChange::MinView(view) => self.min_view = view,
            ConfigChange::MaxView(view) => self.max_view = view,
            ConfigChange::StartView(view) => self.start_view = view,
            ConfigChange::WeekStart(weekday) => self.week_start = weekday,
            ConfigChange::DefaultValue(value) => self.default_value = value,
            ConfigChange::SelectFilter(filter) => self.select_filter = filter,
        }
    }
}

/// One field of a partial config update.
#[derive(Clone)]
pub enum ConfigChange {
    MinuteStep(MinuteStep),
    MinView(View),
    MaxView(View),
    StartView(View),
    WeekStart(Weekday),
    DefaultValue(Option<Instant>),
    SelectFilter(Option<SelectFilter>),
}

impl fmt::Debug for ConfigChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinuteStep(step) => f.debug_tuple("MinuteStep").field(step).finish(),
            Self::MinView(view) => f.debug_tuple("MinView").field(view).finish(),
            Self::MaxView(view) => f.debug_tuple("MaxView").field(view).finish(),
            Self::StartView(view) => f.debug_tuple("StartView").field(view).finish(),
            Self::WeekStart(weekday) => f.debug_tuple("WeekStart").field(weekday).finish(),
            Self::DefaultValue(value) => f.debug_tuple("DefaultValue").field(value).finish(),
            Self::SelectFilter(filter) => f
                .debug_tuple("SelectFilter")
                .field(&filter.is_some())
                .finish(),
        }
    }
}

/// Selection predicate from optional inclusive bounds.
///
/// A cell is selectable when the span it covers overlaps the bounds, so a
/// year stays enabled as long as any part of it is in range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeFilter {
    pub not_before: Option<Instant>,
    pub not_after: Option<Instant>,
}

impl RangeFilter {
    pub fn allows(&self, cell: &Cell, view: View) -> bool {
        let start = cell.value;
        let end = start.span_end(view);
        let after_lower = self.not_before.is_none_or(|bound| end > bound);
        let before_upper = self.not_after.is_none_or(|bound| start <= bound);
        after_lower && before_upper
    }

    pub fn is_unbounded(&self) -> bool {
        self.not_before.is_none() && self.not_after.is_none()
    }

    pub fn into_select_filter(self) -> SelectFilter {
        Arc::new(move |cell, view| self.allows(cell, view))
    }
}
