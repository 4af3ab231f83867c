// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Grid providers, one per [`View`].
//!
//! Every provider is a stateless unit struct. Anything that varies between
//! calls (the clock reading, the minute step, the first weekday) arrives in a
//! [`ModelContext`], so the same inputs always produce the same model.

mod day;
mod hour;
mod minute;
mod month;
mod year;

pub use day::DayProvider;
pub use hour::HourProvider;
pub use minute::MinuteProvider;
pub use month::MonthProvider;
pub use year::YearProvider;

use time::Weekday;
use time::macros::format_description;

use crate::{Cell, CellClasses, Instant, MinuteStep, PickerConfig, Row, View, ViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelContext {
    pub now: Instant,
    pub minute_step: MinuteStep,
    pub week_start: Weekday,
}

impl ModelContext {
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            minute_step: MinuteStep::default(),
            week_start: Weekday::Monday,
        }
    }

    pub fn from_config(config: &PickerConfig, now: Instant) -> Self {
        Self {
            now,
            minute_step: config.minute_step,
            week_start: config.week_start,
        }
    }

    pub fn with_minute_step(self, minute_step: MinuteStep) -> Self {
        Self {
            minute_step,
            ..self
        }
    }

    pub fn with_week_start(self, week_start: Weekday) -> Self {
        Self { week_start, ..self }
    }
}

/// Cursor movements every provider understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Navigation {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
}

impl Navigation {
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::PageUp,
        Self::PageDown,
        Self::Home,
        Self::End,
    ];
}

pub trait Provider: Sync {
    fn view(&self) -> View;

    /// Builds the grid containing `instant` with the cell for `instant` active.
    fn get_model(
        &self,
        instant: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel;

    /// Instant the cursor lands on after moving from `from`.
    fn target(&self, from: Instant, navigation: Navigation, context: &ModelContext) -> Instant;

    fn navigate(
        &self,
        from: Instant,
        selected: Option<Instant>,
        navigation: Navigation,
        context: &ModelContext,
    ) -> ViewModel {
        self.get_model(self.target(from, navigation, context), selected, context)
    }

    fn go_up(&self, from: Instant, selected: Option<Instant>, context: &ModelContext) -> ViewModel {
        self.navigate(from, selected, Navigation::Up, context)
    }

    fn go_down(
        &self,
        from: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        self.navigate(from, selected, Navigation::Down, context)
    }

    fn go_left(
        &self,
        from: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        self.navigate(from, selected, Navigation::Left, context)
    }

    fn go_right(
        &self,
        from: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        self.navigate(from, selected, Navigation::Right, context)
    }

    fn page_up(
        &self,
        from: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        self.navigate(from, selected, Navigation::PageUp, context)
    }

    fn page_down(
        &self,
        from: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        self.navigate(from, selected, Navigation::PageDown, context)
    }

    fn go_home(
        &self,
        from: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        self.navigate(from, selected, Navigation::Home, context)
    }

    fn go_end(
        &self,
        from: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        self.navigate(from, selected, Navigation::End, context)
    }
}

static PROVIDERS: [&dyn Provider; 5] = [
    &MinuteProvider,
    &HourProvider,
    &DayProvider,
    &MonthProvider,
    &YearProvider,
];

pub fn provider_for(view: View) -> &'static dyn Provider {
    PROVIDERS[view.index()]
}

/// Cell whose flags compare already-truncated instants.
fn cell(
    display: String,
    aria_label: String,
    value: Instant,
    active: Instant,
    selected: Option<Instant>,
    now: Instant,
) -> Cell {
    Cell {
        display,
        aria_label: Some(aria_label),
        value,
        classes: CellClasses {
            active: value == active,
            selected: selected == Some(value),
            now: value == now,
            ..CellClasses::default()
        },
    }
}

fn into_rows(cells: Vec<Cell>, columns: usize) -> Vec<Row> {
    cells
        .chunks(columns)
        .map(|chunk| Row {
            cells: chunk.to_vec(),
        })
        .collect()
}

fn year_label(instant: Instant) -> String {
    instant
        .datetime()
        .format(format_description!("[year]"))
        .unwrap_or_default()
}

fn decade_label(decade_start: Instant) -> String {
    let first = decade_start.year();
    format!("{first}-{}", first + 9)
}

fn month_year_label(instant: Instant) -> String {
    instant
        .datetime()
        .format(format_description!("[month repr:short] [year]"))
        .unwrap_or_default()
}

fn date_label(instant: Instant) -> String {
    instant
        .datetime()
        .format(format_description!(
            "[month repr:short] [day padding:none], [year]"
        ))
        .unwrap_or_default()
}

fn date_time_label(instant: Instant) -> String {
    instant
        .datetime()
        .format(format_description!(
            "[month repr:short] [day padding:none], [year] [hour]:[minute]"
        ))
        .unwrap_or_default()
}

fn clock_label(instant: Instant) -> String {
    instant
        .datetime()
        .format(format_description!("[hour]:[minute]"))
        .unwrap_or_default()
}
