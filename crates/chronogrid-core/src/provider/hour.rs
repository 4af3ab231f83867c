// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use super::{
    ModelContext, Navigation, Provider, cell, clock_label, date_label, date_time_label, into_rows,
    month_year_label,
};
use crate::{Instant, NavButton, View, ViewModel};

const COLUMNS: usize = 4;
const HOURS: usize = 24;

#[derive(Debug, Clone, Copy, Default)]
pub struct HourProvider;

impl Provider for HourProvider {
    fn view(&self) -> View {
        View::Hour
    }

    fn get_model(
        &self,
        instant: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        let active = instant.truncate(View::Hour);
        let day_start = instant.truncate(View::Day);
        let selected = selected.map(|value| value.truncate(View::Hour));
        let now = context.now.truncate(View::Hour);

        let cells = (0..HOURS)
            .map(|offset| {
                let value = day_start.add_hours(offset as i64);
                cell(
                    clock_label(value),
                    date_time_label(value),
                    value,
                    active,
                    selected,
                    now,
                )
            })
            .collect();

        let previous = day_start.add_days(-1);
        let next = day_start.add_days(1);
        ViewModel {
            view_name: View::Hour,
            view_label: date_label(day_start),
            active_date: active,
            rows: into_rows(cells, COLUMNS),
            row_labels: Vec::new(),
            left_button: NavButton::new(previous, format!("Go to {}", date_label(previous))),
            right_button: NavButton::new(next, format!("Go to {}", date_label(next))),
            up_button: Some(NavButton::new(
                day_start,
                format!("Go to {}", month_year_label(day_start)),
            )),
        }
    }

    fn target(&self, from: Instant, navigation: Navigation, _context: &ModelContext) -> Instant {
        match navigation {
            Navigation::Up => from.add_hours(-4),
            Navigation::Down => from.add_hours(4),
            Navigation::Left => from.add_hours(-1),
            Navigation::Right => from.add_hours(1),
            Navigation::PageUp => from.add_days(-1),
            Navigation::PageDown => from.add_days(1),
            Navigation::Home => from.truncate(View::Day),
            Navigation::End => from.truncate(View::Day).add_hours(23),
        }
    }
}
