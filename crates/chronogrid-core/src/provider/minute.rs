// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use super::{
    ModelContext, Navigation, Provider, cell, clock_label, date_label, date_time_label, into_rows,
};
use crate::{Instant, MinuteStep, NavButton, View, ViewModel};

const COLUMNS: usize = 4;

/// One hour split into `minute_step` slots, four per row.
///
/// When the step does not divide 60 the last row is short.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinuteProvider;

impl Provider for MinuteProvider {
    fn view(&self) -> View {
        View::Minute
    }

    fn get_model(
        &self,
        instant: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        let step = context.minute_step;
        let hour_start = instant.truncate(View::Hour);
        let active = stepped(instant, step);
        let selected = selected.map(|value| stepped(value, step));
        let now = stepped(context.now, step);

        let cells = (0..step.cell_count())
            .map(|index| {
                let value = hour_start.add_minutes(index as i64 * step.minutes());
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

        let previous = hour_start.add_hours(-1);
        let next = hour_start.add_hours(1);
        ViewModel {
            view_name: View::Minute,
            view_label: date_time_label(hour_start),
            active_date: active,
            rows: into_rows(cells, COLUMNS),
            row_labels: Vec::new(),
            left_button: NavButton::new(previous, format!("Go to {}", date_time_label(previous))),
            right_button: NavButton::new(next, format!("Go to {}", date_time_label(next))),
            up_button: Some(NavButton::new(
                hour_start,
                format!("Go to {}", date_label(hour_start)),
            )),
        }
    }

    fn target(&self, from: Instant, navigation: Navigation, context: &ModelContext) -> Instant {
        let step = context.minute_step.minutes();
        match navigation {
            Navigation::Up => from.add_minutes(-4 * step),
            Navigation::Down => from.add_minutes(4 * step),
            Navigation::Left => from.add_minutes(-step),
            Navigation::Right => from.add_minutes(step),
            Navigation::PageUp => from.add_hours(-1),
            Navigation::PageDown => from.add_hours(1),
            Navigation::Home => from.truncate(View::Hour),
            Navigation::End => {
                let last = context.minute_step.cell_count() as i64 - 1;
                from.truncate(View::Hour).add_minutes(step * last)
            }
        }
    }
}

/// Greatest step boundary within the hour that is not after `instant`.
fn stepped(instant: Instant, step: MinuteStep) -> Instant {
    let minute = i64::from(instant.minute());
    let offset = minute / step.minutes() * step.minutes();
    instant.truncate(View::Hour).add_minutes(offset)
}
