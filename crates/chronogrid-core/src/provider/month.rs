// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::format_description;

use super::{ModelContext, Navigation, Provider, cell, decade_label, into_rows, year_label};
use crate::{Instant, NavButton, View, ViewModel};

const COLUMNS: usize = 4;
const MONTHS: usize = 12;

/// The twelve months of one year, laid out 3×4.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthProvider;

impl Provider for MonthProvider {
    fn view(&self) -> View {
        View::Month
    }

    fn get_model(
        &self,
        instant: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        let active = instant.truncate(View::Month);
        let year_start = instant.truncate(View::Year);
        let selected = selected.map(|value| value.truncate(View::Month));
        let now = context.now.truncate(View::Month);

        let cells = (0..MONTHS)
            .map(|offset| {
                let value = year_start.add_months(offset as i32);
                let datetime = value.datetime();
                let display = datetime
                    .format(format_description!("[month repr:short]"))
                    .unwrap_or_default();
                let aria_label = datetime
                    .format(format_description!("[month repr:long] [year]"))
                    .unwrap_or_default();
                cell(display, aria_label, value, active, selected, now)
            })
            .collect();

        let previous = year_start.add_years(-1);
        let next = year_start.add_years(1);
        ViewModel {
            view_name: View::Month,
            view_label: year_label(year_start),
            active_date: active,
            rows: into_rows(cells, COLUMNS),
            row_labels: Vec::new(),
            left_button: NavButton::new(previous, format!("Go to {}", year_label(previous))),
            right_button: NavButton::new(next, format!("Go to {}", year_label(next))),
            up_button: Some(NavButton::new(
                year_start,
                format!("Go to {}", decade_label(year_start.start_of_decade())),
            )),
        }
    }

    fn target(&self, from: Instant, navigation: Navigation, _context: &ModelContext) -> Instant {
        match navigation {
            Navigation::Up => from.add_months(-4),
            Navigation::Down => from.add_months(4),
            Navigation::Left => from.add_months(-1),
            Navigation::Right => from.add_months(1),
            Navigation::PageUp => from.add_years(-1),
            Navigation::PageDown => from.add_years(1),
            Navigation::Home => from.truncate(View::Year),
            Navigation::End => from.truncate(View::Year).add_months(11),
        }
    }
}
