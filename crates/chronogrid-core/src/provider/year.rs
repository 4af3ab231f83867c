// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use super::{ModelContext, Navigation, Provider, cell, decade_label, into_rows, year_label};
use crate::{Instant, NavButton, View, ViewModel};

const COLUMNS: usize = 5;
const ROWS: usize = 2;

/// Ten years of one decade, laid out 2×5.
#[derive(Debug, Clone, Copy, Default)]
pub struct YearProvider;

impl Provider for YearProvider {
    fn view(&self) -> View {
        View::Year
    }

    fn get_model(
        &self,
        instant: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        let active = instant.truncate(View::Year);
        let decade = active.start_of_decade();
        let selected = selected.map(|value| value.truncate(View::Year));
        let now = context.now.truncate(View::Year);

        let cells = (0..ROWS * COLUMNS)
            .map(|offset| {
                let value = decade.add_years(offset as i32);
                let label = year_label(value);
                cell(label.clone(), label, value, active, selected, now)
            })
            .collect();

        let previous = decade.add_years(-10);
        let next = decade.add_years(10);
        ViewModel {
            view_name: View::Year,
            view_label: decade_label(decade),
            active_date: active,
            rows: into_rows(cells, COLUMNS),
            row_labels: Vec::new(),
            left_button: NavButton::new(previous, format!("Go to {}", decade_label(previous))),
            right_button: NavButton::new(next, format!("Go to {}", decade_label(next))),
            up_button: None,
        }
    }

    fn target(&self, from: Instant, navigation: Navigation, _context: &ModelContext) -> Instant {
        match navigation {
            Navigation::Up => from.add_years(-5),
            Navigation::Down => from.add_years(5),
            Navigation::Left => from.add_years(-1),
            Navigation::Right => from.add_years(1),
            Navigation::PageUp => from.add_years(-10),
            Navigation::PageDown => from.add_years(10),
            Navigation::Home => from.start_of_decade(),
            // Last millisecond of the decade; get_model truncates it to Jan 1.
            Navigation::End => from.start_of_decade().add_years(10).add_millis(-1),
        }
    }
}
