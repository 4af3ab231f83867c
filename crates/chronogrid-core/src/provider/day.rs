// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::format_description;

use super::{ModelContext, Navigation, Provider, cell, into_rows, month_year_label, year_label};
use crate::instant::{week_from, weekday_abbreviation};
use crate::{Instant, NavButton, View, ViewModel};

const COLUMNS: usize = 7;
const ROWS: usize = 6;

/// Six full weeks covering one month.
///
/// The grid starts on the configured first weekday on or before the 1st, so
/// the leading days belong to the previous month (`past`) and the trailing
/// days to the next one (`future`).
#[derive(Debug, Clone, Copy, Default)]
pub struct DayProvider;

impl Provider for DayProvider {
    fn view(&self) -> View {
        View::Day
    }

    fn get_model(
        &self,
        instant: Instant,
        selected: Option<Instant>,
        context: &ModelContext,
    ) -> ViewModel {
        let active = instant.truncate(View::Day);
        let month_start = instant.truncate(View::Month);
        let month_end = month_start.add_months(1);
        let selected = selected.map(|value| value.truncate(View::Day));
        let now = context.now.truncate(View::Day);

        let lead = (7 + i64::from(month_start.weekday().number_days_from_monday())
            - i64::from(context.week_start.number_days_from_monday()))
            % 7;
        let grid_start = month_start.add_days(-lead);

        let cells = (0..ROWS * COLUMNS)
            .map(|offset| {
                let value = grid_start.add_days(offset as i64);
                let datetime = value.datetime();
                let display = datetime
                    .format(format_description!("[day padding:none]"))
                    .unwrap_or_default();
                let aria_label = datetime
                    .format(format_description!(
                        "[weekday repr:short], [month repr:short] [day padding:none], [year]"
                    ))
                    .unwrap_or_default();
                let mut day = cell(display, aria_label, value, active, selected, now);
                day.classes.past = Some(value < month_start);
                day.classes.future = Some(value >= month_end);
                day
            })
            .collect();

        let previous = month_start.add_months(-1);
        ViewModel {
            view_name: View::Day,
            view_label: month_year_label(month_start),
            active_date: active,
            rows: into_rows(cells, COLUMNS),
            row_labels: week_from(context.week_start)
                .into_iter()
                .map(|weekday| weekday_abbreviation(weekday).to_owned())
                .collect(),
            left_button: NavButton::new(
                previous,
                format!("Go to {}", month_year_label(previous)),
            ),
            right_button: NavButton::new(
                month_end,
                format!("Go to {}", month_year_label(month_end)),
            ),
            up_button: Some(NavButton::new(
                month_start,
                format!("Go to {}", year_label(month_start)),
            )),
        }
    }

    fn target(&self, from: Instant, navigation: Navigation, _context: &ModelContext) -> Instant {
        match navigation {
            Navigation::Up => from.add_days(-7),
            Navigation::Down => from.add_days(7),
            Navigation::Left => from.add_days(-1),
            Navigation::Right => from.add_days(1),
            Navigation::PageUp => from.add_months(-1),
            Navigation::PageDown => from.add_months(1),
            Navigation::Home => from.truncate(View::Month),
            Navigation::End => from.truncate(View::Month).add_months(1).add_days(-1),
        }
    }
}
