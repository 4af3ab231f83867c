// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Instant;

/// Time granularity of a grid, ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl View {
    pub const ALL: [Self; 5] = [
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Month,
        Self::Year,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "minute" => Some(Self::Minute),
            "hour" => Some(Self::Hour),
            "day" => Some(Self::Day),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The next finer granularity (drill-down target).
    pub const fn finer(self) -> Option<Self> {
        match self {
            Self::Minute => None,
            Self::Hour => Some(Self::Minute),
            Self::Day => Some(Self::Hour),
            Self::Month => Some(Self::Day),
            Self::Year => Some(Self::Month),
        }
    }

    /// The next coarser granularity (drill-up target).
    pub const fn coarser(self) -> Option<Self> {
        match self {
            Self::Minute => Some(Self::Hour),
            Self::Hour => Some(Self::Day),
            Self::Day => Some(Self::Month),
            Self::Month => Some(Self::Year),
            Self::Year => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellClasses {
    pub active: bool,
    pub selected: bool,
    pub now: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    pub value: Instant,
    pub classes: CellClasses,
}

impl Cell {
    pub fn is_disabled(&self) -> bool {
        self.classes.disabled.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavButton {
    pub value: Instant,
    pub aria_label: String,
    pub classes: BTreeMap<String, bool>,
}

impl NavButton {
    pub fn new(value: Instant, aria_label: impl Into<String>) -> Self {
        Self {
            value,
            aria_label: aria_label.into(),
            classes: BTreeMap::new(),
        }
    }
}

/// One fully populated grid. A fresh model is built for every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub view_name: View,
    pub view_label: String,
    pub active_date: Instant,
    pub rows: Vec<Row>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub row_labels: Vec<String>,
    pub left_button: NavButton,
    pub right_button: NavButton,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up_button: Option<NavButton>,
}

impl ViewModel {
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.rows.iter_mut().flat_map(|row| row.cells.iter_mut())
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }

    pub fn cell(&self, value: Instant) -> Option<&Cell> {
        self.cells().find(|cell| cell.value == value)
    }

    pub fn active_cell(&self) -> Option<&Cell> {
        self.cells().find(|cell| cell.classes.active)
    }

    /// Row and column of the cell holding `value`.
    pub fn position_of(&self, value: Instant) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(row_index, row)| {
            row.cells
                .iter()
                .position(|cell| cell.value == value)
                .map(|column| (row_index, column))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, CellClasses, NavButton, Row, View, ViewModel};
    use crate::Instant;

    fn cell(value: i64, active: bool) -> Cell {
        Cell {
            display: value.to_string(),
            aria_label: None,
            value: Instant::from_millis(value),
            classes: CellClasses {
                active,
                ..CellClasses::default()
            },
        }
    }

    fn sample_model() -> ViewModel {
        ViewModel {
            view_name: View::Hour,
            view_label: "sample".to_owned(),
            active_date: Instant::from_millis(3),
            rows: vec![
                Row {
                    cells: vec![cell(1, false), cell(2, false)],
                },
                Row {
                    cells: vec![cell(3, true)],
                },
            ],
            row_labels: Vec::new(),
            left_button: NavButton::new(Instant::from_millis(0), "left"),
            right_button: NavButton::new(Instant::from_millis(4), "right"),
            up_button: None,
        }
    }

    #[test]
    fn view_order_runs_fine_to_coarse() {
        assert!(View::Minute < View::Hour);
        assert!(View::Month < View::Year);
        assert_eq!(View::Day.finer(), Some(View::Hour));
        assert_eq!(View::Day.coarser(), Some(View::Month));
        assert_eq!(View::Minute.finer(), None);
        assert_eq!(View::Year.coarser(), None);
    }

    #[test]
    fn view_names_round_trip() {
        for view in View::ALL {
            assert_eq!(View::parse(view.as_str()), Some(view));
        }
        assert_eq!(View::parse("week"), None);
    }

    #[test]
    fn lookups_walk_rows_in_order() {
        let model = sample_model();
        assert_eq!(model.cell_count(), 3);
        assert_eq!(
            model.active_cell().map(|cell| cell.value),
            Some(Instant::from_millis(3))
        );
        assert_eq!(model.position_of(Instant::from_millis(2)), Some((0, 1)));
        assert_eq!(model.position_of(Instant::from_millis(3)), Some((1, 0)));
        assert!(model.cell(Instant::from_millis(9)).is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_model()).expect("serialize model");
        assert_eq!(json["viewName"], "hour");
        assert_eq!(json["activeDate"], 3);
        assert_eq!(json["leftButton"]["ariaLabel"], "left");
        assert!(json.get("upButton").is_none());
        assert!(json.get("rowLabels").is_none());
        assert!(json["rows"][0]["cells"][0]["classes"].get("disabled").is_none());
    }
}
