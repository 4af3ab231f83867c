// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use chronogrid_core::{Cell, FixedClock, Instant, ModelContext, View, ViewModel};
use std::path::PathBuf;
use time::Weekday;

/// Clock reading used by tests that do not care about the `now` flag.
pub const QUIET_NOW: Instant = Instant::from_millis(0);

/// Wall-clock instant from components, panicking on impossible dates.
pub fn at(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> Instant {
    Instant::from_parts(year, month, day, hour, minute)
        .unwrap_or_else(|| panic!("invalid test instant {year}-{month}-{day} {hour}:{minute}"))
}

pub fn date(year: i32, month: u8, day: u8) -> Instant {
    at(year, month, day, 0, 0)
}

pub fn fixed_clock(now: Instant) -> FixedClock {
    FixedClock(now)
}

pub fn context_at(now: Instant) -> ModelContext {
    ModelContext::new(now)
}

pub fn sunday_context(now: Instant) -> ModelContext {
    ModelContext::new(now).with_week_start(Weekday::Sunday)
}

/// A spread of instants across leap years, month ends and the epoch.
pub fn sample_instants() -> Vec<Instant> {
    vec![
        at(1969, 12, 31, 23, 59),
        at(1970, 1, 1, 0, 0),
        at(1999, 12, 31, 23, 59),
        at(2000, 2, 29, 12, 0),
        at(2023, 2, 28, 6, 7),
        at(2024, 1, 31, 14, 37),
        at(2024, 2, 15, 14, 37),
        at(2024, 2, 29, 0, 0),
        at(2024, 12, 31, 23, 58),
        at(2100, 3, 1, 1, 1),
    ]
}

pub fn fixed_cardinality(view: View, minute_step: u8) -> usize {
    match view {
        View::Year => 10,
        View::Month => 12,
        View::Day => 42,
        View::Hour => 24,
        View::Minute => 60usize.div_ceil(usize::from(minute_step)),
    }
}

pub fn active_cells(model: &ViewModel) -> Vec<&Cell> {
    model.cells().filter(|cell| cell.classes.active).collect()
}

pub fn now_cells(model: &ViewModel) -> Vec<&Cell> {
    model.cells().filter(|cell| cell.classes.now).collect()
}

pub fn displays(model: &ViewModel) -> Vec<String> {
    model.cells().map(|cell| cell.display.clone()).collect()
}

/// Exactly one active cell and it matches `active_date`.
pub fn single_active(model: &ViewModel) -> Result<&Cell> {
    let active = active_cells(model);
    let [cell] = active.as_slice() else {
        bail!(
            "{} view {:?} has {} active cells",
            model.view_name.as_str(),
            model.view_label,
            active.len()
        );
    };
    if cell.value != model.active_date {
        return Err(anyhow!(
            "active cell {} does not match active date {}",
            cell.value,
            model.active_date
        ));
    }
    Ok(*cell)
}

/// Writes `content` to `config.toml` in a fresh temp dir.
pub fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let temp = tempfile::tempdir().context("create temp dir")?;
    let path = temp.path().join("config.toml");
    std::fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
    Ok((temp, path))
}

#[cfg(test)]
mod tests {
    use super::{at, fixed_cardinality, sample_instants, single_active, write_config};
    use anyhow::Result;
    use chronogrid_core::{ModelContext, View, provider_for};

    #[test]
    fn sample_instants_are_sorted_and_unique() {
        let samples = sample_instants();
        assert!(samples.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn single_active_reports_the_active_cell() -> Result<()> {
        let context = ModelContext::new(at(2024, 1, 1, 0, 0));
        let model = provider_for(View::Month).get_model(at(2024, 3, 3, 3, 3), None, &context);
        let cell = single_active(&model)?;
        assert_eq!(cell.display, "Mar");
        assert_eq!(model.cell_count(), fixed_cardinality(View::Month, 5));
        Ok(())
    }

    #[test]
    fn write_config_creates_file() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n")?;
        assert_eq!(std::fs::read_to_string(path)?, "version = 1\n");
        Ok(())
    }
}
