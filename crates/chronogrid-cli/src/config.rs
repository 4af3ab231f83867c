// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use chronogrid_core::{
    DEFAULT_MINUTE_STEP, Instant, MinuteStep, PickerConfig, RangeFilter, TextAdapter, View,
    parse_weekday,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::Weekday;

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "chronogrid";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub picker: PickerSettings,
    #[serde(default)]
    pub filter: Filter,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            picker: PickerSettings::default(),
            filter: Filter::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PickerSettings {
    pub minute_step: Option<MinuteStep>,
    pub min_view: Option<View>,
    pub max_view: Option<View>,
    pub start_view: Option<View>,
    pub week_start: Option<String>,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Filter {
    pub not_before: Option<String>,
    pub not_after: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub file: Option<String>,
    pub level: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("CHRONOGRID_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set CHRONOGRID_CONFIG_PATH to the config file"
            )
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and put settings under [picker], [filter], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let filter = self
            .range_filter()
            .with_context(|| format!("invalid [filter] in {}", path.display()))?;
        if let (Some(lower), Some(upper)) = (filter.not_before, filter.not_after)
            && lower > upper
        {
            bail!(
                "filter.not_before ({lower}) in {} is after filter.not_after ({upper})",
                path.display()
            );
        }

        let picker = self
            .picker_config()
            .with_context(|| format!("invalid [picker] in {}", path.display()))?;
        picker
            .validate()
            .with_context(|| format!("invalid [picker] in {}", path.display()))?;

        if let Some(level) = &self.log.level
            && level.trim().is_empty()
        {
            bail!("log.level in {} must not be empty", path.display());
        }

        Ok(())
    }

    pub fn week_start(&self) -> Result<Weekday> {
        match &self.picker.week_start {
            None => Ok(Weekday::Monday),
            Some(raw) => parse_weekday(raw).ok_or_else(|| {
                anyhow!("picker.week_start {raw:?} is not a weekday name (for example \"monday\")")
            }),
        }
    }

    pub fn default_value(&self) -> Result<Option<Instant>> {
        parse_optional_instant("picker.default_value", self.picker.default_value.as_deref())
    }

    pub fn range_filter(&self) -> Result<RangeFilter> {
        let not_before =
            parse_optional_instant("filter.not_before", self.filter.not_before.as_deref())?;
        let not_after =
            parse_optional_instant("filter.not_after", self.filter.not_after.as_deref())?;
        Ok(RangeFilter {
            not_before,
            not_after,
        })
    }

    /// Picker settings with the configured range filter attached.
    pub fn picker_config(&self) -> Result<PickerConfig> {
        let defaults = PickerConfig::default();
        let mut config = PickerConfig {
            minute_step: self.picker.minute_step.unwrap_or_default(),
            min_view: self.picker.min_view.unwrap_or(defaults.min_view),
            max_view: self.picker.max_view.unwrap_or(defaults.max_view),
            start_view: self.picker.start_view.unwrap_or(defaults.start_view),
            week_start: self.week_start()?,
            default_value: self.default_value()?,
            select_filter: None,
        };
        let filter = self.range_filter()?;
        if !filter.is_unbounded() {
            config.select_filter = Some(filter.into_select_filter());
        }
        Ok(config)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log
            .file
            .as_deref()
            .map(str::trim)
            .filter(|file| !file.is_empty())
            .map(PathBuf::from)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# chronogrid config\n# Place this file at: {}\n\nversion = 1\n\n[picker]\n# Minutes between cells in the minute view (1-59).\nminute_step = {}\n# One of: minute, hour, day, month, year\nmin_view = \"minute\"\nmax_view = \"year\"\nstart_view = \"day\"\nweek_start = \"monday\"\n# default_value = \"2024-02-15 09:00\"\n\n[filter]\n# Cells outside these bounds are shown but cannot be picked.\n# not_before = \"2024-01-01\"\n# not_after = \"2024-12-31 23:59\"\n\n[log]\n# Logging is off unless a file is set. CHRONOGRID_LOG overrides the level.\n# file = \"/tmp/chronogrid.log\"\nlevel = \"{}\"\n",
            path.display(),
            DEFAULT_MINUTE_STEP,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_optional_instant(field: &str, raw: Option<&str>) -> Result<Option<Instant>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    TextAdapter::parse(raw).map(Some).ok_or_else(|| {
        anyhow!("{field} {raw:?} is not a date; use YYYY-MM-DD or YYYY-MM-DD HH:MM")
    })
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use chronogrid_core::View;
    use chronogrid_testkit::{at, date, write_config};
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use time::Weekday;

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        let picker = config.picker_config()?;
        assert_eq!(picker.minute_step.get(), 5);
        assert_eq!(picker.initial_view(), View::Day);
        assert!(picker.select_filter.is_none());
        assert_eq!(config.log_file(), None);
        assert_eq!(config.log_level(), "info");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[picker]\nminute_step = 15\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[picker], [filter], and [log]"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 7\n")?;
        let error = Config::load(&path).expect_err("v7 config should fail");
        assert!(error.to_string().contains("unsupported config version 7"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn full_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[picker]\nminute_step = 15\nmin_view = \"day\"\nmax_view = \"month\"\nstart_view = \"month\"\nweek_start = \"sunday\"\ndefault_value = \"2024-02-15 09:30\"\n[filter]\nnot_before = \"2024-01-01\"\nnot_after = \"2024-06-30\"\n[log]\nfile = \"/tmp/chronogrid.log\"\nlevel = \"debug\"\n",
        )?;
        let config = Config::load(&path)?;
        let picker = config.picker_config()?;
        assert_eq!(picker.minute_step.get(), 15);
        assert_eq!(picker.min_view, View::Day);
        assert_eq!(picker.max_view, View::Month);
        assert_eq!(picker.initial_view(), View::Month);
        assert_eq!(picker.week_start, Weekday::Sunday);
        assert_eq!(picker.default_value, Some(at(2024, 2, 15, 9, 30)));
        assert!(picker.select_filter.is_some());

        let filter = config.range_filter()?;
        assert_eq!(filter.not_before, Some(date(2024, 1, 1)));
        assert_eq!(filter.not_after, Some(date(2024, 6, 30)));
        assert_eq!(config.log_file(), Some(PathBuf::from("/tmp/chronogrid.log")));
        assert_eq!(config.log_level(), "debug");
        Ok(())
    }

    #[test]
    fn odd_minute_steps_fall_back_to_default() -> Result<()> {
        for raw in ["0", "60", "-5", "\"often\"", "0.5"] {
            let (_temp, path) =
                write_config(&format!("version = 1\n[picker]\nminute_step = {raw}\n"))?;
            let config = Config::load(&path)?;
            assert_eq!(config.picker_config()?.minute_step.get(), 5, "{raw}");
        }
        let (_temp, path) = write_config("version = 1\n[picker]\nminute_step = 7.9\n")?;
        assert_eq!(Config::load(&path)?.picker_config()?.minute_step.get(), 7);
        Ok(())
    }

    #[test]
    fn inverted_views_are_rejected() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[picker]\nmin_view = \"year\"\nmax_view = \"day\"\n")?;
        let error = Config::load(&path).expect_err("inverted views should fail");
        assert!(format!("{error:#}").contains("coarser than max_view"));
        Ok(())
    }

    #[test]
    fn unknown_view_name_fails_to_decode() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[picker]\nstart_view = \"week\"\n")?;
        let error = Config::load(&path).expect_err("unknown view should fail");
        assert!(error.to_string().contains("decode config"));
        Ok(())
    }

    #[test]
    fn bad_weekday_and_dates_are_reported() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[picker]\nweek_start = \"someday\"\n")?;
        let error = Config::load(&path).expect_err("bad weekday should fail");
        assert!(format!("{error:#}").contains("not a weekday name"));

        let (_temp, path) = write_config("version = 1\n[filter]\nnot_after = \"soon\"\n")?;
        let error = Config::load(&path).expect_err("bad date should fail");
        let message = format!("{error:#}");
        assert!(message.contains("invalid [filter]"));
        assert!(message.contains("filter.not_after"));
        Ok(())
    }

    #[test]
    fn filter_bounds_must_be_ordered() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[filter]\nnot_before = \"2025-01-01\"\nnot_after = \"2024-01-01\"\n",
        )?;
        let error = Config::load(&path).expect_err("inverted bounds should fail");
        assert!(error.to_string().contains("is after filter.not_after"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("CHRONOGRID_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("CHRONOGRID_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn example_config_loads_cleanly() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[picker]"));
        assert!(example.contains("[filter]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.picker_config()?.initial_view(), View::Day);
        Ok(())
    }
}
