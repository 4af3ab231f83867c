// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;

use anyhow::{Context, Result, anyhow};
use chronogrid_core::{Picker, SystemClock, TextAdapter, ValueAdapter};
use chronogrid_tui::PickerOutcome;
use config::Config;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CHRONOGRID_LOG";

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `chronogrid --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    init_logging(&config)?;

    let picker_config = config.picker_config()?;
    if let Some(raw) = &options.value
        && TextAdapter::parse(raw).is_none()
    {
        return Err(anyhow!(
            "--value {raw:?} is not a date; use YYYY-MM-DD or YYYY-MM-DD HH:MM"
        ));
    }
    if options.check_only {
        return Ok(());
    }

    let mut picker = Picker::new(
        TextAdapter,
        SystemClock,
        picker_config,
        options.value.as_ref(),
    );
    info!(
        config = %options.config_path.display(),
        view = picker.view().as_str(),
        "chronogrid started"
    );

    if options.print_model {
        let json =
            serde_json::to_string_pretty(picker.model()).context("serialize initial model")?;
        println!("{json}");
        return Ok(());
    }

    match chronogrid_tui::run_picker(&mut picker)? {
        PickerOutcome::Picked(instant) => {
            info!(value = %instant, "value picked");
            println!("{}", TextAdapter.from_instant(instant));
            Ok(())
        }
        PickerOutcome::Canceled => {
            info!("picker canceled");
            std::process::exit(1);
        }
    }
}

/// Sends `tracing` output to `[log].file`. Without a file nothing is
/// installed, so the terminal stays clean.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = config.log_file() else {
        return Ok(());
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = match env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {LOG_ENV} filter {directives:?}"))?,
        Err(_) => EnvFilter::try_new(config.log_level())
            .with_context(|| format!("invalid log.level {:?}", config.log_level()))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    value: Option<String>,
    print_config_path: bool,
    print_example: bool,
    print_model: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        value: None,
        print_config_path: false,
        print_example: false,
        print_model: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--value" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--value requires a date such as 2024-02-15"))?;
                options.value = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--print-model" => {
                options.print_model = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("chronogrid: pick a date and time from the terminal");
    println!("  --config <path>          Use a specific config path");
    println!("  --value <date>           Start from this value (YYYY-MM-DD [HH:MM])");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --print-model            Print the initial grid as JSON and exit");
    println!("  --check                  Validate config and --value, then exit");
    println!("  --help                   Show this help");
}
