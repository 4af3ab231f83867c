// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod adapter;
pub mod command;
pub mod config;
pub mod instant;
pub mod model;
pub mod picker;
pub mod provider;

pub use adapter::*;
pub use command::*;
pub use config::*;
pub use instant::{Instant, parse_weekday};
pub use model::*;
pub use picker::*;
pub use provider::{ModelContext, Navigation, Provider, provider_for};
