// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, trace};

use crate::provider::{ModelContext, provider_for};
use crate::{Clock, Command, ConfigChange, Instant, PickerConfig, ValueAdapter, View, ViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerCommand {
    Key(Command),
    /// Click on the cell holding this value.
    ActivateCell(Instant),
    Up,
    Left,
    Right,
}

impl From<Command> for PickerCommand {
    fn from(value: Command) -> Self {
        Self::Key(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    DisabledCell,
    UnknownCell,
    AtMaxView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    ViewChanged { from: View, to: View },
    ModelChanged { view: View, active: Instant },
    /// The render layer should move focus to the active cell.
    FocusActive(Instant),
    ValueCommitted(Instant),
    Ignored(IgnoredReason),
}

/// Navigation controller: owns the current model and the selected instant.
///
/// Every transition builds a complete new [`ViewModel`] and swaps it in, and
/// reports what happened as a list of [`PickerEvent`]s.
pub struct Picker<A: ValueAdapter, C: Clock> {
    adapter: A,
    clock: C,
    config: PickerConfig,
    model: ViewModel,
    selected: Option<Instant>,
}

impl<A: ValueAdapter, C: Clock> Picker<A, C> {
    pub fn new(adapter: A, clock: C, config: PickerConfig, value: Option<&A::Value>) -> Self {
        let selected = value.and_then(|value| adapter.to_instant(value));
        let anchor = selected
            .or(config.default_value)
            .unwrap_or_else(|| clock.now());
        let model = build_model(&config, clock.now(), config.initial_view(), anchor, selected);
        debug!(
            view = model.view_name.as_str(),
            active = %model.active_date,
            "picker initialized"
        );
        Self {
            adapter,
            clock,
            config,
            model,
            selected,
        }
    }

    pub fn model(&self) -> &ViewModel {
        &self.model
    }

    pub fn view(&self) -> View {
        self.model.view_name
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<Instant> {
        self.selected
    }

    /// The committed value in the host's representation.
    pub fn value(&self) -> Option<A::Value> {
        self.selected.map(|instant| self.adapter.from_instant(instant))
    }

    /// Replaces the selected value from the host side and re-anchors the
    /// initial view on it.
    pub fn set_value(&mut self, value: Option<&A::Value>) -> Vec<PickerEvent> {
        self.selected = value.and_then(|value| self.adapter.to_instant(value));
        let anchor = self.anchor_or_now(self.selected);
        self.show(self.config.initial_view(), anchor)
    }

    pub fn update_config(
        &mut self,
        changes: impl IntoIterator<Item = ConfigChange>,
    ) -> Vec<PickerEvent> {
        for change in changes {
            debug!(?change, "picker config changed");
            self.config.apply(change);
        }
        let view = self
            .model
            .view_name
            .max(self.config.min_view)
            .min(self.config.max_view);
        self.show(view, self.model.active_date)
    }

    /// Rebuilds the current grid, picking up a new clock reading.
    pub fn refresh(&mut self) -> Vec<PickerEvent> {
        self.show(self.model.view_name, self.model.active_date)
    }

    pub fn dispatch(&mut self, command: PickerCommand) -> Vec<PickerEvent> {
        match command {
            PickerCommand::Key(Command::Activate) => self.activate(self.model.active_date),
            PickerCommand::Key(key) => self.navigate(key),
            PickerCommand::ActivateCell(value) => self.activate(value),
            PickerCommand::Up => self.drill_up(),
            PickerCommand::Left => self.show(self.model.view_name, self.model.left_button.value),
            PickerCommand::Right => {
                self.show(self.model.view_name, self.model.right_button.value)
            }
        }
    }

    fn navigate(&mut self, key: Command) -> Vec<PickerEvent> {
        let Some(navigation) = key.navigation() else {
            return Vec::new();
        };
        let context = self.context();
        let model = provider_for(self.model.view_name).navigate(
            self.model.active_date,
            self.selected,
            navigation,
            &context,
        );
        let mut events = self.replace(finish(&self.config, model));
        events.push(PickerEvent::FocusActive(self.model.active_date));
        events
    }

    fn activate(&mut self, value: Instant) -> Vec<PickerEvent> {
        let Some(cell) = self.model.cell(value) else {
            trace!(value = %value, "activation outside the current grid ignored");
            return vec![PickerEvent::Ignored(IgnoredReason::UnknownCell)];
        };
        if cell.is_disabled() {
            trace!(value = %value, "disabled cell activation ignored");
            return vec![PickerEvent::Ignored(IgnoredReason::DisabledCell)];
        }

        let view = self.model.view_name;
        if view <= self.config.min_view {
            self.selected = Some(value);
            debug!(value = %value, view = view.as_str(), "value committed");
            let mut events = vec![PickerEvent::ValueCommitted(value)];
            events.extend(self.show(self.config.initial_view(), value));
            return events;
        }

        match view.finer() {
            Some(finer) => self.show(finer, value),
            None => Vec::new(),
        }
    }

    fn drill_up(&mut self) -> Vec<PickerEvent> {
        let target = self.model.up_button.as_ref().map(|button| button.value);
        match (target, self.model.view_name.coarser()) {
            (Some(target), Some(coarser)) => self.show(coarser, target),
            _ => vec![PickerEvent::Ignored(IgnoredReason::AtMaxView)],
        }
    }

    fn show(&mut self, view: View, anchor: Instant) -> Vec<PickerEvent> {
        let model = build_model(&self.config, self.clock.now(), view, anchor, self.selected);
        self.replace(model)
    }

    fn replace(&mut self, model: ViewModel) -> Vec<PickerEvent> {
        let from = self.model.view_name;
        self.model = model;
        let to = self.model.view_name;
        let active = self.model.active_date;
        debug!(view = to.as_str(), active = %active, "picker model replaced");

        let mut events = Vec::new();
        if from != to {
            events.push(PickerEvent::ViewChanged { from, to });
        }
        events.push(PickerEvent::ModelChanged { view: to, active });
        events
    }

    fn context(&self) -> ModelContext {
        ModelContext::from_config(&self.config, self.clock.now())
    }

    fn anchor_or_now(&self, value: Option<Instant>) -> Instant {
        value
            .or(self.config.default_value)
            .unwrap_or_else(|| self.clock.now())
    }
}

fn build_model(
    config: &PickerConfig,
    now: Instant,
    view: View,
    anchor: Instant,
    selected: Option<Instant>,
) -> ViewModel {
    let context = ModelContext::from_config(config, now);
    finish(config, provider_for(view).get_model(anchor, selected, &context))
}

/// Applies the select filter and hides the up button at the coarsest view.
fn finish(config: &PickerConfig, mut model: ViewModel) -> ViewModel {
    if let Some(filter) = &config.select_filter {
        let view = model.view_name;
        for cell in model.cells_mut() {
            let allowed = filter(cell, view);
            cell.classes.disabled = Some(!allowed);
        }
    }
    if model.view_name >= config.max_view {
        model.up_button = None;
    }
    model
}
