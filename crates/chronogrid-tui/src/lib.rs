// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use chronogrid_core::{
    CellClasses, Clock, Command, IgnoredReason, Instant, Picker, PickerCommand, PickerEvent,
    ValueAdapter, ViewModel,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Block, Borders, Cell as GridCell, Clear, Paragraph, Row as GridRow, Table, TableState,
};
use std::io;
use std::time::Duration;
use tracing::{debug, info};

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const CLOCK_REFRESH: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Picked(Instant),
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Picker(PickerCommand),
    ToggleHelp,
    Cancel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct UiState {
    status: String,
    help_visible: bool,
    /// Row and column of the cell the cursor sits on.
    focus: Option<(usize, usize)>,
}

/// Runs the picker full screen until a value is committed or the user backs out.
pub fn run_picker<A: ValueAdapter, C: Clock>(picker: &mut Picker<A, C>) -> Result<PickerOutcome> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut ui = UiState {
        focus: picker.model().position_of(picker.model().active_date),
        ..UiState::default()
    };
    let mut last_refresh = std::time::Instant::now();
    let result = loop {
        if let Err(error) = terminal.draw(|frame| render(frame, picker.model(), &ui)) {
            break Err(error).context("draw frame");
        }

        let has_event = match event::poll(POLL_INTERVAL).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => break Err(error),
        };
        if !has_event {
            if last_refresh.elapsed() >= CLOCK_REFRESH {
                picker.refresh();
                last_refresh = std::time::Instant::now();
            }
            continue;
        }

        match event::read().context("read event") {
            Ok(Event::Key(key)) => {
                if let Some(outcome) = handle_key_event(picker, &mut ui, key) {
                    break Ok(outcome);
                }
            }
            Ok(_) => {}
            Err(error) => break Err(error),
        }
    };

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn handle_key_event<A: ValueAdapter, C: Clock>(
    picker: &mut Picker<A, C>,
    ui: &mut UiState,
    key: KeyEvent,
) -> Option<PickerOutcome> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let action = key_action(key)?;
    match action {
        KeyAction::Cancel => {
            info!("picker canceled");
            Some(PickerOutcome::Canceled)
        }
        KeyAction::ToggleHelp => {
            ui.help_visible = !ui.help_visible;
            None
        }
        KeyAction::Picker(command) => {
            let events = picker.dispatch(command);
            debug!(?command, count = events.len(), "key dispatched");
            if let Some(committed) = committed_value(&events) {
                info!(value = %committed, "value picked");
                return Some(PickerOutcome::Picked(committed));
            }
            ui.status = status_for_events(&events).unwrap_or_default();
            if let Some(target) = focus_target(&events) {
                ui.focus = picker.model().position_of(target);
            }
            None
        }
    }
}

pub fn key_action(key: KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(KeyAction::Cancel),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(KeyAction::Cancel),
        KeyCode::Char('?') => return Some(KeyAction::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => PickerCommand::Key(Command::ArrowUp),
        KeyCode::Down | KeyCode::Char('j') => PickerCommand::Key(Command::ArrowDown),
        KeyCode::Left | KeyCode::Char('h') => PickerCommand::Key(Command::ArrowLeft),
        KeyCode::Right | KeyCode::Char('l') => PickerCommand::Key(Command::ArrowRight),
        KeyCode::Home | KeyCode::Char('g') => PickerCommand::Key(Command::Home),
        KeyCode::End | KeyCode::Char('G') => PickerCommand::Key(Command::End),
        KeyCode::PageUp => PickerCommand::Key(Command::PageUp),
        KeyCode::PageDown => PickerCommand::Key(Command::PageDown),
        KeyCode::Enter | KeyCode::Char(' ') => PickerCommand::Key(Command::Activate),
        KeyCode::Backspace | KeyCode::Char('u') => PickerCommand::Up,
        KeyCode::Char('[') | KeyCode::Char('H') => PickerCommand::Left,
        KeyCode::Char(']') | KeyCode::Char('L') => PickerCommand::Right,
        _ => return None,
    };
    Some(KeyAction::Picker(command))
}

fn committed_value(events: &[PickerEvent]) -> Option<Instant> {
    events.iter().find_map(|event| match event {
        PickerEvent::ValueCommitted(value) => Some(*value),
        _ => None,
    })
}

/// Explicit focus requests win over the active cell of a rebuilt model.
fn focus_target(events: &[PickerEvent]) -> Option<Instant> {
    let requested = events.iter().find_map(|event| match event {
        PickerEvent::FocusActive(value) => Some(*value),
        _ => None,
    });
    requested.or_else(|| {
        events.iter().find_map(|event| match event {
            PickerEvent::ModelChanged { active, .. } => Some(*active),
            _ => None,
        })
    })
}

fn status_for_events(events: &[PickerEvent]) -> Option<String> {
    events.iter().find_map(|event| match event {
        PickerEvent::Ignored(IgnoredReason::DisabledCell) => {
            Some("that value is not selectable".to_owned())
        }
        PickerEvent::Ignored(IgnoredReason::AtMaxView) => {
            Some("already at the widest view".to_owned())
        }
        _ => None,
    })
}

fn render(frame: &mut ratatui::Frame<'_>, model: &ViewModel, ui: &UiState) {
    let area = centered_rect(70, 70, frame.area());
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    let header = Paragraph::new(render_header_text(model))
        .block(Block::default().title("chronogrid").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);
    let mut grid_state = TableState::default().with_selected_cell(ui.focus);
    frame.render_stateful_widget(grid_table(model), layout[1], &mut grid_state);

    let status = if ui.status.is_empty() {
        "? help | q cancel".to_owned()
    } else {
        ui.status.clone()
    };
    let status_widget = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if ui.help_visible {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn grid_table(model: &ViewModel) -> Table<'static> {
    let width = column_width(model);
    let columns = model.rows.first().map_or(0, |row| row.cells.len());
    let rows = model.rows.iter().map(|row| {
        GridRow::new(
            row.cells
                .iter()
                .map(|cell| GridCell::from(cell.display.clone()).style(cell_style(&cell.classes))),
        )
    });
    let mut table = Table::new(rows, vec![Constraint::Length(width); columns])
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(Color::Black))
        .cell_highlight_style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .title(model.view_name.as_str())
                .borders(Borders::ALL),
        );
    if !model.row_labels.is_empty() {
        let header = GridRow::new(model.row_labels.clone())
            .style(Style::default().add_modifier(Modifier::BOLD));
        table = table.header(header);
    }
    table
}

fn column_width(model: &ViewModel) -> u16 {
    let widest = model
        .cells()
        .map(|cell| cell.display.chars().count())
        .chain(model.row_labels.iter().map(|label| label.chars().count()))
        .max()
        .unwrap_or(2);
    u16::try_from(widest + 2).unwrap_or(u16::MAX)
}

fn cell_style(classes: &CellClasses) -> Style {
    let mut style = Style::default();
    if classes.disabled == Some(true) {
        style = style.fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);
    } else if classes.past == Some(true) || classes.future == Some(true) {
        style = style.fg(Color::DarkGray);
    }
    if classes.now {
        style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
    }
    if classes.selected {
        style = style.add_modifier(Modifier::BOLD);
    }
    if classes.active {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn render_header_text(model: &ViewModel) -> String {
    let up = model
        .up_button
        .as_ref()
        .map(|button| format!(" | u: {}", button.aria_label))
        .unwrap_or_default();
    format!(
        "[ {}  {}  ] {}{up}",
        model.left_button.aria_label, model.view_label, model.right_button.aria_label
    )
}

/// Plain-text rendering of the grid; the active cell is bracketed and the
/// selected cell starred.
pub fn render_grid_text(model: &ViewModel) -> String {
    let width = usize::from(column_width(model));
    let mut lines = vec![model.view_label.clone()];
    if !model.row_labels.is_empty() {
        lines.push(
            model
                .row_labels
                .iter()
                .map(|label| format!("{label:^width$}"))
                .collect::<String>()
                .trim_end()
                .to_owned(),
        );
    }
    for row in &model.rows {
        let line = row
            .cells
            .iter()
            .map(|cell| {
                let text = if cell.classes.active {
                    format!("[{}]", cell.display)
                } else if cell.classes.selected {
                    format!("*{}*", cell.display)
                } else if cell.is_disabled() {
                    format!("-{}-", cell.display)
                } else {
                    cell.display.clone()
                };
                format!("{text:^width$}")
            })
            .collect::<String>();
        lines.push(line.trim_end().to_owned());
    }
    lines.join("\n")
}

fn help_text() -> String {
    [
        "arrows / hjkl  move",
        "pgup / pgdn    previous / next range",
        "home / end     first / last cell",
        "enter / space  drill down or pick",
        "u / backspace  widen view",
        "[ / ]          previous / next range",
        "q / esc        cancel",
    ]
    .join("\n")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        KeyAction, PickerOutcome, UiState, cell_style, centered_rect, column_width,
        handle_key_event, key_action, render_grid_text, render_header_text,
    };
    use chronogrid_core::{
        CellClasses, Command, FixedClock, Instant, MillisAdapter, Picker, PickerCommand,
        PickerConfig, RangeFilter, View,
    };
    use chronogrid_testkit::{QUIET_NOW, at, date, fixed_clock};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;
    use ratatui::style::Modifier;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn picker_at(value: Instant, config: PickerConfig) -> Picker<MillisAdapter, FixedClock> {
        Picker::new(MillisAdapter, fixed_clock(QUIET_NOW), config, Some(&value.millis()))
    }

    #[test]
    fn vim_keys_alias_arrows() {
        for (vim, arrow) in [
            ('h', KeyCode::Left),
            ('j', KeyCode::Down),
            ('k', KeyCode::Up),
            ('l', KeyCode::Right),
        ] {
            assert_eq!(
                key_action(press(KeyCode::Char(vim))),
                key_action(press(arrow))
            );
        }
        assert_eq!(
            key_action(press(KeyCode::Enter)),
            Some(KeyAction::Picker(PickerCommand::Key(Command::Activate)))
        );
        assert_eq!(
            key_action(press(KeyCode::Backspace)),
            Some(KeyAction::Picker(PickerCommand::Up))
        );
        assert_eq!(key_action(press(KeyCode::Char('z'))), None);
        assert_eq!(
            key_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Cancel)
        );
    }

    #[test]
    fn enter_at_minimum_view_returns_picked_value() {
        let config = PickerConfig {
            min_view: View::Day,
            ..PickerConfig::default()
        };
        let mut picker = picker_at(date(2024, 2, 15), config);
        let mut ui = UiState::default();

        assert_eq!(
            handle_key_event(&mut picker, &mut ui, press(KeyCode::Char('l'))),
            None
        );
        assert_eq!(
            handle_key_event(&mut picker, &mut ui, press(KeyCode::Enter)),
            Some(PickerOutcome::Picked(date(2024, 2, 16)))
        );
    }

    #[test]
    fn enter_above_minimum_view_drills_down() {
        let mut picker = picker_at(at(2024, 2, 15, 14, 37), PickerConfig::default());
        let mut ui = UiState::default();
        assert_eq!(
            handle_key_event(&mut picker, &mut ui, press(KeyCode::Enter)),
            None
        );
        assert_eq!(picker.view(), View::Hour);
        assert_eq!(
            handle_key_event(&mut picker, &mut ui, press(KeyCode::Esc)),
            Some(PickerOutcome::Canceled)
        );
    }

    #[test]
    fn ignored_commands_leave_a_status_message() {
        let filter = RangeFilter {
            not_before: Some(date(2024, 3, 1)),
            not_after: None,
        };
        let config = PickerConfig {
            min_view: View::Day,
            select_filter: Some(filter.into_select_filter()),
            ..PickerConfig::default()
        };
        let mut picker = picker_at(date(2024, 2, 15), config);
        let mut ui = UiState::default();

        assert_eq!(
            handle_key_event(&mut picker, &mut ui, press(KeyCode::Char(' '))),
            None
        );
        assert_eq!(ui.status, "that value is not selectable");

        handle_key_event(&mut picker, &mut ui, press(KeyCode::Char('?')));
        assert!(ui.help_visible);
        handle_key_event(&mut picker, &mut ui, press(KeyCode::Char('j')));
        assert!(ui.status.is_empty());
    }

    #[test]
    fn focus_follows_cursor_across_grids() {
        let mut picker = picker_at(date(2024, 2, 15), PickerConfig::default());
        let mut ui = UiState::default();

        handle_key_event(&mut picker, &mut ui, press(KeyCode::Char('j')));
        assert_eq!(ui.focus, Some((3, 3)));

        handle_key_event(&mut picker, &mut ui, press(KeyCode::Char('u')));
        assert_eq!(picker.view(), View::Month);
        assert_eq!(ui.focus, Some((0, 1)));

        handle_key_event(&mut picker, &mut ui, press(KeyCode::Char('?')));
        assert_eq!(ui.focus, Some((0, 1)));
    }

    #[test]
    fn grid_text_marks_active_and_weekdays() {
        let picker = picker_at(date(2024, 2, 15), PickerConfig::default());
        let text = render_grid_text(picker.model());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Feb 2024");
        assert!(lines[1].starts_with(" Mo"));
        assert!(lines[1].ends_with("Su"));
        assert_eq!(lines.len(), 8);
        assert!(text.contains("[15]"));
        assert!(!text.contains("*15*"));
        assert_eq!(column_width(picker.model()), 4);
    }

    #[test]
    fn header_lists_navigation_targets() {
        let picker = picker_at(date(2024, 2, 15), PickerConfig::default());
        assert_eq!(
            render_header_text(picker.model()),
            "[ Go to Jan 2024  Feb 2024  ] Go to Mar 2024 | u: Go to 2024"
        );
    }

    #[test]
    fn active_cells_render_reversed() {
        let style = cell_style(&CellClasses {
            active: true,
            selected: true,
            ..CellClasses::default()
        });
        assert!(style.add_modifier.contains(Modifier::REVERSED));
        assert!(style.add_modifier.contains(Modifier::BOLD));

        let disabled = cell_style(&CellClasses {
            disabled: Some(true),
            ..CellClasses::default()
        });
        assert!(disabled.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(50, 50, area);
        assert_eq!(inner.width, 50);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 25);
        assert_eq!(inner.y, 10);
    }
}
