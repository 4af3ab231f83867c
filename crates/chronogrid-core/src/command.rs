// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Navigation;

/// Input commands the picker accepts. Legacy numeric key codes are folded
/// into these at the input boundary via [`Command::from_key_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Activate,
}

impl Command {
    pub const ALL: [Self; 9] = [
        Self::ArrowUp,
        Self::ArrowDown,
        Self::ArrowLeft,
        Self::ArrowRight,
        Self::Home,
        Self::End,
        Self::PageUp,
        Self::PageDown,
        Self::Activate,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Activate => "Activate",
        }
    }

    /// Parses a DOM-style key name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ArrowUp" | "Up" => Some(Self::ArrowUp),
            "ArrowDown" | "Down" => Some(Self::ArrowDown),
            "ArrowLeft" | "Left" => Some(Self::ArrowLeft),
            "ArrowRight" | "Right" => Some(Self::ArrowRight),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "PageUp" => Some(Self::PageUp),
            "PageDown" => Some(Self::PageDown),
            "Activate" | "Enter" | " " | "Space" | "Spacebar" => Some(Self::Activate),
            _ => None,
        }
    }

    pub const fn from_key_code(code: u16) -> Option<Self> {
        match code {
            13 | 32 => Some(Self::Activate),
            33 => Some(Self::PageUp),
            34 => Some(Self::PageDown),
            35 => Some(Self::End),
            36 => Some(Self::Home),
            37 => Some(Self::ArrowLeft),
            38 => Some(Self::ArrowUp),
            39 => Some(Self::ArrowRight),
            40 => Some(Self::ArrowDown),
            _ => None,
        }
    }

    /// Provider movement for this command; `None` for [`Command::Activate`].
    pub const fn navigation(self) -> Option<Navigation> {
        match self {
            Self::ArrowUp => Some(Navigation::Up),
            Self::ArrowDown => Some(Navigation::Down),
            Self::ArrowLeft => Some(Navigation::Left),
            Self::ArrowRight => Some(Navigation::Right),
            Self::Home => Some(Navigation::Home),
            Self::End => Some(Navigation::End),
            Self::PageUp => Some(Navigation::PageUp),
            Self::PageDown => Some(Navigation::PageDown),
            Self::Activate => None,
        }
    }
}
