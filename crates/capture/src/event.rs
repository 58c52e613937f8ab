// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical event model for captured input occurrences.
//!
//! Events are created once (at capture or decode time) and never mutated.
//! The `Control` token encoding is the reversible on-disk representation:
//! `Key.<name>` for symbolic keys, the literal character for character keys,
//! `Button.<name>` for mouse buttons, and the raw token preserved verbatim
//! for anything unrecognized.

use serde::{Deserialize, Serialize};

/// Input device that produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Keyboard,
    Mouse,
}

impl Device {
    /// Wire tag used in the log format.
    pub fn tag(self) -> &'static str {
        match self {
            Device::Keyboard => "keyboard",
            Device::Mouse => "mouse",
        }
    }

    /// Parse a wire tag back into a device.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "keyboard" => Some(Device::Keyboard),
            "mouse" => Some(Device::Mouse),
            _ => None,
        }
    }
}

/// What happened to the key or button.
///
/// `Click` is mouse-only and replay-only: live capture records clicks as
/// Press+Release pairs, so a Click can only enter the system through a log
/// file. It injects a full press+release regardless of held state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Press,
    Release,
    Click,
}

impl Action {
    /// Wire tag used in the log format.
    pub fn tag(self) -> &'static str {
        match self {
            Action::Press => "press",
            Action::Release => "release",
            Action::Click => "click",
        }
    }

    /// Parse a wire tag back into an action.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "press" => Some(Action::Press),
            "release" => Some(Action::Release),
            "click" => Some(Action::Click),
            _ => None,
        }
    }
}

/// Symbolic (non-character) keyboard keys keyrec knows by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedKey {
    Ctrl,
    Shift,
    Alt,
    Cmd,
    Enter,
    Space,
    Tab,
    Backspace,
    Esc,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl NamedKey {
    /// Canonical lowercase name, as written after the `Key.` tag.
    pub fn name(self) -> &'static str {
        match self {
            NamedKey::Ctrl => "ctrl",
            NamedKey::Shift => "shift",
            NamedKey::Alt => "alt",
            NamedKey::Cmd => "cmd",
            NamedKey::Enter => "enter",
            NamedKey::Space => "space",
            NamedKey::Tab => "tab",
            NamedKey::Backspace => "backspace",
            NamedKey::Esc => "esc",
            NamedKey::Delete => "delete",
            NamedKey::Insert => "insert",
            NamedKey::Home => "home",
            NamedKey::End => "end",
            NamedKey::PageUp => "page_up",
            NamedKey::PageDown => "page_down",
            NamedKey::Up => "up",
            NamedKey::Down => "down",
            NamedKey::Left => "left",
            NamedKey::Right => "right",
            NamedKey::F1 => "f1",
            NamedKey::F2 => "f2",
            NamedKey::F3 => "f3",
            NamedKey::F4 => "f4",
            NamedKey::F5 => "f5",
            NamedKey::F6 => "f6",
            NamedKey::F7 => "f7",
            NamedKey::F8 => "f8",
            NamedKey::F9 => "f9",
            NamedKey::F10 => "f10",
            NamedKey::F11 => "f11",
            NamedKey::F12 => "f12",
        }
    }

    /// Look up a key by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ctrl" => Some(NamedKey::Ctrl),
            "shift" => Some(NamedKey::Shift),
            "alt" => Some(NamedKey::Alt),
            "cmd" => Some(NamedKey::Cmd),
            "enter" => Some(NamedKey::Enter),
            "space" => Some(NamedKey::Space),
            "tab" => Some(NamedKey::Tab),
            "backspace" => Some(NamedKey::Backspace),
            "esc" => Some(NamedKey::Esc),
            "delete" => Some(NamedKey::Delete),
            "insert" => Some(NamedKey::Insert),
            "home" => Some(NamedKey::Home),
            "end" => Some(NamedKey::End),
            "page_up" => Some(NamedKey::PageUp),
            "page_down" => Some(NamedKey::PageDown),
            "up" => Some(NamedKey::Up),
            "down" => Some(NamedKey::Down),
            "left" => Some(NamedKey::Left),
            "right" => Some(NamedKey::Right),
            "f1" => Some(NamedKey::F1),
            "f2" => Some(NamedKey::F2),
            "f3" => Some(NamedKey::F3),
            "f4" => Some(NamedKey::F4),
            "f5" => Some(NamedKey::F5),
            "f6" => Some(NamedKey::F6),
            "f7" => Some(NamedKey::F7),
            "f8" => Some(NamedKey::F8),
            "f9" => Some(NamedKey::F9),
            "f10" => Some(NamedKey::F10),
            "f11" => Some(NamedKey::F11),
            "f12" => Some(NamedKey::F12),
            _ => None,
        }
    }
}

/// Mouse buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Left,
    Right,
    Middle,
}

impl Button {
    /// Canonical lowercase name, as written after the `Button.` tag.
    pub fn name(self) -> &'static str {
        match self {
            Button::Left => "left",
            Button::Right => "right",
            Button::Middle => "middle",
        }
    }

    /// Look up a button by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Button::Left),
            "right" => Some(Button::Right),
            "middle" => Some(Button::Middle),
            _ => None,
        }
    }
}

/// Key or button identity, usable as a set/map key (total `Eq + Hash`).
///
/// `Other` carries tokens from log files that name a key or button this
/// build does not recognize; they survive round-trips verbatim instead of
/// failing the whole load.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Key(NamedKey),
    Char(char),
    Button(Button),
    Other(String),
}

impl Control {
    /// On-disk token for this control.
    pub fn token(&self) -> String {
        match self {
            Control::Key(key) => format!("Key.{}", key.name()),
            Control::Char(c) => c.to_string(),
            Control::Button(btn) => format!("Button.{}", btn.name()),
            Control::Other(raw) => raw.clone(),
        }
    }

    /// Parse an on-disk token, directed by the device field of its line.
    ///
    /// Unrecognized `Key.*`/`Button.*` names and multi-character bare tokens
    /// fall back to `Other`, preserving the token as-is. Single-quoted
    /// character tokens (`'a'`) are unwrapped first.
    pub fn parse(device: Device, token: &str) -> Self {
        let token = token.trim();
        let token = token
            .strip_prefix('\'')
            .and_then(|t| t.strip_suffix('\''))
            .unwrap_or(token);

        match device {
            Device::Keyboard => {
                if let Some(name) = token.strip_prefix("Key.") {
                    return NamedKey::from_name(name)
                        .map(Control::Key)
                        .unwrap_or_else(|| Control::Other(token.to_string()));
                }
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Control::Char(c),
                    _ => Control::Other(token.to_string()),
                }
            }
            Device::Mouse => {
                if let Some(name) = token.strip_prefix("Button.") {
                    return Button::from_name(name)
                        .map(Control::Button)
                        .unwrap_or_else(|| Control::Other(token.to_string()));
                }
                Control::Other(token.to_string())
            }
        }
    }
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token())
    }
}

/// One captured input occurrence, immutable after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Seconds since the start of the recording (non-negative).
    pub offset: f64,
    pub device: Device,
    pub action: Action,
    pub control: Control,
    /// Cursor position, present only for mouse events.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub position: Option<(f64, f64)>,
}

impl Event {
    /// A keyboard event (no position).
    pub fn keyboard(offset: f64, action: Action, control: Control) -> Self {
        Self {
            offset,
            device: Device::Keyboard,
            action,
            control,
            position: None,
        }
    }

    /// A mouse event at a cursor position.
    pub fn mouse(offset: f64, action: Action, control: Control, x: f64, y: f64) -> Self {
        Self {
            offset,
            device: Device::Mouse,
            action,
            control,
            position: Some((x, y)),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
