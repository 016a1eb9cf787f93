//! Key representation and configurable bindings.

use crate::error::{Error, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::str::FromStr;

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Unsupported,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Unsupported,
        }
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

/// A processed key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers::from(event.modifiers),
        }
    }
}

impl InputEvent {
    /// The typed character, ignoring presses with Ctrl or Alt held.
    pub fn char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
            _ => None,
        }
    }

    pub fn ctrl(&self) -> bool {
        self.modifiers.ctrl
    }

    /// Whether this press triggers `binding`.
    ///
    /// Shift is part of the character for printable keys (`?` arrives as
    /// `Shift+?` on some terminals), so it is only compared for named keys.
    pub fn matches(&self, binding: &KeyBinding) -> bool {
        if self.modifiers.ctrl != binding.modifiers.ctrl
            || self.modifiers.alt != binding.modifiers.alt
        {
            return false;
        }

        match (self.key, binding.key) {
            (Key::Char(pressed), Key::Char(bound)) => {
                pressed == bound
                    || (bound.is_ascii_alphabetic() && pressed.eq_ignore_ascii_case(&bound))
            }
            (pressed, bound) => {
                pressed == bound && self.modifiers.shift == binding.modifiers.shift
            }
        }
    }
}

/// A parsed binding such as `q`, `Enter` or `Ctrl+r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyBinding {
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: false,
                alt: false,
                shift: false,
            },
        }
    }
}

impl FromStr for KeyBinding {
    type Err = Error;

    fn from_str(binding: &str) -> Result<Self> {
        let binding = binding.trim();
        // "+" on its own, or as the final part of "Ctrl++".
        let (prefix, key_part) = match binding.strip_suffix("++") {
            Some(prefix) => (Some(prefix), "+"),
            None if binding == "+" => (None, "+"),
            None => match binding.rsplit_once('+') {
                Some((prefix, key)) => (Some(prefix), key),
                None => (None, binding),
            },
        };

        let mut modifiers = Modifiers::default();
        for part in prefix.into_iter().flat_map(|p| p.split('+')) {
            match part.trim().to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                other => {
                    return Err(Error::config(format!(
                        "unknown modifier `{other}` in key binding `{binding}`"
                    )));
                }
            }
        }

        let key = match key_part.trim().to_ascii_lowercase().as_str() {
            "enter" | "return" => Key::Enter,
            "esc" | "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "tab" => Key::Tab,
            "backtab" => Key::BackTab,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "space" => Key::Char(' '),
            lower => {
                let mut chars = key_part.trim().chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                        Some(n) => Key::F(n),
                        None => {
                            return Err(Error::config(format!(
                                "unknown key in binding `{binding}`"
                            )));
                        }
                    },
                }
            }
        };

        Ok(Self { key, modifiers })
    }
}
