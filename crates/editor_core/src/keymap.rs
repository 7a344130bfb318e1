//! Keyboard scheme for directional keys.
//!
//! `KEY_RULES` is scanned top to bottom and the first rule whose key and modifier
//! guard match wins. Alt rules come first, then shift, then ctrl/meta, and every key
//! ends with an unguarded rule, so each press resolves to exactly one intent.

use std::str::FromStr;

use shared::Step;
use thiserror::Error;

use crate::dispatcher::UiIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
}

impl NavKey {
    pub const ALL: [NavKey; 4] = [NavKey::Left, NavKey::Right, NavKey::Up, NavKey::Down];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub alt: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        shift: false,
        ctrl: false,
        meta: false,
    };

    pub fn ctrl_or_meta(&self) -> bool {
        self.ctrl || self.meta
    }

    /// All sixteen modifier states.
    pub fn all_combinations() -> impl Iterator<Item = Modifiers> {
        (0u8..16).map(|bits| Modifiers {
            alt: bits & 1 != 0,
            shift: bits & 2 != 0,
            ctrl: bits & 4 != 0,
            meta: bits & 8 != 0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: NavKey,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: NavKey, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: NavKey) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierGuard {
    Alt,
    Shift,
    CtrlOrMeta,
    Always,
}

impl ModifierGuard {
    fn admits(self, modifiers: Modifiers) -> bool {
        match self {
            ModifierGuard::Alt => modifiers.alt,
            ModifierGuard::Shift => modifiers.shift,
            ModifierGuard::CtrlOrMeta => modifiers.ctrl_or_meta(),
            ModifierGuard::Always => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRule {
    pub key: NavKey,
    pub guard: ModifierGuard,
    pub intent: UiIntent,
}

const fn rule(key: NavKey, guard: ModifierGuard, intent: UiIntent) -> KeyRule {
    KeyRule { key, guard, intent }
}

pub static KEY_RULES: &[KeyRule] = &[
    rule(NavKey::Left, ModifierGuard::Alt, UiIntent::Width(Step::Backward)),
    rule(NavKey::Right, ModifierGuard::Alt, UiIntent::Width(Step::Forward)),
    rule(NavKey::Up, ModifierGuard::Alt, UiIntent::Height(Step::Backward)),
    rule(NavKey::Down, ModifierGuard::Alt, UiIntent::Height(Step::Forward)),
    rule(NavKey::Left, ModifierGuard::Shift, UiIntent::Byte(Step::Backward)),
    rule(NavKey::Right, ModifierGuard::Shift, UiIntent::Byte(Step::Forward)),
    rule(
        NavKey::Up,
        ModifierGuard::CtrlOrMeta,
        UiIntent::Row {
            step: Step::Backward,
            fast: true,
        },
    ),
    rule(
        NavKey::Down,
        ModifierGuard::CtrlOrMeta,
        UiIntent::Row {
            step: Step::Forward,
            fast: true,
        },
    ),
    rule(NavKey::Left, ModifierGuard::Always, UiIntent::Content(Step::Backward)),
    rule(NavKey::Right, ModifierGuard::Always, UiIntent::Content(Step::Forward)),
    rule(
        NavKey::Up,
        ModifierGuard::Always,
        UiIntent::Row {
            step: Step::Backward,
            fast: false,
        },
    ),
    rule(
        NavKey::Down,
        ModifierGuard::Always,
        UiIntent::Row {
            step: Step::Forward,
            fast: false,
        },
    ),
];

pub fn resolve_key(press: KeyPress) -> Option<&'static KeyRule> {
    KEY_RULES
        .iter()
        .find(|rule| rule.key == press.key && rule.guard.admits(press.modifiers))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("key binding is empty")]
    Empty,
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
}

/// Parses bindings such as `left`, `shift+right` or `ctrl+alt+down`.
impl FromStr for KeyPress {
    type Err = KeyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<String> = raw
            .split('+')
            .map(|part| part.trim().to_ascii_lowercase())
            .collect();
        let key = match parts.pop() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(KeyParseError::Empty),
        };
        let key = match key.as_str() {
            "left" => NavKey::Left,
            "right" => NavKey::Right,
            "up" => NavKey::Up,
            "down" => NavKey::Down,
            _ => return Err(KeyParseError::UnknownKey(key)),
        };

        let mut modifiers = Modifiers::NONE;
        for part in parts {
            match part.as_str() {
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                _ => return Err(KeyParseError::UnknownModifier(part)),
            }
        }
        Ok(KeyPress::new(key, modifiers))
    }
}

#[cfg(test)]
#[path = "tests/keymap_tests.rs"]
mod tests;
