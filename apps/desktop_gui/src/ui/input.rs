//! Translation from egui key events to editor key presses.

use editor_core::{KeyPress, Modifiers, NavKey};

pub fn nav_key(key: egui::Key) -> Option<NavKey> {
    match key {
        egui::Key::ArrowLeft => Some(NavKey::Left),
        egui::Key::ArrowRight => Some(NavKey::Right),
        egui::Key::ArrowUp => Some(NavKey::Up),
        egui::Key::ArrowDown => Some(NavKey::Down),
        _ => None,
    }
}

/// `mac_cmd` is the platform meta key; `command` is left out because egui aliases it
/// to ctrl off macOS.
pub fn modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        alt: modifiers.alt,
        shift: modifiers.shift,
        ctrl: modifiers.ctrl,
        meta: modifiers.mac_cmd,
    }
}

/// Arrow key presses from this frame, in arrival order.
pub fn pressed_nav_keys(input: &egui::InputState) -> Vec<(egui::Key, egui::Modifiers, KeyPress)> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers: mods,
                ..
            } => nav_key(*key).map(|nav| (*key, *mods, KeyPress::new(nav, modifiers(*mods)))),
            _ => None,
        })
        .collect()
}
