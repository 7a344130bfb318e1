//! UI layer for desktop GUI: app shell, panels and keyboard translation.

pub mod app;
pub mod input;

pub use app::{EditorApp, PersistedEditorSettings, SETTINGS_STORAGE_KEY};
