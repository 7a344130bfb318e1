use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::registry::CodecLabels;

pub const SETTINGS_FILE: &str = "tile_editor.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub export_filename: String,
    pub staging_dir: Option<PathBuf>,
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub codec_labels: BTreeMap<String, String>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            export_filename: "tile_export.png".into(),
            staging_dir: None,
            canvas_width: 256,
            canvas_height: 256,
            codec_labels: BTreeMap::new(),
        }
    }
}

impl EditorSettings {
    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn codec_labels(&self) -> CodecLabels {
        CodecLabels::curated().with_overrides(&self.codec_labels)
    }
}

pub fn load_settings() -> EditorSettings {
    load_settings_from(Path::new(SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> EditorSettings {
    let mut settings = match read_settings_file(path) {
        Ok(Some(settings)) => settings,
        Ok(None) => EditorSettings::default(),
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "ignoring settings file");
            EditorSettings::default()
        }
    };
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// Returns `Ok(None)` when the file does not exist.
pub fn read_settings_file(path: &Path) -> anyhow::Result<Option<EditorSettings>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let settings = toml::from_str::<EditorSettings>(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    Ok(Some(settings))
}

pub fn apply_env_overrides(
    settings: &mut EditorSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("APP__EXPORT_FILENAME") {
        if !v.trim().is_empty() {
            settings.export_filename = v;
        }
    }
    if let Some(v) = lookup("APP__STAGING_DIR") {
        settings.staging_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = lookup("APP__CANVAS_WIDTH") {
        match v.parse::<usize>() {
            Ok(parsed) if parsed > 0 => settings.canvas_width = parsed,
            _ => tracing::warn!(value = %v, "ignoring invalid APP__CANVAS_WIDTH"),
        }
    }
    if let Some(v) = lookup("APP__CANVAS_HEIGHT") {
        match v.parse::<usize>() {
            Ok(parsed) if parsed > 0 => settings.canvas_height = parsed,
            _ => tracing::warn!(value = %v, "ignoring invalid APP__CANVAS_HEIGHT"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
