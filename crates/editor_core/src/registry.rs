//! Codec catalog discovered from the engine at startup.

use std::collections::BTreeMap;

use shared::{CodecIndex, GraphicsEngine, RawCodecInfo};

use crate::error::SessionError;

/// Human-readable names for engine identifiers that have one.
pub const CURATED_LABELS: &[(&str, &str)] = &[
    ("nes", "NES / Famicom 2bpp planar"),
    ("lin-1bpp-msbfirst", "Linear 1bpp, MSB first"),
    ("lin-1bpp-lsbfirst", "Linear 1bpp, LSB first"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecLabels {
    labels: BTreeMap<String, String>,
}

impl CodecLabels {
    pub fn curated() -> Self {
        Self {
            labels: CURATED_LABELS
                .iter()
                .map(|(identifier, label)| (identifier.to_string(), label.to_string()))
                .collect(),
        }
    }

    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (identifier, label) in overrides {
            self.labels.insert(identifier.clone(), label.clone());
        }
        self
    }

    pub fn label_for(&self, identifier: &str) -> Option<&str> {
        self.labels.get(identifier).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecDescriptor {
    pub index: CodecIndex,
    pub identifier: String,
    pub display_name: String,
    pub is_tiled: bool,
}

/// Ordered codec catalog. Entry `i` always carries `CodecIndex(i)`, the value the
/// engine expects back when that codec is selected.
#[derive(Debug, Clone, Default)]
pub struct CodecRegistry {
    descriptors: Vec<CodecDescriptor>,
}

impl CodecRegistry {
    pub fn load<E: GraphicsEngine>(engine: &E, labels: &CodecLabels) -> Self {
        let registry = Self::from_raw(engine.query_codecs(), labels);
        if registry.is_empty() {
            tracing::warn!("engine reported no codecs; codec selection disabled");
        } else {
            tracing::info!(codecs = registry.len(), "loaded codec catalog");
        }
        registry
    }

    pub fn from_raw(raw: Vec<RawCodecInfo>, labels: &CodecLabels) -> Self {
        let descriptors = raw
            .into_iter()
            .enumerate()
            .map(|(i, info)| CodecDescriptor {
                index: CodecIndex(i),
                display_name: labels
                    .label_for(&info.identifier)
                    .map(str::to_string)
                    .unwrap_or_else(|| info.identifier.clone()),
                identifier: info.identifier,
                is_tiled: info.is_tiled,
            })
            .collect();
        Self { descriptors }
    }

    pub fn descriptors(&self) -> &[CodecDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn get(&self, index: CodecIndex) -> Option<&CodecDescriptor> {
        self.descriptors.get(index.0)
    }

    pub fn display_name_for(&self, index: CodecIndex) -> Option<&str> {
        self.get(index).map(|descriptor| descriptor.display_name.as_str())
    }

    pub fn require(&self, index: CodecIndex) -> Result<&CodecDescriptor, SessionError> {
        self.get(index).ok_or(SessionError::InvalidCodecIndex {
            index: index.0,
            len: self.len(),
        })
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
