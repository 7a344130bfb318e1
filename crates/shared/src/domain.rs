use serde::{Deserialize, Serialize};

macro_rules! index_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub usize);
    };
}

index_newtype!(CodecIndex);

impl std::fmt::Display for CodecIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a single navigation or geometry step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Backward,
    Forward,
}

impl Step {
    pub fn apply(self, value: usize, amount: usize) -> usize {
        match self {
            Step::Backward => value.saturating_sub(amount),
            Step::Forward => value.saturating_add(amount),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Backward => "-",
            Step::Forward => "+",
        }
    }
}

/// Codec entry as reported by the engine, before any display labelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCodecInfo {
    pub identifier: String,
    pub is_tiled: bool,
}

impl RawCodecInfo {
    pub fn new(identifier: impl Into<String>, is_tiled: bool) -> Self {
        Self {
            identifier: identifier.into(),
            is_tiled,
        }
    }
}

/// Straight RGBA8 pixels of the last rendered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFrame {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl RenderedFrame {
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width * height * 4],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
