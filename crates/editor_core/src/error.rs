use std::path::PathBuf;

use shared::EngineError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("failed to load file: {0}")]
    LoadFailure(#[source] EngineError),
    #[error("no codecs are available")]
    NoCodecsAvailable,
    #[error("codec index {index} is outside the catalog of {len} codecs")]
    InvalidCodecIndex { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OffsetInputError {
    #[error("offset is empty")]
    Empty,
    #[error("'{0}' is not a decimal or 0x-prefixed hexadecimal offset")]
    Malformed(String),
    #[error("'{0}' does not fit in a 64-bit offset")]
    Overflow(String),
    #[error("offset {offset} is past the end of the {len} byte file")]
    OutOfRange { offset: u64, len: usize },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("failed to stage download in {path}: {source}")]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deliver download to {destination}: {source}")]
    Trigger {
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
