use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("input is empty")]
    EmptyInput,
    #[error("input of {len} bytes exceeds the {max} byte limit")]
    InputTooLarge { len: usize, max: usize },
    #[error("image encoding failed: {0}")]
    Encode(String),
}
