//! Boundary types shared between the editor controller and graphics engines.

pub mod domain;
pub mod engine;
pub mod error;

pub use domain::{CodecIndex, RawCodecInfo, RenderedFrame, Step};
pub use engine::{EngineSession, GraphicsEngine};
pub use error::EngineError;
