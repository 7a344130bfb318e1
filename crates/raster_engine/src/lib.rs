//! Reference graphics engine: decodes raw bytes through tiled or linear codecs into an
//! RGBA frame and encodes that frame as PNG.

pub mod canvas;
mod codec_table;
pub mod linear_codec;
mod session;
pub mod tile_codec;

use shared::{EngineError, GraphicsEngine, RawCodecInfo};

pub use codec_table::{CodecEntry, CodecKind, CODEC_TABLE};
pub use session::RasterSession;

/// Largest file the engine will load.
pub const MAX_INPUT_LEN: usize = 64 * 1024 * 1024;

/// Canvas area `resize_to_fit` fills, in decoded pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasBounds {
    pub width_px: usize,
    pub height_px: usize,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self {
            width_px: 256,
            height_px: 256,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RasterEngine {
    canvas: CanvasBounds,
}

impl RasterEngine {
    pub fn new(canvas: CanvasBounds) -> Self {
        Self { canvas }
    }
}

impl GraphicsEngine for RasterEngine {
    type Session = RasterSession;

    fn query_codecs(&self) -> Vec<RawCodecInfo> {
        CODEC_TABLE
            .iter()
            .map(|entry| RawCodecInfo::new(entry.identifier, entry.is_tiled()))
            .collect()
    }

    fn probe(&self, bytes: &[u8]) -> Result<(), EngineError> {
        if bytes.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        if bytes.len() > MAX_INPUT_LEN {
            return Err(EngineError::InputTooLarge {
                len: bytes.len(),
                max: MAX_INPUT_LEN,
            });
        }
        Ok(())
    }

    fn construct(&self, bytes: Vec<u8>) -> Result<RasterSession, EngineError> {
        self.probe(&bytes)?;
        tracing::debug!(bytes = bytes.len(), "constructing raster session");
        Ok(RasterSession::new(bytes, self.canvas))
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
