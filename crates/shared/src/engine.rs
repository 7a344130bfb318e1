//! The narrow boundary every graphics engine implements.
//!
//! A `GraphicsEngine` is session-independent: it reports its codec table and builds
//! sessions from file bytes. Each `EngineSession` is one stateful decoding handle.
//! `release` consumes the handle, so a released session cannot receive further calls.

use crate::{CodecIndex, EngineError, RawCodecInfo, RenderedFrame, Step};

pub trait GraphicsEngine {
    type Session: EngineSession;

    /// Codec table in engine order. Indices into this list are passed back verbatim
    /// to [`EngineSession::select_codec`].
    fn query_codecs(&self) -> Vec<RawCodecInfo>;

    /// Checks whether `bytes` would be accepted by [`GraphicsEngine::construct`]
    /// without building anything.
    fn probe(&self, bytes: &[u8]) -> Result<(), EngineError>;

    fn construct(&self, bytes: Vec<u8>) -> Result<Self::Session, EngineError>;
}

pub trait EngineSession {
    fn resize_to_fit(&mut self);
    fn render(&mut self);
    fn refresh_status(&mut self);

    fn step_width(&mut self, step: Step);
    fn step_height(&mut self, step: Step);
    fn step_tile(&mut self, step: Step);
    fn step_pixel(&mut self, step: Step);
    fn step_byte(&mut self, step: Step);
    fn step_bit(&mut self, step: Step);
    fn step_row(&mut self, step: Step, fast: bool);
    fn jump_to_offset(&mut self, offset: u64);
    fn select_codec(&mut self, index: CodecIndex);

    fn export_encoded_image(&mut self) -> Result<Vec<u8>, EngineError>;

    /// Number of loaded bytes; bounds offset jumps.
    fn data_len(&self) -> usize;

    fn release(self);

    fn status_line(&self) -> Option<&str> {
        None
    }

    fn frame(&self) -> Option<&RenderedFrame> {
        None
    }
}
