use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use shared::{CodecIndex, EngineError, EngineSession, RenderedFrame, Step};

use crate::canvas::IndexedCanvas;
use crate::codec_table::{CodecEntry, CodecKind, CODEC_TABLE};
use crate::CanvasBounds;

/// Upper bound for width and height, in codec units.
const MAX_UNITS: usize = 1024;

/// One loaded file and the view onto it.
///
/// The view position is an absolute bit cursor so that byte, bit, pixel and tile
/// steps all compose without rounding.
pub struct RasterSession {
    data: Vec<u8>,
    codec_index: usize,
    bit_pos: usize,
    width: usize,
    height: usize,
    canvas: CanvasBounds,
    frame: RenderedFrame,
    status: String,
}

impl RasterSession {
    pub(crate) fn new(data: Vec<u8>, canvas: CanvasBounds) -> Self {
        Self {
            data,
            codec_index: 0,
            bit_pos: 0,
            width: 1,
            height: 1,
            canvas,
            frame: RenderedFrame::default(),
            status: String::new(),
        }
    }

    fn codec(&self) -> &'static CodecEntry {
        &CODEC_TABLE[self.codec_index]
    }

    pub fn codec_identifier(&self) -> &'static str {
        self.codec().identifier
    }

    pub fn bit_position(&self) -> usize {
        self.bit_pos
    }

    pub fn byte_offset(&self) -> usize {
        self.bit_pos / 8
    }

    /// Width and height in codec units (tiles or pixels).
    pub fn geometry(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn max_bit_pos(&self) -> usize {
        (self.data.len() * 8).saturating_sub(1)
    }

    fn move_cursor(&mut self, step: Step, bits: usize) {
        self.bit_pos = step.apply(self.bit_pos, bits).min(self.max_bit_pos());
    }

    fn row_bits(&self) -> usize {
        self.width * self.codec().bits_per_unit()
    }
}

fn step_units(value: usize, step: Step) -> usize {
    step.apply(value, 1).clamp(1, MAX_UNITS)
}

impl EngineSession for RasterSession {
    fn resize_to_fit(&mut self) {
        let (unit_w, unit_h) = self.codec().unit_size();
        self.width = (self.canvas.width_px / unit_w).clamp(1, MAX_UNITS);
        self.height = (self.canvas.height_px / unit_h).clamp(1, MAX_UNITS);
    }

    fn render(&mut self) {
        let codec = self.codec();
        let (unit_w, unit_h) = codec.unit_size();
        let mut canvas = IndexedCanvas::new(self.width * unit_w, self.height * unit_h);
        match codec.kind {
            CodecKind::Tiled(tiles) => {
                tiles.render(&mut canvas, &self.data, self.bit_pos, self.width, self.height)
            }
            CodecKind::Linear(linear) => {
                linear.render(&mut canvas, &self.data, self.bit_pos, self.width, self.height)
            }
        }
        self.frame = canvas.to_rgba(codec.num_palette_colors());
    }

    fn refresh_status(&mut self) {
        let unit = if self.codec().is_tiled() { "tiles" } else { "px" };
        self.status = format!(
            "{} | offset 0x{:06X} bit {} | {}x{} {} | {} bytes",
            self.codec().identifier,
            self.byte_offset(),
            self.bit_pos % 8,
            self.width,
            self.height,
            unit,
            self.data.len()
        );
    }

    fn step_width(&mut self, step: Step) {
        self.width = step_units(self.width, step);
    }

    fn step_height(&mut self, step: Step) {
        self.height = step_units(self.height, step);
    }

    fn step_tile(&mut self, step: Step) {
        self.move_cursor(step, self.codec().bits_per_unit());
    }

    fn step_pixel(&mut self, step: Step) {
        self.move_cursor(step, self.codec().bits_per_pixel());
    }

    fn step_byte(&mut self, step: Step) {
        self.move_cursor(step, 8);
    }

    fn step_bit(&mut self, step: Step) {
        self.move_cursor(step, 1);
    }

    fn step_row(&mut self, step: Step, fast: bool) {
        let rows = if fast { self.height } else { 1 };
        self.move_cursor(step, self.row_bits() * rows);
    }

    fn jump_to_offset(&mut self, offset: u64) {
        let bit_pos = usize::try_from(offset)
            .ok()
            .and_then(|offset| offset.checked_mul(8))
            .unwrap_or(usize::MAX);
        self.bit_pos = bit_pos.min(self.max_bit_pos());
    }

    fn select_codec(&mut self, index: CodecIndex) {
        if index.0 >= CODEC_TABLE.len() {
            tracing::warn!(index = index.0, "ignoring unknown codec index");
            return;
        }
        self.codec_index = index.0;
        self.resize_to_fit();
    }

    fn export_encoded_image(&mut self) -> Result<Vec<u8>, EngineError> {
        if self.frame.is_empty() {
            self.render();
        }
        let image = RgbaImage::from_raw(
            self.frame.width as u32,
            self.frame.height as u32,
            self.frame.rgba.clone(),
        )
        .ok_or_else(|| EngineError::Encode("frame buffer size mismatch".to_string()))?;

        let mut encoded = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
            .map_err(|err| EngineError::Encode(err.to_string()))?;
        Ok(encoded)
    }

    fn data_len(&self) -> usize {
        self.data.len()
    }

    fn release(self) {
        tracing::debug!(bytes = self.data.len(), "released raster session");
    }

    fn status_line(&self) -> Option<&str> {
        (!self.status.is_empty()).then_some(self.status.as_str())
    }

    fn frame(&self) -> Option<&RenderedFrame> {
        (!self.frame.is_empty()).then_some(&self.frame)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
