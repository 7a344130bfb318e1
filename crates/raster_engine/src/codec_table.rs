use crate::linear_codec::{Linear1bppLsbFirst, Linear1bppMsbFirst, LinearCodec};
use crate::tile_codec::{NesGraphics, TileCodec};

static NES_GRAPHICS: NesGraphics = NesGraphics::new();
static LINEAR_1BPP_MSB_FIRST: Linear1bppMsbFirst = Linear1bppMsbFirst::new();
static LINEAR_1BPP_LSB_FIRST: Linear1bppLsbFirst = Linear1bppLsbFirst::new();

#[derive(Clone, Copy)]
pub enum CodecKind {
    Tiled(&'static dyn TileCodec),
    Linear(&'static dyn LinearCodec),
}

#[derive(Clone, Copy)]
pub struct CodecEntry {
    pub identifier: &'static str,
    pub kind: CodecKind,
}

impl CodecEntry {
    pub fn is_tiled(&self) -> bool {
        matches!(self.kind, CodecKind::Tiled(_))
    }

    pub fn num_palette_colors(&self) -> usize {
        match self.kind {
            CodecKind::Tiled(codec) => codec.num_palette_colors(),
            CodecKind::Linear(codec) => codec.num_palette_colors(),
        }
    }

    /// Decoded pixels covered by one width/height unit.
    pub fn unit_size(&self) -> (usize, usize) {
        match self.kind {
            CodecKind::Tiled(codec) => (codec.tile_width(), codec.tile_height()),
            CodecKind::Linear(_) => (1, 1),
        }
    }

    /// Source bits consumed by one width unit.
    pub fn bits_per_unit(&self) -> usize {
        match self.kind {
            CodecKind::Tiled(codec) => codec.bits_per_tile(),
            CodecKind::Linear(codec) => codec.bits_per_pixel(),
        }
    }

    pub fn bits_per_pixel(&self) -> usize {
        match self.kind {
            // planar rows advance one bit per pixel within each plane
            CodecKind::Tiled(_) => 1,
            CodecKind::Linear(codec) => codec.bits_per_pixel(),
        }
    }
}

impl std::fmt::Debug for CodecEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecEntry")
            .field("identifier", &self.identifier)
            .field("is_tiled", &self.is_tiled())
            .finish()
    }
}

/// Engine codec order. Position in this table is the codec index handed to clients.
pub static CODEC_TABLE: &[CodecEntry] = &[
    CodecEntry {
        identifier: "nes",
        kind: CodecKind::Tiled(&NES_GRAPHICS),
    },
    CodecEntry {
        identifier: "lin-1bpp-msbfirst",
        kind: CodecKind::Linear(&LINEAR_1BPP_MSB_FIRST),
    },
    CodecEntry {
        identifier: "lin-1bpp-lsbfirst",
        kind: CodecKind::Linear(&LINEAR_1BPP_LSB_FIRST),
    },
];
