use std::marker::PhantomData;

use bitvec::prelude::*;

use crate::canvas::PixelTarget;

pub trait TileCodec: Send + Sync {
    fn num_palette_colors(&self) -> usize;
    fn tile_width(&self) -> usize;
    fn tile_height(&self) -> usize;
    fn bits_per_tile(&self) -> usize;
    fn render(
        &self,
        target: &mut dyn PixelTarget,
        bytes: &[u8],
        bit_offset: usize,
        tiles_w: usize,
        tiles_h: usize,
    );
}

/// Tiles stored one bit plane after another, each plane a row-major `TILE_W` x `TILE_H`
/// bitmap. Plane `n` contributes bit `n` of the palette index.
pub struct PlanarTileGraphics<
    DataBitOrder: BitOrder,
    const PLANES: usize,
    const TILE_W: usize,
    const TILE_H: usize,
> {
    _pd: PhantomData<fn() -> DataBitOrder>,
}

impl<DataBitOrder: BitOrder, const PLANES: usize, const TILE_W: usize, const TILE_H: usize>
    PlanarTileGraphics<DataBitOrder, PLANES, TILE_W, TILE_H>
{
    pub const fn new() -> Self {
        Self { _pd: PhantomData }
    }
}

impl<DataBitOrder: BitOrder, const PLANES: usize, const TILE_W: usize, const TILE_H: usize>
    TileCodec for PlanarTileGraphics<DataBitOrder, PLANES, TILE_W, TILE_H>
{
    fn num_palette_colors(&self) -> usize {
        1 << PLANES
    }

    fn tile_width(&self) -> usize {
        TILE_W
    }

    fn tile_height(&self) -> usize {
        TILE_H
    }

    fn bits_per_tile(&self) -> usize {
        TILE_W * TILE_H * PLANES
    }

    fn render(
        &self,
        target: &mut dyn PixelTarget,
        bytes: &[u8],
        bit_offset: usize,
        tiles_w: usize,
        tiles_h: usize,
    ) {
        debug_assert!(PLANES <= 8);
        let bits = bytes.view_bits::<DataBitOrder>();

        let bits_per_plane = TILE_W * TILE_H;
        let bits_per_tile = bits_per_plane * PLANES;

        for tile_y in 0..tiles_h {
            for tile_x in 0..tiles_w {
                let tile_base = bit_offset + (tile_y * tiles_w + tile_x) * bits_per_tile;
                for px_y in 0..TILE_H {
                    for px_x in 0..TILE_W {
                        let mut index = 0u8;
                        for plane in 0..PLANES {
                            let bit_idx =
                                tile_base + plane * bits_per_plane + px_y * TILE_W + px_x;
                            let Some(bit) = bits.get(bit_idx) else {
                                return;
                            };
                            if *bit {
                                index |= 1 << plane;
                            }
                        }
                        target.put_index(tile_x * TILE_W + px_x, tile_y * TILE_H + px_y, index);
                    }
                }
            }
        }
    }
}

/// NES CHR: 8x8 tiles, two planes of 8 bytes each, leftmost pixel in the high bit.
pub type NesGraphics = PlanarTileGraphics<Msb0, 2, 8, 8>;

#[cfg(test)]
#[path = "tests/tile_codec_tests.rs"]
mod tests;
