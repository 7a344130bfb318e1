use std::marker::PhantomData;

use bitvec::prelude::*;

use crate::canvas::PixelTarget;

pub trait LinearCodec: Send + Sync {
    fn num_palette_colors(&self) -> usize;
    fn bits_per_pixel(&self) -> usize;
    fn bits_per_row(&self, width: usize) -> usize;
    fn render(
        &self,
        target: &mut dyn PixelTarget,
        bytes: &[u8],
        bit_offset: usize,
        width: usize,
        height: usize,
    );
}

/// Packed `BPP`-bit palette indices, rows back to back with no padding. The first bit
/// read for a pixel is its most significant index bit.
pub struct NbppLinearGraphics<DataBitOrder: BitOrder, const BPP: usize> {
    _pd: PhantomData<fn() -> DataBitOrder>,
}

impl<DataBitOrder: BitOrder, const BPP: usize> NbppLinearGraphics<DataBitOrder, BPP> {
    pub const fn new() -> Self {
        Self { _pd: PhantomData }
    }
}

impl<DataBitOrder: BitOrder, const BPP: usize> LinearCodec
    for NbppLinearGraphics<DataBitOrder, BPP>
{
    fn num_palette_colors(&self) -> usize {
        1 << BPP
    }

    fn bits_per_pixel(&self) -> usize {
        BPP
    }

    fn bits_per_row(&self, width: usize) -> usize {
        BPP * width
    }

    fn render(
        &self,
        target: &mut dyn PixelTarget,
        bytes: &[u8],
        bit_offset: usize,
        width: usize,
        height: usize,
    ) {
        debug_assert!(BPP <= 8);
        let bits = bytes.view_bits::<DataBitOrder>();
        let bits_per_row = self.bits_per_row(width);

        for y in 0..height {
            for x in 0..width {
                let px_base = bit_offset + y * bits_per_row + x * BPP;
                let mut index = 0u8;
                for b_i in 0..BPP {
                    let Some(bit) = bits.get(px_base + b_i) else {
                        return;
                    };
                    index = (index << 1) | u8::from(*bit);
                }
                target.put_index(x, y, index);
            }
        }
    }
}

pub type Linear1bppMsbFirst = NbppLinearGraphics<Msb0, 1>;
pub type Linear1bppLsbFirst = NbppLinearGraphics<Lsb0, 1>;

#[cfg(test)]
#[path = "tests/linear_codec_tests.rs"]
mod tests;
