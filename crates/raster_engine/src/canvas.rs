use shared::RenderedFrame;

pub trait PixelTarget {
    fn put_index(&mut self, x: usize, y: usize, index: u8);
}

/// Palette-indexed render target. Pixels never written stay `None` and come out
/// transparent.
#[derive(Debug, Clone)]
pub struct IndexedCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Option<u8>>,
}

impl IndexedCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y * self.width + x]
    }

    /// Expands indices to a grayscale ramp spanning `palette_colors` entries.
    pub fn to_rgba(&self, palette_colors: usize) -> RenderedFrame {
        let mut frame = RenderedFrame::blank(self.width, self.height);
        for (pixel, rgba) in self.pixels.iter().zip(frame.rgba.chunks_exact_mut(4)) {
            if let Some(index) = pixel {
                let gray = gray_level(*index, palette_colors);
                rgba.copy_from_slice(&[gray, gray, gray, 0xFF]);
            }
        }
        frame
    }
}

impl PixelTarget for IndexedCanvas {
    fn put_index(&mut self, x: usize, y: usize, index: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = Some(index);
        }
    }
}

fn gray_level(index: u8, palette_colors: usize) -> u8 {
    if palette_colors <= 1 {
        return 0xFF;
    }
    let max = palette_colors - 1;
    ((usize::from(index).min(max) * 255) / max) as u8
}
