//! Run-length encoded 2-bit image assets and their decoder.
//!
//! Images are produced ahead of time by the asset compiler and linked in as
//! static byte tables. The format packs a stream of 2-bit "crumbs" MSB-first
//! into bytes; each encoded unit is a color crumb followed by a run count
//! occupying `rle_bits - 2` bits (also read as crumbs, high crumb first).
//! A run count of `n` means the color repeats `n` more times after being
//! emitted once. `rle_bits == 0` marks a raw, unencoded 2 bpp image.

use crate::color::Color;

/// An immutable 2-bit greyscale bitmap, typically a compiled-in asset.
#[derive(Debug, Clone, Copy)]
pub struct Image<'a> {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Total bit width of one RLE unit (color + run count), or 0 for raw.
    pub rle_bits: u8,
    /// Packed pixel/run data, 4 crumbs per byte, MSB first.
    pub data: &'a [u8],
}

impl<'a> Image<'a> {
    /// Streams the decoded pixels of this image in row-major order.
    pub fn reader(&self) -> ImageReader<'a> {
        ImageReader::new(*self)
    }
}

/// Decoder state over an [`Image`]'s crumb stream.
///
/// Produces exactly `width * height` pixels when advanced that many times;
/// reads past the end of the data buffer decode as white so a malformed
/// asset degrades instead of aborting the render pass.
pub struct ImageReader<'a> {
    image: Image<'a>,
    crumb: usize,
    run: u32,
    color: Color,
}

impl<'a> ImageReader<'a> {
    pub fn new(image: Image<'a>) -> Self {
        ImageReader {
            image,
            crumb: 0,
            run: 0,
            color: Color::White,
        }
    }

    /// Decodes the next pixel.
    pub fn next_pixel(&mut self) -> Color {
        if self.run > 0 {
            self.run -= 1;
            return self.color;
        }
        self.color = Color::from_crumb(self.read_crumb());
        let mut bits = 2;
        while bits < self.image.rle_bits {
            self.run = (self.run << 2) | u32::from(self.read_crumb());
            bits += 2;
        }
        self.color
    }

    fn read_crumb(&mut self) -> u8 {
        let byte = self.image.data.get(self.crumb / 4).copied().unwrap_or(0);
        let shift = (3 - self.crumb % 4) * 2;
        self.crumb += 1;
        (byte >> shift) & 0b11
    }
}

/// Reference encoder matching the asset compiler's output, used to build
/// fixtures for codec and rendering tests.
#[cfg(test)]
pub(crate) mod test_encoder {
    use super::*;

    struct CrumbWriter {
        bytes: Vec<u8>,
        filled: u8,
    }

    impl CrumbWriter {
        fn new() -> Self {
            CrumbWriter {
                bytes: Vec::new(),
                filled: 0,
            }
        }

        fn push(&mut self, crumb: u8) {
            if self.filled == 0 {
                self.bytes.push(0);
            }
            let shift = (3 - self.filled) * 2;
            *self.bytes.last_mut().unwrap() |= (crumb & 0b11) << shift;
            self.filled = (self.filled + 1) % 4;
        }
    }

    /// Encodes pixels into the packed RLE format described in [`super`].
    pub(crate) fn encode(pixels: &[Color], rle_bits: u8) -> Vec<u8> {
        let mut out = CrumbWriter::new();
        if rle_bits == 0 {
            for px in pixels {
                out.push(px.crumb());
            }
            return out.bytes;
        }

        let max_run: u32 = (1 << (rle_bits - 2)) - 1;
        let mut i = 0;
        while i < pixels.len() {
            let color = pixels[i];
            let mut run: u32 = 0;
            while run < max_run && i + 1 + (run as usize) < pixels.len() && pixels[i + 1 + run as usize] == color {
                run += 1;
            }
            i += 1 + run as usize;

            out.push(color.crumb());
            let mut bits = rle_bits - 2;
            while bits > 0 {
                bits -= 2;
                out.push(((run >> bits) & 0b11) as u8);
            }
        }
        out.bytes
    }
}
