//! Bitmap font model.
//!
//! Fonts are compiled ahead of time from TrueType sources into static glyph
//! tables; nothing is rasterized at runtime. Each glyph is an [`Image`] plus
//! the bounding-box offsets reported by the font compiler, measured from the
//! top-left corner of the line box.

use crate::color::Color;
use crate::image::Image;
use crate::unicode::REPLACEMENT;

/// A single glyph bitmap with its placement offsets.
#[derive(Debug, Clone, Copy)]
pub struct Glyph<'a> {
    /// Distance from the top of the line box to the glyph bitmap.
    pub top: i16,
    /// Horizontal bearing applied before the bitmap is drawn.
    pub left: i16,
    pub image: Image<'a>,
}

impl Glyph<'_> {
    /// Bitmap width in pixels.
    #[inline]
    pub fn width(&self) -> u16 {
        self.image.width
    }
}

/// Drawn when a font has no glyph for a code point and no replacement
/// glyph either. Zero-sized, so rendering it is a no-op.
const EMPTY_GLYPH: Glyph<'static> = Glyph {
    top: 0,
    left: 0,
    image: Image {
        width: 0,
        height: 0,
        rle_bits: 0,
        data: &[],
    },
};

/// A compiled bitmap font: shared vertical metrics plus a glyph table
/// sorted by code point.
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    pub ascent: u16,
    pub descent: u16,
    /// Advance used for whitespace code points, which carry no glyph.
    pub space_width: u16,
    pub fg_color: Color,
    pub bg_color: Color,
    /// `(code point, glyph)` pairs, ascending by code point. Must include
    /// U+FFFD so unknown code points render as the replacement character.
    pub glyphs: &'a [(u16, Glyph<'a>)],
}

impl<'a> Font<'a> {
    /// Height of one line of text, before leading.
    #[inline]
    pub fn line_height(&self) -> u16 {
        self.ascent + self.descent
    }

    /// Looks up the glyph for a code point, falling back to the
    /// replacement glyph, then to a zero-sized glyph.
    pub fn glyph(&self, cp: u16) -> Glyph<'a> {
        self.find(cp)
            .or_else(|| self.find(REPLACEMENT))
            .unwrap_or(EMPTY_GLYPH)
    }

    fn find(&self, cp: u16) -> Option<Glyph<'a>> {
        self.glyphs
            .binary_search_by_key(&cp, |&(code, _)| code)
            .ok()
            .map(|i| self.glyphs[i].1)
    }
}
