//! Packed 2-bit-per-pixel raster engine.
//!
//! The frame buffer owns the pixel store for the whole panel (4 pixels per
//! byte, first pixel in the highest two bits) and provides every drawing
//! primitive the scene compositor uses: images, text with word wrap, lines,
//! rectangles, and QR codes, all routed through one rotation-aware,
//! bounds-safe pixel addressing path.
//!
//! None of these operations can fail. Out-of-range coordinates read back as
//! white and write nowhere; missing glyphs fall back per [`Font::glyph`].
//! A bad draw call degrades the picture, it never aborts a render pass.

use crate::color::Color;
use crate::font::Font;
use crate::image::Image;
use crate::unicode::Utf8Iterator;

/// Rotation of the logical coordinate space relative to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
}

/// Anchor alignment for drawing primitives, combining one horizontal and
/// one vertical axis into a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Align(u8);

impl Align {
    const LEFT: u8 = 0b000001;
    const TOP: u8 = 0b000010;
    const RIGHT: u8 = 0b000100;
    const BOTTOM: u8 = 0b001000;
    const VCENTER: u8 = 0b010000;
    const HCENTER: u8 = 0b100000;

    pub const TOP_LEFT: Align = Align(Self::TOP | Self::LEFT);
    pub const TOP_CENTER: Align = Align(Self::TOP | Self::HCENTER);
    pub const TOP_RIGHT: Align = Align(Self::TOP | Self::RIGHT);
    pub const RIGHT_CENTER: Align = Align(Self::RIGHT | Self::VCENTER);
    pub const BOTTOM_RIGHT: Align = Align(Self::BOTTOM | Self::RIGHT);
    pub const BOTTOM_CENTER: Align = Align(Self::BOTTOM | Self::HCENTER);
    pub const BOTTOM_LEFT: Align = Align(Self::BOTTOM | Self::LEFT);
    pub const LEFT_CENTER: Align = Align(Self::LEFT | Self::VCENTER);
    pub const CENTER: Align = Align(Self::HCENTER | Self::VCENTER);

    #[inline]
    fn has(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    /// Same horizontal axis, forced to top vertically. Used when a block's
    /// vertical alignment has already been resolved and the individual
    /// lines must not re-apply it.
    #[inline]
    fn with_top(self) -> Align {
        Align(self.0 & !Self::BOTTOM & !Self::VCENTER | Self::TOP)
    }
}

/// A pre-computed QR code module matrix, rendered by pixel scaling.
///
/// QR generation itself happens upstream; the raster engine only needs the
/// module grid.
pub trait QrMatrix {
    /// Modules per side.
    fn size(&self) -> i32;
    /// True if the module at `(x, y)` is dark. Out-of-range coordinates
    /// must return false.
    fn module(&self, x: i32, y: i32) -> bool;
}

/// The mutable raster target for one panel.
pub struct FrameBuffer {
    native_width: u32,
    native_height: u32,
    width: u32,
    height: u32,
    rotation: Rotation,
    alpha: Option<Color>,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Allocates a cleared (white) buffer for a panel of the given native
    /// resolution. Constructed once per device session and reused; frames
    /// are [`clear`](Self::clear)ed, not reallocated.
    pub fn new(native_width: u32, native_height: u32) -> Self {
        let length = (native_width as usize * native_height as usize).div_ceil(4);
        FrameBuffer {
            native_width,
            native_height,
            width: native_width,
            height: native_height,
            rotation: Rotation::Rotate0,
            alpha: None,
            data: vec![Color::White.fill_byte(); length],
        }
    }

    /// The packed pixel store, as consumed by the panel driver.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical width under the current rotation.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height under the current rotation.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline]
    pub fn alpha(&self) -> Option<Color> {
        self.alpha
    }

    /// Rotates the logical coordinate space. Pixel contents are untouched;
    /// logical width/height swap for 90° and 270°.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        match rotation {
            Rotation::Rotate0 | Rotation::Rotate180 => {
                self.width = self.native_width;
                self.height = self.native_height;
            }
            Rotation::Rotate90 | Rotation::Rotate270 => {
                self.width = self.native_height;
                self.height = self.native_width;
            }
        }
    }

    /// Sets the color treated as transparent by [`draw_image`](Self::draw_image),
    /// or `None` to composite every pixel.
    pub fn set_alpha(&mut self, alpha: Option<Color>) {
        self.alpha = alpha;
    }

    /// Fills the whole buffer with one color.
    pub fn clear(&mut self, color: Color) {
        self.data.fill(color.fill_byte());
    }

    /// Fills the buffer with four horizontal greyscale bands, darkest
    /// first. Diagnostic pattern for checking panel contrast.
    pub fn test_pattern(&mut self) {
        let quarter = self.data.len() / 4;
        let bands = [Color::Black, Color::DGrey, Color::LGrey, Color::White];
        for (i, color) in bands.iter().enumerate() {
            self.data[i * quarter..(i + 1) * quarter].fill(color.fill_byte());
        }
    }

    /// Maps logical coordinates through the rotation into a native pixel
    /// index, or `None` when out of bounds.
    fn pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let (mut x, mut y) = (x as u32, y as u32);
        match self.rotation {
            Rotation::Rotate0 => {}
            Rotation::Rotate90 => {
                let t = x;
                x = self.native_width - 1 - y;
                y = t;
            }
            Rotation::Rotate180 => {
                x = self.native_width - 1 - x;
                y = self.native_height - 1 - y;
            }
            Rotation::Rotate270 => {
                let t = y;
                y = self.native_height - 1 - x;
                x = t;
            }
        }
        Some((self.native_width * y + x) as usize)
    }

    /// Reads one pixel. Out-of-range coordinates read as white.
    pub fn get_px(&self, x: i32, y: i32) -> Color {
        match self.pixel_index(x, y) {
            Some(i) => Color::from_crumb(self.data[i / 4] >> ((3 - i % 4) * 2)),
            None => Color::White,
        }
    }

    /// Writes one pixel with a read-modify-write on the containing byte.
    /// Out-of-range coordinates are dropped.
    pub fn set_px(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.pixel_index(x, y) {
            let byte = &mut self.data[i / 4];
            let shift = (3 - i % 4) * 2;
            *byte &= !(0b11 << shift);
            *byte |= color.crumb() << shift;
        }
    }

    /// Decodes and composites an image. Pixels matching the current alpha
    /// key are skipped; everything else overwrites the destination.
    pub fn draw_image(&mut self, image: Image<'_>, mut x: i32, mut y: i32, align: Align) {
        let mut reader = image.reader();
        Self::adjust_alignment(&mut x, &mut y, i32::from(image.width), i32::from(image.height), align);

        for y_src in 0..i32::from(image.height) {
            let y_dst = y + y_src;
            for x_src in 0..i32::from(image.width) {
                let color = reader.next_pixel();
                if Some(color) != self.alpha {
                    self.set_px(x + x_src, y_dst, color);
                }
            }
        }
    }

    /// Total advance width of a string in this font: `space_width` for
    /// whitespace, `width + left` per glyph, plus `tracking` between
    /// characters (not after the last one).
    pub fn measure_text(&self, text: &str, font: &Font<'_>, tracking: i32) -> u32 {
        if text.is_empty() {
            return 0;
        }

        let mut length: i32 = 0;
        for cp in Utf8Iterator::new(text) {
            if Utf8Iterator::is_space(cp) {
                length += i32::from(font.space_width) + tracking;
            } else {
                let glyph = font.glyph(cp);
                length += i32::from(glyph.width()) + i32::from(glyph.left) + tracking;
            }
        }
        (length - tracking).max(0) as u32
    }

    /// Greedy word wrap. Lines break at the last space that fits, at
    /// explicit newlines, or mid-word when a single word exceeds the
    /// limit. `max_line_length == 0` disables wrapping. The breaking
    /// whitespace itself is trimmed from line ends.
    pub fn word_wrap<'s>(
        &self,
        text: &'s str,
        font: &Font<'_>,
        max_line_length: u32,
        tracking: i32,
    ) -> Vec<&'s str> {
        let mut lines = Vec::new();
        if text.is_empty() {
            return lines;
        }

        let limit = max_line_length as i32 + tracking;
        let mut line_start = 0usize;
        // Byte range of the last seen space: (line end before it, line start after it)
        let mut safe_break: Option<(usize, usize)> = None;
        let mut length: i32 = 0;
        let mut safe_length: i32 = 0;
        let mut it = Utf8Iterator::new(text);

        loop {
            let cp_start = it.position();
            let Some(cp) = it.next() else { break };

            if Utf8Iterator::is_newline(cp) {
                if max_line_length > 0 && length > limit {
                    // Wrap at the last word too
                    if let Some((end, next)) = safe_break.filter(|&(_, next)| next != line_start) {
                        lines.push(&text[line_start..end]);
                        line_start = next;
                    }
                }
                // Wrap here
                lines.push(&text[line_start..cp_start]);
                line_start = it.position();
                safe_break = None;
                length = 0;
                safe_length = 0;
            } else if Utf8Iterator::is_space(cp) {
                if max_line_length > 0 && length > limit {
                    match safe_break {
                        // Wrap at last word
                        Some((end, next)) if next != line_start => {
                            lines.push(&text[line_start..end]);
                            line_start = next;
                            length -= safe_length;
                        }
                        // Line cannot be word wrapped, so wrap at current position
                        _ => {
                            lines.push(&text[line_start..cp_start]);
                            line_start = it.position();
                            length = 0;
                        }
                    }
                } else {
                    length += i32::from(font.space_width) + tracking;
                }
                safe_break = Some((cp_start, it.position()));
                safe_length = length;
            } else {
                let glyph = font.glyph(cp);
                length += i32::from(glyph.width()) + i32::from(glyph.left) + tracking;
            }
        }
        if line_start < text.len() {
            lines.push(&text[line_start..]);
        }
        lines
    }

    /// Draws a single line of text. The string's measured width is only
    /// computed when the horizontal alignment needs it.
    pub fn draw_text(
        &mut self,
        text: &str,
        font: &Font<'_>,
        mut x: i32,
        mut y: i32,
        align: Align,
        tracking: i32,
    ) {
        if align != Align::TOP_LEFT {
            let width = if align.has(Align::LEFT) {
                0
            } else {
                self.measure_text(text, font, 0) as i32
            };
            Self::adjust_alignment(&mut x, &mut y, width, i32::from(font.line_height()), align);
        }

        for cp in Utf8Iterator::new(text) {
            if Utf8Iterator::is_space(cp) {
                x += i32::from(font.space_width) + tracking;
            } else {
                let glyph = font.glyph(cp);
                x += i32::from(glyph.left);
                self.draw_image(glyph.image, x, y + i32::from(glyph.top), Align::TOP_LEFT);
                x += i32::from(glyph.width()) + tracking;
            }
        }
    }

    /// Word-wraps and draws a block of text. Vertical alignment applies to
    /// the block as a whole; each line then keeps the horizontal alignment.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_multiline_text(
        &mut self,
        text: &str,
        font: &Font<'_>,
        mut x: i32,
        mut y: i32,
        max_line_length: u32,
        align: Align,
        tracking: i32,
        leading: i32,
    ) {
        // Justification equals the horizontal alignment, which is all the
        // calendar layouts need.
        let leading = leading + i32::from(font.line_height());
        let lines = self.word_wrap(text, font, max_line_length, tracking);

        if !align.has(Align::TOP) {
            Self::adjust_alignment(&mut x, &mut y, 0, leading * lines.len() as i32, align);
        }

        // Top alignment per line since that axis is resolved for the block
        let align = align.with_top();
        for line in lines {
            self.draw_text(line, font, x, y, align, tracking);
            y += leading;
        }
    }

    /// Renders a QR module matrix, scaling each module to a
    /// `scale × scale` block of black or white.
    pub fn draw_qr_code(&mut self, qr: &dyn QrMatrix, mut x: i32, mut y: i32, scale: i32, align: Align) {
        if scale <= 0 {
            return;
        }
        let size = qr.size() * scale;
        Self::adjust_alignment(&mut x, &mut y, size, size, align);

        for y1 in 0..size {
            let y2 = y1 / scale;
            for x1 in 0..size {
                let color = if qr.module(x1 / scale, y2) {
                    Color::Black
                } else {
                    Color::White
                };
                self.set_px(x + x1, y + y1, color);
            }
        }
    }

    /// Horizontal line of the given length and thickness. Negative length
    /// extends left of the anchor.
    pub fn draw_h_line(&mut self, mut x: i32, mut y: i32, mut length: i32, thickness: u32, color: Color, align: Align) {
        if length < 0 {
            x += length;
            length = -length;
        }
        Self::adjust_alignment(&mut x, &mut y, length, thickness as i32, align);
        let ymax = y + thickness as i32;
        for i in 0..length {
            for y1 in y..ymax {
                self.set_px(x + i, y1, color);
            }
        }
    }

    /// Vertical line of the given length and thickness. Negative length
    /// extends up from the anchor.
    pub fn draw_v_line(&mut self, mut x: i32, mut y: i32, mut length: i32, thickness: u32, color: Color, align: Align) {
        if length < 0 {
            y += length;
            length = -length;
        }
        Self::adjust_alignment(&mut x, &mut y, thickness as i32, length, align);
        let xmax = x + thickness as i32;
        for i in 0..length {
            for x1 in x..xmax {
                self.set_px(x1, y + i, color);
            }
        }
    }

    /// Filled rectangle. Negative dimensions are normalized by shifting
    /// the origin.
    pub fn fill_rect(&mut self, mut x: i32, mut y: i32, mut width: i32, mut height: i32, color: Color, align: Align) {
        if width < 0 {
            x += width;
            width = -width;
        }
        if height < 0 {
            y += height;
            height = -height;
        }
        Self::adjust_alignment(&mut x, &mut y, width, height, align);
        for xi in x..x + width {
            for yi in y..y + height {
                self.set_px(xi, yi, color);
            }
        }
    }

    /// Rectangle outline built from the line primitives. With
    /// `stroke_outside` the border grows outward from the given rect
    /// instead of into it.
    #[allow(clippy::too_many_arguments)]
    pub fn stroke_rect(
        &mut self,
        mut x: i32,
        mut y: i32,
        mut width: i32,
        mut height: i32,
        stroke_width: u32,
        color: Color,
        stroke_outside: bool,
        align: Align,
    ) {
        if width < 0 {
            x += width;
            width = -width;
        }
        if height < 0 {
            y += height;
            height = -height;
        }
        Self::adjust_alignment(&mut x, &mut y, width, height, align);
        if stroke_outside {
            x -= stroke_width as i32;
            y -= stroke_width as i32;
            width += stroke_width as i32 * 2;
            height += stroke_width as i32 * 2;
        }
        self.draw_h_line(x, y, width, stroke_width, color, Align::TOP_LEFT);
        self.draw_v_line(x, y, height, stroke_width, color, Align::TOP_LEFT);
        self.draw_h_line(x, y + height, width, stroke_width, color, Align::BOTTOM_LEFT);
        self.draw_v_line(x + width, y, height, stroke_width, color, Align::TOP_RIGHT);
    }

    /// Converts an anchor point into a top-left draw origin for a box of
    /// the given size. Shared by every drawing primitive.
    fn adjust_alignment(x: &mut i32, y: &mut i32, width: i32, height: i32, align: Align) {
        if align.has(Align::HCENTER) {
            *x -= width / 2;
        } else if align.has(Align::RIGHT) {
            *x -= width;
        }

        if align.has(Align::VCENTER) {
            *y -= height / 2;
        } else if align.has(Align::BOTTOM) {
            *y -= height;
        }
    }
}
