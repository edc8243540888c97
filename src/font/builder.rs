//! Encoder for the binary font table layout
//!
//! Used to assemble tables at runtime (tests, tools) and to import the
//! monospace fonts shipped with `embedded-graphics`.
use crate::display::bitmap::stride_for;
use crate::font::table::RECORD_HEADER_BYTES;
use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Point, Size},
    text::{Baseline, Text},
    Drawable, Pixel,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct GlyphRecord {
    code: u16,
    device_width: u8,
    bbox_width: u8,
    bbox_height: u8,
    bbox_x_offset: i8,
    bbox_y_offset: i8,
    bitmap: Vec<u8>,
}

/// Collects glyph records, fallback first, and serializes them
#[derive(Debug, Clone, Default)]
pub struct FontBuilder {
    size: u8,
    ascent: u8,
    descent: u8,
    glyphs: Vec<GlyphRecord>,
}

impl FontBuilder {
    pub fn new(size: u8, ascent: u8, descent: u8) -> Self {
        Self {
            size,
            ascent,
            descent,
            glyphs: Vec::new(),
        }
    }

    /// Append a glyph. The first glyph added becomes the fallback. `bitmap`
    /// holds `ceil(width / 8) * height` bytes with set bits as ink; it is
    /// padded or cut to that length.
    #[allow(clippy::too_many_arguments)]
    pub fn glyph(
        mut self,
        code: u16,
        device_width: u8,
        width: u8,
        height: u8,
        x_offset: i8,
        y_offset: i8,
        bitmap: &[u8],
    ) -> Self {
        let mut bitmap = bitmap.to_vec();
        bitmap.resize(stride_for(width as u32) * height as usize, 0);
        self.glyphs.push(GlyphRecord {
            code,
            device_width,
            bbox_width: width,
            bbox_height: height,
            bbox_x_offset: x_offset,
            bbox_y_offset: y_offset,
            bitmap,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn build(&self) -> Vec<u8> {
        let bbox_width = self.glyphs.iter().map(|g| g.bbox_width).max().unwrap_or(0);
        let bbox_height = self.glyphs.iter().map(|g| g.bbox_height).max().unwrap_or(0);
        let bbox_x_offset = self.glyphs.iter().map(|g| g.bbox_x_offset).min().unwrap_or(0);
        let bbox_y_offset = self.glyphs.iter().map(|g| g.bbox_y_offset).min().unwrap_or(0);

        let mut out = Vec::new();
        out.push(self.size);
        out.extend_from_slice(&(self.glyphs.len() as u16).to_be_bytes());
        out.push(bbox_width);
        out.push(bbox_height);
        out.push(bbox_x_offset as u8);
        out.push(bbox_y_offset as u8);
        out.push(self.ascent);
        out.push(self.descent);

        for glyph in &self.glyphs {
            let record_bytes = (RECORD_HEADER_BYTES + glyph.bitmap.len()) as u16;
            out.extend_from_slice(&glyph.code.to_be_bytes());
            out.extend_from_slice(&record_bytes.to_be_bytes());
            out.push(glyph.device_width);
            out.push(0);
            out.push(glyph.bbox_width);
            out.push(glyph.bbox_height);
            out.push(glyph.bbox_x_offset as u8);
            out.push(glyph.bbox_y_offset as u8);
            out.extend_from_slice(&glyph.bitmap);
        }
        out
    }

    /// Render `chars` with an `embedded-graphics` monospace font and store
    /// each one trimmed to its ink. A hollow box the height of the ascent
    /// becomes the fallback glyph.
    pub fn from_mono_font(font: &MonoFont<'_>, chars: impl IntoIterator<Item = char>) -> Self {
        let cell = font.character_size;
        let baseline = font.baseline as i32;
        let ascent = (baseline + 1) as u8;
        let descent = (cell.height as i32 - baseline - 1).max(0) as u8;
        let device_width = (cell.width + font.character_spacing) as u8;

        let box_width = cell.width.saturating_sub(1).max(1) as u8;
        let mut fallback = vec![0u8; stride_for(box_width as u32) * ascent as usize];
        let stride = stride_for(box_width as u32);
        for y in 0..ascent as usize {
            for x in 0..box_width as usize {
                let edge = y == 0 || y + 1 == ascent as usize || x == 0 || x + 1 == box_width as usize;
                if edge {
                    fallback[y * stride + x / 8] |= 0x80 >> (x % 8);
                }
            }
        }

        let mut builder = FontBuilder::new(cell.height as u8, ascent, descent).glyph(
            0,
            device_width,
            box_width,
            ascent,
            0,
            0,
            &fallback,
        );

        let style = MonoTextStyle::new(font, BinaryColor::On);
        for c in chars {
            let mut canvas = GlyphCanvas::new(cell);
            let mut utf8 = [0u8; 4];
            let text = c.encode_utf8(&mut utf8);
            // infallible target
            let _ = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut canvas);

            let code = c as u32;
            if code > u16::MAX as u32 {
                log::warn!("skipping {:#x}: outside the 16-bit glyph range", code);
                continue;
            }

            builder = match canvas.ink_bounds() {
                None => builder.glyph(code as u16, device_width, 0, 0, 0, 0, &[]),
                Some((left, top, right, bottom)) => {
                    let width = right - left + 1;
                    let height = bottom - top + 1;
                    let stride = stride_for(width as u32);
                    let mut bitmap = vec![0u8; stride * height];
                    for y in 0..height {
                        for x in 0..width {
                            if canvas.ink(left + x, top + y) {
                                bitmap[y * stride + x / 8] |= 0x80 >> (x % 8);
                            }
                        }
                    }
                    builder.glyph(
                        code as u16,
                        device_width,
                        width as u8,
                        height as u8,
                        left as i8,
                        (baseline - bottom as i32) as i8,
                        &bitmap,
                    )
                }
            };
        }
        builder
    }
}

/// Scratch target one character cell large
struct GlyphCanvas {
    size: Size,
    ink: Vec<bool>,
}

impl GlyphCanvas {
    fn new(size: Size) -> Self {
        Self {
            size,
            ink: vec![false; (size.width * size.height) as usize],
        }
    }

    fn ink(&self, x: usize, y: usize) -> bool {
        self.ink[y * self.size.width as usize + x]
    }

    /// `(left, top, right, bottom)` of the inked pixels, inclusive
    fn ink_bounds(&self) -> Option<(usize, usize, usize, usize)> {
        let width = self.size.width as usize;
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for (index, _) in self.ink.iter().enumerate().filter(|(_, ink)| **ink) {
            let (x, y) = (index % width, index / width);
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x), b.max(y)),
            });
        }
        bounds
    }
}

impl OriginDimensions for GlyphCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for GlyphCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = (self.size.width as i32, self.size.height as i32);
        for Pixel(point, color) in pixels {
            if color == BinaryColor::On
                && point.x >= 0
                && point.y >= 0
                && point.x < width
                && point.y < height
            {
                self.ink[(point.y * width + point.x) as usize] = true;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::table::FontTable;
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    #[test]
    fn test_build_layout() {
        let data = FontBuilder::new(8, 6, 1)
            .glyph(0, 5, 4, 2, 0, 0, &[0xf0, 0xf0])
            .glyph(0x41, 6, 9, 1, -1, -2, &[0xff, 0x80])
            .build();

        assert_eq!(&data[..9], &[8, 0, 2, 9, 2, 0xff, 0xfe, 6, 1]);
        // second record starts after the 12 byte fallback
        assert_eq!(&data[21..31], &[0, 0x41, 0, 12, 6, 0, 9, 1, 0xff, 0xfe]);
        assert_eq!(data.len(), 9 + 12 + 12);
    }

    #[test]
    fn test_bitmap_is_padded_to_stride() {
        let data = FontBuilder::new(8, 6, 1).glyph(0, 5, 12, 2, 0, 0, &[0xff]).build();
        let font = FontTable::parse(&data).unwrap();
        assert_eq!(font.fallback().bitmap, &[0xff, 0, 0, 0]);
    }

    #[test]
    fn test_import_mono_font() {
        let builder = FontBuilder::from_mono_font(&FONT_6X10, ['A', ' ', 'g']);
        assert_eq!(builder.len(), 4);

        let data = builder.build();
        let font = FontTable::parse(&data).unwrap();
        assert_eq!(font.header().ascent, FONT_6X10.baseline as u8 + 1);

        let a = font.glyph(b'A' as u16);
        assert_eq!(a.device_width_x, 6);
        assert!(a.bbox_width > 0 && a.bbox_width <= 6);
        assert_eq!(a.bbox_y_offset, 0);

        let space = font.glyph(b' ' as u16);
        assert_eq!(space.bbox_width, 0);

        // descender reaches below the baseline
        let g = font.glyph(b'g' as u16);
        assert!(g.descent() > 0);
    }
}
