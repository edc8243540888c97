//! # Block and Bitmap Rasterization
//!
//! Both solid blocks and bitmaps are written by one routine working a byte
//! column at a time.
//!
//! ```text
//!                        region width
//!                  |-------------------------------------|
//!   buffer -> ________ ________ ________ ________ ________ ________
//!
//!                  |--| |--------------------------| |---|
//!                   ^                                  ^
//!     left partial _|       inner bytes = 3            |_ right partial
//! ```
//!
//! Partial columns are written through a mask, inner bytes are overwritten
//! whole. After each row the buffer index jumps by the wrap distance (the
//! byte columns the region does not touch) to reach the next row.
//!
//! Bitmaps are read with a bit cursor because the source and destination
//! bit offsets generally differ: each output byte is assembled from a two
//! byte window of the source.
use crate::config::BYTES_PER_ROW;
use crate::display::bitmap::Bitmap;
use crate::display::color::Color;
use crate::display::framebuffer::Framebuffer;
use crate::display::region::Region;

/// How source bits land in the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlitStyle {
    /// Ink color. Paper is written in the inverse color when `opaque`.
    pub color: Color,
    /// Invert source bits before compositing
    pub negative: bool,
    /// Also write paper bits instead of leaving them transparent
    pub opaque: bool,
}

impl BlitStyle {
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            negative: false,
            opaque: false,
        }
    }

    pub const fn negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    pub const fn opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }

    fn composite(&self, current: u8, byte: u8, mask: u8) -> u8 {
        match (self.opaque, self.color) {
            (false, Color::White) => current | (!byte & mask),
            (false, Color::Black) => current & (byte | !mask),
            (true, Color::White) => (current & !mask) | (!byte & mask),
            (true, Color::Black) => (current & !mask) | (byte & mask),
        }
    }
}

#[derive(Clone, Copy)]
enum Source<'a, 'b> {
    Block(u8),
    Bitmap(&'b Bitmap<'a>),
}

impl Framebuffer {
    /// Fill a solid rectangle. Returns the region actually written.
    pub fn fill_block(&mut self, region: Region, color: Color) -> Option<Region> {
        self.write_bits(
            region,
            Source::Block(color.byte()),
            BlitStyle::new(Color::Black).opaque(true),
        )
    }

    /// Copy `bitmap` with its top-left corner at `(x, y)`
    pub fn blit(&mut self, x: i32, y: i32, bitmap: &Bitmap<'_>, style: BlitStyle) -> Option<Region> {
        let region = Region::new(x, y, bitmap.width(), bitmap.height());
        self.write_bits(region, Source::Bitmap(bitmap), style)
    }

    fn write_bits(&mut self, region: Region, source: Source<'_, '_>, style: BlitStyle) -> Option<Region> {
        // parts of the source hanging off the top/left edge are skipped
        let skip_x = (0 - region.x as i64).max(0) as usize;
        let skip_y = (0 - region.y as i64).max(0) as usize;

        let clipped = Framebuffer::crop(region)?;

        let lead = clipped.x as u32 % 8;
        let width = clipped.width;
        let columns = ((lead + width + 7) / 8) as usize;
        let wrap_distance = BYTES_PER_ROW - columns;

        let mut index = clipped.y as usize * BYTES_PER_ROW + clipped.x as usize / 8;

        let stride_bits = match source {
            Source::Bitmap(bitmap) => bitmap.stride() * 8,
            Source::Block(_) => 0,
        };
        let mut bit_cursor = stride_bits * skip_y + skip_x;
        let bytes = self.as_bytes_mut();

        for _ in 0..clipped.height {
            let mut remaining = width;

            while remaining > 0 {
                let mut byte = match source {
                    Source::Block(fill) => fill,
                    Source::Bitmap(bitmap) => bitmap.window(bit_cursor),
                };

                if style.negative {
                    byte = !byte;
                }

                let mask: u8;
                let written: u32;
                if lead + width < 8 {
                    // the whole span sits inside one byte column
                    byte >>= lead;
                    mask = (0xff >> lead) & (0xff << (8 - (lead + width)));
                    written = width;
                } else if remaining == width {
                    byte >>= lead;
                    mask = 0xff >> lead;
                    written = 8 - lead;
                } else if remaining >= 8 {
                    mask = 0xff;
                    written = 8;
                } else {
                    mask = 0xff << (8 - remaining);
                    written = remaining;
                }

                bytes[index] = style.composite(bytes[index], byte, mask);

                index += 1;
                bit_cursor += written as usize;
                remaining -= written;
            }

            if stride_bits > 0 {
                bit_cursor += stride_bits - width as usize;
            }
            index += wrap_distance;
        }

        Some(clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_per_pixel(fb: &mut Framebuffer, region: Region, color: Color) {
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                fb.set_pixel(x, y, color);
            }
        }
    }

    #[test]
    fn test_block_matches_pixels_single_column() {
        let mut block = Framebuffer::new();
        let mut pixels = Framebuffer::new();
        let region = Region::new(9, 4, 3, 2);
        block.fill_block(region, Color::Black);
        fill_per_pixel(&mut pixels, region, Color::Black);
        assert_eq!(block, pixels);
    }

    #[test]
    fn test_block_matches_pixels_spanning_columns() {
        let mut block = Framebuffer::new();
        let mut pixels = Framebuffer::new();
        for region in [
            Region::new(3, 0, 30, 4),
            Region::new(8, 10, 16, 1),
            Region::new(130, 160, 14, 8),
        ] {
            block.fill_block(region, Color::Black);
            fill_per_pixel(&mut pixels, region, Color::Black);
        }
        assert_eq!(block, pixels);
    }

    #[test]
    fn test_block_white_over_black() {
        let mut fb = Framebuffer::new();
        fb.clear(Color::Black);
        fb.fill_block(Region::new(1, 0, 6, 1), Color::White);
        assert_eq!(fb.as_bytes()[0], 0b0111_1110);
        assert_eq!(fb.as_bytes()[1], 0x00);
    }

    #[test]
    fn test_fully_clipped_block_is_noop() {
        let mut fb = Framebuffer::new();
        let before = fb.checksum();
        assert_eq!(fb.fill_block(Region::new(-20, 5, 20, 5), Color::Black), None);
        assert_eq!(fb.fill_block(Region::new(0, 168, 5, 5), Color::Black), None);
        assert_eq!(fb.checksum(), before);
    }

    #[test]
    fn test_block_wider_than_the_i32_range() {
        let mut fb = Framebuffer::new();
        let written = fb.fill_block(Region::new(i32::MIN, 0, u32::MAX, 4), Color::Black);
        assert_eq!(written, Some(Region::new(0, 0, 144, 4)));
        assert_eq!(fb.pixels_of(Color::Black).count(), 144 * 4);

        let mut strip = Framebuffer::new();
        strip.fill_block(Region::new(0, 10, u32::MAX, 1), Color::Black);
        assert_eq!(strip.pixels_of(Color::Black).count(), 144);
        assert!(strip.pixels_of(Color::Black).all(|(_, y)| y == 10));

        let mut corner = Framebuffer::new();
        assert_eq!(
            corner.fill_block(Region::new(i32::MAX - 5, i32::MAX - 5, 10, 10), Color::Black),
            None
        );
        assert_eq!(corner, Framebuffer::new());
    }

    #[test]
    fn test_blit_transparent_leaves_paper() {
        let mut fb = Framebuffer::new();
        fb.clear(Color::Black);
        // ink on the left half, paper on the right half
        let data = [0b0000_1111];
        let bitmap = Bitmap::new(&data, 8, 1).unwrap();
        fb.blit(0, 0, &bitmap, BlitStyle::new(Color::White));
        assert_eq!(fb.as_bytes()[0], 0b1111_0000);
    }

    #[test]
    fn test_blit_unaligned_opaque() {
        let mut fb = Framebuffer::new();
        let data = [0b0110_0110, 0b1000_0000];
        let bitmap = Bitmap::new(&data, 9, 1).unwrap();
        fb.blit(5, 0, &bitmap, BlitStyle::new(Color::Black).opaque(true));
        for x in 0..9 {
            assert_eq!(fb.pixel(5 + x, 0), Some(Color::from_bit(bitmap.bit(x as u32, 0))));
        }
        assert_eq!(fb.pixel(4, 0), Some(Color::White));
        assert_eq!(fb.pixel(14, 0), Some(Color::White));
    }

    #[test]
    fn test_blit_cropped_on_left_and_top() {
        let mut fb = Framebuffer::new();
        // 10x3 bitmap, ink only at (3, 1) and (9, 2)
        let mut data = [0xffu8; 6];
        data[2] &= !(0x80 >> 3);
        data[5] &= !(0x80 >> 1);
        let bitmap = Bitmap::new(&data, 10, 3).unwrap();
        let written = fb.blit(-2, -1, &bitmap, BlitStyle::new(Color::Black));
        assert_eq!(written, Some(Region::new(0, 0, 8, 2)));
        assert_eq!(fb.pixel(1, 0), Some(Color::Black));
        assert_eq!(fb.pixel(7, 1), Some(Color::Black));
        assert_eq!(fb.pixels_of(Color::Black).count(), 2);
    }

    #[test]
    fn test_negative_swaps_ink() {
        let mut plain = Framebuffer::new();
        let mut negated = Framebuffer::new();
        let data = [0b0011_1100];
        let inverse = [0b1100_0011];
        plain.blit(3, 3, &Bitmap::new(&data, 8, 1).unwrap(), BlitStyle::new(Color::Black));
        negated.blit(
            3,
            3,
            &Bitmap::new(&inverse, 8, 1).unwrap(),
            BlitStyle::new(Color::Black).negative(true),
        );
        assert_eq!(plain, negated);
    }
}
