//! Packed 1bpp framebuffer of the memory panel
//!
//! Pixel `(x, y)` lives in byte `y * BYTES_PER_ROW + x / 8` at bit
//! `7 - x % 8` (most significant bit first). A set bit is white.
use crate::config::{BYTES_PER_ROW, DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAME_BYTES};
use crate::display::color::Color;
use crate::display::region::Region;
use embedded_graphics_core::{
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Point, Size},
    primitives::Rectangle,
    Pixel,
};

#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    bytes: [u8; FRAME_BYTES],
}

impl Framebuffer {
    pub const WIDTH: usize = DISPLAY_WIDTH;
    pub const HEIGHT: usize = DISPLAY_HEIGHT;

    /// A blank (white) frame
    pub const fn new() -> Self {
        Self {
            bytes: [0xff; FRAME_BYTES],
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.bytes.fill(color.byte());
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; FRAME_BYTES] {
        &mut self.bytes
    }

    /// One packed row, `None` past the bottom edge
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= DISPLAY_HEIGHT {
            return None;
        }
        let start = y * BYTES_PER_ROW;
        Some(&self.bytes[start..start + BYTES_PER_ROW])
    }

    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= DISPLAY_WIDTH as i32 || y >= DISPLAY_HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y * BYTES_PER_ROW + x / 8, 0x80 >> (x % 8)))
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        Self::locate(x, y).map(|(index, bit)| Color::from_bit(self.bytes[index] & bit != 0))
    }

    /// Returns false (and writes nothing) when the pixel is off screen.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> bool {
        let Some((index, bit)) = Self::locate(x, y) else {
            return false;
        };

        if color.is_white() {
            self.bytes[index] |= bit;
        } else {
            self.bytes[index] &= !bit;
        }
        true
    }

    /// Intersect `region` with the screen
    pub fn crop(region: Region) -> Option<Region> {
        region.clip(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }

    /// FNV-1a over the whole frame
    pub fn checksum(&self) -> u32 {
        self.bytes.iter().fold(0x811c_9dc5u32, |hash, byte| {
            (hash ^ *byte as u32).wrapping_mul(0x0100_0193)
        })
    }

    /// Iterate over every pixel of `color`
    pub fn pixels_of(&self, color: Color) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..DISPLAY_HEIGHT as i32).flat_map(move |y| {
            (0..DISPLAY_WIDTH as i32)
                .filter(move |&x| self.pixel(x, y) == Some(color))
                .map(move |x| (x, y))
        })
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &DISPLAY_WIDTH)
            .field("height", &DISPLAY_HEIGHT)
            .field("checksum", &format_args!("{:#010x}", self.checksum()))
            .finish()
    }
}

// Implement DrawTarget for embedded-graphics
impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.set_pixel(x, y, color.into());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let region = Region::new(
            area.top_left.x,
            area.top_left.y,
            area.size.width,
            area.size.height,
        );
        self.fill_block(region, color.into());
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Framebuffer::clear(self, color.into());
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32)
    }
}
