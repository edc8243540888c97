//! Bitmap rotation
//!
//! The source is centered on a canvas `sqrt(2)` times larger in each
//! dimension (rounded up to a multiple of 8) so the rotated footprint never
//! loses its corners. Every destination pixel is then mapped back through
//! the inverse rotation and takes the nearest source pixel.
//!
//! Positive angles turn clockwise on screen (the y axis points down).
use crate::display::bitmap::{Bitmap, OwnedBitmap};
use crate::display::framebuffer::Framebuffer;
use crate::display::raster::BlitStyle;
use crate::display::region::Region;

const BIT_MASK: [u8; 8] = [0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01];

/// A rotated bitmap plus how far its canvas extends past the original
/// top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotated {
    pub bitmap: OwnedBitmap,
    pub pad_left: u32,
    pub pad_top: u32,
}

fn padded_extent(length: u32) -> u32 {
    let scaled = libm::ceil(length as f64 * core::f64::consts::SQRT_2) as u32;
    (scaled + 7) / 8 * 8
}

/// Center `source` on the enlarged canvas. `paper` fills the margin.
pub fn pad(source: &Bitmap<'_>, paper: bool) -> Rotated {
    let width = padded_extent(source.width());
    let height = padded_extent(source.height());
    let pad_left = (width - source.width()) / 2;
    let pad_top = (height - source.height()) / 2;

    let mut canvas = OwnedBitmap::filled(width, height, paper);
    for y in 0..source.height() {
        for x in 0..source.width() {
            canvas.set_bit(x + pad_left, y + pad_top, source.bit(x, y));
        }
    }

    Rotated {
        bitmap: canvas,
        pad_left,
        pad_top,
    }
}

/// Rotate `source` by whole `degrees` onto the padded canvas
pub fn rotate(source: &Bitmap<'_>, degrees: i32, paper: bool) -> Rotated {
    let padded = pad(source, paper);
    let resized = padded.bitmap.as_bitmap();
    let (width, height) = (resized.width(), resized.height());
    let stride = resized.stride();
    let data = resized.data();

    let radians = (degrees.rem_euclid(360) as f64).to_radians();
    let (sin, cos) = (libm::sin(radians), libm::cos(radians));
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;

    let (m00, m01) = (cos, sin);
    let (m10, m11) = (-sin, cos);
    let tx = -cx * m00 - cy * m01 + cx;
    let ty = -cx * m10 - cy * m11 + cy;

    let mut output = OwnedBitmap::filled(width, height, paper);
    for y in 0..height {
        for x in 0..width {
            let src_x = x as f64 * m00 + y as f64 * m01 + tx;
            let src_y = x as f64 * m10 + y as f64 * m11 + ty;

            let ix = libm::floor(src_x + 0.5) as i64;
            let iy = libm::floor(src_y + 0.5) as i64;
            if ix < 0 || iy < 0 || ix >= width as i64 || iy >= height as i64 {
                continue;
            }

            let byte = data[iy as usize * stride + ix as usize / 8];
            output.set_bit(x, y, byte & BIT_MASK[ix as usize & 7] != 0);
        }
    }

    Rotated {
        bitmap: output,
        pad_left: padded.pad_left,
        pad_top: padded.pad_top,
    }
}

impl Framebuffer {
    /// Blit `bitmap` rotated by `degrees` around its own center. A multiple
    /// of 360 degrees is a plain blit.
    pub fn blit_rotated(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &Bitmap<'_>,
        style: BlitStyle,
        degrees: i32,
    ) -> Option<Region> {
        if degrees.rem_euclid(360) == 0 {
            return self.blit(x, y, bitmap, style);
        }

        // the margin must stay transparent after `negative` is applied
        let paper = !style.negative;
        let rotated = rotate(bitmap, degrees, paper);
        self.blit(
            x.saturating_sub(rotated.pad_left as i32),
            y.saturating_sub(rotated.pad_top as i32),
            &rotated.bitmap.as_bitmap(),
            style,
        )
    }
}
