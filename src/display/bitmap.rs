//! Packed 1bpp source bitmaps
//!
//! Rows are stored most significant bit first and padded to whole bytes, so
//! a `width x height` bitmap occupies `ceil(width / 8) * height` bytes.
//!
//! A `0` bit is ink and a `1` bit is paper, matching the framebuffer where a
//! cleared bit is black.
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapError {
    /// The byte slice is shorter than `ceil(width / 8) * height`
    TooShort { expected: usize, actual: usize },
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitmapError::TooShort { expected, actual } => write!(
                f,
                "bitmap data too short: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

/// Bytes per padded row
pub const fn stride_for(width: u32) -> usize {
    (width as usize + 7) / 8
}

/// Borrowed bitmap, typically static sprite data or a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> Bitmap<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self, BitmapError> {
        let expected = stride_for(width) * height as usize;
        if data.len() < expected {
            return Err(BitmapError::TooShort {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Skips the length check; `data` must already be long enough
    pub(crate) const fn new_unchecked(data: &'a [u8], width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn stride(&self) -> usize {
        stride_for(self.width)
    }

    /// Raw bit at `(x, y)`; `true` is paper. Out of range reads as paper.
    pub fn bit(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return true;
        }
        let byte = self.data[y as usize * self.stride() + x as usize / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// Eight source bits starting at an arbitrary bit cursor, read through a
    /// two byte window.
    pub(crate) fn window(&self, bit_cursor: usize) -> u8 {
        let index = bit_cursor / 8;
        let shift = bit_cursor % 8;
        let high = self.data.get(index).copied().unwrap_or(0xff);
        if shift == 0 {
            return high;
        }
        let low = self.data.get(index + 1).copied().unwrap_or(0xff);
        (high << shift) | (low >> (8 - shift))
    }
}

/// Heap bitmap produced by rotation or built at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedBitmap {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl OwnedBitmap {
    /// Every pixel set to `paper` (`true`) or ink (`false`)
    pub fn filled(width: u32, height: u32, paper: bool) -> Self {
        let fill = if paper { 0xff } else { 0x00 };
        Self {
            data: vec![fill; stride_for(width) * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_bit(&mut self, x: u32, y: u32, paper: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y as usize * stride_for(self.width) + x as usize / 8;
        let bit = 0x80 >> (x % 8);
        if paper {
            self.data[index] |= bit;
        } else {
            self.data[index] &= !bit;
        }
    }

    pub fn as_bitmap(&self) -> Bitmap<'_> {
        Bitmap {
            data: &self.data,
            width: self.width,
            height: self.height,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_data() {
        let data = [0u8; 5];
        assert_eq!(
            Bitmap::new(&data, 9, 3),
            Err(BitmapError::TooShort {
                expected: 6,
                actual: 5
            })
        );
        assert!(Bitmap::new(&data, 8, 5).is_ok());
    }

    #[test]
    fn test_window_spans_two_bytes() {
        let data = [0b1010_1010, 0b1111_0000];
        let bitmap = Bitmap::new(&data, 16, 1).unwrap();
        assert_eq!(bitmap.window(0), 0b1010_1010);
        assert_eq!(bitmap.window(4), 0b1010_1111);
        assert_eq!(bitmap.window(12), 0b0000_1111);
    }

    #[test]
    fn test_owned_set_bit() {
        let mut bitmap = OwnedBitmap::filled(10, 2, true);
        bitmap.set_bit(9, 1, false);
        assert!(!bitmap.as_bitmap().bit(9, 1));
        assert!(bitmap.as_bitmap().bit(8, 1));
        assert_eq!(bitmap.into_bytes().len(), 4);
    }
}
