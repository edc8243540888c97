//! Pixel color of the reflective 1bpp panel
use embedded_graphics_core::pixelcolor::BinaryColor;

/// A set bit in the framebuffer is white (reflective), a cleared bit is black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Black,
    White,
}

impl Color {
    pub const BLACK: Color = Color::Black;
    pub const WHITE: Color = Color::White;

    /// Fill byte covering eight pixels of this color
    pub const fn byte(self) -> u8 {
        match self {
            Color::Black => 0x00,
            Color::White => 0xff,
        }
    }

    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    pub const fn inverse(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Color stored in a single framebuffer bit
    pub const fn from_bit(bit: bool) -> Color {
        if bit {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// `On` is ink, which is black on a reflective panel.
impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}

impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => BinaryColor::On,
            Color::White => BinaryColor::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_bytes() {
        assert_eq!(Color::BLACK.byte(), 0x00);
        assert_eq!(Color::WHITE.byte(), 0xff);
        assert_eq!(Color::WHITE.inverse(), Color::BLACK);
    }

    #[test]
    fn test_binary_color_round_trip() {
        assert_eq!(Color::from(BinaryColor::On), Color::Black);
        assert_eq!(BinaryColor::from(Color::White), BinaryColor::Off);
    }
}
