//! Built-in 8 pt ASCII font
//!
//! A 5x7 cell on a 6 pixel advance covering `' '..='~'`. Glyph bitmaps are
//! trimmed to their ink so narrow characters stay narrow in the table.
use crate::font::table::FontTable;

/// Default font of the display, in the binary table layout
pub static BASIC_8_PT: &[u8] = &[
    // header: size, count, bbox w/h, bbox x/y offset, ascent, descent
    0x08, 0x00, 0x60, 0x05, 0x07, 0x00, 0x00, 0x07, 0x01,
    // fallback
    0x00, 0x00, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xf8, 0x88, 0x88, 0x88, 0x88, 0x88, 0xf8,
    // ' '
    0x00, 0x20, 0x00, 0x0a, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00,
    // '!'
    0x00, 0x21, 0x00, 0x11, 0x06, 0x00, 0x01, 0x07, 0x02, 0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00, 0x80,
    // '"'
    0x00, 0x22, 0x00, 0x0d, 0x06, 0x00, 0x03, 0x03, 0x01, 0x04, 0xa0, 0xa0, 0xa0,
    // '#'
    0x00, 0x23, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x50, 0x50, 0xf8, 0x50, 0xf8, 0x50, 0x50,
    // '$'
    0x00, 0x24, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x20, 0x78, 0xa0, 0x70, 0x28, 0xf0, 0x20,
    // '%'
    0x00, 0x25, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xc0, 0xc8, 0x10, 0x20, 0x40, 0x98, 0x18,
    // '&'
    0x00, 0x26, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x60, 0x90, 0xa0, 0x40, 0xa8, 0x90, 0x68,
    // '\''
    0x00, 0x27, 0x00, 0x0d, 0x06, 0x00, 0x02, 0x03, 0x01, 0x04, 0xc0, 0x40, 0x80,
    // '('
    0x00, 0x28, 0x00, 0x11, 0x06, 0x00, 0x03, 0x07, 0x01, 0x00, 0x20, 0x40, 0x80, 0x80, 0x80, 0x40, 0x20,
    // ')'
    0x00, 0x29, 0x00, 0x11, 0x06, 0x00, 0x03, 0x07, 0x01, 0x00, 0x80, 0x40, 0x20, 0x20, 0x20, 0x40, 0x80,
    // '*'
    0x00, 0x2a, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x01, 0x20, 0xa8, 0x70, 0xa8, 0x20,
    // '+'
    0x00, 0x2b, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x01, 0x20, 0x20, 0xf8, 0x20, 0x20,
    // ','
    0x00, 0x2c, 0x00, 0x0d, 0x06, 0x00, 0x02, 0x03, 0x01, 0x00, 0xc0, 0x40, 0x80,
    // '-'
    0x00, 0x2d, 0x00, 0x0b, 0x06, 0x00, 0x05, 0x01, 0x00, 0x03, 0xf8,
    // '.'
    0x00, 0x2e, 0x00, 0x0c, 0x06, 0x00, 0x02, 0x02, 0x01, 0x00, 0xc0, 0xc0,
    // '/'
    0x00, 0x2f, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x01, 0x08, 0x10, 0x20, 0x40, 0x80,
    // '0'
    0x00, 0x30, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x70, 0x88, 0x98, 0xa8, 0xc8, 0x88, 0x70,
    // '1'
    0x00, 0x31, 0x00, 0x11, 0x06, 0x00, 0x03, 0x07, 0x01, 0x00, 0x40, 0xc0, 0x40, 0x40, 0x40, 0x40, 0xe0,
    // '2'
    0x00, 0x32, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x70, 0x88, 0x08, 0x10, 0x20, 0x40, 0xf8,
    // '3'
    0x00, 0x33, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xf8, 0x10, 0x20, 0x10, 0x08, 0x88, 0x70,
    // '4'
    0x00, 0x34, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x10, 0x30, 0x50, 0x90, 0xf8, 0x10, 0x10,
    // '5'
    0x00, 0x35, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xf8, 0x80, 0xf0, 0x08, 0x08, 0x88, 0x70,
    // '6'
    0x00, 0x36, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x30, 0x40, 0x80, 0xf0, 0x88, 0x88, 0x70,
    // '7'
    0x00, 0x37, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xf8, 0x08, 0x10, 0x20, 0x40, 0x40, 0x40,
    // '8'
    0x00, 0x38, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x70, 0x88, 0x88, 0x70, 0x88, 0x88, 0x70,
    // '9'
    0x00, 0x39, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x70, 0x88, 0x88, 0x78, 0x08, 0x10, 0x60,
    // ':'
    0x00, 0x3a, 0x00, 0x0f, 0x06, 0x00, 0x02, 0x05, 0x01, 0x01, 0xc0, 0xc0, 0x00, 0xc0, 0xc0,
    // ';'
    0x00, 0x3b, 0x00, 0x10, 0x06, 0x00, 0x02, 0x06, 0x01, 0x00, 0xc0, 0xc0, 0x00, 0xc0, 0x40, 0x80,
    // '<'
    0x00, 0x3c, 0x00, 0x11, 0x06, 0x00, 0x04, 0x07, 0x00, 0x00, 0x10, 0x20, 0x40, 0x80, 0x40, 0x20, 0x10,
    // '='
    0x00, 0x3d, 0x00, 0x0d, 0x06, 0x00, 0x05, 0x03, 0x00, 0x02, 0xf8, 0x00, 0xf8,
    // '>'
    0x00, 0x3e, 0x00, 0x11, 0x06, 0x00, 0x04, 0x07, 0x01, 0x00, 0x80, 0x40, 0x20, 0x10, 0x20, 0x40, 0x80,
    // '?'
    0x00, 0x3f, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x70, 0x88, 0x08, 0x10, 0x20, 0x00, 0x20,
    // '@'
    0x00, 0x40, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x70, 0x88, 0x08, 0x68, 0xa8, 0xa8, 0x70,
    // 'A'
    0x00, 0x41, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x70, 0x88, 0x88, 0x88, 0xf8, 0x88, 0x88,
    // 'B'
    0x00, 0x42, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xf0, 0x88, 0x88, 0xf0, 0x88, 0x88, 0xf0,
    // 'C'
    0x00, 0x43, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x70, 0x88, 0x80, 0x80, 0x80, 0x88, 0x70,
    // 'D'
    0x00, 0x44, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xe0, 0x90, 0x88, 0x88, 0x88, 0x90, 0xe0,
    // 'E'
    0x00, 0x45, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xf8, 0x80, 0x80, 0xf0, 0x80, 0x80, 0xf8,
    // 'F'
    0x00, 0x46, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xf8, 0x80, 0x80, 0xf0, 0x80, 0x80, 0x80,
    // 'G'
    0x00, 0x47, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x70, 0x88, 0x80, 0xb8, 0x88, 0x88, 0x78,
    // 'H'
    0x00, 0x48, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x88, 0x88, 0x88, 0xf8, 0x88, 0x88, 0x88,
    // 'I'
    0x00, 0x49, 0x00, 0x11, 0x06, 0x00, 0x03, 0x07, 0x01, 0x00, 0xe0, 0x40, 0x40, 0x40, 0x40, 0x40, 0xe0,
    // 'J'
    0x00, 0x4a, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x38, 0x10, 0x10, 0x10, 0x10, 0x90, 0x60,
    // 'K'
    0x00, 0x4b, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x88, 0x90, 0xa0, 0xc0, 0xa0, 0x90, 0x88,
    // 'L'
    0x00, 0x4c, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0xf8,
    // 'M'
    0x00, 0x4d, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x88, 0xd8, 0xa8, 0xa8, 0x88, 0x88, 0x88,
    // 'N'
    0x00, 0x4e, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x88, 0x88, 0xc8, 0xa8, 0x98, 0x88, 0x88,
    // 'O'
    0x00, 0x4f, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x70, 0x88, 0x88, 0x88, 0x88, 0x88, 0x70,
    // 'P'
    0x00, 0x50, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xf0, 0x88, 0x88, 0xf0, 0x80, 0x80, 0x80,
    // 'Q'
    0x00, 0x51, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x70, 0x88, 0x88, 0x88, 0xa8, 0x90, 0x68,
    // 'R'
    0x00, 0x52, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xf0, 0x88, 0x88, 0xf0, 0xa0, 0x90, 0x88,
    // 'S'
    0x00, 0x53, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x78, 0x80, 0x80, 0x70, 0x08, 0x08, 0xf0,
    // 'T'
    0x00, 0x54, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xf8, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    // 'U'
    0x00, 0x55, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x88, 0x88, 0x88, 0x88, 0x88, 0x88, 0x70,
    // 'V'
    0x00, 0x56, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x88, 0x88, 0x88, 0x88, 0x88, 0x50, 0x20,
    // 'W'
    0x00, 0x57, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x88, 0x88, 0x88, 0xa8, 0xa8, 0xa8, 0x50,
    // 'X'
    0x00, 0x58, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x88, 0x88, 0x50, 0x20, 0x50, 0x88, 0x88,
    // 'Y'
    0x00, 0x59, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x88, 0x88, 0x88, 0x50, 0x20, 0x20, 0x20,
    // 'Z'
    0x00, 0x5a, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0xf8, 0x08, 0x10, 0x20, 0x40, 0x80, 0xf8,
    // '['
    0x00, 0x5b, 0x00, 0x11, 0x06, 0x00, 0x03, 0x07, 0x01, 0x00, 0xe0, 0x80, 0x80, 0x80, 0x80, 0x80, 0xe0,
    // '\\'
    0x00, 0x5c, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x01, 0x80, 0x40, 0x20, 0x10, 0x08,
    // ']'
    0x00, 0x5d, 0x00, 0x11, 0x06, 0x00, 0x03, 0x07, 0x01, 0x00, 0xe0, 0x20, 0x20, 0x20, 0x20, 0x20, 0xe0,
    // '^'
    0x00, 0x5e, 0x00, 0x0d, 0x06, 0x00, 0x05, 0x03, 0x00, 0x04, 0x20, 0x50, 0x88,
    // '_'
    0x00, 0x5f, 0x00, 0x0b, 0x06, 0x00, 0x05, 0x01, 0x00, 0x00, 0xf8,
    // '`'
    0x00, 0x60, 0x00, 0x0d, 0x06, 0x00, 0x03, 0x03, 0x01, 0x04, 0x80, 0x40, 0x20,
    // 'a'
    0x00, 0x61, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0x70, 0x08, 0x78, 0x88, 0x78,
    // 'b'
    0x00, 0x62, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x80, 0x80, 0xb0, 0xc8, 0x88, 0x88, 0xf0,
    // 'c'
    0x00, 0x63, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0x70, 0x80, 0x80, 0x88, 0x70,
    // 'd'
    0x00, 0x64, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x08, 0x08, 0x68, 0x98, 0x88, 0x88, 0x78,
    // 'e'
    0x00, 0x65, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0x70, 0x88, 0xf8, 0x80, 0x70,
    // 'f'
    0x00, 0x66, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x30, 0x48, 0x40, 0xe0, 0x40, 0x40, 0x40,
    // 'g'
    0x00, 0x67, 0x00, 0x10, 0x06, 0x00, 0x05, 0x06, 0x00, 0x00, 0x78, 0x88, 0x88, 0x78, 0x08, 0x70,
    // 'h'
    0x00, 0x68, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x80, 0x80, 0xb0, 0xc8, 0x88, 0x88, 0x88,
    // 'i'
    0x00, 0x69, 0x00, 0x11, 0x06, 0x00, 0x03, 0x07, 0x01, 0x00, 0x40, 0x00, 0xc0, 0x40, 0x40, 0x40, 0xe0,
    // 'j'
    0x00, 0x6a, 0x00, 0x11, 0x06, 0x00, 0x04, 0x07, 0x00, 0x00, 0x10, 0x00, 0x30, 0x10, 0x10, 0x90, 0x60,
    // 'k'
    0x00, 0x6b, 0x00, 0x11, 0x06, 0x00, 0x04, 0x07, 0x00, 0x00, 0x80, 0x80, 0x90, 0xa0, 0xc0, 0xa0, 0x90,
    // 'l'
    0x00, 0x6c, 0x00, 0x11, 0x06, 0x00, 0x03, 0x07, 0x01, 0x00, 0xc0, 0x40, 0x40, 0x40, 0x40, 0x40, 0xe0,
    // 'm'
    0x00, 0x6d, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0xd0, 0xa8, 0xa8, 0x88, 0x88,
    // 'n'
    0x00, 0x6e, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0xb0, 0xc8, 0x88, 0x88, 0x88,
    // 'o'
    0x00, 0x6f, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0x70, 0x88, 0x88, 0x88, 0x70,
    // 'p'
    0x00, 0x70, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0xf0, 0x88, 0xf0, 0x80, 0x80,
    // 'q'
    0x00, 0x71, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0x68, 0x98, 0x78, 0x08, 0x08,
    // 'r'
    0x00, 0x72, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0xb0, 0xc8, 0x80, 0x80, 0x80,
    // 's'
    0x00, 0x73, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0x70, 0x80, 0x70, 0x08, 0xf0,
    // 't'
    0x00, 0x74, 0x00, 0x11, 0x06, 0x00, 0x05, 0x07, 0x00, 0x00, 0x40, 0x40, 0xe0, 0x40, 0x40, 0x48, 0x30,
    // 'u'
    0x00, 0x75, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0x88, 0x88, 0x88, 0x98, 0x68,
    // 'v'
    0x00, 0x76, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0x88, 0x88, 0x88, 0x50, 0x20,
    // 'w'
    0x00, 0x77, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0x88, 0x88, 0xa8, 0xa8, 0x50,
    // 'x'
    0x00, 0x78, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0x88, 0x50, 0x20, 0x50, 0x88,
    // 'y'
    0x00, 0x79, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0x88, 0x88, 0x78, 0x08, 0x70,
    // 'z'
    0x00, 0x7a, 0x00, 0x0f, 0x06, 0x00, 0x05, 0x05, 0x00, 0x00, 0xf8, 0x10, 0x20, 0x40, 0xf8,
    // '{'
    0x00, 0x7b, 0x00, 0x11, 0x06, 0x00, 0x03, 0x07, 0x01, 0x00, 0x20, 0x40, 0x40, 0x80, 0x40, 0x40, 0x20,
    // '|'
    0x00, 0x7c, 0x00, 0x11, 0x06, 0x00, 0x01, 0x07, 0x02, 0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80,
    // '}'
    0x00, 0x7d, 0x00, 0x11, 0x06, 0x00, 0x03, 0x07, 0x01, 0x00, 0x80, 0x40, 0x40, 0x20, 0x40, 0x40, 0x80,
    // '~'
    0x00, 0x7e, 0x00, 0x0c, 0x06, 0x00, 0x05, 0x02, 0x00, 0x02, 0x68, 0x90,
];

/// [`BASIC_8_PT`] as a parsed table
pub fn basic_8_pt() -> FontTable<'static> {
    FontTable::from_trusted(BASIC_8_PT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_well_formed() {
        let font = FontTable::parse(BASIC_8_PT).unwrap();
        assert_eq!(font.glyph_count(), 96);
        assert_eq!(font, basic_8_pt());
        assert_eq!(font.header().ascent, 7);
    }

    #[test]
    fn test_covers_printable_ascii() {
        let font = basic_8_pt();
        for code in 0x20u16..0x7f {
            assert_eq!(font.glyph(code).code, code);
            assert_eq!(font.glyph(code).device_width_x, 6);
        }
    }

    #[test]
    fn test_glyphs_are_trimmed() {
        let font = basic_8_pt();
        let i = font.glyph(b'i' as u16);
        assert_eq!((i.bbox_width, i.bbox_height, i.bbox_x_offset), (3, 7, 1));

        let dash = font.glyph(b'-' as u16);
        assert_eq!((dash.bbox_height, dash.bbox_y_offset), (1, 3));

        let space = font.glyph(b' ' as u16);
        assert_eq!((space.bbox_width, space.bbox_height), (0, 0));
    }
}
