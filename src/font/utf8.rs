//! UTF-8 cursor over raw text bytes
//!
//! Decodes one, two and three byte sequences into 16-bit code points. A NUL
//! byte or the end of the slice yields code point `0`, which ends a text run.
//!
//! Malformed input is reported instead of being merged bit-wise into a bogus
//! code point. After an error the cursor has already moved past the bad
//! bytes, so the caller can substitute a placeholder and keep going.
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Error {
    /// A continuation byte (`10xxxxxx`) where a lead byte was expected
    UnexpectedContinuation { position: usize },
    /// A byte that can never start a sequence (`0xf8..=0xff`)
    InvalidLead { position: usize },
    /// The sequence ended before all its continuation bytes arrived
    Truncated { position: usize },
    /// A code point spelled with more bytes than it needs, such as
    /// `0xc0 0x80` for NUL
    Overlong { position: usize },
    /// Four byte sequences and surrogates do not fit the glyph tables
    Unsupported { position: usize },
}

impl fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Utf8Error::UnexpectedContinuation { position } => {
                write!(f, "unexpected continuation byte at {}", position)
            }
            Utf8Error::InvalidLead { position } => write!(f, "invalid lead byte at {}", position),
            Utf8Error::Truncated { position } => {
                write!(f, "truncated sequence at {}", position)
            }
            Utf8Error::Overlong { position } => write!(f, "overlong encoding at {}", position),
            Utf8Error::Unsupported { position } => {
                write!(f, "unsupported code point at {}", position)
            }
        }
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

#[derive(Debug, Clone)]
pub struct Utf8Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Utf8Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Byte offset of the next sequence
    pub fn position(&self) -> usize {
        self.position
    }

    /// Decode the next code point, `Ok(0)` at the terminator
    pub fn next_code(&mut self) -> Result<u16, Utf8Error> {
        let start = self.position;
        let Some(&lead) = self.bytes.get(start) else {
            return Ok(0);
        };
        if lead == 0 {
            return Ok(0);
        }

        let (length, initial) = match lead {
            0x00..=0x7f => {
                self.position += 1;
                return Ok(lead as u16);
            }
            0x80..=0xbf => {
                self.position += 1;
                return Err(Utf8Error::UnexpectedContinuation { position: start });
            }
            0xc0..=0xdf => (2, (lead & 0b0001_1111) as u32),
            0xe0..=0xef => (3, (lead & 0b0000_1111) as u32),
            0xf0..=0xf7 => (4, 0),
            _ => {
                self.position += 1;
                return Err(Utf8Error::InvalidLead { position: start });
            }
        };

        let mut code = initial;
        self.position += 1;
        for _ in 1..length {
            match self.bytes.get(self.position) {
                Some(&byte) if is_continuation(byte) => {
                    code = (code << 6) | (byte & 0b0011_1111) as u32;
                    self.position += 1;
                }
                // the offending byte is left for the next call
                _ => return Err(Utf8Error::Truncated { position: start }),
            }
        }

        let shortest = match length {
            2 => 0x80,
            _ => 0x800,
        };
        if length != 4 && code < shortest {
            return Err(Utf8Error::Overlong { position: start });
        }
        if length == 4 || (0xd800..=0xdfff).contains(&code) {
            return Err(Utf8Error::Unsupported { position: start });
        }
        Ok(code as u16)
    }
}

impl<'a> Iterator for Utf8Cursor<'a> {
    type Item = Result<u16, Utf8Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_code() {
            Ok(0) => None,
            other => Some(other),
        }
    }
}
