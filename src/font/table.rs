//! Binary glyph table parser
//!
//! ```text
//! header (9 bytes)
//!   0  size class        u8
//!   1  record count      u16 BE (includes the fallback glyph)
//!   3  bbox width        u8
//!   4  bbox height       u8
//!   5  bbox x offset     i8
//!   6  bbox y offset     i8
//!   7  ascent            u8
//!   8  descent           u8
//! record (10 bytes + bitmap)
//!   0  code point        u16 BE
//!   2  record length     u16 BE
//!   4  device width x    u8
//!   5  device width y    u8
//!   6  bbox width        u8
//!   7  bbox height       u8
//!   8  bbox x offset     i8
//!   9  bbox y offset     i8
//!  10  bitmap            ceil(bbox width / 8) * bbox height bytes
//! ```
//!
//! The first record is the missing glyph replacement. It is never matched
//! by code point.
use crate::display::bitmap::{stride_for, Bitmap};
use core::fmt;

pub const HEADER_BYTES: usize = 9;
pub const RECORD_HEADER_BYTES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontError {
    /// Fewer bytes than the fixed header
    TruncatedHeader,
    /// A table needs at least the fallback record
    NoGlyphs,
    /// Record `index` runs past the end of the table
    TruncatedRecord { index: usize },
    /// Record `index` declares a length too small for its bitmap
    BadRecordLength { index: usize, declared: usize },
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::TruncatedHeader => write!(f, "font table shorter than its header"),
            FontError::NoGlyphs => write!(f, "font table has no glyph records"),
            FontError::TruncatedRecord { index } => {
                write!(f, "glyph record {} runs past the end of the table", index)
            }
            FontError::BadRecordLength { index, declared } => write!(
                f,
                "glyph record {} declares {} bytes, too short for its bitmap",
                index, declared
            ),
        }
    }
}

fn be16(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontHeader {
    pub size: u8,
    pub glyph_count: u16,
    pub bbox_width: u8,
    pub bbox_height: u8,
    pub bbox_x_offset: i8,
    pub bbox_y_offset: i8,
    pub ascent: u8,
    pub descent: u8,
}

impl FontHeader {
    fn read(data: &[u8]) -> Self {
        Self {
            size: data[0],
            glyph_count: be16(data, 1),
            bbox_width: data[3],
            bbox_height: data[4],
            bbox_x_offset: data[5] as i8,
            bbox_y_offset: data[6] as i8,
            ascent: data[7],
            descent: data[8],
        }
    }
}

/// One decoded glyph record borrowing its bitmap from the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    /// Position in the table, 0 is the fallback glyph
    pub index: usize,
    pub code: u16,
    pub record_bytes: u16,
    pub device_width_x: u8,
    pub device_width_y: u8,
    pub bbox_width: u8,
    pub bbox_height: u8,
    pub bbox_x_offset: i8,
    pub bbox_y_offset: i8,
    pub bitmap: &'a [u8],
}

impl<'a> Glyph<'a> {
    fn decode(index: usize, record: &'a [u8]) -> Self {
        let bbox_width = record[6];
        let bbox_height = record[7];
        let bitmap_len = stride_for(bbox_width as u32) * bbox_height as usize;
        Self {
            index,
            code: be16(record, 0),
            record_bytes: be16(record, 2),
            device_width_x: record[4],
            device_width_y: record[5],
            bbox_width,
            bbox_height,
            bbox_x_offset: record[8] as i8,
            bbox_y_offset: record[9] as i8,
            bitmap: &record[RECORD_HEADER_BYTES..RECORD_HEADER_BYTES + bitmap_len],
        }
    }

    /// Distance from the baseline to the top of the ink
    pub fn ascent(&self) -> i32 {
        self.bbox_height as i32 + self.bbox_y_offset as i32
    }

    /// Distance from the baseline to the bottom of the ink
    pub fn descent(&self) -> i32 {
        if self.bbox_y_offset < 0 {
            -(self.bbox_y_offset as i32)
        } else {
            0
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.index == 0
    }

    /// Glyph bits as a bitmap (set bits are ink)
    pub fn as_bitmap(&self) -> Bitmap<'a> {
        // `decode` sliced exactly stride * height bytes
        Bitmap::new_unchecked(self.bitmap, self.bbox_width as u32, self.bbox_height as u32)
    }
}

/// A parsed, immutable font table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontTable<'a> {
    data: &'a [u8],
    header: FontHeader,
}

impl<'a> FontTable<'a> {
    /// Parse `data` and check that every record fits inside it
    pub fn parse(data: &'a [u8]) -> Result<Self, FontError> {
        if data.len() < HEADER_BYTES {
            return Err(FontError::TruncatedHeader);
        }

        let header = FontHeader::read(data);
        if header.glyph_count == 0 {
            return Err(FontError::NoGlyphs);
        }

        let mut offset = HEADER_BYTES;
        for index in 0..header.glyph_count as usize {
            if offset + RECORD_HEADER_BYTES > data.len() {
                return Err(FontError::TruncatedRecord { index });
            }
            let declared = be16(data, offset + 2) as usize;
            let bitmap_len = stride_for(data[offset + 6] as u32) * data[offset + 7] as usize;
            if declared < RECORD_HEADER_BYTES + bitmap_len {
                return Err(FontError::BadRecordLength { index, declared });
            }
            if offset + declared > data.len() {
                return Err(FontError::TruncatedRecord { index });
            }
            offset += declared;
        }

        Ok(Self { data, header })
    }

    /// Wrap compiled-in table data without walking the records. The data
    /// must be well formed; the built-in fonts are checked by tests.
    pub(crate) fn from_trusted(data: &'a [u8]) -> Self {
        Self {
            data,
            header: FontHeader::read(data),
        }
    }

    pub fn header(&self) -> &FontHeader {
        &self.header
    }

    pub fn glyph_count(&self) -> usize {
        self.header.glyph_count as usize
    }

    /// Walk the records in table order, fallback first
    pub fn glyphs(&self) -> Glyphs<'a> {
        Glyphs {
            data: self.data,
            offset: HEADER_BYTES,
            index: 0,
            count: self.glyph_count(),
        }
    }

    pub fn fallback(&self) -> Glyph<'a> {
        Glyph::decode(0, &self.data[HEADER_BYTES..])
    }

    /// Exact lookup. Skips the fallback record and hops over bitmaps using
    /// each record's length field.
    pub fn get(&self, code: u16) -> Option<Glyph<'a>> {
        self.glyphs().skip(1).find(|glyph| glyph.code == code)
    }

    /// Lookup that substitutes the fallback glyph for unknown code points
    pub fn glyph(&self, code: u16) -> Glyph<'a> {
        match self.get(code) {
            Some(glyph) => glyph,
            None => {
                log::warn!("glyph not found: {:#x}", code);
                self.fallback()
            }
        }
    }
}

pub struct Glyphs<'a> {
    data: &'a [u8],
    offset: usize,
    index: usize,
    count: usize,
}

impl<'a> Iterator for Glyphs<'a> {
    type Item = Glyph<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let glyph = Glyph::decode(self.index, &self.data[self.offset..]);
        self.offset += glyph.record_bytes as usize;
        self.index += 1;
        Some(glyph)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.index;
        (left, Some(left))
    }
}
