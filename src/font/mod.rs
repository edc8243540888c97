//! Binary fonts and text layout
pub mod builder;
pub mod builtin;
pub mod layout;
pub mod table;
pub mod utf8;

pub use builder::FontBuilder;
pub use builtin::{basic_8_pt, BASIC_8_PT};
pub use layout::{measure, TextMetrics, TextStyle};
pub use table::{FontError, FontHeader, FontTable, Glyph};
pub use utf8::{Utf8Cursor, Utf8Error};
