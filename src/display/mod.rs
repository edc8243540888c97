//! Display Subsystem
//!
//! 1bpp rendering for the 144x168 memory panel:
//! - `framebuffer`: packed frame storage and pixel access
//! - `region`: origins, anchoring and clipping
//! - `raster`: block fill and bitmap blit
//! - `shapes`: lines, rectangles and circles
//! - `rotate`: bitmap rotation
//! - `driver`: frame transmission to the panel
//! - `display`: the drawing surface applications use

pub mod bitmap;
pub mod color;
#[allow(clippy::module_inception)]
pub mod display;
pub mod driver;
pub mod framebuffer;
pub mod raster;
pub mod region;
pub mod rotate;
pub mod shapes;

pub use bitmap::{Bitmap, BitmapError, OwnedBitmap};
pub use color::Color;
pub use display::{BitmapOptions, Display, Object1DOptions, Object2DOptions, TextOptions};
pub use driver::{DisplayError, RecordingTransport, SharpMemoryDriver, Transport};
pub use framebuffer::Framebuffer;
pub use raster::BlitStyle;
pub use region::{Origin1D, Origin2D, Region, TextOrigin};
