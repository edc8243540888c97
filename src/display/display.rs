//! # Drawing Surface
//!
//! [`Display`] bundles the framebuffer, the panel driver and a default font.
//! Every call takes a position plus an options value naming the color and
//! which part of the shape sits on that position. Calls never fail; whatever
//! falls outside the screen is clipped away.
//!
//! ```ignore
//! let mut display = Display::new(transport);
//! display.setup()?;
//! display.fill_rectangle(10, 10, 20, 20, Object2DOptions::new().color(Color::Black));
//! display.draw_text(72, 84, "Hello", TextOptions::new().origin(TextOrigin::Center));
//! display.update()?;
//! ```
use crate::display::bitmap::Bitmap;
use crate::display::color::Color;
use crate::display::driver::{DisplayError, SharpMemoryDriver, Transport};
use crate::display::framebuffer::Framebuffer;
use crate::display::raster::BlitStyle;
use crate::display::region::{Origin1D, Origin2D, Region, TextOrigin};
use crate::font::builtin::basic_8_pt;
use crate::font::layout::{measure, TextMetrics, TextStyle};
use crate::font::table::FontTable;

/// Options for lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Object1DOptions {
    pub color: Color,
    pub origin: Origin1D,
}

impl Object1DOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn origin(mut self, origin: Origin1D) -> Self {
        self.origin = origin;
        self
    }
}

/// Options for rectangles and circles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Object2DOptions {
    pub color: Color,
    pub origin: Origin2D,
}

impl Object2DOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn origin(mut self, origin: Origin2D) -> Self {
        self.origin = origin;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitmapOptions {
    pub color: Color,
    pub origin: Origin2D,
    pub negative: bool,
    pub opaque: bool,
    /// Clockwise, in whole degrees
    pub rotation: i32,
}

impl BitmapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn origin(mut self, origin: Origin2D) -> Self {
        self.origin = origin;
        self
    }

    pub fn negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    pub fn opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }

    pub fn rotation(mut self, degrees: i32) -> Self {
        self.rotation = degrees;
        self
    }

    fn style(&self) -> BlitStyle {
        BlitStyle::new(self.color)
            .negative(self.negative)
            .opaque(self.opaque)
    }
}

/// Options for text. Without a font the display's default font is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextOptions<'f> {
    pub color: Color,
    pub origin: TextOrigin,
    pub font: Option<FontTable<'f>>,
    pub opaque: bool,
}

impl<'f> TextOptions<'f> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn origin(mut self, origin: TextOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn font(mut self, font: FontTable<'f>) -> Self {
        self.font = Some(font);
        self
    }

    pub fn opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }

    fn style(&self) -> TextStyle {
        TextStyle {
            color: self.color,
            origin: self.origin,
            opaque: self.opaque,
        }
    }
}

pub struct Display<'f, T: Transport> {
    framebuffer: Framebuffer,
    driver: SharpMemoryDriver<T>,
    font: FontTable<'f>,
}

impl<'f, T: Transport> Display<'f, T> {
    pub fn new(transport: T) -> Self {
        Self {
            framebuffer: Framebuffer::new(),
            driver: SharpMemoryDriver::new(transport),
            font: basic_8_pt(),
        }
    }

    /// Blank the panel. Call once before drawing.
    pub fn setup(&mut self) -> Result<(), DisplayError<T::Error>> {
        self.driver.initialize(&mut self.framebuffer)
    }

    /// Reset the buffer to white. The panel keeps its image until `update`.
    pub fn clear(&mut self) {
        self.framebuffer.clear(Color::White);
    }

    /// Send the buffer to the panel. This also flips VCOM, so it has to run
    /// at least once a second.
    pub fn update(&mut self) -> Result<(), DisplayError<T::Error>> {
        self.driver.send_frame(&self.framebuffer)
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn driver(&self) -> &SharpMemoryDriver<T> {
        &self.driver
    }

    pub fn font(&self) -> &FontTable<'f> {
        &self.font
    }

    /// Replace the default font used when `TextOptions` names none
    pub fn set_font(&mut self, font: FontTable<'f>) {
        self.font = font;
    }

    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) -> bool {
        self.framebuffer.set_pixel(x, y, color)
    }

    pub fn draw_line(&mut self, x_start: i32, y_start: i32, x_end: i32, y_end: i32, options: Object1DOptions) {
        self.framebuffer
            .draw_line(x_start, y_start, x_end, y_end, options.color);
    }

    /// Line of `length` pixels at `angle` radians counterclockwise from the
    /// positive x axis. The origin picks whether `(x, y)` is the start point
    /// or the midpoint.
    pub fn draw_line_polar(&mut self, x: i32, y: i32, length: f64, angle: f64, options: Object1DOptions) {
        let (dx, dy) = (libm::cos(angle), libm::sin(angle));
        let (x, y) = (x as f64, y as f64);

        // screen y grows downwards
        let (start, end) = match options.origin {
            Origin1D::Endpoint => ((x, y), (x + length * dx, y - length * dy)),
            Origin1D::Midpoint => {
                let half = 0.5 * length;
                ((x - half * dx, y + half * dy), (x + half * dx, y - half * dy))
            }
        };

        self.framebuffer.draw_line(
            libm::round(start.0) as i32,
            libm::round(start.1) as i32,
            libm::round(end.0) as i32,
            libm::round(end.1) as i32,
            options.color,
        );
    }

    pub fn draw_rectangle(&mut self, x: i32, y: i32, width: u32, height: u32, options: Object2DOptions) {
        let region = Region::anchored(options.origin, x, y, width, height);
        self.framebuffer.draw_frame(region, options.color);
    }

    pub fn fill_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        options: Object2DOptions,
    ) -> Option<Region> {
        let region = Region::anchored(options.origin, x, y, width, height);
        self.framebuffer.fill_block(region, options.color)
    }

    pub fn draw_circle(&mut self, x: i32, y: i32, diameter: u32, options: Object2DOptions) {
        let (left, top) = Region::anchor_point(options.origin, x, y, diameter, diameter);
        self.framebuffer
            .circle_at(left, top, diameter, options.color, false);
    }

    pub fn fill_circle(&mut self, x: i32, y: i32, diameter: u32, options: Object2DOptions) {
        let (left, top) = Region::anchor_point(options.origin, x, y, diameter, diameter);
        self.framebuffer
            .circle_at(left, top, diameter, options.color, true);
    }

    /// Draw `bitmap` anchored by its unrotated size, then rotated around its
    /// own center.
    pub fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &Bitmap<'_>, options: BitmapOptions) -> Option<Region> {
        let region = Region::anchored(options.origin, x, y, bitmap.width(), bitmap.height());
        self.framebuffer
            .blit_rotated(region.x, region.y, bitmap, options.style(), options.rotation)
    }

    pub fn draw_text(&mut self, x: i32, y: i32, text: impl AsRef<[u8]>, options: TextOptions<'_>) -> Option<Region> {
        let font = options.font.unwrap_or(self.font);
        self.framebuffer
            .draw_text(x, y, text.as_ref(), &font, options.style())
    }

    pub fn text_metrics(&self, text: impl AsRef<[u8]>, options: &TextOptions<'_>) -> TextMetrics {
        match &options.font {
            Some(font) => measure(font, text.as_ref()),
            None => measure(&self.font, text.as_ref()),
        }
    }

    /// `(width, height)` of the inked text box
    pub fn text_size(&self, text: impl AsRef<[u8]>, options: &TextOptions<'_>) -> (u32, u32) {
        let metrics = self.text_metrics(text, options);
        (metrics.width, metrics.height)
    }
}
