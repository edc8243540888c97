//! # Text Metrics and Rendering
//!
//! Text is laid out on a pen that starts on the baseline and advances by each
//! glyph's device width. Glyph y offsets grow upwards from the baseline while
//! the framebuffer grows downwards, so every glyph is placed by its
//! bottom-left corner at `baseline - y_offset`.
//!
//! ## Measured box
//!
//! The device width usually overshoots the ink, so the box is corrected at
//! both ends: the first glyph's x offset is taken off the left, and the last
//! glyph contributes `bbox_width + x_offset` instead of its device width.
//! The baseline length keeps the plain sum of device widths and is used by
//! the baseline origins.
use crate::display::color::Color;
use crate::display::framebuffer::Framebuffer;
use crate::display::raster::BlitStyle;
use crate::display::region::{saturate, Origin2D, Region, TextOrigin};
use crate::font::table::{FontTable, Glyph};
use crate::font::utf8::Utf8Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextMetrics {
    /// Width of the inked box
    pub width: u32,
    /// Maximum ascent plus maximum descent
    pub height: u32,
    /// Pen start relative to the left edge of the box
    pub origin_x_offset: i32,
    /// Baseline row relative to the top edge of the box
    pub origin_y_offset: i32,
    /// Sum of device widths
    pub baseline_length: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub color: Color,
    pub origin: TextOrigin,
    /// Erase the whole text box in the inverse color before drawing
    pub opaque: bool,
}

/// Glyphs of `text` in order, with the fallback standing in for unknown code
/// points and malformed bytes.
pub fn glyphs<'f, 't>(
    font: &'t FontTable<'f>,
    text: &'t [u8],
) -> impl Iterator<Item = Glyph<'f>> + 't {
    Utf8Cursor::new(text).map(move |code| match code {
        Ok(code) => font.glyph(code),
        Err(err) => {
            log::warn!("{}, substituting the fallback glyph", err);
            font.fallback()
        }
    })
}

pub fn measure(font: &FontTable<'_>, text: &[u8]) -> TextMetrics {
    let mut width: i64 = 0;
    let mut baseline_length: i64 = 0;
    let mut max_ascent: i32 = 0;
    let mut max_descent: i32 = 0;
    let mut origin_x_offset: i32 = 0;
    let mut last: Option<Glyph<'_>> = None;

    for glyph in glyphs(font, text) {
        width += glyph.device_width_x as i64;
        baseline_length += glyph.device_width_x as i64;

        if last.is_none() {
            width -= glyph.bbox_x_offset as i64;
            origin_x_offset = -(glyph.bbox_x_offset as i32);
        }

        max_ascent = max_ascent.max(glyph.ascent());
        max_descent = max_descent.max(glyph.descent());
        last = Some(glyph);
    }

    let Some(last) = last else {
        return TextMetrics::default();
    };

    width -= last.device_width_x as i64;
    width += last.bbox_width as i64 + last.bbox_x_offset as i64;

    TextMetrics {
        width: width.clamp(0, u32::MAX as i64) as u32,
        height: (max_ascent + max_descent).max(0) as u32,
        origin_x_offset,
        origin_y_offset: max_ascent - 1,
        baseline_length: baseline_length.clamp(0, u32::MAX as i64) as u32,
    }
}

/// Pen start on the baseline for text anchored at `(x, y)`
pub fn resolve_origin(origin: TextOrigin, x: i32, y: i32, metrics: &TextMetrics) -> (i32, i32) {
    let (pen_x, pen_y) = pen_start(origin, x, y, metrics);
    (saturate(pen_x), saturate(pen_y))
}

fn pen_start(origin: TextOrigin, x: i32, y: i32, metrics: &TextMetrics) -> (i64, i64) {
    let boxed = |origin: Origin2D| {
        let (left, top) = Region::anchor_point(origin, x, y, metrics.width, metrics.height);
        (
            left + metrics.origin_x_offset as i64,
            top + metrics.origin_y_offset as i64,
        )
    };
    let (x, y) = (x as i64, y as i64);

    match origin {
        TextOrigin::TopLeft => boxed(Origin2D::TopLeft),
        TextOrigin::TopRight => boxed(Origin2D::TopRight),
        TextOrigin::BottomLeft => boxed(Origin2D::BottomLeft),
        TextOrigin::BottomRight => boxed(Origin2D::BottomRight),
        TextOrigin::Center => boxed(Origin2D::Center),
        TextOrigin::BaselineLeft => (x, y),
        TextOrigin::BaselineCenter => (x - (metrics.baseline_length / 2) as i64, y),
        TextOrigin::BaselineRight => (x - metrics.baseline_length as i64, y),
    }
}

impl Framebuffer {
    /// Draw UTF-8 `text` with `font`. Returns the text box on screen, or
    /// `None` when nothing of it is visible.
    pub fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &[u8],
        font: &FontTable<'_>,
        style: TextStyle,
    ) -> Option<Region> {
        let metrics = measure(font, text);
        let (mut pen_x, pen_y) = pen_start(style.origin, x, y, &metrics);

        let text_box = Region::spanning(
            pen_x - metrics.origin_x_offset as i64,
            pen_y - metrics.origin_y_offset as i64,
            metrics.width as i64,
            metrics.height as i64,
        );

        // glyphs are drawn transparent so overlapping marks survive; opaque
        // text erases its whole box up front instead
        if style.opaque {
            self.fill_block(text_box, style.color.inverse());
        }

        // glyph bits are set for ink, the blitter wants cleared bits
        let glyph_style = BlitStyle::new(style.color).negative(true);
        for glyph in glyphs(font, text) {
            let bottom = pen_y - glyph.bbox_y_offset as i64;
            let top = bottom - (glyph.bbox_height as i64 - 1);
            // a glyph pushed past the i32 range is off screen either way
            self.blit(
                saturate(pen_x + glyph.bbox_x_offset as i64),
                saturate(top),
                &glyph.as_bitmap(),
                glyph_style,
            );
            pen_x += glyph.device_width_x as i64;
        }

        Framebuffer::crop(text_box)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::builtin::basic_8_pt;

    #[test]
    fn test_measure_corrects_bearings() {
        let font = basic_8_pt();
        // 'H' is 5 wide at offset 0, 'i' is 3 wide at offset 1
        let metrics = measure(&font, b"Hi");
        assert_eq!(metrics.width, 6 + 1 + 3);
        assert_eq!(metrics.height, 7);
        assert_eq!(metrics.origin_x_offset, 0);
        assert_eq!(metrics.origin_y_offset, 6);
        assert_eq!(metrics.baseline_length, 12);

        let leading = measure(&font, b"iH");
        assert_eq!(leading.origin_x_offset, -1);
        assert_eq!(leading.width, 6 - 1 + 5);
    }

    #[test]
    fn test_measure_empty_text() {
        assert_eq!(measure(&basic_8_pt(), b""), TextMetrics::default());
    }

    #[test]
    fn test_draw_text_top_left() {
        let font = basic_8_pt();
        let mut fb = Framebuffer::new();
        let written = fb.draw_text(12, 25, b"Hi", &font, TextStyle::default());
        assert_eq!(written, Some(Region::new(12, 25, 10, 7)));
        // the top row of 'H' is its two stems, the dot of 'i' sits at x = 20
        assert_eq!(fb.pixel(12, 25), Some(Color::Black));
        assert_eq!(fb.pixel(13, 25), Some(Color::White));
        assert_eq!(fb.pixel(16, 25), Some(Color::Black));
        assert_eq!(fb.pixel(20, 25), Some(Color::Black));
        assert_eq!(fb.pixel(20, 26), Some(Color::White));
    }

    #[test]
    fn test_baseline_origins() {
        let font = basic_8_pt();
        let metrics = measure(&font, b"Hi");
        assert_eq!(resolve_origin(TextOrigin::BaselineLeft, 50, 60, &metrics), (50, 60));
        assert_eq!(resolve_origin(TextOrigin::BaselineCenter, 50, 60, &metrics), (44, 60));
        assert_eq!(resolve_origin(TextOrigin::BaselineRight, 50, 60, &metrics), (38, 60));
        // right origins use the text width
        assert_eq!(resolve_origin(TextOrigin::TopRight, 50, 60, &metrics), (41, 66));
        assert_eq!(resolve_origin(TextOrigin::BottomLeft, 50, 60, &metrics), (50, 60));
    }

    #[test]
    fn test_opaque_white_text_on_black() {
        let font = basic_8_pt();
        let mut fb = Framebuffer::new();
        fb.clear(Color::Black);
        let style = TextStyle {
            color: Color::White,
            opaque: true,
            ..TextStyle::default()
        };
        fb.draw_text(0, 0, b"H", &font, style);
        // erased box is black, ink is white
        assert_eq!(fb.pixel(0, 0), Some(Color::White));
        assert_eq!(fb.pixel(1, 0), Some(Color::Black));
        assert_eq!(fb.pixel(2, 3), Some(Color::White));
        assert_eq!(fb.pixels_of(Color::White).count(), 7 * 2 + 3);
    }

    #[test]
    fn test_transparent_white_text_keeps_background() {
        let font = basic_8_pt();
        let mut fb = Framebuffer::new();
        fb.clear(Color::Black);
        let style = TextStyle {
            color: Color::White,
            ..TextStyle::default()
        };
        fb.draw_text(0, 0, b"-", &font, style);
        // the box of a lone dash is its ink, so it lands on the top row
        assert_eq!(fb.pixels_of(Color::White).count(), 5);
        assert_eq!(fb.pixel(4, 0), Some(Color::White));
        assert_eq!(fb.pixel(0, 1), Some(Color::Black));
    }

    #[test]
    fn test_text_at_the_i32_edges() {
        let font = basic_8_pt();
        let mut fb = Framebuffer::new();
        for origin in [
            TextOrigin::TopLeft,
            TextOrigin::BottomRight,
            TextOrigin::Center,
            TextOrigin::BaselineRight,
        ] {
            let style = TextStyle {
                origin,
                opaque: true,
                ..TextStyle::default()
            };
            assert_eq!(fb.draw_text(i32::MAX, i32::MAX, b"Hi", &font, style), None);
            assert_eq!(fb.draw_text(i32::MIN, i32::MIN, b"Hi", &font, style), None);
        }
        assert_eq!(fb, Framebuffer::new());

        let metrics = measure(&font, b"Hi");
        assert_eq!(
            resolve_origin(TextOrigin::BaselineRight, i32::MIN, 0, &metrics),
            (i32::MIN, 0)
        );
        assert_eq!(
            resolve_origin(TextOrigin::TopLeft, i32::MAX, i32::MAX, &metrics),
            (i32::MAX, i32::MAX)
        );
    }

    #[test]
    fn test_unknown_and_malformed_use_fallback() {
        let font = basic_8_pt();
        let mut boxed = Framebuffer::new();
        let mut bad = Framebuffer::new();
        boxed.draw_text(0, 0, "\u{2603}".as_bytes(), &font, TextStyle::default());
        bad.draw_text(0, 0, &[0x80], &font, TextStyle::default());
        assert_eq!(boxed, bad);
        // hollow 5x7 box
        assert_eq!(boxed.pixels_of(Color::Black).count(), 20);
    }
}
