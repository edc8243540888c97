//! # Regions and Origins
//!
//! A drawing call names a point plus an [`Origin`] saying which part of the
//! shape sits on that point. Before anything is rasterized the request is
//! normalized to a top-left anchored [`Region`] and clipped to the screen.
//!
//! ## Center bias
//!
//! Even-sized shapes have no single center pixel. The center is biased to
//! the bottom right: the left bound is `x - width / 2` and the top bound is
//! `y - height / 2`, so the right bound ends up at `x + width / 2 - 1`.

/// Anchor of a line given by a point, a length and an angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin1D {
    #[default]
    Endpoint,
    Midpoint,
}

/// Anchor of a rectangle, circle or bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin2D {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

/// Anchor of a text run. The baseline variants are resolved with font
/// metrics instead of the ink bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextOrigin {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
    BaselineLeft,
    BaselineCenter,
    BaselineRight,
}

pub(crate) fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn place(start: i64, length: i64) -> (i32, u32) {
    let end = start.saturating_add(length.max(0));
    let start = start.clamp(i32::MIN as i64, i32::MAX as i64);
    let length = (end - start).clamp(0, u32::MAX as i64);
    (start as i32, length as u32)
}

/// Axis-aligned rectangle in screen space, anchored at its top-left pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Resolve `origin` so that `(x, y)` becomes the top-left corner
    pub fn anchored(origin: Origin2D, x: i32, y: i32, width: u32, height: u32) -> Self {
        let (left, top) = Self::anchor_point(origin, x, y, width, height);
        Self::spanning(left, top, width as i64, height as i64)
    }

    /// Unclamped top-left corner for `origin`. The corner of a large shape
    /// may not fit in an `i32`.
    pub(crate) fn anchor_point(origin: Origin2D, x: i32, y: i32, width: u32, height: u32) -> (i64, i64) {
        let (x, y) = (x as i64, y as i64);
        let (w, h) = (width as i64, height as i64);
        match origin {
            Origin2D::TopLeft => (x, y),
            Origin2D::TopRight => (x - (w - 1), y),
            Origin2D::BottomLeft => (x, y - (h - 1)),
            Origin2D::BottomRight => (x - (w - 1), y - (h - 1)),
            Origin2D::Center => (x - w / 2, y - h / 2),
        }
    }

    /// Region covering `[left, left + width) x [top, top + height)`. An edge
    /// past the `i32` range is pulled in, which only trims parts that are
    /// off screen anyway.
    pub(crate) fn spanning(left: i64, top: i64, width: i64, height: i64) -> Self {
        let (x, width) = place(left, width);
        let (y, height) = place(top, height);
        Self::new(x, y, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge, saturated at `i32::MAX`
    pub fn right(&self) -> i32 {
        saturate(self.x as i64 + self.width as i64)
    }

    /// Exclusive bottom edge, saturated at `i32::MAX`
    pub fn bottom(&self) -> i32 {
        saturate(self.y as i64 + self.height as i64)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Intersection with `[0, bound_width) x [0, bound_height)`, `None` when
    /// nothing is left.
    pub fn clip(&self, bound_width: usize, bound_height: usize) -> Option<Region> {
        if self.is_empty() {
            return None;
        }

        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = self.right().min(bound_width as i32);
        let bottom = self.bottom().min(bound_height as i32);

        if left >= right || top >= bottom {
            return None;
        }

        Some(Region::new(
            left,
            top,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}
