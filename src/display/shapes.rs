//! Line and circle rasterization
//!
//! Horizontal and vertical lines go through block fill. Sloped lines use
//! Bresenham's algorithm with integer arithmetic and are plotted pixel by
//! pixel.
//!
//! Circles use the midpoint algorithm with 8-way symmetry. Even and odd
//! diameters take separate paths because an even circle has no center
//! pixel: its center is biased to the bottom-right pixel of the four
//! candidates.
//!
//! ```text
//! ############
//! ####    ####
//! ### #### ###
//! ## ###### ##
//! ## ##OO## ##
//! ## ##OX## ##     X is the center of this diameter 8 circle
//! ## ###### ##
//! ### #### ###
//! ####    ####
//! ############
//! ```
//!
//! The discriminator threshold deciding when to step to the next row comes
//! from a small table tuned by eye on the panel, not from a formula.
//!
//! Coordinates far outside the screen are legal. Sloped lines are clipped
//! to a margin around the screen before they are walked, and circles stop
//! once the remaining octant lies entirely off screen.
use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::display::color::Color;
use crate::display::framebuffer::Framebuffer;
use crate::display::region::Region;

/// Line endpoints further than this outside the screen are clipped before
/// the Bresenham walk
const LINE_REACH: i64 = 1 << 12;

/// Threshold for circles with an odd diameter, keyed by radius
fn odd_threshold(radius: i64) -> i64 {
    match radius {
        1 => 0,
        2 => 1,
        3 => 3,
        _ => 5,
    }
}

/// Threshold for circles with an even diameter, keyed by radius
fn even_threshold(radius: i64) -> i64 {
    if radius <= 3 {
        0
    } else if radius <= 6 {
        3
    } else {
        5
    }
}

/// Distance from `center` to the furthest on-screen coordinate of an axis
/// `extent` pixels long
fn reach(center: i64, extent: usize) -> i64 {
    center.abs().max((center - (extent as i64 - 1)).abs())
}

/// Clip a far-flung segment to the screen plus `LINE_REACH` (Liang-Barsky).
/// `None` when it misses that box.
fn clip_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Option<(i32, i32, i32, i32)> {
    let (min_x, max_x) = (-LINE_REACH, DISPLAY_WIDTH as i64 + LINE_REACH);
    let (min_y, max_y) = (-LINE_REACH, DISPLAY_HEIGHT as i64 + LINE_REACH);
    let inside = |x: i32, y: i32| {
        (min_x..=max_x).contains(&(x as i64)) && (min_y..=max_y).contains(&(y as i64))
    };
    if inside(x0, y0) && inside(x1, y1) {
        return Some((x0, y0, x1, y1));
    }

    let (fx, fy) = (x0 as f64, y0 as f64);
    let (dx, dy) = (x1 as f64 - fx, y1 as f64 - fy);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [
        (-dx, fx - min_x as f64),
        (dx, max_x as f64 - fx),
        (-dy, fy - min_y as f64),
        (dy, max_y as f64 - fy),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    if t0 > t1 {
        return None;
    }

    let point = |t: f64| {
        (
            libm::round(fx + t * dx) as i32,
            libm::round(fy + t * dy) as i32,
        )
    };
    let ((ax, ay), (bx, by)) = (point(t0), point(t1));
    Some((ax, ay, bx, by))
}

impl Framebuffer {
    pub fn draw_line(&mut self, x_start: i32, y_start: i32, x_end: i32, y_end: i32, color: Color) {
        if y_start == y_end {
            // block fill only grows rightwards
            let (left, right) = if x_end < x_start {
                (x_end as i64, x_start as i64)
            } else {
                (x_start as i64, x_end as i64)
            };
            self.fill_block(Region::spanning(left, y_start as i64, right - left + 1, 1), color);
            return;
        }

        if x_start == x_end {
            let (top, bottom) = if y_end < y_start {
                (y_end as i64, y_start as i64)
            } else {
                (y_start as i64, y_end as i64)
            };
            self.fill_block(Region::spanning(x_start as i64, top, 1, bottom - top + 1), color);
            return;
        }

        let Some((x_start, y_start, x_end, y_end)) = clip_line(x_start, y_start, x_end, y_end) else {
            return;
        };

        let dx = (x_end - x_start).abs();
        let x_step = if x_start < x_end { 1 } else { -1 };
        let dy = -(y_end - y_start).abs();
        let y_step = if y_start < y_end { 1 } else { -1 };
        let (mut x, mut y) = (x_start, y_start);
        let mut error = dx + dy;

        loop {
            self.set_pixel(x, y, color);

            if x == x_end && y == y_end {
                break;
            }

            if 2 * error >= dy {
                if x == x_end {
                    break;
                }
                error += dy;
                x += x_step;
            }

            if 2 * error <= dx {
                if y == y_end {
                    break;
                }
                error += dx;
                y += y_step;
            }
        }
    }

    /// Outline of a rectangle anchored at its top-left corner
    pub fn draw_frame(&mut self, region: Region, color: Color) {
        if region.is_empty() {
            return;
        }
        let (x, y) = (region.x as i64, region.y as i64);
        let (width, height) = (region.width as i64, region.height as i64);
        self.fill_block(Region::spanning(x, y, width, 1), color);
        self.fill_block(Region::spanning(x, y + height - 1, width, 1), color);
        self.fill_block(Region::spanning(x, y, 1, height), color);
        self.fill_block(Region::spanning(x + width - 1, y, 1, height), color);
    }

    /// Circle whose bounding square has its top-left corner at `(x, y)`
    pub fn circle(&mut self, x: i32, y: i32, diameter: u32, color: Color, fill: bool) {
        self.circle_at(x as i64, y as i64, diameter, color, fill);
    }

    /// `circle` with a corner that may lie outside the `i32` range
    pub(crate) fn circle_at(&mut self, x: i64, y: i64, diameter: u32, color: Color, fill: bool) {
        let size = diameter as i64;
        if Framebuffer::crop(Region::spanning(x, y, size, size)).is_none() {
            return;
        }
        let half = size / 2;
        if diameter % 2 == 0 {
            self.even_circle_from_top_left(x, y, size, color, fill);
        } else {
            self.odd_circle_from_center(x + half, y + half, size, color, fill);
        }
    }

    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.set_pixel(x, y, color);
        }
    }

    fn span(&mut self, x: i64, y: i64, width: i64, color: Color) {
        self.fill_block(Region::spanning(x, y, width, 1), color);
    }

    fn even_circle_from_top_left(&mut self, x: i64, y: i64, diameter: i64, color: Color, fill: bool) {
        let radius = diameter / 2;
        let mut x_offset = 0;
        let mut y_offset = -radius + 1;

        // one center per quadrant
        let (left, top) = (x + radius - 1, y + radius - 1);
        let (right, bottom) = (x + radius, y + radius);

        // past these offsets every point (or span row) is off screen
        let reach_x = reach(left, DISPLAY_WIDTH).max(reach(right, DISPLAY_WIDTH));
        let reach_y = reach(top, DISPLAY_HEIGHT).max(reach(bottom, DISPLAY_HEIGHT));
        let limit = if fill { reach_y } else { reach_x.min(reach_y) };

        let threshold = even_threshold(radius);

        while x_offset <= -y_offset && x_offset <= limit {
            if fill {
                self.span(left - x_offset, top + y_offset, 2 * (x_offset.abs() + 1), color);
                self.span(left + y_offset, top - x_offset, 2 * (y_offset.abs() + 1), color);
                self.span(left - x_offset, bottom - y_offset, 2 * (x_offset.abs() + 1), color);
                self.span(left + y_offset, bottom + x_offset, 2 * (y_offset.abs() + 1), color);
            } else {
                // top left quadrant
                self.plot(left - x_offset, top + y_offset, color);
                self.plot(left + y_offset, top - x_offset, color);
                // top right quadrant
                self.plot(right + x_offset, top + y_offset, color);
                self.plot(right - y_offset, top - x_offset, color);
                // bottom left quadrant
                self.plot(left - x_offset, bottom - y_offset, color);
                self.plot(left + y_offset, bottom + x_offset, color);
                // bottom right quadrant
                self.plot(right + x_offset, bottom - y_offset, color);
                self.plot(right - y_offset, bottom + x_offset, color);
            }

            x_offset += 1;

            let discriminator =
                x_offset * x_offset + y_offset * y_offset - (radius - 1) * (radius - 1);
            if discriminator > threshold {
                y_offset += 1;
            }
        }
    }

    fn odd_circle_from_center(&mut self, x: i64, y: i64, diameter: i64, color: Color, fill: bool) {
        let radius = diameter / 2;
        let mut x_offset = 0;
        let mut y_offset = -radius;

        let reach_x = reach(x, DISPLAY_WIDTH);
        let reach_y = reach(y, DISPLAY_HEIGHT);
        let limit = if fill { reach_y } else { reach_x.min(reach_y) };

        let threshold = odd_threshold(radius);

        while x_offset <= -y_offset && x_offset <= limit {
            if fill {
                self.span(x - x_offset, y + y_offset, 2 * x_offset.abs() + 1, color);
                self.span(x + y_offset, y - x_offset, 2 * y_offset.abs() + 1, color);
                self.span(x - x_offset, y - y_offset, 2 * x_offset.abs() + 1, color);
                self.span(x + y_offset, y + x_offset, 2 * y_offset.abs() + 1, color);
            } else {
                self.plot(x + x_offset, y + y_offset, color);
                self.plot(x + x_offset, y - y_offset, color);
                self.plot(x - x_offset, y + y_offset, color);
                self.plot(x - x_offset, y - y_offset, color);
                self.plot(x + y_offset, y + x_offset, color);
                self.plot(x + y_offset, y - x_offset, color);
                self.plot(x - y_offset, y + x_offset, color);
                self.plot(x - y_offset, y - x_offset, color);
            }

            x_offset += 1;

            let discriminator = x_offset * x_offset + y_offset * y_offset - radius * radius;
            if discriminator > threshold {
                y_offset += 1;
            }
        }
    }
}
