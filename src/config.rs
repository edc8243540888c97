//! # Configuration
//!
//! Compile-time geometry of the memory panel plus the small runtime knobs of
//! the actor kernel and the clock.
//!
//! The panel geometry is fixed: the framebuffer is a statically sized array
//! and every rasterizer routine assumes these dimensions.

/// Panel width in pixels
pub const DISPLAY_WIDTH: usize = 144;
/// Panel height in pixels
pub const DISPLAY_HEIGHT: usize = 168;
/// `ceil(DISPLAY_WIDTH / 8)`
pub const BYTES_PER_ROW: usize = (DISPLAY_WIDTH + 7) / 8;
/// One full frame of packed 1bpp pixels
pub const FRAME_BYTES: usize = BYTES_PER_ROW * DISPLAY_HEIGHT;

/// Upper bound on the recipients of one actor's publications
pub const MAX_SUBSCRIBERS: usize = 5;
/// Upper bound on the members of one scene
pub const MAX_SCENE_ACTORS: usize = 5;

/// Runtime settings of the actor kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Messages an actor inbox holds before `dispatch` starts dropping
    pub inbox_capacity: usize,
}

impl KernelConfig {
    /// Default settings for the handheld
    pub const fn handheld() -> Self {
        Self { inbox_capacity: 32 }
    }

    /// Small inboxes, handy for exercising overflow behaviour
    pub const fn tiny() -> Self {
        Self { inbox_capacity: 4 }
    }

    pub const fn with_inbox_capacity(mut self, inbox_capacity: usize) -> Self {
        self.inbox_capacity = inbox_capacity;
        self
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::handheld()
    }
}

/// Runtime settings of the clock actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    /// Milliseconds between two `TICK` publications (~30 fps by default)
    pub tick_duration_ms: u32,
}

impl ClockConfig {
    pub const fn handheld() -> Self {
        Self {
            tick_duration_ms: 33,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::handheld()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_geometry() {
        assert_eq!(BYTES_PER_ROW, 18);
        assert_eq!(FRAME_BYTES, 3024);
    }

    #[test]
    fn test_kernel_config_builder() {
        let config = KernelConfig::default().with_inbox_capacity(8);
        assert_eq!(config.inbox_capacity, 8);
        assert_eq!(ClockConfig::default().tick_duration_ms, 33);
    }
}
