//! # Memory Panel Driver
//!
//! Formats framebuffer contents for the reflective memory LCD and hands the
//! bytes to a [`Transport`] (the serial bus lives outside this crate).
//!
//! ## Frame layout
//!
//! ```text
//! [ 0x80 | vcom ]                                  write command
//! [ reverse(row + 1) ][ 18 data bytes ][ 0x00 ]    x 168 rows
//! [ 0x00 ]                                         trailer
//! ```
//!
//! The panel needs its VCOM polarity flipped at least once per second to
//! avoid DC bias. The flip happens on every transmitted frame, so callers
//! must redraw at 1 Hz or faster; nothing here keeps time on its own.
use crate::config::{BYTES_PER_ROW, DISPLAY_HEIGHT};
use crate::display::color::Color;
use crate::display::framebuffer::Framebuffer;
use core::fmt;

const WRITE_COMMAND: u8 = 0x80;
const CLEAR_COMMAND: u8 = 0x20;
const VCOM_COMMAND: u8 = 0x40;

const LINE_BYTES: usize = BYTES_PER_ROW + 2;

const NIBBLE_FLIPPER: [u8; 16] = [
    0x0, 0x8, 0x4, 0xc, 0x2, 0xa, 0x6, 0xe, 0x1, 0x9, 0x5, 0xd, 0x3, 0xb, 0x7, 0xf,
];

/// Reverse the bit order of a byte (the panel takes LSB-first addresses)
pub fn reverse(n: u8) -> u8 {
    (NIBBLE_FLIPPER[(n & 0b1111) as usize] << 4) | NIBBLE_FLIPPER[(n >> 4) as usize]
}

/// Synchronous serial bus the panel hangs off
pub trait Transport {
    type Error: fmt::Debug;

    /// Assert chip select and keep the bus for one transaction
    fn begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Release chip select
    fn end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError<E> {
    Transport(E),
}

impl<E: fmt::Debug> fmt::Display for DisplayError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Transport(err) => write!(f, "transport error: {:?}", err),
        }
    }
}

pub struct SharpMemoryDriver<T: Transport> {
    transport: T,
    vcom: u8,
    frames_sent: usize,
}

impl<T: Transport> SharpMemoryDriver<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            vcom: VCOM_COMMAND,
            frames_sent: 0,
        }
    }

    /// Current VCOM bit, either `0x40` or `0x00`
    pub fn vcom(&self) -> u8 {
        self.vcom
    }

    pub fn frames_sent(&self) -> usize {
        self.frames_sent
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn release(self) -> T {
        self.transport
    }

    fn toggle_vcom(&mut self) {
        self.vcom = if self.vcom != 0 { 0x00 } else { VCOM_COMMAND };
    }

    /// Blank the buffer, push it, and leave the panel ready for drawing
    pub fn initialize(&mut self, framebuffer: &mut Framebuffer) -> Result<(), DisplayError<T::Error>> {
        framebuffer.clear(Color::White);
        self.send_frame(framebuffer)?;
        log::debug!("memory panel initialized");
        Ok(())
    }

    /// Run `body` between `begin` and `end`. The bus is released even when
    /// `body` fails; the first error wins.
    fn transaction<F>(&mut self, body: F) -> Result<(), DisplayError<T::Error>>
    where
        F: FnOnce(&mut Self) -> Result<(), T::Error>,
    {
        self.transport.begin().map_err(DisplayError::Transport)?;
        let result = body(self);
        let released = self.transport.end();
        result.and(released).map_err(DisplayError::Transport)
    }

    /// Transmit one full frame
    pub fn send_frame(&mut self, framebuffer: &Framebuffer) -> Result<(), DisplayError<T::Error>> {
        self.transaction(|driver| {
            driver.transport.write(&[driver.vcom | WRITE_COMMAND])?;
            // the panel has seen this polarity only once the command is out
            driver.toggle_vcom();

            let mut line = [0u8; LINE_BYTES];
            for (index, row) in framebuffer
                .as_bytes()
                .chunks_exact(BYTES_PER_ROW)
                .take(DISPLAY_HEIGHT)
                .enumerate()
            {
                line[0] = reverse(index as u8 + 1);
                line[1..=BYTES_PER_ROW].copy_from_slice(row);
                line[LINE_BYTES - 1] = 0x00;
                driver.transport.write(&line)?;
            }
            driver.transport.write(&[0x00])
        })
        .inspect_err(|err| log::warn!("frame not sent: {}", err))?;

        self.frames_sent += 1;
        log::trace!("frame {} sent", self.frames_sent);
        Ok(())
    }

    /// Ask the panel to blank itself without sending pixel data
    pub fn clear_panel(&mut self) -> Result<(), DisplayError<T::Error>> {
        self.transaction(|driver| driver.transport.write(&[driver.vcom | CLEAR_COMMAND, 0x00]))
    }
}

/// Transport that records every byte, for tests and host-side previews
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingTransport {
    pub bytes: alloc::vec::Vec<u8>,
    pub transactions: usize,
}

impl Transport for RecordingTransport {
    type Error = core::convert::Infallible;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.transactions += 1;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse() {
        assert_eq!(reverse(0b0000_0001), 0b1000_0000);
        assert_eq!(reverse(0b1100_1010), 0b0101_0011);
        assert_eq!(reverse(168), 0b0001_0101);
    }

    #[test]
    fn test_frame_layout() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(0, 1, Color::Black);
        let mut driver = SharpMemoryDriver::new(RecordingTransport::default());
        driver.send_frame(&fb).unwrap();

        let bytes = &driver.transport().bytes;
        assert_eq!(bytes.len(), 1 + DISPLAY_HEIGHT * LINE_BYTES + 1);
        assert_eq!(bytes[0], 0x80 | 0x40);

        let second_line = &bytes[1 + LINE_BYTES..1 + 2 * LINE_BYTES];
        assert_eq!(second_line[0], reverse(2));
        assert_eq!(second_line[1], 0x7f);
        assert_eq!(second_line[LINE_BYTES - 1], 0x00);
        assert_eq!(*bytes.last().unwrap(), 0x00);
    }

    #[test]
    fn test_vcom_toggles_every_frame() {
        let fb = Framebuffer::new();
        let mut driver = SharpMemoryDriver::new(RecordingTransport::default());
        let frame_len = 1 + DISPLAY_HEIGHT * LINE_BYTES + 1;

        driver.send_frame(&fb).unwrap();
        driver.send_frame(&fb).unwrap();
        driver.send_frame(&fb).unwrap();

        let bytes = &driver.transport().bytes;
        assert_eq!(bytes[0], 0xc0);
        assert_eq!(bytes[frame_len], 0x80);
        assert_eq!(bytes[2 * frame_len], 0xc0);
        assert_eq!(driver.frames_sent(), 3);
        assert_eq!(driver.transport().transactions, 3);
    }

    /// Fails the `fail_at`-th write (counting from 1)
    #[derive(Debug, Default)]
    struct FlakyTransport {
        fail_at: usize,
        writes: usize,
        begun: usize,
        ended: usize,
    }

    impl Transport for FlakyTransport {
        type Error = usize;

        fn begin(&mut self) -> Result<(), usize> {
            self.begun += 1;
            Ok(())
        }

        fn write(&mut self, _bytes: &[u8]) -> Result<(), usize> {
            self.writes += 1;
            if self.writes == self.fail_at {
                return Err(self.writes);
            }
            Ok(())
        }

        fn end(&mut self) -> Result<(), usize> {
            self.ended += 1;
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_releases_bus() {
        let fb = Framebuffer::new();
        let mut driver = SharpMemoryDriver::new(FlakyTransport {
            fail_at: 3,
            ..FlakyTransport::default()
        });

        assert_eq!(driver.send_frame(&fb), Err(DisplayError::Transport(3)));
        assert_eq!((driver.transport().begun, driver.transport().ended), (1, 1));
        assert_eq!(driver.frames_sent(), 0);
        // the command byte went out, so the polarity still flips
        assert_eq!(driver.vcom(), 0x00);
    }

    #[test]
    fn test_failed_command_keeps_vcom() {
        let fb = Framebuffer::new();
        let mut driver = SharpMemoryDriver::new(FlakyTransport {
            fail_at: 1,
            ..FlakyTransport::default()
        });

        assert_eq!(driver.send_frame(&fb), Err(DisplayError::Transport(1)));
        assert_eq!(driver.vcom(), 0x40);
        assert_eq!(driver.transport().ended, 1);

        // the next attempt goes through with the same polarity
        driver.send_frame(&fb).unwrap();
        assert_eq!(driver.vcom(), 0x00);
        assert_eq!(driver.frames_sent(), 1);

        let next = driver.transport().writes + 1;
        driver.transport_mut().fail_at = next;
        assert!(driver.clear_panel().is_err());
        assert_eq!((driver.transport().begun, driver.transport().ended), (3, 3));
    }

    #[test]
    fn test_initialize_blanks_buffer() {
        let mut fb = Framebuffer::new();
        fb.clear(Color::Black);
        let mut driver = SharpMemoryDriver::new(RecordingTransport::default());
        driver.initialize(&mut fb).unwrap();
        assert!(fb.as_bytes().iter().all(|b| *b == 0xff));
        driver.clear_panel().unwrap();
        let bytes = &driver.transport().bytes;
        assert_eq!(&bytes[bytes.len() - 2..], &[0x20, 0x00]);
    }
}
