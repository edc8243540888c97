//! # kywy-core
//!
//! Runtime core of the handheld: an actor kernel that delivers messages
//! between independent actors, a 1bpp rasterizer for the 144x168 memory
//! panel, and a compact binary font engine.
//!
//! ## Modules
//!
//! - `actor`: kernel, messages, clock, input and scenes
//! - `display`: framebuffer, rasterizer, panel driver and drawing surface
//! - `font`: glyph tables, UTF-8 decoding and text layout
//! - `config`: panel geometry and runtime settings
//!
//! The crate is `no_std` with `alloc`; tests run on the host with `std`.
//! Diagnostics go through the `log` facade.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod actor;
pub mod config;
pub mod display;
pub mod font;

pub use actor::{Actor, ActorId, Context, Kernel, KernelError, Message, Payload, Signal};
pub use config::{ClockConfig, KernelConfig};
pub use display::{Color, Display, Framebuffer, Region};
pub use font::{FontTable, BASIC_8_PT};
