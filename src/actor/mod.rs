//! Actor Subsystem
//!
//! Message passing between independent actors:
//! - `kernel`: actor registry, inboxes, the global handler lock and the executor
//! - `message`: signals, payloads and directives
//! - `subscribers`: bounded recipient lists
//! - `clock`: periodic `TICK` publisher
//! - `input`: button sampling and edge events
//! - `scene`: groups of actors switched on and off together

pub mod clock;
pub mod input;
pub mod kernel;
pub mod message;
pub mod scene;
pub mod subscribers;

pub use clock::{Clock, ClockHandle};
pub use input::{Button, ButtonReader, Buttons, Input, InputState};
pub use kernel::{Actor, ActorId, ActorState, Context, Kernel, KernelError};
pub use message::{Directive, Message, Payload, Signal};
pub use scene::Scene;
pub use subscribers::SubscriberList;
