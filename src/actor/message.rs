//! Messages exchanged between actors
//!
//! A message carries a [`Signal`] saying what happened plus an optional
//! [`Payload`]. The directive is set by the kernel: callers always send
//! `Handle`, only [`Kernel::stop`](crate::actor::Kernel::stop) queues `Exit`.
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directive {
    #[default]
    Handle,
    Exit,
}

/// Event identifier. Values below [`Signal::USER_EVENTS`] belong to the
/// device; applications number their own events upwards from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Signal(pub i32);

impl Signal {
    // Clock
    pub const TICK: Signal = Signal(0);
    pub const SET_TICK_DURATION: Signal = Signal(1);

    // Input
    /// Any button changed
    pub const INPUT: Signal = Signal(2);
    /// Any button went down
    pub const INPUT_PRESSED: Signal = Signal(3);
    /// Any d-pad direction changed
    pub const D_PAD: Signal = Signal(4);
    /// Any d-pad direction went down
    pub const D_PAD_PRESSED: Signal = Signal(5);
    pub const BUTTON_LEFT_PRESSED: Signal = Signal(6);
    pub const BUTTON_LEFT_RELEASED: Signal = Signal(7);
    pub const BUTTON_RIGHT_PRESSED: Signal = Signal(8);
    pub const BUTTON_RIGHT_RELEASED: Signal = Signal(9);
    pub const D_PAD_LEFT_PRESSED: Signal = Signal(10);
    pub const D_PAD_LEFT_RELEASED: Signal = Signal(11);
    pub const D_PAD_RIGHT_PRESSED: Signal = Signal(12);
    pub const D_PAD_RIGHT_RELEASED: Signal = Signal(13);
    pub const D_PAD_UP_PRESSED: Signal = Signal(14);
    pub const D_PAD_UP_RELEASED: Signal = Signal(15);
    pub const D_PAD_DOWN_PRESSED: Signal = Signal(16);
    pub const D_PAD_DOWN_RELEASED: Signal = Signal(17);
    pub const D_PAD_CENTER_PRESSED: Signal = Signal(18);
    pub const D_PAD_CENTER_RELEASED: Signal = Signal(19);

    // Scenes
    pub const SCENE_ENTER: Signal = Signal(20);
    pub const SCENE_EXIT: Signal = Signal(21);

    /// First value free for applications
    pub const USER_EVENTS: Signal = Signal(22);

    /// `USER_EVENTS + offset`
    pub const fn user(offset: i32) -> Signal {
        Signal(Self::USER_EVENTS.0 + offset)
    }

    pub const fn is_user(self) -> bool {
        self.0 >= Self::USER_EVENTS.0
    }
}

/// Data attached to a message. Shared payloads are reference counted, so a
/// published message reaches every subscriber without copying the value.
#[derive(Clone, Default)]
pub enum Payload {
    #[default]
    None,
    Int(i32),
    Shared(Arc<dyn Any + Send + Sync>),
}

impl Payload {
    pub fn shared<T: Any + Send + Sync>(value: T) -> Self {
        Payload::Shared(Arc::new(value))
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Payload::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Payload::Shared(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Payload::None)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::None => write!(f, "None"),
            Payload::Int(value) => write!(f, "Int({})", value),
            Payload::Shared(_) => write!(f, "Shared(..)"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Message {
    directive: Directive,
    pub signal: Signal,
    pub payload: Payload,
}

impl Message {
    pub fn new(signal: Signal) -> Self {
        Self {
            directive: Directive::Handle,
            signal,
            payload: Payload::None,
        }
    }

    pub fn with_payload(signal: Signal, payload: Payload) -> Self {
        Self {
            directive: Directive::Handle,
            signal,
            payload,
        }
    }

    pub(crate) fn exit() -> Self {
        Self {
            directive: Directive::Exit,
            signal: Signal::default(),
            payload: Payload::None,
        }
    }

    pub fn directive(&self) -> Directive {
        self.directive
    }

    pub(crate) fn set_directive(&mut self, directive: Directive) {
        self.directive = directive;
    }
}

impl From<Signal> for Message {
    fn from(signal: Signal) -> Self {
        Message::new(signal)
    }
}
