//! Input actor
//!
//! Samples the buttons on every `TICK` it receives and publishes the edges.
//! For each button that changed it publishes `*_PRESSED` or `*_RELEASED`,
//! then the aggregate signals, in this order and only when they apply:
//!
//! - `INPUT` when any button changed
//! - `INPUT_PRESSED` when any button went down
//! - `D_PAD` when a d-pad direction changed
//! - `D_PAD_PRESSED` when a d-pad direction went down
//!
//! Reading the pins is left to a [`ButtonReader`].
use crate::actor::kernel::{Actor, Context};
use crate::actor::message::{Message, Signal};
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    DPadLeft,
    DPadRight,
    DPadUp,
    DPadDown,
    DPadCenter,
}

impl Button {
    /// Sampling order
    pub const ALL: [Button; 7] = [
        Button::Left,
        Button::Right,
        Button::DPadLeft,
        Button::DPadRight,
        Button::DPadUp,
        Button::DPadDown,
        Button::DPadCenter,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }

    pub const fn is_d_pad(self) -> bool {
        !matches!(self, Button::Left | Button::Right)
    }

    pub const fn pressed_signal(self) -> Signal {
        match self {
            Button::Left => Signal::BUTTON_LEFT_PRESSED,
            Button::Right => Signal::BUTTON_RIGHT_PRESSED,
            Button::DPadLeft => Signal::D_PAD_LEFT_PRESSED,
            Button::DPadRight => Signal::D_PAD_RIGHT_PRESSED,
            Button::DPadUp => Signal::D_PAD_UP_PRESSED,
            Button::DPadDown => Signal::D_PAD_DOWN_PRESSED,
            Button::DPadCenter => Signal::D_PAD_CENTER_PRESSED,
        }
    }

    pub const fn released_signal(self) -> Signal {
        match self {
            Button::Left => Signal::BUTTON_LEFT_RELEASED,
            Button::Right => Signal::BUTTON_RIGHT_RELEASED,
            Button::DPadLeft => Signal::D_PAD_LEFT_RELEASED,
            Button::DPadRight => Signal::D_PAD_RIGHT_RELEASED,
            Button::DPadUp => Signal::D_PAD_UP_RELEASED,
            Button::DPadDown => Signal::D_PAD_DOWN_RELEASED,
            Button::DPadCenter => Signal::D_PAD_CENTER_RELEASED,
        }
    }
}

/// Set of pressed buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);

    pub const fn from_bits(bits: u8) -> Self {
        Buttons(bits & 0x7f)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_pressed(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub const fn with(self, button: Button, pressed: bool) -> Self {
        if pressed {
            Buttons(self.0 | button.bit())
        } else {
            Buttons(self.0 & !button.bit())
        }
    }

    pub fn pressed(self) -> impl Iterator<Item = Button> {
        Button::ALL
            .into_iter()
            .filter(move |button| self.is_pressed(*button))
    }
}

impl FromIterator<Button> for Buttons {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Buttons::NONE, |buttons, button| buttons.with(button, true))
    }
}

/// Source of the current button levels (GPIO on the device)
pub trait ButtonReader: Send {
    fn read(&mut self) -> Buttons;
}

impl<F: FnMut() -> Buttons + Send> ButtonReader for F {
    fn read(&mut self) -> Buttons {
        self()
    }
}

/// Latest sampled buttons, readable from outside the kernel
#[derive(Debug, Clone, Default)]
pub struct InputState(Arc<AtomicU8>);

impl InputState {
    pub fn buttons(&self) -> Buttons {
        Buttons::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons().is_pressed(button)
    }
}

pub struct Input<R: ButtonReader> {
    reader: R,
    current: Buttons,
    state: InputState,
}

impl<R: ButtonReader> Input<R> {
    pub fn new(reader: R) -> (Self, InputState) {
        let state = InputState::default();
        let input = Self {
            reader,
            current: Buttons::NONE,
            state: state.clone(),
        };
        (input, state)
    }

    fn sample(&mut self, ctx: &Context<'_>) {
        let sampled = self.reader.read();
        if sampled == self.current {
            return;
        }

        let mut input = false;
        let mut input_pressed = false;
        let mut d_pad = false;
        let mut d_pad_pressed = false;

        for button in Button::ALL {
            let pressed = sampled.is_pressed(button);
            if pressed == self.current.is_pressed(button) {
                continue;
            }

            let signal = if pressed {
                button.pressed_signal()
            } else {
                button.released_signal()
            };
            ctx.publish(Message::new(signal));

            input = true;
            input_pressed |= pressed;
            if button.is_d_pad() {
                d_pad = true;
                d_pad_pressed |= pressed;
            }
        }

        self.current = sampled;
        self.state.0.store(sampled.bits(), Ordering::Release);

        if input {
            ctx.publish(Message::new(Signal::INPUT));
        }
        if input_pressed {
            ctx.publish(Message::new(Signal::INPUT_PRESSED));
        }
        if d_pad {
            ctx.publish(Message::new(Signal::D_PAD));
        }
        if d_pad_pressed {
            ctx.publish(Message::new(Signal::D_PAD_PRESSED));
        }
    }
}

impl<R: ButtonReader> Actor for Input<R> {
    fn name(&self) -> &'static str {
        "input"
    }

    fn handle(&mut self, message: &Message, ctx: &mut Context<'_>) {
        if message.signal == Signal::TICK {
            self.sample(ctx);
        }
    }
}
