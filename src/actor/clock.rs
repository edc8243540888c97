//! Clock actor
//!
//! Publishes `TICK` to its subscribers at a fixed period. The kernel keeps
//! no time itself: whatever owns a time source (a timer interrupt, a host
//! loop) feeds elapsed milliseconds to the [`ClockHandle`], which publishes
//! a tick whenever a period has passed.
use crate::actor::kernel::{Actor, ActorId, Context, Kernel};
use crate::actor::message::{Message, Signal};
use crate::config::ClockConfig;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU32, Ordering};

pub struct Clock {
    tick_duration_ms: Arc<AtomicU32>,
}

impl Clock {
    /// Register a clock with `kernel` and start it
    pub fn spawn(kernel: &Kernel, config: ClockConfig) -> ClockHandle {
        let tick_duration_ms = Arc::new(AtomicU32::new(config.tick_duration_ms.max(1)));
        let id = kernel.spawn(Clock {
            tick_duration_ms: tick_duration_ms.clone(),
        });
        if let Err(err) = kernel.start(id) {
            log::warn!("clock {} failed to start: {}", id, err);
        }

        ClockHandle {
            id,
            tick_duration_ms,
            pending_ms: 0,
        }
    }
}

impl Actor for Clock {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn handle(&mut self, message: &Message, _ctx: &mut Context<'_>) {
        if message.signal != Signal::SET_TICK_DURATION {
            return;
        }
        match message.payload.as_int() {
            Some(ms) if ms > 0 => {
                self.tick_duration_ms.store(ms as u32, Ordering::Release);
                log::debug!("tick duration set to {} ms", ms);
            }
            _ => log::warn!("ignoring tick duration {:?}", message.payload),
        }
    }
}

/// Time-source side of a clock
pub struct ClockHandle {
    id: ActorId,
    tick_duration_ms: Arc<AtomicU32>,
    pending_ms: u32,
}

impl ClockHandle {
    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn tick_duration_ms(&self) -> u32 {
        self.tick_duration_ms.load(Ordering::Acquire)
    }

    /// Account for `elapsed_ms` and report whether a tick is due. A long
    /// stall yields one tick, not a burst.
    pub fn due(&mut self, elapsed_ms: u32) -> bool {
        let period = self.tick_duration_ms();
        self.pending_ms = self.pending_ms.saturating_add(elapsed_ms);
        if self.pending_ms < period {
            return false;
        }
        self.pending_ms = (self.pending_ms - period).min(period - 1);
        true
    }

    /// Publish `TICK` from the clock. Returns how many subscribers got it.
    pub fn tick(&self, kernel: &Kernel) -> usize {
        kernel
            .publish(self.id, Message::new(Signal::TICK))
            .unwrap_or(0)
    }

    /// `due` followed by `tick` when a period has passed
    pub fn advance(&mut self, kernel: &Kernel, elapsed_ms: u32) -> usize {
        if self.due(elapsed_ms) {
            self.tick(kernel)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::message::Payload;
    use spin::Mutex;

    struct TickCounter(Arc<Mutex<u32>>);

    impl Actor for TickCounter {
        fn handle(&mut self, message: &Message, _ctx: &mut Context<'_>) {
            if message.signal == Signal::TICK {
                *self.0.lock() += 1;
            }
        }
    }

    #[test]
    fn test_due_accumulates_elapsed_time() {
        let kernel = Kernel::default();
        let mut clock = Clock::spawn(&kernel, ClockConfig::handheld());
        assert!(!clock.due(20));
        assert!(clock.due(20));
        // 7 ms carried over
        assert!(!clock.due(20));
        assert!(clock.due(6));
        // a long stall is a single tick
        assert!(clock.due(1000));
        assert!(!clock.due(0));
    }

    #[test]
    fn test_ticks_reach_subscribers() {
        let kernel = Kernel::default();
        let mut clock = Clock::spawn(&kernel, ClockConfig::handheld());
        let count = Arc::new(Mutex::new(0));
        let counter = kernel.spawn(TickCounter(count.clone()));
        kernel.start(counter).unwrap();
        kernel.subscribe(counter, clock.id()).unwrap();

        assert_eq!(clock.advance(&kernel, 10), 0);
        assert_eq!(clock.advance(&kernel, 30), 1);
        kernel.run_until_idle();
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_set_tick_duration() {
        let kernel = Kernel::default();
        let clock = Clock::spawn(&kernel, ClockConfig::default());
        kernel
            .dispatch(
                clock.id(),
                Message::with_payload(Signal::SET_TICK_DURATION, Payload::Int(50)),
            )
            .unwrap();
        kernel
            .dispatch(
                clock.id(),
                Message::with_payload(Signal::SET_TICK_DURATION, Payload::Int(-5)),
            )
            .unwrap();
        kernel.run_until_idle();
        assert_eq!(clock.tick_duration_ms(), 50);
    }
}
