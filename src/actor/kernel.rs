//! # Actor Kernel
//!
//! Actors are independent units of state with a private FIFO inbox. They
//! talk only by message: `dispatch` queues a message for one actor, and
//! `publish` queues it for every enabled subscriber of the sender.
//!
//! ## Scheduling
//!
//! The kernel is an executor in the style of a cooperative task scheduler:
//! every [`Kernel::step`] picks the next actor with pending mail
//! (round-robin) and runs its handler for exactly one message. `step` can
//! be called from several threads at once, but one global lock is held for
//! the whole handler body, so no two handlers ever overlap. Code running
//! inside a handler may therefore touch shared state such as the
//! framebuffer without further locking.
//!
//! A handler must not call `step` itself; the global lock is not reentrant.
//!
//! ## Lifecycle
//!
//! ```text
//! spawn -> Created --start--> Running --Exit handled--> Stopped
//! ```
//!
//! Mail sent to a `Created` actor waits in its inbox until it is started.
//! `stop` queues an `Exit` directive behind the mail already waiting; when
//! it comes up the actor's teardown hook runs and anything still queued is
//! dropped.
use crate::actor::message::{Directive, Message};
use crate::actor::subscribers::{ListError, SubscriberList};
use crate::config::KernelConfig;
use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use spin::{Mutex, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// An actor cannot receive its own publications
    SelfSubscription,
    AlreadySubscribed,
    /// The publisher already has `MAX_SUBSCRIBERS` recipients
    SubscriberLimit,
    NotSubscribed,
    /// The target inbox is at capacity; the message was dropped
    QueueFull,
    UnknownActor,
    /// The target has terminated and accepts no more mail
    ActorStopped,
    AlreadyStarted,
    /// The scene already holds `MAX_SCENE_ACTORS` members
    SceneFull,
    AlreadyInScene,
    NotInScene,
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::SelfSubscription => write!(f, "actor cannot subscribe to itself"),
            KernelError::AlreadySubscribed => write!(f, "already subscribed"),
            KernelError::SubscriberLimit => write!(f, "subscriber limit reached"),
            KernelError::NotSubscribed => write!(f, "not subscribed"),
            KernelError::QueueFull => write!(f, "message queue full"),
            KernelError::UnknownActor => write!(f, "unknown actor"),
            KernelError::ActorStopped => write!(f, "actor stopped"),
            KernelError::AlreadyStarted => write!(f, "actor already started"),
            KernelError::SceneFull => write!(f, "scene actor limit reached"),
            KernelError::AlreadyInScene => write!(f, "actor already in scene"),
            KernelError::NotInScene => write!(f, "actor not in scene"),
        }
    }
}

impl From<ListError> for KernelError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::Duplicate => KernelError::AlreadySubscribed,
            ListError::Full => KernelError::SubscriberLimit,
            ListError::Missing => KernelError::NotSubscribed,
        }
    }
}

/// Handle to an actor registered with a [`Kernel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(usize);

impl ActorId {
    pub const fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) const fn from_index(index: usize) -> Self {
        ActorId(index)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    Created,
    Running,
    Stopped,
}

/// Behaviour of an actor. Every hook runs with the kernel's handler lock
/// held.
pub trait Actor: Send {
    fn name(&self) -> &'static str {
        "actor"
    }

    /// Runs once from [`Kernel::start`]
    fn initialize(&mut self, _ctx: &mut Context<'_>) {}

    fn handle(&mut self, message: &Message, ctx: &mut Context<'_>);

    /// Runs once when the `Exit` directive is handled
    fn teardown(&mut self, _ctx: &mut Context<'_>) {}
}

struct ActorCell {
    id: ActorId,
    name: &'static str,
    state: Mutex<ActorState>,
    enabled: AtomicBool,
    inbox: Mutex<VecDeque<Message>>,
    subscribers: Mutex<SubscriberList>,
    behavior: Mutex<Box<dyn Actor>>,
}

impl ActorCell {
    fn state(&self) -> ActorState {
        *self.state.lock()
    }
}

pub struct Kernel {
    config: KernelConfig,
    actors: RwLock<Vec<Arc<ActorCell>>>,
    handler_lock: Mutex<()>,
    cursor: AtomicUsize,
    steps_completed: AtomicUsize,
}

impl Kernel {
    pub const fn new(config: KernelConfig) -> Self {
        Self {
            config,
            actors: RwLock::new(Vec::new()),
            handler_lock: Mutex::new(()),
            cursor: AtomicUsize::new(0),
            steps_completed: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    fn cell(&self, id: ActorId) -> Result<Arc<ActorCell>, KernelError> {
        self.actors
            .read()
            .get(id.0)
            .cloned()
            .ok_or(KernelError::UnknownActor)
    }

    /// Register an actor. It is enabled but does not handle mail until
    /// started.
    pub fn spawn<A: Actor + 'static>(&self, actor: A) -> ActorId {
        let mut actors = self.actors.write();
        let id = ActorId(actors.len());
        let name = actor.name();
        actors.push(Arc::new(ActorCell {
            id,
            name,
            state: Mutex::new(ActorState::Created),
            enabled: AtomicBool::new(true),
            inbox: Mutex::new(VecDeque::with_capacity(self.config.inbox_capacity)),
            subscribers: Mutex::new(SubscriberList::new()),
            behavior: Mutex::new(Box::new(actor)),
        }));
        log::debug!("spawned actor {} ({})", id, name);
        id
    }

    /// Run the initialize hook and begin handling mail
    pub fn start(&self, id: ActorId) -> Result<(), KernelError> {
        let cell = self.cell(id)?;
        // held across the check so racing starts initialize only once
        let _guard = self.handler_lock.lock();
        if cell.state() != ActorState::Created {
            return Err(KernelError::AlreadyStarted);
        }

        {
            let mut behavior = cell.behavior.lock();
            let mut ctx = Context::new(self, id);
            behavior.initialize(&mut ctx);
        }
        *cell.state.lock() = ActorState::Running;
        log::debug!("started actor {} ({})", id, cell.name);
        Ok(())
    }

    /// Queue the `Exit` directive. Mail already queued is handled first.
    pub fn stop(&self, id: ActorId) -> Result<(), KernelError> {
        self.enqueue(id, Message::exit())
    }

    /// Queue `message` for `id`. The directive is always reset to `Handle`.
    /// A full inbox drops the message.
    pub fn dispatch(&self, id: ActorId, mut message: Message) -> Result<(), KernelError> {
        message.set_directive(Directive::Handle);
        self.enqueue(id, message)
    }

    fn enqueue(&self, id: ActorId, message: Message) -> Result<(), KernelError> {
        let cell = self.cell(id)?;
        // lock order is inbox, then state; stopping drains under the same lock
        let mut inbox = cell.inbox.lock();
        if cell.state() == ActorState::Stopped {
            log::warn!("dropping {:?} for stopped actor {}", message.signal, id);
            return Err(KernelError::ActorStopped);
        }

        if inbox.len() >= self.config.inbox_capacity {
            log::warn!("inbox of actor {} ({}) full, dropping {:?}", id, cell.name, message.signal);
            return Err(KernelError::QueueFull);
        }
        inbox.push_back(message);
        Ok(())
    }

    /// Dispatch `message` to every enabled subscriber of `from`, in
    /// subscription order. Returns how many accepted it.
    pub fn publish(&self, from: ActorId, message: Message) -> Result<usize, KernelError> {
        let subscribers = *self.cell(from)?.subscribers.lock();

        let mut delivered = 0;
        for id in subscribers.iter() {
            let Ok(cell) = self.cell(id) else {
                continue;
            };
            if !cell.enabled.load(Ordering::Acquire) {
                continue;
            }
            if self.dispatch(id, message.clone()).is_ok() {
                delivered += 1;
            }
        }
        Ok(delivered)
    }

    /// Make `subscriber` a recipient of what `publisher` publishes
    pub fn subscribe(&self, subscriber: ActorId, publisher: ActorId) -> Result<(), KernelError> {
        if subscriber == publisher {
            log::warn!("actor {} cannot subscribe to itself", subscriber);
            return Err(KernelError::SelfSubscription);
        }
        self.cell(subscriber)?;
        let cell = self.cell(publisher)?;
        let result = cell.subscribers.lock().insert(subscriber);
        result.map_err(|err| {
            let err = KernelError::from(err);
            log::warn!("{} cannot subscribe to {}: {}", subscriber, publisher, err);
            err
        })
    }

    pub fn unsubscribe(&self, subscriber: ActorId, publisher: ActorId) -> Result<(), KernelError> {
        let cell = self.cell(publisher)?;
        let result = cell.subscribers.lock().remove(subscriber);
        result.map_err(KernelError::from)
    }

    pub fn subscribers(&self, publisher: ActorId) -> Result<SubscriberList, KernelError> {
        Ok(*self.cell(publisher)?.subscribers.lock())
    }

    /// Resume receiving publications. The inbox is untouched.
    pub fn enable(&self, id: ActorId) -> Result<(), KernelError> {
        self.cell(id)?.enabled.store(true, Ordering::Release);
        Ok(())
    }

    /// Stop receiving publications. Mail already queued is still handled.
    pub fn disable(&self, id: ActorId) -> Result<(), KernelError> {
        self.cell(id)?.enabled.store(false, Ordering::Release);
        Ok(())
    }

    pub fn is_enabled(&self, id: ActorId) -> Result<bool, KernelError> {
        Ok(self.cell(id)?.enabled.load(Ordering::Acquire))
    }

    pub fn state(&self, id: ActorId) -> Result<ActorState, KernelError> {
        Ok(self.cell(id)?.state())
    }

    pub fn name(&self, id: ActorId) -> Result<&'static str, KernelError> {
        Ok(self.cell(id)?.name)
    }

    pub fn pending(&self, id: ActorId) -> Result<usize, KernelError> {
        Ok(self.cell(id)?.inbox.lock().len())
    }

    pub fn actor_count(&self) -> usize {
        self.actors.read().len()
    }

    pub fn steps_completed(&self) -> usize {
        self.steps_completed.load(Ordering::Relaxed)
    }

    /// Handle one message from the next running actor with mail. Returns
    /// false when every inbox is empty.
    pub fn step(&self) -> bool {
        let _guard = self.handler_lock.lock();

        // inboxes are only drained under the handler lock, which keeps
        // each actor's mail in order across threads
        let Some((cell, message)) = self.next_message() else {
            return false;
        };

        let mut ctx = Context::new(self, cell.id);
        match message.directive() {
            Directive::Handle => {
                cell.behavior.lock().handle(&message, &mut ctx);
            }
            Directive::Exit => {
                cell.behavior.lock().teardown(&mut ctx);
                let dropped = {
                    let mut inbox = cell.inbox.lock();
                    *cell.state.lock() = ActorState::Stopped;
                    let dropped = inbox.len();
                    inbox.clear();
                    dropped
                };
                log::debug!(
                    "actor {} ({}) stopped, {} queued messages dropped",
                    cell.id,
                    cell.name,
                    dropped
                );
            }
        }

        self.steps_completed.fetch_add(1, Ordering::Relaxed);
        true
    }

    fn next_message(&self) -> Option<(Arc<ActorCell>, Message)> {
        let actors = self.actors.read();
        let count = actors.len();
        if count == 0 {
            return None;
        }

        let start = self.cursor.load(Ordering::Relaxed) % count;
        for offset in 0..count {
            let index = (start + offset) % count;
            let cell = &actors[index];
            if cell.state() != ActorState::Running {
                continue;
            }
            let next = cell.inbox.lock().pop_front();
            if let Some(message) = next {
                self.cursor.store(index + 1, Ordering::Relaxed);
                return Some((Arc::clone(cell), message));
            }
        }
        None
    }

    /// Step until every inbox is empty. Returns the number of messages
    /// handled.
    pub fn run_until_idle(&self) -> usize {
        let mut handled = 0;
        while self.step() {
            handled += 1;
        }
        handled
    }

    /// Step forever, spinning while there is no mail
    pub fn run_forever(&self) -> ! {
        loop {
            if !self.step() {
                core::hint::spin_loop();
            }
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new(KernelConfig::default())
    }
}

/// Kernel access for the actor whose hook is running
pub struct Context<'k> {
    kernel: &'k Kernel,
    id: ActorId,
}

impl<'k> Context<'k> {
    fn new(kernel: &'k Kernel, id: ActorId) -> Self {
        Self { kernel, id }
    }

    /// The running actor
    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn kernel(&self) -> &'k Kernel {
        self.kernel
    }

    pub fn dispatch(&self, to: ActorId, message: Message) -> Result<(), KernelError> {
        self.kernel.dispatch(to, message)
    }

    /// Queue a message for the running actor itself
    pub fn dispatch_self(&self, message: Message) -> Result<(), KernelError> {
        self.kernel.dispatch(self.id, message)
    }

    pub fn publish(&self, message: Message) -> usize {
        self.kernel.publish(self.id, message).unwrap_or(0)
    }

    /// Receive what `publisher` publishes
    pub fn subscribe(&self, publisher: ActorId) -> Result<(), KernelError> {
        self.kernel.subscribe(self.id, publisher)
    }

    pub fn unsubscribe(&self, publisher: ActorId) -> Result<(), KernelError> {
        self.kernel.unsubscribe(self.id, publisher)
    }

    /// Have `subscriber` receive what the running actor publishes
    pub fn add_subscriber(&self, subscriber: ActorId) -> Result<(), KernelError> {
        self.kernel.subscribe(subscriber, self.id)
    }

    pub fn remove_subscriber(&self, subscriber: ActorId) -> Result<(), KernelError> {
        self.kernel.unsubscribe(subscriber, self.id)
    }

    pub fn enable(&self) {
        let _ = self.kernel.enable(self.id);
    }

    pub fn disable(&self) {
        let _ = self.kernel.disable(self.id);
    }

    /// Queue `Exit` for the running actor
    pub fn stop(&self) -> Result<(), KernelError> {
        self.kernel.stop(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::message::{Payload, Signal};
    use crate::config::MAX_SUBSCRIBERS;

    type Log = Arc<Mutex<Vec<(ActorId, i32)>>>;

    struct Recorder {
        log: Log,
    }

    impl Actor for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn handle(&mut self, message: &Message, ctx: &mut Context<'_>) {
            self.log.lock().push((ctx.id(), message.signal.0));
        }
    }

    fn recorder(kernel: &Kernel, log: &Log) -> ActorId {
        let id = kernel.spawn(Recorder { log: log.clone() });
        kernel.start(id).unwrap();
        id
    }

    #[test]
    fn test_fifo_per_actor() {
        let kernel = Kernel::default();
        let log = Log::default();
        let a = recorder(&kernel, &log);

        for signal in [1, 2, 3] {
            kernel.dispatch(a, Message::new(Signal(signal))).unwrap();
        }
        assert_eq!(kernel.run_until_idle(), 3);
        assert_eq!(*log.lock(), [(a, 1), (a, 2), (a, 3)]);
        assert_eq!(kernel.steps_completed(), 3);
    }

    #[test]
    fn test_mail_waits_until_started() {
        let kernel = Kernel::default();
        let log = Log::default();
        let id = kernel.spawn(Recorder { log: log.clone() });
        kernel.dispatch(id, Message::new(Signal(7))).unwrap();

        assert!(!kernel.step());
        kernel.start(id).unwrap();
        assert_eq!(kernel.start(id), Err(KernelError::AlreadyStarted));
        assert!(kernel.step());
        assert_eq!(*log.lock(), [(id, 7)]);
    }

    #[test]
    fn test_publish_skips_disabled() {
        let kernel = Kernel::default();
        let log = Log::default();
        let publisher = recorder(&kernel, &log);
        let first = recorder(&kernel, &log);
        let second = recorder(&kernel, &log);

        kernel.subscribe(first, publisher).unwrap();
        kernel.subscribe(second, publisher).unwrap();
        kernel.disable(second).unwrap();

        assert_eq!(kernel.publish(publisher, Message::new(Signal(5))), Ok(1));
        kernel.run_until_idle();
        assert_eq!(*log.lock(), [(first, 5)]);
    }

    #[test]
    fn test_disable_keeps_queued_mail() {
        let kernel = Kernel::default();
        let log = Log::default();
        let publisher = recorder(&kernel, &log);
        let subscriber = recorder(&kernel, &log);
        kernel.subscribe(subscriber, publisher).unwrap();

        kernel.publish(publisher, Message::new(Signal(1))).unwrap();
        kernel.disable(subscriber).unwrap();
        kernel.run_until_idle();
        assert_eq!(*log.lock(), [(subscriber, 1)]);
    }

    #[test]
    fn test_subscription_errors() {
        let kernel = Kernel::default();
        let log = Log::default();
        let publisher = recorder(&kernel, &log);
        let others: Vec<_> = (0..=MAX_SUBSCRIBERS).map(|_| recorder(&kernel, &log)).collect();

        assert_eq!(kernel.subscribe(publisher, publisher), Err(KernelError::SelfSubscription));
        for id in &others[..MAX_SUBSCRIBERS] {
            kernel.subscribe(*id, publisher).unwrap();
        }
        assert_eq!(kernel.subscribe(others[0], publisher), Err(KernelError::AlreadySubscribed));

        let before = kernel.subscribers(publisher).unwrap();
        assert_eq!(
            kernel.subscribe(others[MAX_SUBSCRIBERS], publisher),
            Err(KernelError::SubscriberLimit)
        );
        assert_eq!(kernel.subscribers(publisher).unwrap(), before);

        kernel.unsubscribe(others[0], publisher).unwrap();
        assert_eq!(kernel.unsubscribe(others[0], publisher), Err(KernelError::NotSubscribed));
        assert_eq!(kernel.subscribers(publisher).unwrap().len(), MAX_SUBSCRIBERS - 1);
    }

    #[test]
    fn test_queue_full_drops_message() {
        let kernel = Kernel::new(KernelConfig::tiny());
        let log = Log::default();
        let id = recorder(&kernel, &log);
        for signal in 0..4 {
            kernel.dispatch(id, Message::new(Signal(signal))).unwrap();
        }
        assert_eq!(kernel.dispatch(id, Message::new(Signal(9))), Err(KernelError::QueueFull));
        assert_eq!(kernel.run_until_idle(), 4);
        assert!(log.lock().iter().all(|(_, signal)| *signal != 9));
    }

    #[test]
    fn test_unknown_actor() {
        let kernel = Kernel::default();
        let ghost = ActorId::from_index(3);
        assert_eq!(kernel.dispatch(ghost, Message::default()), Err(KernelError::UnknownActor));
        assert_eq!(kernel.start(ghost), Err(KernelError::UnknownActor));
    }

    struct Lifecycle {
        events: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Actor for Lifecycle {
        fn initialize(&mut self, _ctx: &mut Context<'_>) {
            self.events.lock().push("initialize");
        }

        fn handle(&mut self, message: &Message, ctx: &mut Context<'_>) {
            self.events.lock().push("handle");
            if message.signal == Signal(1) {
                ctx.stop().unwrap();
                // queued behind the exit and never handled
                ctx.dispatch_self(Message::new(Signal(2))).unwrap();
            }
        }

        fn teardown(&mut self, _ctx: &mut Context<'_>) {
            self.events.lock().push("teardown");
        }
    }

    #[test]
    fn test_stop_runs_teardown_and_drops_rest() {
        let kernel = Kernel::default();
        let events = Arc::new(Mutex::new(Vec::new()));
        let id = kernel.spawn(Lifecycle {
            events: events.clone(),
        });
        kernel.start(id).unwrap();
        kernel.dispatch(id, Message::new(Signal(1))).unwrap();

        assert_eq!(kernel.run_until_idle(), 2);
        assert_eq!(*events.lock(), ["initialize", "handle", "teardown"]);
        assert_eq!(kernel.state(id), Ok(ActorState::Stopped));
        assert_eq!(kernel.pending(id), Ok(0));
        assert_eq!(kernel.dispatch(id, Message::new(Signal(3))), Err(KernelError::ActorStopped));
    }

    #[test]
    fn test_no_mail_survives_a_stop() {
        let kernel = Kernel::default();
        let log = Log::default();
        let id = recorder(&kernel, &log);
        let accepted = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for signal in 0..2_000 {
                    match kernel.dispatch(id, Message::new(Signal(signal))) {
                        Ok(()) => {
                            accepted.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(KernelError::QueueFull) => {}
                        Err(err) => {
                            assert_eq!(err, KernelError::ActorStopped);
                            break;
                        }
                    }
                }
            });
            scope.spawn(|| {
                kernel.dispatch(id, Message::new(Signal(-1))).ok();
                // a full inbox turns the exit away too
                while kernel.stop(id).is_err() {
                    kernel.step();
                }
                while kernel.state(id) != Ok(ActorState::Stopped) {
                    kernel.step();
                }
            });
        });

        kernel.run_until_idle();
        assert_eq!(kernel.state(id), Ok(ActorState::Stopped));
        assert_eq!(kernel.pending(id), Ok(0));
        assert!(log.lock().len() <= accepted.load(Ordering::Relaxed) + 1);
    }

    #[test]
    fn test_dispatch_cannot_forge_exit() {
        let kernel = Kernel::default();
        let log = Log::default();
        let id = recorder(&kernel, &log);
        let mut message = Message::with_payload(Signal(4), Payload::Int(1));
        message.set_directive(Directive::Exit);
        kernel.dispatch(id, message).unwrap();
        kernel.run_until_idle();
        assert_eq!(kernel.state(id), Ok(ActorState::Running));
        assert_eq!(*log.lock(), [(id, 4)]);
    }
}
