//! Scenes group the actors of one screen so they can be switched on and off
//! together. Members of an inactive scene stay disabled and miss
//! publications such as `TICK`.
use crate::actor::kernel::{ActorId, Kernel, KernelError};
use crate::actor::message::{Message, Signal};
use crate::actor::subscribers::{IdList, ListError};
use crate::config::MAX_SCENE_ACTORS;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    members: IdList<MAX_SCENE_ACTORS>,
    active: bool,
}

impl Scene {
    pub const fn new() -> Self {
        Self {
            members: IdList::new(),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn members(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.members.iter()
    }

    /// Add `id` and enable or disable it to match the scene
    pub fn add(&mut self, kernel: &Kernel, id: ActorId) -> Result<(), KernelError> {
        self.members.insert(id).map_err(|err| match err {
            ListError::Duplicate => KernelError::AlreadyInScene,
            _ => KernelError::SceneFull,
        })?;

        if self.active {
            kernel.enable(id)
        } else {
            kernel.disable(id)
        }
    }

    pub fn remove(&mut self, id: ActorId) -> Result<(), KernelError> {
        self.members
            .remove(id)
            .map_err(|_| KernelError::NotInScene)
    }

    /// Enable every member and send it `SCENE_ENTER`
    pub fn enter(&mut self, kernel: &Kernel) {
        self.active = true;
        for id in self.members.iter() {
            if let Err(err) = kernel
                .enable(id)
                .and_then(|_| kernel.dispatch(id, Message::new(Signal::SCENE_ENTER)))
            {
                log::warn!("scene enter for {} failed: {}", id, err);
            }
        }
    }

    /// Disable every member and send it `SCENE_EXIT`
    pub fn exit(&mut self, kernel: &Kernel) {
        self.active = false;
        for id in self.members.iter() {
            if let Err(err) = kernel
                .disable(id)
                .and_then(|_| kernel.dispatch(id, Message::new(Signal::SCENE_EXIT)))
            {
                log::warn!("scene exit for {} failed: {}", id, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::kernel::{Actor, Context};
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use spin::Mutex;

    struct Listener(Arc<Mutex<Vec<Signal>>>);

    impl Actor for Listener {
        fn handle(&mut self, message: &Message, _ctx: &mut Context<'_>) {
            self.0.lock().push(message.signal);
        }
    }

    fn listener(kernel: &Kernel, seen: &Arc<Mutex<Vec<Signal>>>) -> ActorId {
        let id = kernel.spawn(Listener(seen.clone()));
        kernel.start(id).unwrap();
        id
    }

    #[test]
    fn test_add_matches_scene_state() {
        let kernel = Kernel::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let first = listener(&kernel, &seen);
        let second = listener(&kernel, &seen);

        let mut scene = Scene::new();
        scene.add(&kernel, first).unwrap();
        assert_eq!(kernel.is_enabled(first), Ok(false));
        assert_eq!(scene.add(&kernel, first), Err(KernelError::AlreadyInScene));

        scene.enter(&kernel);
        scene.add(&kernel, second).unwrap();
        assert_eq!(kernel.is_enabled(second), Ok(true));
        assert!(scene.is_active());
    }

    #[test]
    fn test_enter_and_exit_notify_members() {
        let kernel = Kernel::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let member = listener(&kernel, &seen);
        let mut scene = Scene::new();
        scene.add(&kernel, member).unwrap();

        scene.enter(&kernel);
        kernel.run_until_idle();
        scene.exit(&kernel);
        kernel.run_until_idle();

        // exit is still delivered because dispatch ignores the enabled flag
        assert_eq!(*seen.lock(), [Signal::SCENE_ENTER, Signal::SCENE_EXIT]);
        assert_eq!(kernel.is_enabled(member), Ok(false));
    }

    #[test]
    fn test_capacity_and_remove() {
        let kernel = Kernel::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let ids: Vec<_> = (0..=MAX_SCENE_ACTORS).map(|_| listener(&kernel, &seen)).collect();

        let mut scene = Scene::new();
        for id in &ids[..MAX_SCENE_ACTORS] {
            scene.add(&kernel, *id).unwrap();
        }
        assert_eq!(scene.add(&kernel, ids[MAX_SCENE_ACTORS]), Err(KernelError::SceneFull));

        scene.remove(ids[1]).unwrap();
        assert_eq!(scene.remove(ids[1]), Err(KernelError::NotInScene));
        let members: Vec<_> = scene.members().collect();
        assert_eq!(members, [ids[0], ids[2], ids[3], ids[4]]);
    }
}
