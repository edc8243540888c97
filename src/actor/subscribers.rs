//! Bounded, order preserving list of actor ids
//!
//! Entries are packed towards index 0: removing an id shifts the ones after
//! it down, so iteration stops at the first empty slot.
use crate::actor::kernel::ActorId;
use crate::config::MAX_SUBSCRIBERS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    Duplicate,
    Full,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdList<const N: usize> {
    slots: [Option<ActorId>; N],
}

/// Recipients of one actor's publications
pub type SubscriberList = IdList<MAX_SUBSCRIBERS>;

impl<const N: usize> IdList<N> {
    pub const fn new() -> Self {
        Self { slots: [None; N] }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.iter().any(|entry| entry == id)
    }

    pub fn insert(&mut self, id: ActorId) -> Result<(), ListError> {
        let mut index = 0;
        while index < N {
            match self.slots[index] {
                Some(entry) if entry == id => return Err(ListError::Duplicate),
                Some(_) => index += 1,
                None => break,
            }
        }

        if index == N {
            return Err(ListError::Full);
        }
        self.slots[index] = Some(id);
        Ok(())
    }

    pub fn remove(&mut self, id: ActorId) -> Result<(), ListError> {
        let Some(position) = self.iter().position(|entry| entry == id) else {
            return Err(ListError::Missing);
        };

        self.slots.copy_within(position + 1.., position);
        self.slots[N - 1] = None;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.slots.iter().map_while(|slot| *slot)
    }
}

impl<const N: usize> Default for IdList<N> {
    fn default() -> Self {
        Self::new()
    }
}
