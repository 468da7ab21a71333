//! Dense per-kind entity storage with tombstones.
//!
//! `kill` only flips the slot's alive flag, so a `SlotId` handed out earlier
//! in the tick stays valid (and resolves to "dead") until `compact` runs at
//! the end of the tick.  Ids are not stable across `compact`.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(pub usize);

#[derive(Clone, Debug)]
struct Slot<T> {
    value: T,
    alive: bool,
}

#[derive(Clone, Debug)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, value: T) -> SlotId {
        self.slots.push(Slot { value, alive: true });
        SlotId(self.slots.len() - 1)
    }

    /// Tombstone a slot.  Returns `true` only for the call that actually
    /// killed it; dead or unknown ids return `false`.
    pub fn kill(&mut self, id: SlotId) -> bool {
        match self.slots.get_mut(id.0) {
            Some(slot) if slot.alive => {
                slot.alive = false;
                true
            }
            _ => false,
        }
    }

    /// `true` if `id` names a slot in this pool, dead or alive.
    pub fn contains(&self, id: SlotId) -> bool {
        id.0 < self.slots.len()
    }

    pub fn is_alive(&self, id: SlotId) -> bool {
        self.slots.get(id.0).map(|s| s.alive).unwrap_or(false)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.0)
            .filter(|s| s.alive)
            .map(|s| &s.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.0)
            .filter(|s| s.alive)
            .map(|s| &mut s.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.alive)
            .map(|(i, s)| (SlotId(i), &s.value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.alive)
            .map(|(i, s)| (SlotId(i), &mut s.value))
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots including tombstones.
    pub fn capacity_used(&self) -> usize {
        self.slots.len()
    }

    /// Drop every tombstoned slot, preserving the order of live ones.
    pub fn compact(&mut self) {
        self.slots.retain(|s| s.alive);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
