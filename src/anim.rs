//! Ephemeral per-structure animation state with explicit ownership.
//!
//! Smoothed glow values are keyed by a generational handle instead of by
//! object identity, so despawning a structure removes its state
//! deterministically and a stale handle can never read another structure's
//! animation.

/// Stable handle to an animation slot. The generation field invalidates
/// references that outlive their structure.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StructureId {
    pub index: u32,
    pub generation: u32,
}

/// Smoothed visual state for one structure's influence glow.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlowAnim {
    pub alpha: f32,
    pub radius: f32,
}

/// Slot arena for animation state, free-list backed.
pub struct AnimStore<T> {
    slots: Vec<Option<T>>,
    generations: Vec<u32>,
    free_list: Vec<u32>,
    pub count: usize,
}

impl<T> AnimStore<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            generations: vec![0; capacity],
            free_list: (0..capacity as u32).rev().collect(),
            count: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> StructureId {
        if let Some(index) = self.free_list.pop() {
            let idx = index as usize;
            self.slots[idx] = Some(value);
            self.count += 1;
            StructureId {
                index,
                generation: self.generations[idx],
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Some(value));
            self.generations.push(0);
            self.count += 1;
            StructureId {
                index,
                generation: 0,
            }
        }
    }

    /// Remove the state for `id`. Bumps the slot generation so any retained
    /// copy of the handle goes stale. Returns false for already-stale ids.
    pub fn remove(&mut self, id: StructureId) -> bool {
        let idx = id.index as usize;
        if idx < self.slots.len()
            && self.generations[idx] == id.generation
            && self.slots[idx].is_some()
        {
            self.slots[idx] = None;
            self.generations[idx] += 1;
            self.free_list.push(id.index);
            self.count -= 1;
            true
        } else {
            false
        }
    }

    pub fn get(&self, id: StructureId) -> Option<&T> {
        let idx = id.index as usize;
        if idx < self.slots.len() && self.generations[idx] == id.generation {
            self.slots[idx].as_ref()
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: StructureId) -> Option<&mut T> {
        let idx = id.index as usize;
        if idx < self.slots.len() && self.generations[idx] == id.generation {
            self.slots[idx].as_mut()
        } else {
            None
        }
    }
}

/// Frame-rate independent exponential approach toward a target.
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (1.0 - (-rate * dt).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get_round_trip() {
        let mut store: AnimStore<GlowAnim> = AnimStore::new(4);
        let id = store.insert(GlowAnim { alpha: 0.5, radius: 10.0 });
        assert_eq!(store.count, 1);
        assert!((store.get(id).unwrap().alpha - 0.5).abs() < 1e-6);
    }

    #[test]
    fn remove_invalidates_stale_handles() {
        let mut store: AnimStore<GlowAnim> = AnimStore::new(4);
        let id = store.insert(GlowAnim::default());
        assert!(store.remove(id));
        assert!(store.get(id).is_none());
        assert!(!store.remove(id));

        // The freed slot is reused under a new generation; the old handle
        // must not alias the new occupant.
        let new_id = store.insert(GlowAnim { alpha: 1.0, radius: 1.0 });
        assert_eq!(new_id.index, id.index);
        assert_ne!(new_id.generation, id.generation);
        assert!(store.get(id).is_none());
        assert!(store.get(new_id).is_some());
    }

    #[test]
    fn store_grows_past_initial_capacity() {
        let mut store: AnimStore<u32> = AnimStore::new(1);
        let a = store.insert(1);
        let b = store.insert(2);
        assert_eq!(store.count, 2);
        assert_eq!(*store.get(a).unwrap(), 1);
        assert_eq!(*store.get(b).unwrap(), 2);
    }

    #[test]
    fn approach_converges_monotonically() {
        let mut v = 0.0;
        for _ in 0..200 {
            let next = approach(v, 1.0, 6.0, 1.0 / 60.0);
            assert!(next >= v);
            v = next;
        }
        assert!((v - 1.0).abs() < 1e-3);
    }
}
