//! Caller-side storage for bodies
//!
//! The resolver never owns bodies. `BodySet` is a convenience for callers
//! that want stable ids and cheap candidate snapshots.

use slotmap::SlotMap;

use super::bounding_box::{BodyId, BoundingBox};

/// Slot-map backed collection of bounding boxes
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    bodies: SlotMap<BodyId, BoundingBox>,
}

impl BodySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body and stamp it with its new id
    pub fn insert(&mut self, body: BoundingBox) -> BodyId {
        self.bodies.insert_with_key(|id| body.with_id(id))
    }

    /// Remove a body, returning it
    pub fn remove(&mut self, id: BodyId) -> Option<BoundingBox> {
        self.bodies.remove(id)
    }

    /// Get a body by id
    pub fn get(&self, id: BodyId) -> Option<&BoundingBox> {
        self.bodies.get(id)
    }

    /// Get a mutable body by id
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut BoundingBox> {
        self.bodies.get_mut(id)
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Copy of every body, usable as a candidate list
    pub fn snapshot(&self) -> Vec<BoundingBox> {
        self.bodies.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BoundingVolume;

    #[test]
    fn test_insert_stamps_id() {
        let mut set = BodySet::new();
        let id = set.insert(BoundingBox::new(0.0, 0.0, 4.0, 4.0));

        assert_eq!(set.get(id).and_then(BoundingVolume::id), Some(id));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_snapshot_keeps_ids() {
        let mut set = BodySet::new();
        let a = set.insert(BoundingBox::new(0.0, 0.0, 4.0, 4.0));
        let b = set.insert(BoundingBox::new(8.0, 0.0, 4.0, 4.0));

        let mut ids: Vec<_> = set.snapshot().iter().filter_map(BoundingVolume::id).collect();
        ids.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut set = BodySet::new();
        let id = set.insert(BoundingBox::new(0.0, 0.0, 4.0, 4.0));
        let snapshot = set.snapshot();

        if let Some(body) = set.get_mut(id) {
            body.x_speed = 5.0;
        }
        assert!(snapshot[0].x_speed.abs() < f32::EPSILON);
    }

    #[test]
    fn test_remove() {
        let mut set = BodySet::new();
        let id = set.insert(BoundingBox::new(0.0, 0.0, 4.0, 4.0));

        assert!(set.remove(id).is_some());
        assert!(set.get(id).is_none());
        assert!(set.is_empty());
    }
}
