//! Collision layer system for choosing which bodies count as solid
//!
//! Resolver calls take a ground predicate per call. Layers are the usual
//! source of that predicate: a body carries the layers it belongs to and a
//! query selects bodies whose layers intersect a mask.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::bounding_box::BoundingBox;

bitflags! {
    /// Layer membership of a body
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CollisionLayers: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;
        /// Enemy character layer
        const ENEMY = 1 << 1;
        /// Walls and floors that block from every side
        const SOLID = 1 << 2;
        /// Platforms the player stands on
        const PLATFORM = 1 << 3;
        /// Bodies that only act as ceilings
        const CEILING = 1 << 4;
        /// Trigger volumes (no physical response)
        const TRIGGER = 1 << 5;
        /// Pickups and collectibles
        const PICKUP = 1 << 6;
    }
}

impl CollisionLayers {
    /// Check if two bodies should collide based on their layers and masks
    ///
    /// A's layer must be in B's mask and B's layer must be in A's mask.
    ///
    /// # Example
    /// ```
    /// use platforming::physics::CollisionLayers;
    ///
    /// let player_mask = CollisionLayers::ENEMY | CollisionLayers::SOLID;
    /// let enemy_mask = CollisionLayers::PLAYER;
    ///
    /// assert!(CollisionLayers::should_collide(
    ///     CollisionLayers::PLAYER, player_mask,
    ///     CollisionLayers::ENEMY, enemy_mask,
    /// ));
    /// ```
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }

    /// Ground predicate selecting bodies on any layer in `mask`
    pub fn ground_filter(mask: Self) -> impl Fn(&BoundingBox) -> bool + Copy {
        move |body: &BoundingBox| body.layers.intersects(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_collide_mutual() {
        assert!(CollisionLayers::should_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PLAYER,
        ));
    }

    #[test]
    fn test_should_not_collide_one_way() {
        // Player wants the enemy, the enemy only wants triggers
        assert!(!CollisionLayers::should_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::TRIGGER,
        ));
    }

    #[test]
    fn test_ground_filter_matches_any_layer_in_mask() {
        let mask = CollisionLayers::SOLID | CollisionLayers::PLATFORM;
        let filter = CollisionLayers::ground_filter(mask);

        let wall = BoundingBox::new(0.0, 0.0, 16.0, 16.0).with_layers(CollisionLayers::SOLID);
        let ledge = BoundingBox::new(0.0, 0.0, 16.0, 4.0)
            .with_layers(CollisionLayers::PLATFORM | CollisionLayers::CEILING);
        let coin = BoundingBox::new(0.0, 0.0, 8.0, 8.0).with_layers(CollisionLayers::PICKUP);
        let untagged = BoundingBox::new(0.0, 0.0, 8.0, 8.0);

        assert!(filter(&wall));
        assert!(filter(&ledge));
        assert!(!filter(&coin));
        assert!(!filter(&untagged));
    }
}
