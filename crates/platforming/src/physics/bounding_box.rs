//! Axis-aligned bounding volumes and the overlap test
//!
//! A volume spans `[x, x + width] x [y, y + height]` in world space, where
//! `(x, y)` is the final position of its transform. Width and height are not
//! affected by the transform's scale.

use crate::foundation::math::Vec3;

use super::collision_layers::CollisionLayers;
use super::transform::Transform;

slotmap::new_key_type! {
    /// Stable identity of a body, used to keep a body out of its own scans
    pub struct BodyId;
}

/// Anything with a signed 2D speed
pub trait HasVelocity {
    /// Horizontal speed
    fn x_speed(&self) -> f32;

    /// Vertical speed (+Y is down)
    fn y_speed(&self) -> f32;

    /// Set horizontal speed
    fn set_x_speed(&mut self, speed: f32);

    /// Set vertical speed
    fn set_y_speed(&mut self, speed: f32);
}

/// A movable axis-aligned volume: the unit of collision
pub trait BoundingVolume: HasVelocity {
    /// Identity of the body; probe volumes have none
    fn id(&self) -> Option<BodyId>;

    /// Extent along X
    fn width(&self) -> f32;

    /// Extent along Y
    fn height(&self) -> f32;

    /// The body's transform
    fn transform(&self) -> &Transform;

    /// Mutable access to the body's transform
    fn transform_mut(&mut self) -> &mut Transform;

    /// World-space position of the volume's origin corner
    fn final_position(&self) -> Vec3 {
        self.transform().final_position()
    }

    /// Whether `other` is this same body
    fn is_same_body<O: BoundingVolume + ?Sized>(&self, other: &O) -> bool {
        matches!((self.id(), other.id()), (Some(a), Some(b)) if a == b)
    }
}

/// Concrete bounding box with velocity and layer membership
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub(crate) id: Option<BodyId>,

    /// Extent along X
    pub width: f32,

    /// Extent along Y
    pub height: f32,

    /// Position of the top-left corner
    pub transform: Transform,

    /// Horizontal speed in units per tick
    pub x_speed: f32,

    /// Vertical speed in units per tick
    pub y_speed: f32,

    /// Layers this body belongs to
    pub layers: CollisionLayers,
}

impl BoundingBox {
    /// Create a stationary box with its top-left corner at `(x, y)`
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: None,
            width,
            height,
            transform: Transform::from_position(Vec3::new(x, y, 0.0)),
            x_speed: 0.0,
            y_speed: 0.0,
            layers: CollisionLayers::empty(),
        }
    }

    /// Create an anonymous volume for testing a hypothetical position
    pub fn probe(
        width: f32,
        height: f32,
        transform: Transform,
        x_speed: f32,
        y_speed: f32,
    ) -> Self {
        Self {
            id: None,
            width,
            height,
            transform,
            x_speed,
            y_speed,
            layers: CollisionLayers::empty(),
        }
    }

    /// Builder pattern: Set layers
    pub fn with_layers(mut self, layers: CollisionLayers) -> Self {
        self.layers = layers;
        self
    }

    /// Builder pattern: Set velocity
    pub fn with_velocity(mut self, x_speed: f32, y_speed: f32) -> Self {
        self.x_speed = x_speed;
        self.y_speed = y_speed;
        self
    }

    /// Builder pattern: Replace the transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder pattern: Assign an identity
    ///
    /// [`BodySet`](super::BodySet) does this on insert; use it directly when
    /// bodies live in your own storage.
    pub fn with_id(mut self, id: BodyId) -> Self {
        self.id = Some(id);
        self
    }
}

impl HasVelocity for BoundingBox {
    fn x_speed(&self) -> f32 {
        self.x_speed
    }

    fn y_speed(&self) -> f32 {
        self.y_speed
    }

    fn set_x_speed(&mut self, speed: f32) {
        self.x_speed = speed;
    }

    fn set_y_speed(&mut self, speed: f32) {
        self.y_speed = speed;
    }
}

impl BoundingVolume for BoundingBox {
    fn id(&self) -> Option<BodyId> {
        self.id
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// Overlap test between two volumes
pub trait BoundingBoxUtilities {
    /// Whether `a` and `b` intersect
    fn overlaps<A, B>(&self, a: &A, b: &B) -> bool
    where
        A: BoundingVolume + ?Sized,
        B: BoundingVolume + ?Sized;
}

/// Closed-interval AABB test in world space
///
/// Touching edges count as overlapping, so unit-stepped movement comes to
/// rest one unit away from a blocking body.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBoundingBoxUtilities;

impl BoundingBoxUtilities for DefaultBoundingBoxUtilities {
    fn overlaps<A, B>(&self, a: &A, b: &B) -> bool
    where
        A: BoundingVolume + ?Sized,
        B: BoundingVolume + ?Sized,
    {
        let pa = a.final_position();
        let pb = b.final_position();

        pa.x <= pb.x + b.width()
            && pb.x <= pa.x + a.width()
            && pa.y <= pb.y + b.height()
            && pb.y <= pa.y + a.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Srt;
    use slotmap::SlotMap;

    #[test]
    fn test_overlapping_boxes() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 10.0, 10.0);

        assert!(DefaultBoundingBoxUtilities.overlaps(&a, &b));
        assert!(DefaultBoundingBoxUtilities.overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let right = BoundingBox::new(10.0, 0.0, 10.0, 10.0);
        let below = BoundingBox::new(0.0, 10.0, 10.0, 10.0);

        assert!(DefaultBoundingBoxUtilities.overlaps(&a, &right));
        assert!(DefaultBoundingBoxUtilities.overlaps(&a, &below));
    }

    #[test]
    fn test_separated_boxes() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);

        let overlap = DefaultBoundingBoxUtilities;
        assert!(!overlap.overlaps(&a, &BoundingBox::new(11.0, 0.0, 10.0, 10.0)));
        assert!(!overlap.overlaps(&a, &BoundingBox::new(0.0, 11.0, 10.0, 10.0)));
        assert!(!overlap.overlaps(&a, &BoundingBox::new(-11.0, -11.0, 10.0, 10.0)));
    }

    #[test]
    fn test_overlap_uses_world_position() {
        let child = BoundingBox::new(0.0, 0.0, 10.0, 10.0).with_transform(
            Transform::from_position(Vec3::zeros())
                .with_parent(Srt::from_translation(Vec3::new(100.0, 0.0, 0.0))),
        );
        let near_origin = BoundingBox::new(5.0, 0.0, 10.0, 10.0);
        let near_parent = BoundingBox::new(105.0, 0.0, 10.0, 10.0);

        assert!(!DefaultBoundingBoxUtilities.overlaps(&child, &near_origin));
        assert!(DefaultBoundingBoxUtilities.overlaps(&child, &near_parent));
    }

    #[test]
    fn test_same_body_requires_matching_ids() {
        let mut keys: SlotMap<BodyId, ()> = SlotMap::with_key();
        let first = keys.insert(());
        let second = keys.insert(());

        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0).with_id(first);
        let a_copy = a.clone();
        let b = BoundingBox::new(0.0, 0.0, 1.0, 1.0).with_id(second);
        let anonymous = BoundingBox::new(0.0, 0.0, 1.0, 1.0);

        assert!(a.is_same_body(&a_copy));
        assert!(!a.is_same_body(&b));
        assert!(!a.is_same_body(&anonymous));
        assert!(!anonymous.is_same_body(&anonymous.clone()));
    }
}
