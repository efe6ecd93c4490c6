//! Math utilities and types
//!
//! Provides the vector and rotation types used by transforms and bounding
//! volumes, backed by nalgebra.

pub use nalgebra::{Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Scale, rotation and translation applied in that order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srt {
    /// Translation
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Srt {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Srt {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform from a translation vector
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Combine this transform (as parent) with a child transform
    pub fn combine(&self, child: &Srt) -> Srt {
        Srt {
            position: self.position + self.rotation * (self.scale.component_mul(&child.position)),
            rotation: self.rotation * child.rotation,
            scale: self.scale.component_mul(&child.scale),
        }
    }

    /// Copy of this transform with an extra scale, rotation and translation
    ///
    /// The scale multiplies, the rotation post-multiplies and the translation
    /// is added to the position unrotated.
    pub fn modified(&self, scale: Vec3, rotation: Quat, translation: Vec3) -> Srt {
        Srt {
            position: self.position + translation,
            rotation: self.rotation * rotation,
            scale: self.scale.component_mul(&scale),
        }
    }
}
