//! Hierarchical transforms for collision bodies
//!
//! A body's transform stores its local SRT plus the already-composed world
//! transform of its ancestors. Movement edits the local position; collision
//! tests read the final (world) position.

use crate::foundation::math::{Quat, Srt, Vec3};

/// Local transform of a body together with its parent's world transform
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transform {
    local: Srt,
    parent: Option<Srt>,
}

impl Transform {
    /// Create a root transform at the given local position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            local: Srt::from_translation(position),
            parent: None,
        }
    }

    /// Create a root transform from a full SRT
    pub fn from_srt(local: Srt) -> Self {
        Self { local, parent: None }
    }

    /// Builder pattern: Attach to a parent whose world transform is `parent`
    pub fn with_parent(mut self, parent: Srt) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Parent world transform, if any
    pub fn parent(&self) -> Option<&Srt> {
        self.parent.as_ref()
    }

    /// Local position relative to the parent
    pub fn local_position(&self) -> Vec3 {
        self.local.position
    }

    /// Mutable access to the local position
    pub fn local_position_mut(&mut self) -> &mut Vec3 {
        &mut self.local.position
    }

    /// Fully composed world transform
    pub fn final_srt(&self) -> Srt {
        match &self.parent {
            Some(parent) => parent.combine(&self.local),
            None => self.local,
        }
    }

    /// World-space position
    pub fn final_position(&self) -> Vec3 {
        self.final_srt().position
    }
}

/// Builds derived transforms for probe volumes
pub trait TransformUtilities {
    /// Copy of `base` with its local SRT modified; the parent is kept
    fn create_from_modified_srt_transform(
        &self,
        base: &Transform,
        scale: Vec3,
        rotation: Quat,
        translation: Vec3,
    ) -> Transform;

    /// New root transform whose local SRT is `base_final` modified
    fn create_from_modified_srt_final_transform(
        &self,
        base_final: &Srt,
        scale: Vec3,
        rotation: Quat,
        translation: Vec3,
    ) -> Transform;
}

/// Stateless [`TransformUtilities`] used by default
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTransformUtilities;

impl TransformUtilities for DefaultTransformUtilities {
    fn create_from_modified_srt_transform(
        &self,
        base: &Transform,
        scale: Vec3,
        rotation: Quat,
        translation: Vec3,
    ) -> Transform {
        Transform {
            local: base.local.modified(scale, rotation, translation),
            parent: base.parent,
        }
    }

    fn create_from_modified_srt_final_transform(
        &self,
        base_final: &Srt,
        scale: Vec3,
        rotation: Quat,
        translation: Vec3,
    ) -> Transform {
        Transform::from_srt(base_final.modified(scale, rotation, translation))
    }
}
