//! Physics module for platformer collision resolution
//!
//! Bodies are axis-aligned boxes moved in whole-unit steps. The resolver in
//! [`platforming`] is stateless: callers own their bodies and hand it a
//! snapshot of candidates plus a ground predicate on every call.
//!
//! # Module Organization
//!
//! - [`transform`] - Hierarchical transforms and probe transform construction
//! - [`bounding_box`] - Bounding volumes, body identity and the overlap test
//! - [`collision_layers`] - Layer bitflags used to build ground predicates
//! - [`platforming`] - The resolver operations
//! - [`body_set`] - Caller-side body storage with snapshots
//! - [`controller`] - Config-driven per-tick update built on the resolver

pub mod body_set;
pub mod bounding_box;
pub mod collision_layers;
pub mod controller;
pub mod platforming;
pub mod transform;

pub use body_set::BodySet;
pub use bounding_box::{
    BodyId, BoundingBox, BoundingBoxUtilities, BoundingVolume, DefaultBoundingBoxUtilities,
    HasVelocity,
};
pub use collision_layers::CollisionLayers;
pub use controller::{PlatformerController, StepReport};
pub use platforming::{DefaultPlatforming, MovementOutcome, Platforming};
pub use transform::{DefaultTransformUtilities, Transform, TransformUtilities};
