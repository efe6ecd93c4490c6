//! # Platforming
//!
//! Discrete-step collision resolution for 2D platformers built from
//! axis-aligned bounding boxes.
//!
//! ## Features
//!
//! - **Unit-Stepped Movement**: Bodies move one unit at a time and stop on the first
//!   blocking overlap
//! - **Contact Queries**: Ground, ceiling and overhead checks using one-unit probe volumes
//! - **Grid Alignment**: Horizontal snapping to tile cells with a collision-aware fallback
//! - **Collision Layers**: Bitflag filters for selecting which bodies count as solid
//! - **Configuration**: Physics tuning loaded from TOML or RON
//!
//! ## Coordinate Convention
//!
//! +Y points down (screen space). A positive Y gravity pulls bodies down, a
//! body is "on ground" when a solid body sits directly below it (greater Y)
//! and "at a ceiling" when one sits directly above it (smaller Y).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use platforming::prelude::*;
//!
//! let resolver = DefaultPlatforming::new();
//! let mut bodies = BodySet::new();
//!
//! bodies.insert(
//!     BoundingBox::new(0.0, 100.0, 320.0, 16.0).with_layers(CollisionLayers::SOLID),
//! );
//! let player = bodies.insert(
//!     BoundingBox::new(16.0, 0.0, 16.0, 32.0).with_layers(CollisionLayers::PLAYER),
//! );
//!
//! let solid = CollisionLayers::ground_filter(CollisionLayers::SOLID);
//! for _ in 0..60 {
//!     let candidates = bodies.snapshot();
//!     if let Some(body) = bodies.get_mut(player) {
//!         resolver.apply_gravity(body, 0.0, 0.5);
//!         resolver.clamp_speed(body, Some(4.0), Some(8.0));
//!         let dy = body.y_speed().round() as i32;
//!         resolver.apply_movement(body, 0, dy, &candidates, &solid);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{AlignmentConfig, Config, ConfigError, PlatformingConfig},
        foundation::math::{Quat, Srt, Vec3},
        physics::{
            BodyId, BodySet, BoundingBox, BoundingBoxUtilities, BoundingVolume, CollisionLayers,
            DefaultBoundingBoxUtilities, DefaultPlatforming, DefaultTransformUtilities,
            HasVelocity, MovementOutcome, PlatformerController, Platforming, StepReport,
            Transform, TransformUtilities,
        },
    };
}
