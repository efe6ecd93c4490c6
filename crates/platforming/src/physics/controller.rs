//! Per-tick platformer update for a single body
//!
//! Runs the usual sequence of resolver calls driven by a
//! [`PlatformingConfig`]: gravity, speed clamp, overhead check, unit-stepped
//! movement, contact queries and optional tile alignment.

use log::trace;

use crate::config::PlatformingConfig;

use super::body_set::BodySet;
use super::bounding_box::{BodyId, BoundingBox};
use super::collision_layers::CollisionLayers;
use super::platforming::{DefaultPlatforming, MovementOutcome, Platforming};

/// What happened to a body during one [`PlatformerController::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Movement result for this tick
    pub outcome: MovementOutcome,
    /// A solid body was hit from below while moving against gravity
    pub hit_overhead: bool,
    /// Resting on a solid body after moving
    pub on_ground: bool,
    /// Touching a solid body above after moving
    pub at_ceiling: bool,
}

/// Drives dynamic bodies through one simulation tick
#[derive(Debug, Clone)]
pub struct PlatformerController<P = DefaultPlatforming> {
    config: PlatformingConfig,
    platforming: P,
}

impl PlatformerController {
    /// Create a controller using the default resolver
    pub fn new(config: PlatformingConfig) -> Self {
        Self::with_platforming(config, DefaultPlatforming::new())
    }
}

impl<P: Platforming> PlatformerController<P> {
    /// Create a controller around a specific resolver
    pub fn with_platforming(config: PlatformingConfig, platforming: P) -> Self {
        Self { config, platforming }
    }

    /// Active configuration
    pub fn config(&self) -> &PlatformingConfig {
        &self.config
    }

    /// Resolver used for every call
    pub fn platforming(&self) -> &P {
        &self.platforming
    }

    /// Advance one body by one tick against `candidates`
    ///
    /// An axis that stops short of its requested distance has its speed
    /// reset to zero.
    pub fn step(&self, body: &mut BoundingBox, candidates: &[BoundingBox]) -> StepReport {
        let config = &self.config;
        let platforming = &self.platforming;
        let ground = CollisionLayers::ground_filter(config.ground_mask);

        platforming.apply_gravity(body, config.x_gravity, config.y_gravity);
        platforming.clamp_speed(body, config.max_x_speed, config.max_y_speed);

        let against_gravity = body.y_speed * config.y_gravity < 0.0;
        let hit_overhead = against_gravity
            && platforming.apply_overhead_check(
                body,
                candidates,
                ground,
                config.y_gravity,
                config.bounce,
            );

        let dx = body.x_speed.round() as i32;
        let dy = body.y_speed.round() as i32;
        let outcome = platforming.apply_movement(body, dx, dy, candidates, ground);
        if outcome.x_blocked {
            body.x_speed = 0.0;
        }
        if outcome.y_blocked {
            body.y_speed = 0.0;
        }

        let on_ground = platforming.is_on_ground(body, candidates, ground);
        let at_ceiling = platforming.is_at_ceiling(body, candidates, ground);

        if let Some(alignment) = config.alignment {
            if on_ground && dx == 0 {
                platforming.perform_horizontal_alignment(
                    body,
                    alignment.cell_width,
                    alignment.cell_alignment,
                    alignment.max_adjust,
                    |entity| {
                        platforming.apply_movement(entity, -1, 0, candidates, ground);
                    },
                    |entity| {
                        platforming.apply_movement(entity, 1, 0, candidates, ground);
                    },
                );
            }
        }

        trace!(
            "Body {:?} at {:?} speed ({}, {}) on_ground={on_ground} at_ceiling={at_ceiling}",
            body.id,
            body.transform.local_position(),
            body.x_speed,
            body.y_speed,
        );

        StepReport {
            outcome,
            hit_overhead,
            on_ground,
            at_ceiling,
        }
    }

    /// Step each listed body in order, snapshotting the set before each one
    ///
    /// Bodies later in `dynamic` see the already-updated positions of earlier
    /// ones. Ids no longer in the set are skipped.
    pub fn step_bodies(
        &self,
        bodies: &mut BodySet,
        dynamic: &[BodyId],
    ) -> Vec<(BodyId, StepReport)> {
        let mut reports = Vec::with_capacity(dynamic.len());

        for &id in dynamic {
            let candidates = bodies.snapshot();
            if let Some(body) = bodies.get_mut(id) {
                reports.push((id, self.step(body, &candidates)));
            }
        }

        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlignmentConfig;
    use approx::assert_relative_eq;

    fn floor() -> BoundingBox {
        BoundingBox::new(0.0, 100.0, 320.0, 16.0).with_layers(CollisionLayers::SOLID)
    }

    #[test]
    fn test_body_falls_and_lands() {
        let controller = PlatformerController::new(PlatformingConfig::default());
        let mut bodies = BodySet::new();
        bodies.insert(floor());
        let player = bodies
            .insert(BoundingBox::new(40.0, 0.0, 16.0, 32.0).with_layers(CollisionLayers::PLAYER));

        let mut landed = false;
        for _ in 0..120 {
            let reports = controller.step_bodies(&mut bodies, &[player]);
            landed = reports[0].1.on_ground;
            if landed {
                break;
            }
        }

        let body = bodies.get(player).unwrap();
        assert!(landed);
        // Rests one unit above the floor
        assert_relative_eq!(body.transform.local_position().y + body.height, 99.0);
    }

    #[test]
    fn test_resting_body_stays_put() {
        let controller = PlatformerController::new(PlatformingConfig::default());
        let candidates = [floor()];
        let mut body = BoundingBox::new(40.0, 67.0, 16.0, 32.0);

        for _ in 0..10 {
            let report = controller.step(&mut body, &candidates);
            assert!(report.on_ground);
            assert!(!report.outcome.moved_y);
        }
        assert_relative_eq!(body.transform.local_position().y, 67.0);
        assert_relative_eq!(body.y_speed, 0.0);
    }

    #[test]
    fn test_wall_stops_horizontal_speed() {
        let config = PlatformingConfig::default().with_gravity(0.0, 0.0);
        let controller = PlatformerController::new(config);
        let candidates =
            [BoundingBox::new(30.0, 0.0, 16.0, 64.0).with_layers(CollisionLayers::SOLID)];
        let mut body = BoundingBox::new(0.0, 0.0, 16.0, 16.0).with_velocity(4.0, 0.0);

        let mut blocked = false;
        for _ in 0..10 {
            blocked |= controller.step(&mut body, &candidates).outcome.x_blocked;
        }

        assert!(blocked);
        assert_relative_eq!(body.x_speed, 0.0);
        assert_relative_eq!(body.transform.local_position().x, 13.0);
    }

    #[test]
    fn test_overhead_hit_pushes_body_down() {
        let controller = PlatformerController::new(PlatformingConfig::default());
        let candidates =
            [BoundingBox::new(0.0, 0.0, 320.0, 16.0).with_layers(CollisionLayers::SOLID)];
        let mut body = BoundingBox::new(40.0, 17.0, 16.0, 32.0).with_velocity(0.0, -6.0);

        let report = controller.step(&mut body, &candidates);

        assert!(report.hit_overhead);
        assert!(body.transform.local_position().y > 17.0);
    }

    #[test]
    fn test_alignment_snaps_idle_grounded_body() {
        let config = PlatformingConfig::default().with_alignment(AlignmentConfig {
            cell_width: 16,
            cell_alignment: 2,
            max_adjust: 2,
        });
        let controller = PlatformerController::new(config);
        let candidates = [floor()];
        let mut body = BoundingBox::new(47.0, 67.0, 16.0, 32.0);

        let report = controller.step(&mut body, &candidates);

        assert!(report.on_ground);
        assert_relative_eq!(body.transform.local_position().x, 48.0);
    }

    #[test]
    fn test_alignment_walks_large_corrections() {
        let config = PlatformingConfig::default().with_alignment(AlignmentConfig {
            cell_width: 16,
            cell_alignment: 4,
            max_adjust: 1,
        });
        let controller = PlatformerController::new(config);
        let candidates = [floor()];
        let mut body = BoundingBox::new(45.0, 67.0, 16.0, 32.0);

        controller.step(&mut body, &candidates);
        assert_relative_eq!(body.transform.local_position().x, 46.0);
        controller.step(&mut body, &candidates);
        assert_relative_eq!(body.transform.local_position().x, 47.0);
        controller.step(&mut body, &candidates);
        assert_relative_eq!(body.transform.local_position().x, 48.0);
    }

    #[test]
    fn test_nan_speed_limit_does_not_panic() {
        let config = PlatformingConfig::default().with_max_speed(None, Some(f32::NAN));
        let controller = PlatformerController::new(config);
        let mut body = BoundingBox::new(0.0, 0.0, 16.0, 16.0).with_velocity(0.0, 2.0);

        let report = controller.step(&mut body, &[]);

        assert_eq!(report.outcome.y_steps, 3);
        assert_relative_eq!(body.y_speed, 2.5);
    }

    #[test]
    fn test_bounce_reflects_overhead_hit() {
        let config = PlatformingConfig::default().with_bounce(true);
        let controller = PlatformerController::new(config);
        assert!(controller.config().bounce);

        let candidates =
            [BoundingBox::new(0.0, 0.0, 320.0, 16.0).with_layers(CollisionLayers::SOLID)];
        let mut body = BoundingBox::new(40.0, 17.0, 16.0, 32.0).with_velocity(0.0, -6.0);

        let report = controller.step(&mut body, &candidates);

        assert!(report.hit_overhead);
        assert_relative_eq!(body.y_speed, 5.5);
    }

    #[test]
    fn test_ground_mask_selects_solid_layers() {
        let platform = [BoundingBox::new(0.0, 100.0, 320.0, 16.0)
            .with_layers(CollisionLayers::PLATFORM)];
        let mut body = BoundingBox::new(40.0, 67.0, 16.0, 32.0);

        let standing = PlatformerController::new(PlatformingConfig::default());
        assert!(standing.step(&mut body.clone(), &platform).on_ground);

        let config = PlatformingConfig::default().with_ground_mask(CollisionLayers::SOLID);
        let falling = PlatformerController::new(config);
        let report = falling.step(&mut body, &platform);

        assert!(!report.on_ground);
        assert!(report.outcome.moved_y);
    }

    #[test]
    fn test_step_bodies_skips_missing_ids() {
        let controller = PlatformerController::new(PlatformingConfig::default());
        let mut bodies = BodySet::new();
        let gone = bodies.insert(BoundingBox::new(0.0, 0.0, 4.0, 4.0));
        bodies.remove(gone);

        assert!(controller.step_bodies(&mut bodies, &[gone]).is_empty());
    }
}
