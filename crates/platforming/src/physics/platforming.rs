//! Discrete-step platforming resolver
//!
//! Stateless operations over caller-owned bodies. Each call receives the
//! body to act on, a snapshot of candidate bodies and a ground predicate
//! selecting which candidates are solid for that call. A body is never
//! tested against itself: candidates sharing its [`BodyId`](super::BodyId)
//! are skipped.
//!
//! +Y is down. Ground contact is probed one unit below the body, ceiling and
//! overhead contact one unit above it.

use log::trace;

use crate::foundation::math::{Quat, Vec3};

use super::bounding_box::{
    BoundingBox, BoundingBoxUtilities, BoundingVolume, DefaultBoundingBoxUtilities, HasVelocity,
};
use super::transform::{DefaultTransformUtilities, TransformUtilities};

/// Result of [`Platforming::apply_movement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementOutcome {
    /// At least one X step was kept
    pub moved_x: bool,
    /// At least one Y step was kept
    pub moved_y: bool,
    /// Number of X unit steps kept
    pub x_steps: u32,
    /// Number of Y unit steps kept
    pub y_steps: u32,
    /// X movement stopped early on a collision
    pub x_blocked: bool,
    /// Y movement stopped early on a collision
    pub y_blocked: bool,
}

impl MovementOutcome {
    /// Whether the body moved along either axis
    pub fn any(&self) -> bool {
        self.moved_x || self.moved_y
    }
}

/// Platforming operations applied to one body per call
pub trait Platforming {
    /// Add gravity to the body's speed
    fn apply_gravity<E>(&self, entity: &mut E, x_gravity: f32, y_gravity: f32)
    where
        E: HasVelocity + ?Sized;

    /// Clamp each speed to `[-|max|, |max|]`; `None` leaves that axis alone
    fn clamp_speed<E>(&self, entity: &mut E, max_x_speed: Option<f32>, max_y_speed: Option<f32>)
    where
        E: HasVelocity + ?Sized;

    /// Move by whole units, X fully before Y, stopping an axis at its first collision
    fn apply_movement<E, C, G>(
        &self,
        entity: &mut E,
        x_amount: i32,
        y_amount: i32,
        candidates: &[C],
        ground: G,
    ) -> MovementOutcome
    where
        E: BoundingVolume + ?Sized,
        C: BoundingVolume,
        G: Fn(&C) -> bool;

    /// Whether a solid body sits directly below
    fn is_on_ground<E, C, G>(&self, entity: &E, candidates: &[C], ground: G) -> bool
    where
        E: BoundingVolume + ?Sized,
        C: BoundingVolume,
        G: Fn(&C) -> bool;

    /// Whether a solid body sits directly above
    fn is_at_ceiling<E, C, G>(&self, entity: &E, candidates: &[C], ground: G) -> bool
    where
        E: BoundingVolume + ?Sized,
        C: BoundingVolume,
        G: Fn(&C) -> bool;

    /// Redirect vertical speed when a solid body touches the top of the entity
    ///
    /// With `bounce` the speed is reflected to point along gravity, otherwise
    /// it is set to `1`. Returns whether a contact was found.
    fn apply_overhead_check<E, C, G>(
        &self,
        entity: &mut E,
        candidates: &[C],
        ground: G,
        y_gravity: f32,
        bounce: bool,
    ) -> bool
    where
        E: BoundingVolume + ?Sized,
        C: BoundingVolume,
        G: Fn(&C) -> bool;

    /// Snap the local X position to the nearest cell boundary
    ///
    /// Only acts when `local_x % cell_width` lies outside
    /// `[cell_alignment, cell_width - cell_alignment]`. Corrections up to
    /// `max_adjust` are applied directly without collision checks; larger ones
    /// call `simulate_left` or `simulate_right` so the caller can walk the
    /// body towards the target. `cell_width` must be positive.
    fn perform_horizontal_alignment<E, L, R>(
        &self,
        entity: &mut E,
        cell_width: i32,
        cell_alignment: i32,
        max_adjust: i32,
        simulate_left: L,
        simulate_right: R,
    ) where
        E: BoundingVolume + ?Sized,
        L: FnOnce(&mut E),
        R: FnOnce(&mut E);

    /// Run `action` until `check` passes, at most `maximum` iterations when given
    ///
    /// In the bounded form every iteration counts, including ones where
    /// `check` already passed and `action` was skipped.
    fn apply_action_until<E, A, K>(&self, entity: &mut E, action: A, check: K, maximum: Option<u32>)
    where
        E: ?Sized,
        A: FnMut(&mut E),
        K: FnMut(&E) -> bool;
}

/// Which axis a unit step runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn unit(self, sign: f32) -> Vec3 {
        match self {
            Self::X => Vec3::new(sign, 0.0, 0.0),
            Self::Y => Vec3::new(0.0, sign, 0.0),
        }
    }
}

/// Default resolver built from a transform helper and an overlap tester
#[derive(Debug, Clone, Default)]
pub struct DefaultPlatforming<T = DefaultTransformUtilities, B = DefaultBoundingBoxUtilities> {
    transform_utilities: T,
    bounding_box_utilities: B,
}

impl DefaultPlatforming {
    /// Create a resolver with the default utilities
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, B> DefaultPlatforming<T, B>
where
    T: TransformUtilities,
    B: BoundingBoxUtilities,
{
    /// Create a resolver with custom utilities
    pub fn with_utilities(transform_utilities: T, bounding_box_utilities: B) -> Self {
        Self {
            transform_utilities,
            bounding_box_utilities,
        }
    }

    /// Step one unit at a time along `axis`, returning how many steps were kept
    ///
    /// The first step that overlaps a collidable is undone and ends the loop.
    fn step_axis<E, C>(&self, entity: &mut E, axis: Axis, amount: i32, collidable: &[&C]) -> u32
    where
        E: BoundingVolume + ?Sized,
        C: BoundingVolume,
    {
        let step = axis.unit(amount.signum() as f32);
        let mut kept = 0;

        for _ in 0..amount.unsigned_abs() {
            *entity.transform_mut().local_position_mut() += step;

            let blocked = collidable
                .iter()
                .any(|other| self.bounding_box_utilities.overlaps(&*entity, *other));
            if blocked {
                *entity.transform_mut().local_position_mut() -= step;
                trace!("{axis:?} movement blocked after {kept} of {} steps", amount.unsigned_abs());
                break;
            }
            kept += 1;
        }

        kept
    }

    /// Probe one unit above or below the entity and look for a solid contact
    /// on that side
    fn probe_contact<E, C, G>(&self, entity: &E, candidates: &[C], ground: G, y_offset: f32) -> bool
    where
        E: BoundingVolume + ?Sized,
        C: BoundingVolume,
        G: Fn(&C) -> bool,
    {
        let probe = BoundingBox::probe(
            entity.width(),
            entity.height(),
            self.transform_utilities.create_from_modified_srt_transform(
                entity.transform(),
                Vec3::new(1.0, 1.0, 1.0),
                Quat::identity(),
                Vec3::new(0.0, y_offset, 0.0),
            ),
            entity.x_speed(),
            entity.y_speed(),
        );
        let own_y = entity.final_position().y;

        candidates
            .iter()
            .filter(|&candidate| ground(candidate))
            .filter(|&candidate| !entity.is_same_body(candidate))
            .any(|candidate| {
                if !self.bounding_box_utilities.overlaps(&probe, candidate) {
                    return false;
                }
                let other_y = candidate.final_position().y;
                if y_offset > 0.0 {
                    other_y > own_y
                } else {
                    other_y < own_y
                }
            })
    }
}

impl<T, B> Platforming for DefaultPlatforming<T, B>
where
    T: TransformUtilities,
    B: BoundingBoxUtilities,
{
    fn apply_gravity<E>(&self, entity: &mut E, x_gravity: f32, y_gravity: f32)
    where
        E: HasVelocity + ?Sized,
    {
        entity.set_x_speed(entity.x_speed() + x_gravity);
        entity.set_y_speed(entity.y_speed() + y_gravity);
    }

    fn clamp_speed<E>(&self, entity: &mut E, max_x_speed: Option<f32>, max_y_speed: Option<f32>)
    where
        E: HasVelocity + ?Sized,
    {
        // A NaN limit bounds nothing
        if let Some(limit) = max_x_speed.map(f32::abs).filter(|limit| !limit.is_nan()) {
            entity.set_x_speed(entity.x_speed().clamp(-limit, limit));
        }

        if let Some(limit) = max_y_speed.map(f32::abs).filter(|limit| !limit.is_nan()) {
            entity.set_y_speed(entity.y_speed().clamp(-limit, limit));
        }
    }

    fn apply_movement<E, C, G>(
        &self,
        entity: &mut E,
        x_amount: i32,
        y_amount: i32,
        candidates: &[C],
        ground: G,
    ) -> MovementOutcome
    where
        E: BoundingVolume + ?Sized,
        C: BoundingVolume,
        G: Fn(&C) -> bool,
    {
        let collidable: Vec<&C> = candidates
            .iter()
            .filter(|&candidate| ground(candidate))
            .filter(|&candidate| !entity.is_same_body(candidate))
            .collect();

        let x_steps = self.step_axis(entity, Axis::X, x_amount, &collidable);
        let y_steps = self.step_axis(entity, Axis::Y, y_amount, &collidable);

        MovementOutcome {
            moved_x: x_steps > 0,
            moved_y: y_steps > 0,
            x_steps,
            y_steps,
            x_blocked: x_steps < x_amount.unsigned_abs(),
            y_blocked: y_steps < y_amount.unsigned_abs(),
        }
    }

    fn is_on_ground<E, C, G>(&self, entity: &E, candidates: &[C], ground: G) -> bool
    where
        E: BoundingVolume + ?Sized,
        C: BoundingVolume,
        G: Fn(&C) -> bool,
    {
        self.probe_contact(entity, candidates, ground, 1.0)
    }

    fn is_at_ceiling<E, C, G>(&self, entity: &E, candidates: &[C], ground: G) -> bool
    where
        E: BoundingVolume + ?Sized,
        C: BoundingVolume,
        G: Fn(&C) -> bool,
    {
        self.probe_contact(entity, candidates, ground, -1.0)
    }

    fn apply_overhead_check<E, C, G>(
        &self,
        entity: &mut E,
        candidates: &[C],
        ground: G,
        y_gravity: f32,
        bounce: bool,
    ) -> bool
    where
        E: BoundingVolume + ?Sized,
        C: BoundingVolume,
        G: Fn(&C) -> bool,
    {
        let probe = BoundingBox::probe(
            entity.width(),
            entity.height(),
            self.transform_utilities.create_from_modified_srt_final_transform(
                &entity.transform().final_srt(),
                Vec3::new(1.0, 1.0, 1.0),
                Quat::identity(),
                Vec3::new(0.0, -1.0, 0.0),
            ),
            0.0,
            0.0,
        );

        let hit = candidates
            .iter()
            .filter(|&candidate| ground(candidate))
            .filter(|&candidate| !entity.is_same_body(candidate))
            .any(|candidate| self.bounding_box_utilities.overlaps(&probe, candidate));
        if !hit {
            return false;
        }

        let y_speed = match (bounce, y_gravity > 0.0) {
            (false, _) => 1.0,
            (true, true) => entity.y_speed().abs(),
            (true, false) => -entity.y_speed().abs(),
        };
        trace!("Overhead contact, y speed {} -> {y_speed}", entity.y_speed());
        entity.set_y_speed(y_speed);
        true
    }

    fn perform_horizontal_alignment<E, L, R>(
        &self,
        entity: &mut E,
        cell_width: i32,
        cell_alignment: i32,
        max_adjust: i32,
        simulate_left: L,
        simulate_right: R,
    ) where
        E: BoundingVolume + ?Sized,
        L: FnOnce(&mut E),
        R: FnOnce(&mut E),
    {
        debug_assert!(cell_width > 0, "cell width must be positive, got {cell_width}");

        let x = entity.transform().local_position().x;
        let width = cell_width as f32;
        let rem = x % width;
        if rem >= cell_alignment as f32 && rem <= (cell_width - cell_alignment) as f32 {
            return;
        }

        let target_x = (x / width).round_ties_even() * width;
        let adjust = target_x - x;
        if adjust.abs() > max_adjust as f32 {
            trace!("Alignment from {x} to {target_x} exceeds {max_adjust}, simulating");
            if target_x > x {
                simulate_right(entity);
            } else if target_x < x {
                simulate_left(entity);
            }
        } else {
            entity.transform_mut().local_position_mut().x += adjust;
        }
    }

    fn apply_action_until<E, A, K>(
        &self,
        entity: &mut E,
        mut action: A,
        mut check: K,
        maximum: Option<u32>,
    )
    where
        E: ?Sized,
        A: FnMut(&mut E),
        K: FnMut(&E) -> bool,
    {
        match maximum {
            None => {
                while !check(&*entity) {
                    action(&mut *entity);
                }
            }
            Some(maximum) => {
                for _ in 0..maximum {
                    if !check(&*entity) {
                        action(&mut *entity);
                    }
                }
            }
        }
    }
}
