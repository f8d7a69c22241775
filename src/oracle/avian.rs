//! avian2d binding for [`PhysicsOracle`].
//!
//! Built per body inside a fixed-step system. Forces are accumulated into the
//! body's `ConstantForce` and tracked in [`MovementForce`] so the next tick can
//! take them back out; avian integrates them alongside gravity. Impulses are
//! applied directly to velocity as `impulse / mass`. Sleeping locks both
//! translation axes, which keeps gravity from moving the body until it wakes.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{PhysicsOracle, RayHit};
use crate::movement::MovementForce;

/// `axes` with translation locked. Rotation locks are kept.
pub fn sleeping_axes(axes: LockedAxes) -> LockedAxes {
    axes.lock_translation_x().lock_translation_y()
}

/// `axes` with translation unlocked. Rotation locks are kept.
pub fn waking_axes(axes: LockedAxes) -> LockedAxes {
    axes.unlock_translation_x().unlock_translation_y()
}

pub struct AvianOracle<'a, 'w, 's> {
    spatial: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
    transform: &'a mut Transform,
    velocity: &'a mut LinearVelocity,
    force: &'a mut ConstantForce,
    drive: &'a mut MovementForce,
    axes: &'a mut LockedAxes,
    mass: f32,
    gravity: Vec2,
    gravity_scale: f32,
}

impl<'a, 'w, 's> AvianOracle<'a, 'w, 's> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spatial: &'a SpatialQuery<'w, 's>,
        filter: SpatialQueryFilter,
        transform: &'a mut Transform,
        velocity: &'a mut LinearVelocity,
        force: &'a mut ConstantForce,
        drive: &'a mut MovementForce,
        axes: &'a mut LockedAxes,
        mass: Option<&ComputedMass>,
        gravity: Vec2,
        gravity_scale: Option<&GravityScale>,
    ) -> Self {
        let mass = mass
            .map(|m| m.value())
            .filter(|m| *m > 0.0 && m.is_finite())
            .unwrap_or(1.0);
        Self {
            spatial,
            filter,
            transform,
            velocity,
            force,
            drive,
            axes,
            mass,
            gravity,
            gravity_scale: gravity_scale.map_or(1.0, |g| g.0),
        }
    }
}

impl PhysicsOracle for AvianOracle<'_, '_, '_> {
    fn position(&self) -> Vec2 {
        self.transform.translation.truncate()
    }

    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn is_awake(&self) -> bool {
        !(self.axes.is_translation_x_locked() && self.axes.is_translation_y_locked())
    }

    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        let dir = Dir2::new(direction).ok()?;
        self.spatial
            .cast_ray(origin, dir, max_distance, true, &self.filter)
            .map(|hit| RayHit {
                point: origin + *dir * hit.distance,
                distance: hit.distance,
            })
    }

    fn add_force(&mut self, force: Vec2) {
        self.drive.apply(&mut *self.force, force);
    }

    fn add_impulse(&mut self, impulse: Vec2) {
        self.velocity.0 += impulse / self.mass;
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn set_position(&mut self, position: Vec2) {
        self.transform.translation.x = position.x;
        self.transform.translation.y = position.y;
    }

    fn sleep(&mut self) {
        *self.axes = sleeping_axes(*self.axes);
        self.velocity.0 = Vec2::ZERO;
    }

    fn wake_up(&mut self) {
        *self.axes = waking_axes(*self.axes);
    }
}
