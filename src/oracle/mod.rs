//! Physics oracle: the rigid-body capability the movement core drives.
//!
//! The core never integrates motion itself. It reads body state and issues
//! force, impulse and sleep commands through [`PhysicsOracle`]; the engine
//! binding lives in [`avian`].

pub mod avian;
#[cfg(test)]
pub(crate) mod testing;

use bevy::prelude::*;

/// A ray that struck solid geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    pub distance: f32,
}

/// Queries and commands against one 2D rigid body and the world around it.
pub trait PhysicsOracle {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn mass(&self) -> f32;
    /// World gravity vector before the body's scale is applied.
    fn gravity(&self) -> Vec2;
    fn gravity_scale(&self) -> f32;
    fn is_awake(&self) -> bool;

    /// Cast a ray against solid geometry, ignoring the body itself.
    /// `direction` need not be normalized; a zero direction never hits.
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit>;

    fn add_force(&mut self, force: Vec2);
    fn add_impulse(&mut self, impulse: Vec2);
    fn set_velocity(&mut self, velocity: Vec2);
    fn set_position(&mut self, position: Vec2);
    fn sleep(&mut self);
    fn wake_up(&mut self);
}
