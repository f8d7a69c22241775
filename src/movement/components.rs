//! Movement domain: components and physics layers for movable bodies.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, slopes)
    Ground,
    /// Movable bodies
    Body,
    /// Surfaces that deconstruct a body on contact
    Hazard,
}

impl GameLayer {
    /// Layers that movement rays treat as solid.
    pub fn solid() -> [GameLayer; 2] {
        [GameLayer::Ground, GameLayer::Hazard]
    }
}

/// Marker for the body driven by local input.
#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for hazard colliders
#[derive(Component, Debug)]
pub struct Hazard;

/// Force the movement core added to the body's `ConstantForce` during the
/// last fixed tick. Released before the next tick so forces from other
/// systems on the same body are left alone.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct MovementForce(pub Vec2);

impl MovementForce {
    /// Take last tick's force back out of `constant`.
    pub fn release(&mut self, constant: &mut ConstantForce) {
        constant.0 -= self.0;
        self.0 = Vec2::ZERO;
    }

    pub fn apply(&mut self, constant: &mut ConstantForce, force: Vec2) {
        constant.0 += force;
        self.0 += force;
    }
}
