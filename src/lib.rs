//! Movement core for circular bodies in a 2D platformer.
//!
//! Each physics tick a [`Movable`] casts a fan of contact rays, scouts the
//! floor ahead for drops, and runs a two-layer state machine that decides
//! which forces to hand to the physics engine. The Bevy binding lives in
//! [`MovablePlugin`]; the core itself only talks to a [`PhysicsOracle`].

pub mod category;
pub mod collision;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod error;
pub mod math;
pub mod movement;
pub mod oracle;
pub mod physics;
pub mod scouting;
pub mod states;

pub use category::{Category, CategoryError, CategoryRegistry, CategoryTable, Situation};
pub use error::MovementError;
pub use movement::{
    CategoryChanged, GameLayer, InputSample, Movable, MovablePlugin, MovementCommand,
    MovementForce, MovementTuning,
};
pub use oracle::{PhysicsOracle, RayHit};
pub use physics::LocalPhysics;
