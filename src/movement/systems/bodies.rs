//! Movement domain: driving movable bodies through the physics oracle.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::category::{CategoryRegistry, CategoryTable};
use crate::movement::{
    CategoryChanged, GameLayer, Movable, MovementCommand, MovementForce, MovementTuning,
};
use crate::oracle::avian::AvianOracle;

type BodyItem = (
    Entity,
    &'static mut Movable,
    &'static mut Transform,
    &'static mut LinearVelocity,
    &'static mut ConstantForce,
    &'static mut MovementForce,
    &'static mut LockedAxes,
    Option<&'static ComputedMass>,
    Option<&'static GravityScale>,
);

fn ray_filter(entity: Entity) -> SpatialQueryFilter {
    SpatialQueryFilter::from_mask(GameLayer::solid()).with_excluded_entities([entity])
}

/// Refresh the frozen category table after registry edits.
pub(crate) fn rebundle_categories(
    registry: Res<CategoryRegistry>,
    mut table: ResMut<CategoryTable>,
) {
    if registry.is_changed() {
        debug!("Rebundling category table: {:?}", *registry);
        *table = registry.bundle();
    }
}

pub(crate) fn apply_movement_commands(
    mut commands: MessageReader<MovementCommand>,
    mut bodies: Query<&mut Movable>,
) {
    for command in commands.read() {
        let Ok(mut body) = bodies.get_mut(command.entity()) else {
            warn!("Movement command for missing body: {:?}", command);
            continue;
        };
        match *command {
            MovementCommand::StartTurn(_) => body.turn_start(),
            MovementCommand::EndTurn(_) => body.turn_end(),
            MovementCommand::TakeDamage { amount, .. } => body.take_damage(amount),
            MovementCommand::RequestFlight(_) => body.request_flight(),
            MovementCommand::CancelFlight(_) => body.cancel_flight(),
            MovementCommand::ArmWarp { target, .. } => body.arm_warp(target),
        }
    }
}

/// Variable-step input layer evaluation.
pub(crate) fn advance_input_layers(
    spatial: SpatialQuery,
    gravity: Res<Gravity>,
    table: Res<CategoryTable>,
    tuning: Res<MovementTuning>,
    mut bodies: Query<BodyItem>,
) {
    for (
        entity,
        mut body,
        mut transform,
        mut velocity,
        mut force,
        mut moved,
        mut axes,
        mass,
        scale,
    ) in &mut bodies
    {
        let mut oracle = AvianOracle::new(
            &spatial,
            ray_filter(entity),
            &mut transform,
            &mut velocity,
            &mut force,
            &mut moved,
            &mut axes,
            mass,
            gravity.0,
            scale,
        );
        body.update_input_layer(&mut oracle, &table, &tuning);
    }
}

/// Fixed-step movement update for every body.
pub(crate) fn advance_movables(
    spatial: SpatialQuery,
    gravity: Res<Gravity>,
    time: Res<Time>,
    table: Res<CategoryTable>,
    tuning: Res<MovementTuning>,
    mut bodies: Query<BodyItem>,
    mut changes: MessageWriter<CategoryChanged>,
) {
    let dt = time.delta_secs();
    for (
        entity,
        mut body,
        mut transform,
        mut velocity,
        mut force,
        mut moved,
        mut axes,
        mass,
        scale,
    ) in &mut bodies
    {
        moved.release(&mut force);
        let from = body.category();
        let mut oracle = AvianOracle::new(
            &spatial,
            ray_filter(entity),
            &mut transform,
            &mut velocity,
            &mut force,
            &mut moved,
            &mut axes,
            mass,
            gravity.0,
            scale,
        );
        let to = body.fixed_tick(&mut oracle, &table, &tuning, dt);
        if to != from {
            changes.write(CategoryChanged { entity, from, to });
        }
    }
}

/// Deconstructed bodies are hidden until they warp back.
pub(crate) fn sync_body_visibility(
    mut bodies: Query<(&Movable, &mut Visibility), Changed<Movable>>,
) {
    for (body, mut visibility) in &mut bodies {
        let wanted = if body.is_active() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}
