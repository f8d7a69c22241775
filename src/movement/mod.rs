//! Movement domain: movable bodies, tuning, and plugin wiring.

mod body;
mod components;
mod events;
mod loader;
mod resources;
mod systems;


pub use body::{InputSample, Movable};
pub use components::{GameLayer, Ground, Hazard, MovementForce, Player};
pub use events::{CategoryChanged, MovementCommand};
pub use loader::{TUNING_PATH, TuningLoadError, load_movement_tuning, load_tuning, parse_tuning};
pub use resources::{MovementInput, MovementTuning, TUNING_SCHEMA_VERSION};

use bevy::prelude::*;

use crate::category::{CategoryRegistry, CategoryTable};
use crate::movement::systems::{
    advance_input_layers, advance_movables, apply_movement_commands, apply_player_input,
    read_input, rebundle_categories, sync_body_visibility, track_hazard_contacts,
};

pub struct MovablePlugin;

impl Plugin for MovablePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .init_resource::<CategoryRegistry>()
            .init_resource::<CategoryTable>()
            .add_message::<MovementCommand>()
            .add_message::<CategoryChanged>()
            .add_systems(Startup, load_movement_tuning)
            .add_systems(
                Update,
                (
                    read_input,
                    apply_player_input,
                    apply_movement_commands,
                    advance_input_layers,
                )
                    .chain(),
            )
            .add_systems(Update, sync_body_visibility)
            .add_systems(
                FixedUpdate,
                (
                    rebundle_categories,
                    track_hazard_contacts,
                    advance_movables,
                )
                    .chain(),
            );
    }
}
