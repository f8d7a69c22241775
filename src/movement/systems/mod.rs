//! Movement domain: system modules for movable bodies.

pub(crate) mod bodies;
pub(crate) mod collisions;
pub(crate) mod input;

pub(crate) use bodies::{
    advance_input_layers, advance_movables, apply_movement_commands, rebundle_categories,
    sync_body_visibility,
};
pub(crate) use collisions::track_hazard_contacts;
pub(crate) use input::{apply_player_input, read_input};
