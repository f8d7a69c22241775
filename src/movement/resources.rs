//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

/// Current on-disk format of `movement_tuning.ron`.
pub const TUNING_SCHEMA_VERSION: u32 = 1;

/// Every constant the movement core consults. Loaded from RON at startup;
/// fields missing from the file keep their defaults.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub schema_version: u32,

    // Contact analysis
    /// Angular spacing between contact rays, in degrees.
    pub contact_angle_step: f32,
    /// Width of the contact fan centred on straight down, in degrees.
    pub contact_arc: f32,
    /// Slack added to the radius when accepting a contact ray.
    pub radius_correction: f32,

    // Look-ahead
    pub prediction_slices: usize,
    /// Fine step used when keening a fall bracket and probing escalation.
    pub keen_step: f32,
    pub max_keen: usize,
    /// Fall focus offset as a fraction of body width.
    pub focus_dist_ratio: f32,
    /// Upper bound for vertical look-ahead probes.
    pub probe_reach: f32,
    /// Height differences below this count as level ground.
    pub escalation_tolerance: f32,

    // Walking
    pub walk_velocity: f32,
    pub walk_accel: f32,
    /// Largest vertical walk component, reached on a vertical incline.
    pub walk_climb_cap: f32,
    /// Inclines at or above this angle get no gravity balancing.
    pub steep_angle: f32,
    /// Seconds of unchanged input needed to walk through a lock.
    pub lock_override_hold: f32,

    // Impulses
    pub jump_force: f32,
    pub fly_force: f32,
    /// Speeds below this count as at rest.
    pub rest_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            schema_version: TUNING_SCHEMA_VERSION,
            contact_angle_step: 0.5,
            contact_arc: 180.0,
            radius_correction: 0.01,
            prediction_slices: 10,
            keen_step: 0.001,
            max_keen: 20,
            focus_dist_ratio: 0.2,
            probe_reach: 100.0,
            escalation_tolerance: 1e-5,
            walk_velocity: 1.25,
            walk_accel: 0.7,
            walk_climb_cap: 1.0,
            steep_angle: 65.0,
            lock_override_hold: 0.4,
            jump_force: 0.3,
            fly_force: 0.2,
            rest_speed: 1e-3,
        }
    }
}

impl MovementTuning {
    /// Angular distance under which neighbouring contacts share a cluster.
    pub fn cluster_deviance(&self) -> f32 {
        self.contact_angle_step * 3.0
    }
}

/// Player intent sampled once per frame by the host.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct MovementInput {
    /// Horizontal axis discretized to -1, 0 or 1.
    pub axis: i8,
    /// Primary action released this frame.
    pub action_released: bool,
    /// World-space aim target.
    pub aim_point: Option<Vec2>,
}
