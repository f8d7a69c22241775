//! Movement domain: hazard contact tracking.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{Hazard, Movable};

/// Mirror hazard contact into each body's touching flag.
pub(crate) fn track_hazard_contacts(
    mut collision_start_events: MessageReader<CollisionStart>,
    mut collision_end_events: MessageReader<CollisionEnd>,
    hazards: Query<(), With<Hazard>>,
    mut bodies: Query<&mut Movable>,
) {
    let starts = collision_start_events
        .read()
        .map(|e| (e.collider1, e.collider2, true));
    let ends = collision_end_events
        .read()
        .map(|e| (e.collider1, e.collider2, false));

    for (a, b, touching) in starts.chain(ends) {
        let other = if hazards.contains(a) {
            b
        } else if hazards.contains(b) {
            a
        } else {
            continue;
        };

        if let Ok(mut body) = bodies.get_mut(other) {
            if touching {
                debug!("[HAZARD] {:?} touched a hazard", other);
            }
            body.set_touching_hazard(touching);
        }
    }
}
