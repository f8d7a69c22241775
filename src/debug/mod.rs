//! Debug overlay for movable bodies.
//!
//! Draws the reduced ground contacts, the fall focus for the current
//! heading, and any walking locks. Toggle with F1 or backtick.

use bevy::prelude::*;

use crate::movement::Movable;
use crate::scouting::Direction;

#[derive(Resource, Debug, Default)]
pub struct DebugOverlay {
    pub visible: bool,
}

pub struct MovementDebugPlugin;

impl Plugin for MovementDebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugOverlay>()
            .add_systems(Update, toggle_overlay)
            .add_systems(
                Update,
                draw_body_gizmos.run_if(|overlay: Res<DebugOverlay>| overlay.visible),
            );
    }
}

fn toggle_overlay(keyboard: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<DebugOverlay>) {
    if keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote) {
        overlay.visible = !overlay.visible;
        info!("Movement overlay {}", if overlay.visible { "on" } else { "off" });
    }
}

fn draw_body_gizmos(bodies: Query<(&Movable, &Transform)>, mut gizmos: Gizmos) {
    let contact_color = Color::srgb(0.2, 0.9, 0.3);
    let focus_color = Color::srgb(0.9, 0.8, 0.2);
    let lock_color = Color::srgb(0.9, 0.2, 0.2);

    for (body, transform) in &bodies {
        let position = transform.translation.truncate();
        gizmos.circle_2d(position, body.radius(), Color::WHITE);

        for hit in body.analyzer().cached_hits() {
            gizmos.line_2d(position, hit.point, contact_color);
        }

        let scouter = body.scouter();
        if let Ok(offset) = scouter.fall_focus_distance(scouter.heading()) {
            let focus = position + Vec2::X * offset;
            gizmos.circle_2d(focus, body.radius() * 0.1, focus_color);
        }

        for direction in [Direction::Left, Direction::Right] {
            if let Some(probe) = scouter.locks().get(direction) {
                let top = Vec2::new(probe.x, position.y + body.radius());
                let bottom = Vec2::new(probe.x, position.y - body.radius() * 2.0);
                gizmos.line_2d(top, bottom, lock_color);
            }
        }
    }
}
