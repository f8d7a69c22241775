//! Movement domain: input sampling for the player body.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::movement::{InputSample, Movable, MovementInput, Player};

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut input: ResMut<MovementInput>,
) {
    // Horizontal axis
    let mut x = 0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1;
    }
    input.axis = x;

    // Jumps fire on release
    input.action_released =
        mouse.just_released(MouseButton::Left) || keyboard.just_released(KeyCode::Space);

    let cursor = windows.iter().next().and_then(Window::cursor_position);
    if let (Some(cursor), Some((camera, camera_transform))) = (cursor, cameras.iter().next()) {
        if let Ok(world) = camera.viewport_to_world_2d(camera_transform, cursor) {
            input.aim_point = Some(world);
        }
    }
}

pub(crate) fn apply_player_input(
    input: Res<MovementInput>,
    mut players: Query<&mut Movable, With<Player>>,
) {
    for mut body in &mut players {
        body.sample_input(InputSample {
            axis: input.axis,
            action_released: input.action_released,
            aim_point: input.aim_point,
        });
    }
}
