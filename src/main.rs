use avian2d::prelude::*;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use movable_core::movement::{Ground, Hazard, Player, load_movement_tuning};
use movable_core::{
    CategoryChanged, GameLayer, Movable, MovablePlugin, MovementCommand, MovementTuning,
};

/// Player spawn point, also the warp target.
const SPAWN: Vec2 = Vec2::new(-6.0, -1.5);
const PLAYER_RADIUS: f32 = 0.4;
/// Seed for the step platform heights.
const ROOM_SEED: u64 = 7;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Movable".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins(MovablePlugin)
    .add_systems(Startup, (spawn_camera, spawn_test_room))
    .add_systems(Startup, spawn_player.after(load_movement_tuning))
    .add_systems(Update, (send_demo_commands, log_category_changes));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(movable_core::debug::MovementDebugPlugin);

    app.run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 0.02,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(3.0, 0.0, 0.0),
    ));
}

fn spawn_block(commands: &mut Commands, center: Vec2, size: Vec2, angle: f32, color: Color) {
    commands.spawn((
        Ground,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.0))
            .with_rotation(Quat::from_rotation_z(angle.to_radians())),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Body]),
    ));
}

/// Floor with a ledge, a narrow gap, a hazard pit, a slope and step platforms.
fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    // Upper floor ending in a ledge at x = 2
    spawn_block(
        &mut commands,
        Vec2::new(-3.0, -3.4),
        Vec2::new(10.0, 0.8),
        0.0,
        ground_color,
    );
    // Lower floor, one unit down, split by a gap narrower than the body
    spawn_block(
        &mut commands,
        Vec2::new(4.0, -4.4),
        Vec2::new(4.0, 0.8),
        0.0,
        ground_color,
    );
    spawn_block(
        &mut commands,
        Vec2::new(8.15, -4.4),
        Vec2::new(3.7, 0.8),
        0.0,
        ground_color,
    );
    // Far floor past the hazard pit
    spawn_block(
        &mut commands,
        Vec2::new(14.0, -4.4),
        Vec2::new(4.0, 0.8),
        0.0,
        ground_color,
    );

    // Slope on the upper floor
    spawn_block(
        &mut commands,
        Vec2::new(-5.5, -2.7),
        Vec2::new(3.0, 0.3),
        20.0,
        platform_color,
    );

    // Walls
    for x in [-8.4, 16.4] {
        spawn_block(
            &mut commands,
            Vec2::new(x, 0.0),
            Vec2::new(0.8, 10.0),
            0.0,
            wall_color,
        );
    }

    // Step platforms
    let mut rng = ChaCha8Rng::seed_from_u64(ROOM_SEED);
    for x in [-2.5, -0.5, 1.5] {
        let lift = rng.random_range(0.3..1.2);
        spawn_block(
            &mut commands,
            Vec2::new(x, -1.5 + lift),
            Vec2::new(1.2, 0.3),
            0.0,
            platform_color,
        );
    }

    // Hazard at the bottom of the pit
    commands.spawn((
        Hazard,
        Sprite {
            color: Color::srgb(0.8, 0.2, 0.2),
            custom_size: Some(Vec2::new(2.0, 0.4)),
            ..default()
        },
        Transform::from_xyz(11.0, -6.2, 0.0),
        RigidBody::Static,
        Collider::rectangle(2.0, 0.4),
        CollisionLayers::new(GameLayer::Hazard, [GameLayer::Body]),
    ));
}

fn spawn_player(mut commands: Commands, tuning: Res<MovementTuning>) {
    let body = match Movable::new(PLAYER_RADIUS, &tuning) {
        Ok(body) => body,
        Err(err) => {
            error!("Cannot spawn player: {}", err);
            return;
        }
    };

    commands.spawn((
        (Player, body),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(Vec2::splat(PLAYER_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_translation(SPAWN.extend(1.0)),
        (
            RigidBody::Dynamic,
            Collider::circle(PLAYER_RADIUS),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Body, [GameLayer::Ground, GameLayer::Hazard]),
        ),
    ));
    info!("Spawned player at ({:.1}, {:.1})", SPAWN.x, SPAWN.y);
}

/// F: fly, G: cancel flight, T: end or start turn, H: take damage,
/// R: warp back to spawn.
fn send_demo_commands(
    keyboard: Res<ButtonInput<KeyCode>>,
    players: Query<Entity, With<Player>>,
    mut turn_over: Local<bool>,
    mut commands: MessageWriter<MovementCommand>,
) {
    let Ok(entity) = players.single() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::KeyF) {
        commands.write(MovementCommand::RequestFlight(entity));
    }
    if keyboard.just_pressed(KeyCode::KeyG) {
        commands.write(MovementCommand::CancelFlight(entity));
    }
    if keyboard.just_pressed(KeyCode::KeyT) {
        *turn_over = !*turn_over;
        if *turn_over {
            commands.write(MovementCommand::EndTurn(entity));
        } else {
            commands.write(MovementCommand::StartTurn(entity));
        }
    }
    if keyboard.just_pressed(KeyCode::KeyH) {
        commands.write(MovementCommand::TakeDamage { entity, amount: 1 });
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        commands.write(MovementCommand::ArmWarp {
            entity,
            target: SPAWN,
        });
    }
}

fn log_category_changes(mut changes: MessageReader<CategoryChanged>) {
    for change in changes.read() {
        info!("{:?}: {} -> {}", change.entity, change.from, change.to);
    }
}
