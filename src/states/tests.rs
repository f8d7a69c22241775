//! States domain: unit tests for layer priorities and history.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{ActionState, InputState, StateHistory};
use crate::category::{Category, CategoryTable, Situation};

const ACTIONS: [ActionState; 8] = [
    ActionState::Warping,
    ActionState::Flying,
    ActionState::Rising,
    ActionState::Falling,
    ActionState::Jumping,
    ActionState::Walking,
    ActionState::Sliding,
    ActionState::Static,
];

fn everything_true() -> Situation {
    Situation {
        velocity: Vec2::new(1.0, 1.0),
        grounded: false,
        move_input: 1,
        action_released: true,
        damage: 0,
        fly_requested: true,
        flight_cancelled: false,
        touching_hazard: false,
        warp_requested: true,
        warp_armed: true,
        input_locked: false,
        has_jumped: false,
        rest_speed: 1e-3,
        action: Category::Sliding,
        previous_action: Category::Static,
    }
}

fn random_situation(rng: &mut ChaCha8Rng) -> Situation {
    let pick = |rng: &mut ChaCha8Rng| rng.random_range(-1..=1) as f32;
    Situation {
        velocity: Vec2::new(pick(&mut *rng), pick(&mut *rng)),
        grounded: rng.random(),
        move_input: rng.random_range(-1..=1),
        action_released: rng.random(),
        damage: rng.random_range(0..=1),
        fly_requested: rng.random_bool(0.2),
        flight_cancelled: rng.random(),
        touching_hazard: rng.random_bool(0.2),
        warp_requested: rng.random_bool(0.3),
        warp_armed: rng.random(),
        input_locked: rng.random_bool(0.2),
        has_jumped: rng.random(),
        rest_speed: 1e-3,
        action: Category::Static,
        previous_action: Category::Unknown,
    }
}

// ----------------------------------------------------------------------------
// History
// ----------------------------------------------------------------------------

#[test]
fn test_history_is_front_inserted_and_bounded() {
    let mut history = StateHistory::with_depth(ActionState::Static, 2);
    assert_eq!(history.current(), ActionState::Static);
    assert_eq!(history.previous(), None);

    history.push(ActionState::Walking);
    history.push(ActionState::Jumping);
    assert_eq!(history.current(), ActionState::Jumping);
    assert_eq!(history.previous(), Some(ActionState::Walking));
    assert_eq!(history.len(), 2);
    assert_eq!(history.get(2), None);
}

// ----------------------------------------------------------------------------
// Input layer
// ----------------------------------------------------------------------------

#[test]
fn test_input_layer_priority() {
    let table = CategoryTable::default();
    let mut s = Situation {
        input_locked: true,
        touching_hazard: true,
        damage: 3,
        ..Situation::default()
    };
    assert_eq!(InputState::evaluate(&s, &table), InputState::Locked);

    s.input_locked = false;
    assert_eq!(InputState::evaluate(&s, &table), InputState::Deconstructed);

    s.touching_hazard = false;
    assert_eq!(InputState::evaluate(&s, &table), InputState::Stunned);

    s.damage = 0;
    assert_eq!(InputState::evaluate(&s, &table), InputState::Unrestricted);
}

#[test]
fn test_input_layer_permissions() {
    for action in ACTIONS {
        let category = action.category();
        assert!(InputState::Unrestricted.permits(category));
        assert!(!InputState::Locked.permits(category));
        assert!(!InputState::Contemplating.permits(category));
        assert_eq!(
            InputState::Deconstructed.permits(category),
            category == Category::Warping
        );
        assert_eq!(
            InputState::Stunned.permits(category),
            !matches!(category, Category::Walking | Category::Jumping)
        );
    }
}

// ----------------------------------------------------------------------------
// Action layer
// ----------------------------------------------------------------------------

#[test]
fn test_action_priority_from_sliding() {
    let table = CategoryTable::default();
    let input = InputState::Unrestricted;
    let mut s = everything_true();
    let from = ActionState::Sliding;

    assert_eq!(from.evaluate(&s, &table, input), Some(ActionState::Warping));
    s.warp_armed = false;
    assert_eq!(from.evaluate(&s, &table, input), Some(ActionState::Flying));
    s.fly_requested = false;
    assert_eq!(from.evaluate(&s, &table, input), Some(ActionState::Rising));
    s.velocity.y = -1.0;
    assert_eq!(from.evaluate(&s, &table, input), Some(ActionState::Falling));

    // Grounded and moving with no input: already sliding, so stay.
    s.grounded = true;
    s.move_input = 0;
    assert_eq!(from.evaluate(&s, &table, input), None);

    s.velocity = Vec2::ZERO;
    assert_eq!(from.evaluate(&s, &table, input), Some(ActionState::Static));
}

#[test]
fn test_action_priority_matches_category_order() {
    let table = CategoryTable::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..500 {
        let s = random_situation(&mut rng);
        let expected = ACTIONS
            .into_iter()
            .find(|a| table.is_satisfied(a.category(), &s))
            .unwrap_or(ActionState::Static);
        let actual = ActionState::Static
            .evaluate(&s, &table, InputState::Unrestricted)
            .unwrap_or(ActionState::Static);
        assert_eq!(actual, expected, "situation: {:?}", s);
    }
}

#[test]
fn test_stunned_suppresses_walk_and_jump() {
    let table = CategoryTable::default();
    let s = Situation {
        grounded: true,
        move_input: 1,
        action_released: true,
        ..Situation::default()
    };
    assert_eq!(
        ActionState::Static.evaluate(&s, &table, InputState::Unrestricted),
        Some(ActionState::Jumping)
    );
    assert_eq!(
        ActionState::Static.evaluate(&s, &table, InputState::Stunned),
        None
    );
    assert_eq!(
        ActionState::Static.evaluate(&s, &table, InputState::Locked),
        None
    );
}

#[test]
fn test_rising_falls_through_to_walking() {
    let table = CategoryTable::default();
    let mut s = Situation {
        velocity: Vec2::new(0.5, 0.2),
        grounded: true,
        move_input: 1,
        action: Category::Rising,
        previous_action: Category::Walking,
        ..Situation::default()
    };
    let input = InputState::Unrestricted;
    assert_eq!(
        ActionState::Rising.evaluate(&s, &table, input),
        Some(ActionState::Walking)
    );

    s.previous_action = Category::Jumping;
    assert_eq!(ActionState::Rising.evaluate(&s, &table, input), None);

    s.velocity.y = -0.2;
    s.action = Category::Falling;
    s.previous_action = Category::Walking;
    assert_eq!(
        ActionState::Falling.evaluate(&s, &table, input),
        Some(ActionState::Walking)
    );

    s.previous_action = Category::Rising;
    assert_eq!(ActionState::Falling.evaluate(&s, &table, input), None);
}

#[test]
fn test_airborne_with_input_held_stays_airborne() {
    let table = CategoryTable::default();
    let input = InputState::Unrestricted;
    let mut s = Situation {
        velocity: Vec2::new(0.5, -0.2),
        grounded: false,
        move_input: 1,
        action: Category::Falling,
        previous_action: Category::Walking,
        ..Situation::default()
    };
    assert_eq!(ActionState::Falling.evaluate(&s, &table, input), None);

    s.velocity.y = 0.2;
    s.action = Category::Rising;
    assert_eq!(ActionState::Rising.evaluate(&s, &table, input), None);
    s.previous_action = Category::Falling;
    assert_eq!(ActionState::Rising.evaluate(&s, &table, input), None);
}

#[test]
fn test_jumping_requires_rest_or_walk() {
    let table = CategoryTable::default();
    let s = Situation {
        velocity: Vec2::new(0.5, 0.0),
        grounded: true,
        action_released: true,
        action: Category::Sliding,
        ..Situation::default()
    };
    assert_eq!(
        ActionState::Sliding.evaluate(&s, &table, InputState::Unrestricted),
        None
    );
    assert_eq!(
        ActionState::Walking.evaluate(&s, &table, InputState::Unrestricted),
        Some(ActionState::Jumping)
    );
}
