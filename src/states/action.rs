//! Action layer: what a body does with the physics each tick.

use bevy::prelude::*;

use super::InputState;
use crate::category::{Category, CategoryTable, Situation};
use crate::movement::{Movable, MovementTuning};
use crate::oracle::PhysicsOracle;
use crate::physics::LocalPhysics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionState {
    #[default]
    Static,
    Walking,
    Jumping,
    Rising,
    Falling,
    Sliding,
    Warping,
    Flying,
}

impl ActionState {
    pub fn category(self) -> Category {
        match self {
            ActionState::Static => Category::Static,
            ActionState::Walking => Category::Walking,
            ActionState::Jumping => Category::Jumping,
            ActionState::Rising => Category::Rising,
            ActionState::Falling => Category::Falling,
            ActionState::Sliding => Category::Sliding,
            ActionState::Warping => Category::Warping,
            ActionState::Flying => Category::Flying,
        }
    }

    pub(crate) fn on_enter(
        self,
        body: &mut Movable,
        oracle: &mut dyn PhysicsOracle,
        tuning: &MovementTuning,
    ) {
        match self {
            ActionState::Static => body.has_jumped = false,
            ActionState::Sliding => oracle.sleep(),
            ActionState::Jumping => {
                body.record_aim(oracle.position());
                oracle.wake_up();
                oracle.add_impulse(body.aim * tuning.jump_force);
                body.has_jumped = true;
            }
            ActionState::Flying => {
                body.record_aim(oracle.position());
                oracle.wake_up();
            }
            ActionState::Warping => {
                if let Some(target) = body.warp_target.take() {
                    info!("Warping to ({:.2}, {:.2})", target.x, target.y);
                    body.active = true;
                    body.touching_hazard = false;
                    oracle.set_position(target);
                    oracle.set_velocity(Vec2::ZERO);
                    oracle.wake_up();
                }
                body.warp_requested = false;
            }
            ActionState::Walking | ActionState::Rising | ActionState::Falling => {}
        }
    }

    pub(crate) fn on_exit(self, body: &mut Movable, _oracle: &mut dyn PhysicsOracle) {
        if self == ActionState::Flying {
            body.flight_cancelled = false;
        }
    }

    /// Per-tick behaviour. Returns a state the body must switch to at once,
    /// skipping regular transition evaluation.
    pub(crate) fn perform_action(
        self,
        body: &mut Movable,
        oracle: &mut dyn PhysicsOracle,
        tuning: &MovementTuning,
    ) -> Option<ActionState> {
        match self {
            ActionState::Walking => walk(body, oracle, tuning),
            ActionState::Flying => {
                let velocity = oracle.velocity();
                if velocity.length() < tuning.rest_speed {
                    oracle.add_impulse(body.aim * tuning.fly_force);
                } else {
                    oracle.add_force(-velocity);
                }
                None
            }
            _ => None,
        }
    }

    /// Next state, or `None` to stay. Candidates are tried in precedence
    /// order and must be permitted by the input layer.
    pub fn evaluate(
        self,
        situation: &Situation,
        table: &CategoryTable,
        input: InputState,
    ) -> Option<ActionState> {
        let holds = |state: ActionState| {
            input.permits(state.category()) && table.is_satisfied(state.category(), situation)
        };
        let previous = situation.previous_action;

        let target = if holds(ActionState::Warping) {
            ActionState::Warping
        } else if holds(ActionState::Flying) {
            ActionState::Flying
        } else if self == ActionState::Rising
            && situation.grounded
            && holds(ActionState::Walking)
            && matches!(previous, Category::Walking | Category::Falling)
        {
            ActionState::Walking
        } else if self == ActionState::Falling
            && situation.grounded
            && holds(ActionState::Walking)
            && previous == Category::Walking
        {
            ActionState::Walking
        } else if holds(ActionState::Rising) {
            ActionState::Rising
        } else if holds(ActionState::Falling) {
            ActionState::Falling
        } else if matches!(self, ActionState::Static | ActionState::Walking)
            && holds(ActionState::Jumping)
        {
            ActionState::Jumping
        } else if self == ActionState::Static && holds(ActionState::Walking) {
            ActionState::Walking
        } else if self != ActionState::Jumping && holds(ActionState::Sliding) {
            ActionState::Sliding
        } else if holds(ActionState::Static) {
            ActionState::Static
        } else {
            return None;
        };

        (target != self).then_some(target)
    }
}

fn walk(
    body: &mut Movable,
    oracle: &mut dyn PhysicsOracle,
    tuning: &MovementTuning,
) -> Option<ActionState> {
    let input = body.effective_move_input();
    let blocked = body.scouter.locks().blocks(input);

    if !blocked || body.held_seconds >= tuning.lock_override_hold {
        oracle.wake_up();
        if oracle.velocity().x.abs() < tuning.walk_velocity {
            let escalation = body.scouter.escalation(oracle, &mut body.analyzer, input);
            let direction = body
                .analyzer
                .base_walk_vector(oracle, input, escalation, tuning.walk_climb_cap);
            let physics = LocalPhysics::sample(oracle, &mut body.analyzer);
            let balance = if physics.angle_of_incline().abs() < tuning.steep_angle {
                physics.parallel_g_force()
            } else {
                Vec2::ZERO
            };
            oracle.add_force((direction - balance) * tuning.walk_accel);
        }
        None
    } else if body.analyzer.is_grounded(oracle, false) {
        oracle.set_velocity(Vec2::ZERO);
        Some(ActionState::Sliding)
    } else {
        let velocity = oracle.velocity();
        oracle.set_velocity(Vec2::new(0.0, velocity.y));
        None
    }
}
