//! Input layer: whether a body accepts movement commands.

use bevy::prelude::*;

use crate::category::{Category, CategoryTable, Situation};
use crate::movement::Movable;
use crate::oracle::PhysicsOracle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputState {
    #[default]
    Unrestricted,
    Locked,
    Stunned,
    Contemplating,
    Deconstructed,
}

impl InputState {
    /// Category reported for this state. Unrestricted defers to the action layer.
    pub fn category(self) -> Option<Category> {
        match self {
            InputState::Unrestricted => None,
            InputState::Locked => Some(Category::Locked),
            InputState::Stunned => Some(Category::Stunned),
            InputState::Contemplating => Some(Category::Contemplating),
            InputState::Deconstructed => Some(Category::Deconstructed),
        }
    }

    /// Whether the action layer may run or enter `action`.
    pub fn permits(self, action: Category) -> bool {
        match self {
            InputState::Unrestricted => true,
            InputState::Locked | InputState::Contemplating => false,
            InputState::Deconstructed => action == Category::Warping,
            InputState::Stunned => !matches!(action, Category::Walking | Category::Jumping),
        }
    }

    /// Target state in fixed priority order.
    pub fn evaluate(situation: &Situation, table: &CategoryTable) -> InputState {
        if table.is_satisfied(Category::Locked, situation) {
            InputState::Locked
        } else if table.is_satisfied(Category::Deconstructed, situation) {
            InputState::Deconstructed
        } else if table.is_satisfied(Category::Contemplating, situation) {
            InputState::Contemplating
        } else if table.is_satisfied(Category::Stunned, situation) {
            InputState::Stunned
        } else {
            InputState::Unrestricted
        }
    }

    pub(crate) fn on_enter(self, body: &mut Movable, oracle: &mut dyn PhysicsOracle) {
        match self {
            InputState::Unrestricted => body.input_locked = false,
            InputState::Deconstructed => {
                info!("Body deconstructed; awaiting warp");
                body.active = false;
                body.warp_requested = true;
                oracle.sleep();
            }
            InputState::Locked | InputState::Stunned | InputState::Contemplating => {}
        }
    }

    pub(crate) fn on_exit(self, _body: &mut Movable, _oracle: &mut dyn PhysicsOracle) {}
}
