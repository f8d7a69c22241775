//! Movement categories and the predicates that classify a body's situation.
//!
//! Categories are declared in precedence order: when several predicates
//! hold at once, the earliest variant wins.

pub mod registry;
#[cfg(test)]
mod tests;

use std::fmt;

use bevy::prelude::*;

pub use registry::{
    CategoryCallback, CategoryError, CategoryLogic, CategoryRegistry, CategoryTable,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Category {
    Locked,
    Contemplating,
    Warping,
    Deconstructed,
    Stunned,
    Flying,
    Rising,
    Falling,
    Jumping,
    Walking,
    Sliding,
    Static,
    #[default]
    Unknown,
}

impl Category {
    pub const COUNT: usize = 13;

    /// Every category, highest precedence first.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Locked,
        Category::Contemplating,
        Category::Warping,
        Category::Deconstructed,
        Category::Stunned,
        Category::Flying,
        Category::Rising,
        Category::Falling,
        Category::Jumping,
        Category::Walking,
        Category::Sliding,
        Category::Static,
        Category::Unknown,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Categories whose classification cannot be overridden.
    pub fn is_hardwired(self) -> bool {
        matches!(self, Category::Locked | Category::Static | Category::Unknown)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Locked => "LOCKED",
            Category::Contemplating => "CONTEMPLATING",
            Category::Warping => "WARPING",
            Category::Deconstructed => "DECONSTRUCTED",
            Category::Stunned => "STUNNED",
            Category::Flying => "FLYING",
            Category::Rising => "RISING",
            Category::Falling => "FALLING",
            Category::Jumping => "JUMPING",
            Category::Walking => "WALKING",
            Category::Sliding => "SLIDING",
            Category::Static => "STATIC",
            Category::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Everything a predicate may look at, captured once per evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Situation {
    pub velocity: Vec2,
    pub grounded: bool,
    /// Horizontal input after input-layer gating.
    pub move_input: i8,
    /// Primary action released since the last physics tick.
    pub action_released: bool,
    pub damage: i32,
    pub fly_requested: bool,
    pub flight_cancelled: bool,
    pub touching_hazard: bool,
    pub warp_requested: bool,
    pub warp_armed: bool,
    pub input_locked: bool,
    pub has_jumped: bool,
    pub rest_speed: f32,
    pub action: Category,
    pub previous_action: Category,
}

impl Default for Situation {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            grounded: false,
            move_input: 0,
            action_released: false,
            damage: 0,
            fly_requested: false,
            flight_cancelled: false,
            touching_hazard: false,
            warp_requested: false,
            warp_armed: false,
            input_locked: false,
            has_jumped: false,
            rest_speed: 1e-3,
            action: Category::Static,
            previous_action: Category::Unknown,
        }
    }
}

// ----------------------------------------------------------------------------
// Default predicates
// ----------------------------------------------------------------------------

pub(crate) fn is_locked(s: &Situation) -> bool {
    s.input_locked
}

pub(crate) fn is_contemplating(_: &Situation) -> bool {
    false
}

pub(crate) fn is_warping(s: &Situation) -> bool {
    s.warp_requested && s.warp_armed
}

pub(crate) fn is_deconstructed(s: &Situation) -> bool {
    s.touching_hazard
}

pub(crate) fn is_stunned(s: &Situation) -> bool {
    s.damage > 0
}

pub(crate) fn is_flying(s: &Situation) -> bool {
    s.damage <= 0
        && (s.fly_requested || (s.action == Category::Flying && !s.flight_cancelled))
}

pub(crate) fn is_rising(s: &Situation) -> bool {
    s.velocity.y > 0.0 && !s.grounded
}

pub(crate) fn is_falling(s: &Situation) -> bool {
    s.velocity.y < 0.0 && !s.grounded
}

pub(crate) fn is_jumping(s: &Situation) -> bool {
    s.action_released && s.grounded && !s.has_jumped
}

pub(crate) fn is_walking(s: &Situation) -> bool {
    s.move_input != 0
}

pub(crate) fn is_sliding(s: &Situation) -> bool {
    s.grounded && s.velocity.x.abs() > s.rest_speed && s.move_input == 0
}

pub(crate) fn is_static(s: &Situation) -> bool {
    s.velocity.length() < s.rest_speed && s.grounded
}

pub(crate) fn is_unknown(_: &Situation) -> bool {
    false
}

pub(crate) fn default_predicate(category: Category) -> fn(&Situation) -> bool {
    match category {
        Category::Locked => is_locked,
        Category::Contemplating => is_contemplating,
        Category::Warping => is_warping,
        Category::Deconstructed => is_deconstructed,
        Category::Stunned => is_stunned,
        Category::Flying => is_flying,
        Category::Rising => is_rising,
        Category::Falling => is_falling,
        Category::Jumping => is_jumping,
        Category::Walking => is_walking,
        Category::Sliding => is_sliding,
        Category::Static => is_static,
        Category::Unknown => is_unknown,
    }
}
