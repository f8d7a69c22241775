//! Two-layer movement state machine.
//!
//! The input layer decides which actions a body may take; the action layer
//! decides what force to apply each tick. Both layers only switch when the
//! target state differs from the current one.

pub mod action;
pub mod input;
#[cfg(test)]
mod tests;

use std::collections::VecDeque;

pub use action::ActionState;
pub use input::InputState;

/// Default number of states remembered per layer.
pub const HISTORY_DEPTH: usize = 4;

/// Most recent first. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct StateHistory<T> {
    entries: VecDeque<T>,
    depth: usize,
}

impl<T: Copy> StateHistory<T> {
    pub fn new(initial: T) -> Self {
        Self::with_depth(initial, HISTORY_DEPTH)
    }

    pub fn with_depth(initial: T, depth: usize) -> Self {
        let depth = depth.max(2);
        let mut entries = VecDeque::with_capacity(depth);
        entries.push_front(initial);
        Self { entries, depth }
    }

    pub fn push(&mut self, state: T) {
        self.entries.push_front(state);
        self.entries.truncate(self.depth);
    }

    pub fn current(&self) -> T {
        self.entries[0]
    }

    /// State before the current one, if any.
    pub fn previous(&self) -> Option<T> {
        self.entries.get(1).copied()
    }

    /// `n` steps back; 0 is the current state.
    pub fn get(&self, n: usize) -> Option<T> {
        self.entries.get(n).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
