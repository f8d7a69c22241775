//! Direction locks and the predicted fall events that justify them.

use std::fmt;

/// Horizontal heading of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
}

impl Direction {
    /// Classify a horizontal velocity. Magnitudes within `epsilon` are `None`.
    pub fn from_velocity(vx: f32, epsilon: f32) -> Self {
        if vx.abs() <= epsilon {
            Direction::None
        } else if vx < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    pub fn from_input(input: i8) -> Self {
        match input.signum() {
            -1 => Direction::Left,
            1 => Direction::Right,
            _ => Direction::None,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Direction::None => 0.0,
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    /// Whether `x` lies strictly past `reference` when travelling this way.
    pub fn is_beyond(self, x: f32, reference: f32) -> bool {
        match self {
            Direction::None => false,
            Direction::Left => x < reference,
            Direction::Right => x > reference,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::None => "none",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// A vertical ground probe. `height` is `None` when nothing was hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub x: f32,
    pub height: Option<f32>,
}

/// Bracket around a predicted drop: `before` is the last safe probe,
/// `after` the first probe past the edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedEvent {
    pub before: Probe,
    pub after: Probe,
}

/// Optional value stored per horizontal direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerDirection<T> {
    left: Option<T>,
    right: Option<T>,
}

impl<T> Default for PerDirection<T> {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
        }
    }
}

impl<T> PerDirection<T> {
    pub fn get(&self, direction: Direction) -> Option<&T> {
        match direction {
            Direction::None => None,
            Direction::Left => self.left.as_ref(),
            Direction::Right => self.right.as_ref(),
        }
    }

    pub fn set(&mut self, direction: Direction, value: T) {
        match direction {
            Direction::None => {}
            Direction::Left => self.left = Some(value),
            Direction::Right => self.right = Some(value),
        }
    }

    pub fn take(&mut self, direction: Direction) -> Option<T> {
        match direction {
            Direction::None => None,
            Direction::Left => self.left.take(),
            Direction::Right => self.right.take(),
        }
    }

    /// Directions holding a value, left first.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        [Direction::Left, Direction::Right]
            .into_iter()
            .filter(|d| self.get(*d).is_some())
    }
}

/// Directions in which walking input is currently refused, each with the
/// probe that justified the lock.
pub type LockState = PerDirection<Probe>;

impl LockState {
    pub fn is_locked(&self, direction: Direction) -> bool {
        self.get(direction).is_some()
    }

    /// Whether walking with `input` heads into a locked direction.
    pub fn blocks(&self, input: i8) -> bool {
        input != 0 && self.is_locked(Direction::from_input(input))
    }
}

/// Two most recent distinct non-zero headings, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionTrail {
    slots: [Direction; 2],
}

impl DirectionTrail {
    /// Standing still leaves the trail untouched.
    pub fn record(&mut self, direction: Direction) {
        if direction != Direction::None && self.slots[1] != direction {
            self.slots = [self.slots[1], direction];
        }
    }

    pub fn latest(&self) -> Direction {
        self.slots[1]
    }

    pub fn previous(&self) -> Direction {
        self.slots[0]
    }
}
