//! Look-ahead fall prediction and walking locks.
//!
//! While grounded and walking, the scouter probes the floor ahead of the
//! body with two fans of vertical rays. A drop deeper than the body radius
//! inside the close fan is refined to a tight bracket and locks walking in
//! that direction. The far fan is used to dismiss drops the body would
//! simply step across. Locks lapse once the body's fall focus is more than a
//! checking magnitude away from the edge that caused them.

pub mod lock;

use bevy::prelude::*;

pub use lock::{Direction, DirectionTrail, LockState, PerDirection, PredictedEvent, Probe};

use crate::collision::CollisionAnalyzer;
use crate::error::MovementError;
use crate::movement::MovementTuning;
use crate::oracle::PhysicsOracle;

/// Horizontal speeds at or below this are treated as standing still.
const STILL_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct Scouter {
    width: f32,
    fall_detection_length: f32,
    focus_ratio: f32,
    slices: usize,
    keen_step: f32,
    max_keen: usize,
    reach: f32,
    escalation_tolerance: f32,
    locks: LockState,
    events: PerDirection<PredictedEvent>,
    trail: DirectionTrail,
    prev_heading: Direction,
}

impl Scouter {
    pub fn new(radius: f32, tuning: &MovementTuning) -> Self {
        Self {
            width: radius * 2.0,
            fall_detection_length: radius,
            focus_ratio: tuning.focus_dist_ratio,
            slices: tuning.prediction_slices.max(2),
            keen_step: tuning.keen_step,
            max_keen: tuning.max_keen,
            reach: tuning.probe_reach,
            escalation_tolerance: tuning.escalation_tolerance,
            locks: LockState::default(),
            events: PerDirection::default(),
            trail: DirectionTrail::default(),
            prev_heading: Direction::None,
        }
    }

    pub fn locks(&self) -> &LockState {
        &self.locks
    }

    pub fn is_locked(&self, direction: Direction) -> bool {
        self.locks.is_locked(direction)
    }

    pub fn event(&self, direction: Direction) -> Option<&PredictedEvent> {
        self.events.get(direction)
    }

    pub fn trail(&self) -> &DirectionTrail {
        &self.trail
    }

    /// Heading recorded by the last look-ahead.
    pub fn heading(&self) -> Direction {
        self.prev_heading
    }

    // ------------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------------

    /// Offset from the body centre to the fall focus for `direction`.
    pub fn fall_focus_distance(&self, direction: Direction) -> Result<f32, MovementError> {
        match direction {
            Direction::Left => Ok(-self.width * self.focus_ratio),
            Direction::Right => Ok(self.width * self.focus_ratio),
            Direction::None => Err(MovementError::UnsupportedDirection(direction)),
        }
    }

    /// Distance from the fall focus within which a drop is relevant.
    pub fn checking_magnitude(&self) -> f32 {
        self.width - (self.width * 0.5 - self.width * self.focus_ratio)
    }

    fn focus_x(&self, position: Vec2, direction: Direction) -> f32 {
        position.x + direction.sign() * self.width * self.focus_ratio
    }

    /// A drop from `initial` to `next` deep enough to fall into. No floor
    /// under the first probe means there is nothing to compare against.
    pub fn is_past_extreme(&self, initial: Option<f32>, next: Option<f32>) -> bool {
        match (initial, next) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(a), Some(b)) => a - b > self.fall_detection_length,
        }
    }

    fn probe(&self, oracle: &dyn PhysicsOracle, x: f32, y: f32) -> Probe {
        let height = oracle
            .raycast(Vec2::new(x, y), Vec2::NEG_Y, self.reach)
            .map(|hit| hit.point.y);
        Probe { x, height }
    }

    /// Evenly spaced probes covering `length` ahead of `start_x`.
    fn fan(
        &self,
        oracle: &dyn PhysicsOracle,
        start_x: f32,
        y: f32,
        direction: Direction,
        length: f32,
    ) -> Vec<Probe> {
        let spacing = length / self.slices as f32;
        (0..self.slices)
            .map(|i| self.probe(oracle, start_x + direction.sign() * spacing * i as f32, y))
            .collect()
    }

    fn is_relevant(&self, probe: &Probe, position: Vec2, direction: Direction) -> bool {
        (probe.x - self.focus_x(position, direction)).abs() <= self.checking_magnitude()
    }

    fn event_is_relevant(&self, position: Vec2, direction: Direction) -> bool {
        self.events
            .get(direction)
            .is_some_and(|event| self.is_relevant(&event.before, position, direction))
    }

    // ------------------------------------------------------------------------
    // Look-ahead
    // ------------------------------------------------------------------------

    /// Heading used for this tick: the velocity sign, else the last
    /// direction the body moved in, else the input it is holding.
    fn current_heading(&self, moving: Direction, intent: Direction) -> Direction {
        if moving != Direction::None {
            moving
        } else if self.trail.latest() != Direction::None {
            self.trail.latest()
        } else {
            intent
        }
    }

    /// Run once per physics tick after the analyzer's cycle has begun.
    /// `walking` gates the fall search; lock expiry runs regardless.
    /// `move_input` only matters for a body that has never moved.
    pub fn look_ahead(
        &mut self,
        oracle: &dyn PhysicsOracle,
        analyzer: &mut CollisionAnalyzer,
        walking: bool,
        move_input: i8,
    ) {
        let moving = Direction::from_velocity(oracle.velocity().x, STILL_EPSILON);
        self.trail.record(moving);

        if !analyzer.is_grounded(oracle, false) {
            return;
        }

        let position = oracle.position();
        let heading = self.current_heading(moving, Direction::from_input(move_input));
        let changed = heading != self.prev_heading;

        if heading != Direction::None
            && walking
            && (changed || !self.event_is_relevant(position, heading))
        {
            self.search(oracle, position, heading);
        }

        self.update_locks(position, heading);
        self.prev_heading = heading;
    }

    fn search(&mut self, oracle: &dyn PhysicsOracle, position: Vec2, heading: Direction) {
        let focus = self.focus_x(position, heading);
        let checking = self.checking_magnitude();
        let close = self.fan(oracle, focus, position.y, heading, checking);
        let far = self.fan(oracle, focus, position.y, heading, checking + self.width);
        let floor = close[0].height;

        if let Some(i) = (1..close.len()).find(|&i| self.is_past_extreme(floor, close[i].height)) {
            let spacing = checking / self.slices as f32;
            match self.keen(oracle, close[i - 1].x, heading, spacing) {
                Some(event) => self.events.set(heading, event),
                None => trace!("Keening toward {} did not converge", heading),
            }
        }

        if !self.event_is_relevant(position, heading) {
            return;
        }
        let Some(event) = self.events.get(heading).copied() else {
            return;
        };

        // Land past the edge and see whether the body would have floor.
        let Some(start) = far.iter().position(|p| heading.is_beyond(p.x, event.after.x)) else {
            return;
        };
        let far_spacing = (checking + self.width) / self.slices as f32;
        let span = (self.width / far_spacing).floor() as usize;
        let lands = far[start..]
            .iter()
            .take(span)
            .any(|p| !self.is_past_extreme(floor, p.height));
        if lands {
            debug!("Drop ahead ({}) at x={:.3} is crossable", heading, event.after.x);
            self.events.take(heading);
            self.locks.take(heading);
        }
    }

    /// Refine a coarse bracket starting at `start_x`. Walks forward in fine
    /// steps for at most `max_keen` comparisons; `None` if no drop is found.
    pub fn keen(
        &self,
        oracle: &dyn PhysicsOracle,
        start_x: f32,
        direction: Direction,
        coarse_spacing: f32,
    ) -> Option<PredictedEvent> {
        let y = oracle.position().y;
        let step = direction.sign() * self.keen_step.max(coarse_spacing / self.slices as f32);

        let mut before = self.probe(oracle, start_x, y);
        for k in 1..=self.max_keen {
            let after = self.probe(oracle, start_x + step * k as f32, y);
            if self.is_past_extreme(before.height, after.height) {
                return Some(PredictedEvent { before, after });
            }
            before = after;
        }
        None
    }

    fn update_locks(&mut self, position: Vec2, heading: Direction) {
        if self.event_is_relevant(position, heading) {
            if let Some(event) = self.events.get(heading).copied() {
                if !self.locks.is_locked(heading) {
                    debug!("Locking {} at edge x={:.3}", heading, event.before.x);
                }
                self.locks.set(heading, event.before);
            }
        }

        let stale: Vec<Direction> = self
            .locks
            .directions()
            .filter(|d| {
                self.locks
                    .get(*d)
                    .is_some_and(|probe| !self.is_relevant(probe, position, *d))
            })
            .collect();
        for direction in stale {
            debug!("Unlocking {}", direction);
            self.locks.take(direction);
            self.events.take(direction);
        }
    }

    // ------------------------------------------------------------------------
    // Escalation
    // ------------------------------------------------------------------------

    /// +1 when the next step in the input direction climbs, -1 when it
    /// descends, 0 when level or undetermined.
    pub fn escalation(
        &self,
        oracle: &dyn PhysicsOracle,
        analyzer: &mut CollisionAnalyzer,
        move_input: i8,
    ) -> i8 {
        let direction = Direction::from_input(move_input);
        if direction == Direction::None {
            return 0;
        }
        let position = oracle.position();
        let furthest = analyzer
            .grounded_hits(oracle)
            .iter()
            .fold(None::<Vec2>, |best, hit| match best {
                Some(b) if (b.x - position.x).abs() >= (hit.point.x - position.x).abs() => Some(b),
                _ => Some(hit.point),
            });
        let Some(contact) = furthest else {
            return 0;
        };

        let current = self.probe(oracle, contact.x, position.y);
        let next = self.probe(oracle, contact.x + direction.sign() * self.keen_step, position.y);
        match (current.height, next.height) {
            (Some(c), Some(n)) if n - c > self.escalation_tolerance => 1,
            (Some(c), Some(n)) if c - n > self.escalation_tolerance => -1,
            (Some(_), None) => -1,
            _ => 0,
        }
    }
}
