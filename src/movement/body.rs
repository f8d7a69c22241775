//! Movement domain: the movable body and its per-tick pipeline.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::category::{Category, CategoryTable, Situation};
use crate::collision::CollisionAnalyzer;
use crate::error::MovementError;
use crate::movement::{MovementForce, MovementTuning};
use crate::oracle::PhysicsOracle;
use crate::scouting::Scouter;
use crate::states::{ActionState, InputState, StateHistory};

/// One frame of host input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSample {
    /// Horizontal axis; any sign is reduced to -1, 0 or 1.
    pub axis: i8,
    pub action_released: bool,
    pub aim_point: Option<Vec2>,
}

/// A body driven by the movement core. Position and velocity live in the
/// physics oracle; everything else the state machine needs lives here.
#[derive(Component, Debug, Clone)]
#[require(ConstantForce, MovementForce, LockedAxes)]
pub struct Movable {
    radius: f32,
    pub(crate) active: bool,
    damage: i32,
    pub(crate) input_locked: bool,
    fly_requested: bool,
    pub(crate) flight_cancelled: bool,
    pub(crate) touching_hazard: bool,
    pub(crate) warp_requested: bool,
    pub(crate) warp_target: Option<Vec2>,
    pub(crate) has_jumped: bool,
    aim_point: Option<Vec2>,
    /// Unit direction recorded on entering Jumping or Flying.
    pub(crate) aim: Vec2,
    move_input: i8,
    action_released: bool,
    last_tick_input: i8,
    pub(crate) held_seconds: f32,
    pub(crate) analyzer: CollisionAnalyzer,
    pub(crate) scouter: Scouter,
    input_states: StateHistory<InputState>,
    action_states: StateHistory<ActionState>,
    categories: StateHistory<Category>,
}

impl Movable {
    pub fn new(radius: f32, tuning: &MovementTuning) -> Result<Self, MovementError> {
        if !(radius > 0.0) {
            return Err(MovementError::NonPositiveRadius(radius));
        }
        Ok(Self {
            radius,
            active: true,
            damage: 0,
            input_locked: false,
            fly_requested: false,
            flight_cancelled: false,
            touching_hazard: false,
            warp_requested: false,
            warp_target: None,
            has_jumped: false,
            aim_point: None,
            aim: Vec2::Y,
            move_input: 0,
            action_released: false,
            last_tick_input: 0,
            held_seconds: 0.0,
            analyzer: CollisionAnalyzer::new(radius, tuning),
            scouter: Scouter::new(radius, tuning),
            input_states: StateHistory::new(InputState::Unrestricted),
            action_states: StateHistory::new(ActionState::Static),
            categories: StateHistory::new(Category::Unknown),
        })
    }

    /// Radius from collider bounds: half the horizontal extent.
    pub fn from_bounds(size: Vec2, tuning: &MovementTuning) -> Result<Self, MovementError> {
        Self::new(size.x * 0.5, tuning)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn width(&self) -> f32 {
        self.radius * 2.0
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn fly_requested(&self) -> bool {
        self.fly_requested
    }

    pub fn touching_hazard(&self) -> bool {
        self.touching_hazard
    }

    pub fn warp_pending(&self) -> bool {
        self.warp_requested
    }

    pub fn move_input(&self) -> i8 {
        self.move_input
    }

    pub fn input_state(&self) -> InputState {
        self.input_states.current()
    }

    pub fn action(&self) -> ActionState {
        self.action_states.current()
    }

    pub fn previous_action(&self) -> Option<ActionState> {
        self.action_states.previous()
    }

    pub fn category(&self) -> Category {
        self.categories.current()
    }

    pub fn categories(&self) -> &StateHistory<Category> {
        &self.categories
    }

    pub fn analyzer(&self) -> &CollisionAnalyzer {
        &self.analyzer
    }

    pub fn scouter(&self) -> &Scouter {
        &self.scouter
    }

    // ------------------------------------------------------------------------
    // External control
    // ------------------------------------------------------------------------

    pub fn take_damage(&mut self, amount: i32) {
        self.damage = self.damage.saturating_add(amount.max(0));
    }

    /// New turn: damage is forgiven and input accepted again.
    pub fn turn_start(&mut self) {
        self.damage = 0;
        self.input_locked = false;
    }

    pub fn turn_end(&mut self) {
        self.input_locked = true;
    }

    pub fn request_flight(&mut self) {
        self.fly_requested = true;
    }

    pub fn cancel_flight(&mut self) {
        self.fly_requested = false;
        self.flight_cancelled = true;
    }

    pub(crate) fn clear_fly_request(&mut self) {
        self.fly_requested = false;
    }

    /// Queue a warp to `target`.
    pub fn arm_warp(&mut self, target: Vec2) {
        self.warp_target = Some(target);
        self.warp_requested = true;
    }

    /// Hazard contact from the host's collision events. Contact loss is
    /// ignored while the body is deconstructed.
    pub fn set_touching_hazard(&mut self, touching: bool) {
        if touching || self.active {
            self.touching_hazard = touching;
        }
    }

    pub fn sample_input(&mut self, sample: InputSample) {
        self.move_input = sample.axis.signum();
        self.action_released |= sample.action_released;
        if sample.aim_point.is_some() {
            self.aim_point = sample.aim_point;
        }
    }

    /// Input after input-layer gating.
    pub(crate) fn effective_move_input(&self) -> i8 {
        if self.input_state().permits(Category::Walking) {
            self.move_input
        } else {
            0
        }
    }

    fn effective_release(&self) -> bool {
        self.action_released && self.input_state().permits(Category::Jumping)
    }

    pub(crate) fn record_aim(&mut self, position: Vec2) {
        self.aim = self
            .aim_point
            .map(|target| (target - position).normalize_or_zero())
            .filter(|aim| *aim != Vec2::ZERO)
            .unwrap_or(Vec2::Y);
    }

    pub fn situation(&mut self, oracle: &dyn PhysicsOracle, rest_speed: f32) -> Situation {
        Situation {
            velocity: oracle.velocity(),
            grounded: self.analyzer.is_grounded(oracle, false),
            move_input: self.effective_move_input(),
            action_released: self.effective_release(),
            damage: self.damage,
            fly_requested: self.fly_requested,
            flight_cancelled: self.flight_cancelled,
            touching_hazard: self.touching_hazard,
            warp_requested: self.warp_requested,
            warp_armed: self.warp_target.is_some(),
            input_locked: self.input_locked,
            has_jumped: self.has_jumped,
            rest_speed,
            action: self.action().category(),
            previous_action: self
                .previous_action()
                .map(ActionState::category)
                .unwrap_or(Category::Unknown),
        }
    }

    // ------------------------------------------------------------------------
    // Tick pipeline
    // ------------------------------------------------------------------------

    /// Variable-step input layer update.
    pub fn update_input_layer(
        &mut self,
        oracle: &mut dyn PhysicsOracle,
        table: &CategoryTable,
        tuning: &MovementTuning,
    ) {
        let situation = self.situation(oracle, tuning.rest_speed);
        let next = InputState::evaluate(&situation, table);
        let current = self.input_state();
        if next != current {
            debug!("Input layer {:?} -> {:?}", current, next);
            current.on_exit(self, oracle);
            self.input_states.push(next);
            next.on_enter(self, oracle);
        }
    }

    /// Fixed-step update: contacts, look-ahead, action layer, classification.
    pub fn fixed_tick(
        &mut self,
        oracle: &mut dyn PhysicsOracle,
        table: &CategoryTable,
        tuning: &MovementTuning,
        dt: f32,
    ) -> Category {
        self.analyzer.begin_cycle();

        let walking = self.action() == ActionState::Walking;
        let input = self.effective_move_input();
        self.scouter.look_ahead(oracle, &mut self.analyzer, walking, input);
        self.track_held_input(dt);

        self.run_action_layer(oracle, table, tuning);

        let category = self.resolve_category();
        if category != self.category() {
            debug!("Category {} -> {}", self.category(), category);
            self.categories.push(category);
            for callback in table.callbacks(category) {
                callback(self);
            }
        }

        self.action_released = false;
        category
    }

    /// Both layers, for hosts that drive a single loop.
    pub fn step(
        &mut self,
        oracle: &mut dyn PhysicsOracle,
        table: &CategoryTable,
        tuning: &MovementTuning,
        dt: f32,
    ) -> Category {
        self.update_input_layer(oracle, table, tuning);
        self.fixed_tick(oracle, table, tuning, dt)
    }

    /// Time the same input has been pushed against a lock. Resets whenever
    /// the input changes or stops being blocked.
    fn track_held_input(&mut self, dt: f32) {
        let blocked = self.scouter.locks().blocks(self.move_input);
        if blocked && self.move_input == self.last_tick_input {
            self.held_seconds += dt;
        } else {
            self.held_seconds = 0.0;
        }
        self.last_tick_input = self.move_input;
    }

    fn run_action_layer(
        &mut self,
        oracle: &mut dyn PhysicsOracle,
        table: &CategoryTable,
        tuning: &MovementTuning,
    ) {
        let state = self.action();
        let input = self.input_state();

        if input.permits(state.category()) {
            if let Some(forced) = state.perform_action(self, oracle, tuning) {
                self.switch_action(forced, oracle, tuning);
                return;
            }
        }

        let situation = self.situation(oracle, tuning.rest_speed);
        if let Some(next) = state.evaluate(&situation, table, input) {
            self.switch_action(next, oracle, tuning);
        }
    }

    fn switch_action(
        &mut self,
        next: ActionState,
        oracle: &mut dyn PhysicsOracle,
        tuning: &MovementTuning,
    ) {
        let current = self.action();
        if next == current {
            return;
        }
        trace!("Action {:?} -> {:?}", current, next);
        current.on_exit(self, oracle);
        self.action_states.push(next);
        next.on_enter(self, oracle, tuning);
    }

    /// The earlier of the input-layer and action-layer categories.
    fn resolve_category(&self) -> Category {
        let action = self.action().category();
        match self.input_state().category() {
            Some(input) => input.min(action),
            None => action,
        }
    }
}
