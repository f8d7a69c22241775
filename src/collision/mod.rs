//! Circumferential ground-contact analysis.
//!
//! A fan of rays is cast from the body centre across an arc centred on
//! straight down. Rays landing within the body radius are contacts; nearby
//! contacts are clustered and each cluster is represented by its closest hit.
//! Results are cached per cycle so repeated queries within one physics tick
//! do not recast.

pub mod cluster;

use bevy::prelude::*;

use crate::math::{angle_between_deg, rotate_deg};
use crate::movement::MovementTuning;
use crate::oracle::PhysicsOracle;

/// One accepted contact ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactHit {
    pub point: Vec2,
    /// Degrees from the first ray of the fan.
    pub angle: f32,
    pub distance: f32,
}

/// Single-slot cache stamped with the generation it was filled in.
#[derive(Debug, Clone, Default)]
pub struct CycleCache {
    generation: u64,
    hits: Option<Vec<ContactHit>>,
    angle: Option<f32>,
}

impl CycleCache {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidate everything recorded during the previous cycle.
    pub fn advance(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.hits = None;
        self.angle = None;
    }

    pub fn is_filled(&self) -> bool {
        self.hits.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct CollisionAnalyzer {
    radius: f32,
    angle_step: f32,
    arc: f32,
    radius_correction: f32,
    deviance: f32,
    cache: CycleCache,
}

impl CollisionAnalyzer {
    pub fn new(radius: f32, tuning: &MovementTuning) -> Self {
        Self {
            radius,
            angle_step: tuning.contact_angle_step.max(f32::EPSILON),
            arc: tuning.contact_arc,
            radius_correction: tuning.radius_correction,
            deviance: tuning.cluster_deviance(),
            cache: CycleCache::default(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Start a new physics cycle. Call once per tick before querying.
    pub fn begin_cycle(&mut self) {
        self.cache.advance();
    }

    /// Grounded check. External callers pass `true` so a fresh cycle starts
    /// and stale contacts from an earlier tick are never reused.
    pub fn is_grounded(&mut self, oracle: &dyn PhysicsOracle, from_external: bool) -> bool {
        if from_external {
            self.begin_cycle();
        }
        !self.grounded_hits(oracle).is_empty()
    }

    /// Reduced contacts for this cycle, in fan order.
    pub fn grounded_hits(&mut self, oracle: &dyn PhysicsOracle) -> &[ContactHit] {
        if !self.cache.is_filled() {
            let raw = self.cast_contacts(oracle);
            let reduced = cluster::reduce(&raw, self.deviance);
            self.cache.hits = Some(reduced);
        }
        self.cache.hits.as_deref().unwrap_or(&[])
    }

    /// Contacts already gathered this cycle, without casting.
    pub fn cached_hits(&self) -> &[ContactHit] {
        self.cache.hits.as_deref().unwrap_or(&[])
    }

    /// Signed incline of the steepest contact. Zero when airborne.
    pub fn collision_angle(&mut self, oracle: &dyn PhysicsOracle) -> f32 {
        if let Some(angle) = self.cache.angle {
            return angle;
        }
        let position = oracle.position();
        let angle = self
            .grounded_hits(oracle)
            .iter()
            .map(|hit| incline_angle(position, hit.point))
            .fold(0.0_f32, |steepest, a| {
                if a.abs() > steepest.abs() { a } else { steepest }
            });
        self.cache.angle = Some(angle);
        angle
    }

    /// Walk direction shaped by the current incline.
    pub fn base_walk_vector(
        &mut self,
        oracle: &dyn PhysicsOracle,
        move_input: i8,
        escalation: i8,
        climb_cap: f32,
    ) -> Vec2 {
        let angle = self.collision_angle(oracle);
        Vec2::new(
            f32::from(move_input) * walk_x(angle),
            f32::from(escalation) * walk_y(angle, climb_cap),
        )
    }

    fn cast_contacts(&self, oracle: &dyn PhysicsOracle) -> Vec<ContactHit> {
        let origin = oracle.position();
        let reach = self.radius + self.radius_correction;
        let rays = (self.arc / self.angle_step).round() as usize;
        let half_arc = self.arc * 0.5;

        (0..=rays)
            .filter_map(|i| {
                let angle = i as f32 * self.angle_step;
                let direction = rotate_deg(Vec2::NEG_Y, angle - half_arc);
                oracle
                    .raycast(origin, direction, reach)
                    .filter(|hit| hit.distance <= reach)
                    .map(|hit| ContactHit {
                        point: hit.point,
                        angle,
                        distance: hit.distance,
                    })
            })
            .collect()
    }
}

/// Angle between straight down and the ray to `contact`. Positive when the
/// contact lies left of the body, negative otherwise.
pub fn incline_angle(position: Vec2, contact: Vec2) -> f32 {
    let angle = angle_between_deg(contact - position, Vec2::NEG_Y);
    if contact.x < position.x { angle } else { -angle }
}

/// Horizontal walk share: 1 on flat ground, 0 against a wall.
pub fn walk_x(angle: f32) -> f32 {
    ((90.0 - angle.abs()) / 90.0).clamp(0.0, 1.0)
}

/// Vertical walk share: 0 on flat ground, `cap` against a wall.
pub fn walk_y(angle: f32, cap: f32) -> f32 {
    cap * (angle.abs() / 90.0).clamp(0.0, 1.0)
}
