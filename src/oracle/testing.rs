//! Deterministic line-segment world used by unit tests.

use bevy::prelude::*;

use super::{PhysicsOracle, RayHit};

/// Far extent of "infinite" floors.
const FAR: f32 = 1_000.0;

#[derive(Debug, Clone)]
pub(crate) struct SegmentWorld {
    pub segments: Vec<(Vec2, Vec2)>,
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
    pub gravity: Vec2,
    pub gravity_scale: f32,
    pub awake: bool,
    pub forces: Vec<Vec2>,
    pub impulses: Vec<Vec2>,
    pub sleeps: usize,
    pub rays_cast: std::cell::Cell<usize>,
}

impl SegmentWorld {
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass: 1.0,
            gravity: Vec2::new(0.0, -9.81),
            gravity_scale: 1.0,
            awake: true,
            forces: Vec::new(),
            impulses: Vec::new(),
            sleeps: 0,
            rays_cast: std::cell::Cell::new(0),
        }
    }

    /// Endless floor at height `y`.
    pub fn flat(y: f32) -> Self {
        Self::empty().with_segment(Vec2::new(-FAR, y), Vec2::new(FAR, y))
    }

    /// Floor at `floor_y` ending at `edge_x`, with a lower floor `drop` below it.
    pub fn cliff(edge_x: f32, floor_y: f32, drop: f32) -> Self {
        let low = floor_y - drop;
        Self::empty()
            .with_segment(Vec2::new(-FAR, floor_y), Vec2::new(edge_x, floor_y))
            .with_segment(Vec2::new(edge_x, floor_y), Vec2::new(edge_x, low))
            .with_segment(Vec2::new(edge_x, low), Vec2::new(FAR, low))
    }

    /// Floor at `floor_y` with a pit between `start_x` and `end_x`, `depth` deep.
    pub fn gap(start_x: f32, end_x: f32, floor_y: f32, depth: f32) -> Self {
        let low = floor_y - depth;
        Self::empty()
            .with_segment(Vec2::new(-FAR, floor_y), Vec2::new(start_x, floor_y))
            .with_segment(Vec2::new(start_x, low), Vec2::new(end_x, low))
            .with_segment(Vec2::new(end_x, floor_y), Vec2::new(FAR, floor_y))
    }

    /// Straight slope touching a body of `radius` at the origin, with the
    /// contact `incline` degrees off straight down (positive: left of centre).
    pub fn slope(incline: f32, radius: f32) -> Self {
        let rad = incline.to_radians();
        let normal = Vec2::new(rad.sin(), rad.cos());
        let contact = -normal * radius;
        let along = Vec2::new(normal.y, -normal.x) * 5.0;
        Self::empty().with_segment(contact - along, contact + along)
    }

    pub fn with_segment(mut self, a: Vec2, b: Vec2) -> Self {
        self.segments.push((a, b));
        self
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn moving(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn total_force(&self) -> Vec2 {
        self.forces.iter().copied().sum()
    }

    pub fn clear_log(&mut self) {
        self.forces.clear();
        self.impulses.clear();
        self.sleeps = 0;
    }
}

impl PhysicsOracle for SegmentWorld {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn is_awake(&self) -> bool {
        self.awake
    }

    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        self.rays_cast.set(self.rays_cast.get() + 1);
        let d = direction.normalize_or_zero();
        if d == Vec2::ZERO {
            return None;
        }

        let mut best: Option<RayHit> = None;
        for &(a, b) in &self.segments {
            let e = b - a;
            let denom = d.perp_dot(e);
            if denom.abs() <= f32::EPSILON {
                continue;
            }
            let rel = a - origin;
            let t = rel.perp_dot(e) / denom;
            let s = rel.perp_dot(d) / denom;
            if t < 0.0 || t > max_distance || !(0.0..=1.0).contains(&s) {
                continue;
            }
            if best.is_none_or(|hit| t < hit.distance) {
                best = Some(RayHit {
                    point: origin + d * t,
                    distance: t,
                });
            }
        }
        best
    }

    fn add_force(&mut self, force: Vec2) {
        self.forces.push(force);
    }

    fn add_impulse(&mut self, impulse: Vec2) {
        self.impulses.push(impulse);
        self.velocity += impulse / self.mass;
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn sleep(&mut self) {
        self.awake = false;
        self.sleeps += 1;
        self.velocity = Vec2::ZERO;
    }

    fn wake_up(&mut self) {
        self.awake = true;
    }
}
