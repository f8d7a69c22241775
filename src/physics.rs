//! Gravity decomposition along the current ground incline.

use bevy::prelude::*;

use crate::collision::CollisionAnalyzer;
use crate::math::rotate_deg;
use crate::oracle::PhysicsOracle;

/// Snapshot of the forces acting on a body for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPhysics {
    gravity: Vec2,
    incline: f32,
}

impl LocalPhysics {
    /// Read gravity from the oracle and the incline from the analyzer.
    pub fn sample(oracle: &dyn PhysicsOracle, analyzer: &mut CollisionAnalyzer) -> Self {
        let gravity = oracle.gravity() * oracle.gravity_scale() * oracle.mass();
        Self {
            gravity,
            incline: analyzer.collision_angle(oracle),
        }
    }

    pub fn from_parts(gravity_force: Vec2, incline: f32) -> Self {
        Self {
            gravity: gravity_force,
            incline,
        }
    }

    /// Weight of the body: gravity times scale times mass.
    pub fn gravity_force(&self) -> Vec2 {
        self.gravity
    }

    pub fn angle_of_incline(&self) -> f32 {
        self.incline
    }

    /// Gravity component pressing into the surface.
    pub fn perpendicular_g_force(&self) -> Vec2 {
        // Rotating by the incline aligns the surface normal with +Y.
        let aligned = rotate_deg(self.gravity, self.incline);
        rotate_deg(Vec2::new(0.0, aligned.y), -self.incline)
    }

    /// Gravity component pulling the body down the slope.
    pub fn parallel_g_force(&self) -> Vec2 {
        let aligned = rotate_deg(self.gravity, self.incline);
        rotate_deg(Vec2::new(aligned.x, 0.0), -self.incline)
    }

    /// Support force from the surface, opposing the perpendicular component.
    pub fn normal_force(&self) -> Vec2 {
        -self.perpendicular_g_force()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementTuning;
    use crate::oracle::testing::SegmentWorld;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_flat_ground_has_no_parallel_component() {
        let physics = LocalPhysics::from_parts(Vec2::new(0.0, -9.81), 0.0);
        assert!(physics.parallel_g_force().length() < EPS);
        assert!((physics.perpendicular_g_force() - Vec2::new(0.0, -9.81)).length() < EPS);
        assert!((physics.normal_force() - Vec2::new(0.0, 9.81)).length() < EPS);
    }

    #[test]
    fn test_components_recombine_and_are_orthogonal() {
        for incline in [-80.0, -45.0, -10.0, 5.0, 30.0, 60.0] {
            let physics = LocalPhysics::from_parts(Vec2::new(0.0, -9.81), incline);
            let perp = physics.perpendicular_g_force();
            let par = physics.parallel_g_force();
            assert!((perp + par - physics.gravity_force()).length() < EPS);
            assert!(perp.dot(par).abs() < EPS);
        }
    }

    #[test]
    fn test_normal_points_from_contact_to_centre() {
        // Positive incline: contact below-left of the centre.
        let incline: f32 = 30.0;
        let physics = LocalPhysics::from_parts(Vec2::new(0.0, -10.0), incline);
        let to_centre = Vec2::new(incline.to_radians().sin(), incline.to_radians().cos());
        let normal = physics.normal_force();
        assert!((normal.normalize() - to_centre).length() < EPS);
        // Slope descends to the right, so gravity pulls the body right.
        assert!(physics.parallel_g_force().x > 0.0);
    }

    #[test]
    fn test_sample_uses_mass_and_scale() {
        let mut world = SegmentWorld::flat(0.0).at(Vec2::new(0.0, 0.5));
        world.mass = 2.0;
        world.gravity_scale = 0.5;
        let mut analyzer = CollisionAnalyzer::new(0.5, &MovementTuning::default());
        analyzer.begin_cycle();

        let physics = LocalPhysics::sample(&world, &mut analyzer);
        assert!((physics.gravity_force() - Vec2::new(0.0, -9.81)).length() < EPS);
        assert!(physics.angle_of_incline().abs() < EPS);
    }
}
