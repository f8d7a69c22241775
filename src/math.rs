//! Vector helpers shared by the collision, scouting and physics code.
//!
//! Angles are in degrees throughout the movement core; rotation is
//! counter-clockwise positive.

use bevy::prelude::*;

/// Rotate `v` counter-clockwise by `degrees`.
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Arithmetic mean of a point set. `None` for an empty slice.
pub fn centroid(points: &[Vec2]) -> Option<Vec2> {
    if points.is_empty() {
        return None;
    }
    let sum: Vec2 = points.iter().copied().sum();
    Some(sum / points.len() as f32)
}

/// Unsigned angle between two vectors in `[0, 180]`.
/// A zero-length operand has no direction and yields 0.
pub fn angle_between_deg(a: Vec2, b: Vec2) -> f32 {
    if a.length_squared() <= f32::EPSILON || b.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    a.perp_dot(b).atan2(a.dot(b)).abs().to_degrees()
}

/// Component-wise absolute value.
pub fn abs(v: Vec2) -> Vec2 {
    v.abs()
}

/// Vector pointing from `from` to `to`.
pub fn vector_between(from: Vec2, to: Vec2) -> Vec2 {
    to - from
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_rotate_quarter_turn() {
        let rotated = rotate_deg(Vec2::NEG_Y, 90.0);
        assert!((rotated - Vec2::X).length() < EPS);

        let back = rotate_deg(rotated, -90.0);
        assert!((back - Vec2::NEG_Y).length() < EPS);
    }

    #[test]
    fn test_centroid() {
        assert_eq!(centroid(&[]), None);

        let points = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(1.0, 3.0)];
        let c = centroid(&points).unwrap();
        assert!((c - Vec2::new(1.0, 1.0)).length() < EPS);
    }

    #[test]
    fn test_angle_between() {
        assert!(angle_between_deg(Vec2::NEG_Y, Vec2::NEG_Y).abs() < EPS);
        assert!((angle_between_deg(Vec2::NEG_Y, Vec2::X) - 90.0).abs() < EPS);
        assert!((angle_between_deg(Vec2::NEG_Y, Vec2::NEG_X) - 90.0).abs() < EPS);
        assert!((angle_between_deg(Vec2::NEG_Y, Vec2::Y) - 180.0).abs() < EPS);
        assert_eq!(angle_between_deg(Vec2::ZERO, Vec2::X), 0.0);
    }

    #[test]
    fn test_abs_and_between() {
        assert_eq!(abs(Vec2::new(-1.5, 2.0)), Vec2::new(1.5, 2.0));
        assert_eq!(vector_between(Vec2::new(1.0, 1.0), Vec2::new(3.0, -1.0)), Vec2::new(2.0, -2.0));
    }
}
