//! Behavior kinds and the pure functions behind them
//!
//! Every behavior is a function of the phase alone, so applying it twice for
//! the same phase gives the same result.

use nalgebra::Unit;

use crate::foundation::math::{utils, Quat, Vec3};
use crate::scene::{LightId, NodeId};

/// Node or light a behavior writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorTarget {
    /// Rotation of a node
    NodeRotation(NodeId),
    /// Position of a point light
    LightPosition(LightId),
}

/// A bound behavior with resolved ids and validated parameters
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationBehavior {
    /// Circle a point light around the Y axis
    Orbit {
        /// Light to move
        light: LightId,
        /// Distance from the Y axis
        radius: f32,
        /// Constant Y coordinate
        height: f32,
        /// Radians per unit of phase
        angular_speed: f32,
    },
    /// Turn a node so its local +Z axis points at a fixed point
    Billboard {
        /// Node to turn
        node: NodeId,
        /// World-space point to face
        target_point: Vec3,
    },
    /// Spin a node about one of its local axes
    ContinuousRotate {
        /// Node to spin
        node: NodeId,
        /// Local rotation axis
        axis: Unit<Vec3>,
        /// Radians per unit of phase
        angular_speed: f32,
        /// Rotation the node had when the behavior was bound
        base_rotation: Quat,
    },
}

impl AnimationBehavior {
    /// What this behavior writes to
    pub fn target(&self) -> BehaviorTarget {
        match *self {
            AnimationBehavior::Orbit { light, .. } => BehaviorTarget::LightPosition(light),
            AnimationBehavior::Billboard { node, .. }
            | AnimationBehavior::ContinuousRotate { node, .. } => BehaviorTarget::NodeRotation(node),
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            AnimationBehavior::Orbit { .. } => "orbit",
            AnimationBehavior::Billboard { .. } => "billboard",
            AnimationBehavior::ContinuousRotate { .. } => "continuous_rotate",
        }
    }
}

/// Position on a horizontal circle: `(r·cos(ω·t), h, r·sin(ω·t))`
pub fn orbit_position(radius: f32, height: f32, angular_speed: f32, phase: f64) -> Vec3 {
    let angle = utils::phase_angle(angular_speed, phase);
    Vec3::new(radius * angle.cos(), height, radius * angle.sin())
}

/// Orientation mapping local +Z onto the direction from `position` to `target`
///
/// Identity when the two points coincide. When the direction is vertical the
/// world Z axis stands in for "up".
pub fn billboard_rotation(position: Vec3, target: Vec3) -> Quat {
    let direction = target - position;
    if direction.norm() <= f32::EPSILON {
        return Quat::identity();
    }
    let up = if direction.normalize().cross(&Vec3::y()).norm() < 1e-6 {
        Vec3::z()
    } else {
        Vec3::y()
    };
    Quat::face_towards(&direction, &up)
}

/// `base` followed by a local rotation of `(ω·t) mod 2π` about `axis`
pub fn spin_rotation(base: &Quat, axis: &Unit<Vec3>, angular_speed: f32, phase: f64) -> Quat {
    let angle = utils::phase_angle(angular_speed, phase);
    base * Quat::from_axis_angle(axis, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_orbit_stays_on_circle() {
        for step in 0..50 {
            let p = orbit_position(30.0, 5.0, 0.01, f64::from(step) * 7.3);
            assert_relative_eq!(p.y, 5.0);
            assert_relative_eq!(p.x * p.x + p.z * p.z, 900.0, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_orbit_at_phase_hundred() {
        let p = orbit_position(30.0, 5.0, 0.01, 100.0);
        assert_relative_eq!(p, Vec3::new(30.0 * 1f32.cos(), 5.0, 30.0 * 1f32.sin()), epsilon = 1e-4);
    }

    #[test]
    fn test_billboard_faces_target() {
        let position = Vec3::new(0.0, 10.0, -25.0);
        let target = Vec3::new(0.0, 0.0, 30.0);
        let rotation = billboard_rotation(position, target);
        let forward = rotation * Vec3::z();
        assert_relative_eq!(forward, (target - position).normalize(), epsilon = EPSILON);
    }

    #[test]
    fn test_billboard_degenerate_cases() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(billboard_rotation(p, p), Quat::identity());

        let up = billboard_rotation(Vec3::zeros(), Vec3::new(0.0, 5.0, 0.0));
        assert_relative_eq!(up * Vec3::z(), Vec3::y(), epsilon = EPSILON);
    }

    #[test]
    fn test_spin_wraps_angle() {
        let axis = Vec3::y_axis();
        let base = Quat::identity();
        let rotation = spin_rotation(&base, &axis, 0.01, 700.0);
        let expected = utils::wrap_angle(7.0);
        assert_relative_eq!(rotation.angle(), expected, epsilon = 1e-4);
    }

    #[test]
    fn test_spin_composes_with_base() {
        let axis = Vec3::z_axis();
        let base = Quat::from_axis_angle(&Vec3::x_axis(), -std::f32::consts::FRAC_PI_2);
        let rotation = spin_rotation(&base, &axis, 1.0, 0.0);
        assert_relative_eq!(rotation, base, epsilon = EPSILON);
    }
}
