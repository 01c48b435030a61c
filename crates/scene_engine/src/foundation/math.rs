//! Math utilities and types
//!
//! Provides the nalgebra aliases and the node transform used across the engine.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform from position, XYZ Euler angles (radians) and scale
    pub fn from_parts(position: Vec3, euler_xyz: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation: utils::quat_from_euler_xyz(euler_xyz),
            scale,
        }
    }

    /// Model matrix: scale, then rotate, then translate
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Local +Z axis expressed in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Wrap an angle into `[0, 2π)`
    pub fn wrap_angle(radians: f32) -> f32 {
        radians.rem_euclid(constants::TAU)
    }

    /// `(ω·t) mod 2π`, wrapped in double precision before narrowing
    ///
    /// The phase grows without bound, so the product is never formed in `f32`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn phase_angle(angular_speed: f32, phase: f64) -> f32 {
        let angle = (f64::from(angular_speed) * phase).rem_euclid(std::f64::consts::TAU);
        (angle as f32).rem_euclid(constants::TAU)
    }

    /// Build a rotation from Euler angles applied in X, then Y, then Z order
    ///
    /// The resulting matrix is `Rx * Ry * Rz`, the intrinsic XYZ convention
    /// used by the scene description files.
    pub fn quat_from_euler_xyz(angles: Vec3) -> Quat {
        Quat::from_axis_angle(&Vec3::x_axis(), angles.x)
            * Quat::from_axis_angle(&Vec3::y_axis(), angles.y)
            * Quat::from_axis_angle(&Vec3::z_axis(), angles.z)
    }

    /// True when every component is finite
    pub fn is_finite(v: &Vec3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}
