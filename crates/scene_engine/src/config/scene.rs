//! Top-level scene configuration

use serde::{Deserialize, Serialize};

use crate::animation::BehaviorDirective;
use crate::foundation::math::Vec3;
use crate::frame::PhaseClock;
use crate::render::Camera;
use crate::scene::{LightDirective, PlacementDirective, SceneDescription};

use super::{Config, ConfigError};

/// Camera placement and projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position
    pub position: [f32; 3],
    /// Look-at point
    pub target: [f32; 3],
    /// Up direction
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 30.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    /// Build the camera for a surface with the given aspect ratio
    pub fn to_camera(&self, aspect: f32) -> Camera {
        let mut camera = Camera::perspective(Vec3::from(self.position), self.fov_degrees, aspect, self.near, self.far);
        camera.look_at(Vec3::from(self.target), Vec3::from(self.up));
        camera
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!("camera fov {} must be in (0, 180)", self.fov_degrees)));
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "camera clip range {}..{} must satisfy 0 < near < far",
                self.near, self.far
            )));
        }
        let finite = |v: &[f32; 3]| v.iter().all(|c| c.is_finite());
        if !(finite(&self.position) && finite(&self.target) && finite(&self.up)) {
            return Err(ConfigError::Invalid("camera vectors must be finite".to_string()));
        }
        let forward = Vec3::from(self.target) - Vec3::from(self.position);
        if forward.norm() <= f32::EPSILON {
            return Err(ConfigError::Invalid("camera target equals its position".to_string()));
        }
        let up = Vec3::from(self.up);
        if up.norm() <= f32::EPSILON || forward.normalize().cross(&up.normalize()).norm() < 1e-6 {
            return Err(ConfigError::Invalid(format!(
                "camera up {:?} must be non-zero and not parallel to the view direction",
                self.up
            )));
        }
        Ok(())
    }
}

/// Where texture paths are resolved from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory texture paths are relative to
    pub root: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self { root: "assets".to_string() }
    }
}

/// Everything the engine needs at startup
///
/// `Default` is the textured room: wood floor, brick wall, metal sphere, an
/// ambient light and one point light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Phase clock
    #[serde(default)]
    pub scheduler: PhaseClock,
    /// Asset locations
    #[serde(default)]
    pub assets: AssetConfig,
    /// Objects to place
    #[serde(default)]
    pub nodes: Vec<PlacementDirective>,
    /// Lights to add
    #[serde(default)]
    pub lights: Vec<LightDirective>,
    /// Behaviors to bind after composition
    #[serde(default)]
    pub behaviors: Vec<BehaviorDirective>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        super::textured_room()
    }
}

impl SceneConfig {
    /// Nodes and lights as a scene description
    pub fn description(&self) -> SceneDescription {
        SceneDescription { nodes: self.nodes.clone(), lights: self.lights.clone() }
    }
}

impl Config for SceneConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        if !self.scheduler.is_valid() {
            return Err(ConfigError::Invalid(format!("scheduler clock {:?} must be finite and non-negative", self.scheduler)));
        }
        Ok(())
    }
}
