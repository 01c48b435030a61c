//! Binding behavior directives to a composed scene

use std::collections::HashMap;

use nalgebra::Unit;
use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::scene::Scene;

use super::behavior::{billboard_rotation, orbit_position, spin_rotation, AnimationBehavior, BehaviorTarget};
use super::{BehaviorBindingError, BindingResult};

fn default_axis() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

/// Behavior as written in a scene file, addressing targets by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorDirective {
    /// Circle a named point light around the Y axis
    Orbit {
        /// Light name
        light: String,
        /// Distance from the Y axis
        radius: f32,
        /// Constant Y coordinate
        height: f32,
        /// Radians per unit of phase
        angular_speed: f32,
    },
    /// Keep a named node facing a fixed point
    Billboard {
        /// Node name
        node: String,
        /// Point to face
        target: [f32; 3],
    },
    /// Spin a named node about a local axis
    ContinuousRotate {
        /// Node name
        node: String,
        /// Rotation axis, Y by default
        #[serde(default = "default_axis")]
        axis: [f32; 3],
        /// Radians per unit of phase
        angular_speed: f32,
    },
}

/// Validated, immutable list of behaviors for one scene
///
/// Applied in registration order. No two behaviors write the same target.
#[derive(Debug, Clone, Default)]
pub struct BehaviorSet {
    behaviors: Vec<AnimationBehavior>,
}

impl BehaviorSet {
    /// A set that animates nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve names against `scene` and validate every directive
    pub fn bind(scene: &Scene, directives: &[BehaviorDirective]) -> BindingResult<Self> {
        let behaviors = directives
            .iter()
            .enumerate()
            .map(|(index, directive)| resolve(scene, index, directive))
            .collect::<BindingResult<Vec<_>>>()?;
        Self::from_behaviors(scene, behaviors)
    }

    /// Validate already-resolved behaviors against `scene`
    pub fn from_behaviors(scene: &Scene, behaviors: Vec<AnimationBehavior>) -> BindingResult<Self> {
        let mut owners: HashMap<BehaviorTarget, usize> = HashMap::new();
        for (index, behavior) in behaviors.iter().enumerate() {
            match behavior.target() {
                BehaviorTarget::NodeRotation(id) => {
                    if scene.node(id).is_none() {
                        return Err(BehaviorBindingError::UnknownNode(format!("{:?}", id)));
                    }
                }
                BehaviorTarget::LightPosition(id) => match scene.light(id) {
                    None => return Err(BehaviorBindingError::UnknownLight(format!("{:?}", id))),
                    Some(light) if !light.is_point() => {
                        return Err(BehaviorBindingError::NotAPointLight(describe_light(scene, id)));
                    }
                    Some(_) => {}
                },
            }
            if let Some(first) = owners.insert(behavior.target(), index) {
                return Err(BehaviorBindingError::DuplicateTarget {
                    target: describe_target(scene, behavior.target()),
                    first,
                    second: index,
                });
            }
        }

        for behavior in &behaviors {
            log::debug!("Bound {} behavior to {}", behavior.name(), describe_target(scene, behavior.target()));
        }
        log::info!("Bound {} animation behaviors", behaviors.len());
        Ok(Self { behaviors })
    }

    /// Write every behavior's value for `phase` into the scene
    pub fn apply(&self, scene: &mut Scene, phase: f64) {
        for behavior in &self.behaviors {
            match behavior {
                AnimationBehavior::Orbit { light, radius, height, angular_speed } => {
                    if let Some(light) = scene.light_mut(*light) {
                        light.set_position(orbit_position(*radius, *height, *angular_speed, phase));
                    }
                }
                AnimationBehavior::Billboard { node, target_point } => {
                    if let Some(node) = scene.node_mut(*node) {
                        node.transform.rotation = billboard_rotation(node.transform.position, *target_point);
                    }
                }
                AnimationBehavior::ContinuousRotate { node, axis, angular_speed, base_rotation } => {
                    if let Some(node) = scene.node_mut(*node) {
                        node.transform.rotation = spin_rotation(base_rotation, axis, *angular_speed, phase);
                    }
                }
            }
        }
    }

    /// Number of behaviors
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// True when nothing is animated
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Behaviors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &AnimationBehavior> {
        self.behaviors.iter()
    }
}

fn resolve(scene: &Scene, index: usize, directive: &BehaviorDirective) -> BindingResult<AnimationBehavior> {
    let invalid = |reason: &str| BehaviorBindingError::InvalidParameter { index, reason: reason.to_string() };

    match directive {
        BehaviorDirective::Orbit { light, radius, height, angular_speed } => {
            let id = scene
                .find_light(light)
                .ok_or_else(|| BehaviorBindingError::UnknownLight(light.clone()))?;
            if ![*radius, *height, *angular_speed].iter().all(|v| v.is_finite()) {
                return Err(invalid("orbit parameters must be finite"));
            }
            if *radius < 0.0 {
                return Err(invalid("orbit radius must not be negative"));
            }
            Ok(AnimationBehavior::Orbit {
                light: id,
                radius: *radius,
                height: *height,
                angular_speed: *angular_speed,
            })
        }
        BehaviorDirective::Billboard { node, target } => {
            let id = scene
                .find_node(node)
                .ok_or_else(|| BehaviorBindingError::UnknownNode(node.clone()))?;
            let target_point = Vec3::from(*target);
            if !target_point.iter().all(|v| v.is_finite()) {
                return Err(invalid("billboard target must be finite"));
            }
            Ok(AnimationBehavior::Billboard { node: id, target_point })
        }
        BehaviorDirective::ContinuousRotate { node, axis, angular_speed } => {
            let id = scene
                .find_node(node)
                .ok_or_else(|| BehaviorBindingError::UnknownNode(node.clone()))?;
            if !angular_speed.is_finite() {
                return Err(invalid("angular speed must be finite"));
            }
            let axis = Vec3::from(*axis);
            if !axis.iter().all(|v| v.is_finite()) {
                return Err(invalid("rotation axis must be finite"));
            }
            let axis = Unit::try_new(axis, f32::EPSILON).ok_or_else(|| invalid("rotation axis has zero length"))?;
            let base_rotation = scene
                .node(id)
                .map(|n| n.transform.rotation)
                .ok_or_else(|| BehaviorBindingError::UnknownNode(node.clone()))?;
            Ok(AnimationBehavior::ContinuousRotate { node: id, axis, angular_speed: *angular_speed, base_rotation })
        }
    }
}

fn describe_light(scene: &Scene, id: crate::scene::LightId) -> String {
    scene
        .light(id)
        .and_then(|l| l.name.clone())
        .unwrap_or_else(|| format!("{:?}", id))
}

fn describe_target(scene: &Scene, target: BehaviorTarget) -> String {
    match target {
        BehaviorTarget::NodeRotation(id) => {
            let name = scene.node(id).and_then(|n| n.name.clone()).unwrap_or_else(|| format!("{:?}", id));
            format!("rotation of node '{}'", name)
        }
        BehaviorTarget::LightPosition(id) => format!("position of light '{}'", describe_light(scene, id)),
    }
}
