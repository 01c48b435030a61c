//! Scenario tests spanning composition, textures, behaviors and the frame loop

mod config_files;
mod textures;

use crate::foundation::math::{Transform, Vec3};
use crate::render::{Camera, Renderer};
use crate::scene::Scene;

/// What a renderer observed for one frame
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FrameSnapshot {
    pub transforms: Vec<Transform>,
    pub textured: Vec<bool>,
    pub point_lights: Vec<Vec3>,
}

/// Renderer that records every frame it is given
#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub frames: Vec<FrameSnapshot>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, scene: &Scene, _camera: &Camera) {
        let transforms = scene.nodes().map(|n| n.transform.clone()).collect();
        let textured = scene
            .nodes()
            .map(|n| scene.appearance(n.id).is_some_and(|a| a.is_textured()))
            .collect();
        let point_lights = scene.lights().filter_map(|(_, light)| light.position()).collect();
        self.frames.push(FrameSnapshot { transforms, textured, point_lights });
    }
}
