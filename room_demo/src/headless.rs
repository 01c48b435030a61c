//! Renderer that draws nothing and reports what it would draw

use scene_engine::render::{Camera, Renderer, SurfaceAppearance, Viewport};
use scene_engine::scene::Scene;

/// Logs appearance changes per node and a periodic frame summary
pub struct HeadlessRenderer {
    frames: u64,
    report_every: u64,
    textured: Vec<bool>,
}

impl HeadlessRenderer {
    /// Create a renderer that summarizes every `report_every` frames
    pub fn new(report_every: u64) -> Self {
        Self {
            frames: 0,
            report_every: report_every.max(1),
            textured: Vec::new(),
        }
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &Scene, camera: &Camera) {
        self.frames += 1;
        self.textured.resize(scene.node_count(), false);

        for (index, node) in scene.nodes().enumerate() {
            let label = node.name.as_deref().unwrap_or("unnamed");
            let geometry = scene.geometry(node.geometry).map_or("?", |g| g.kind().name());
            let textured = match scene.appearance(node.id) {
                Some(SurfaceAppearance::Textured { image, .. }) => {
                    if !self.textured[index] {
                        log::info!(
                            "Frame {}: {} '{}' now textured ({}x{})",
                            self.frames,
                            geometry,
                            label,
                            image.width,
                            image.height
                        );
                    }
                    true
                }
                Some(SurfaceAppearance::BaseColor(color)) => {
                    if self.frames == 1 {
                        log::info!(
                            "Frame {}: {} '{}' drawn with base color ({:.2}, {:.2}, {:.2})",
                            self.frames,
                            geometry,
                            label,
                            color.x,
                            color.y,
                            color.z
                        );
                    }
                    false
                }
                None => false,
            };
            self.textured[index] = textured;
        }

        if self.frames % self.report_every == 0 {
            let ready = self.textured.iter().filter(|t| **t).count();
            let lights: Vec<String> = scene
                .lights()
                .map(|(_, light)| match light.position() {
                    Some(p) => format!("{} ({:.2}, {:.2}, {:.2})", light.kind_name(), p.x, p.y, p.z),
                    None => light.kind_name().to_string(),
                })
                .collect();
            log::info!(
                "Frame {}: {}/{} nodes textured, {} triangles, lights [{}], camera aspect {:.3}",
                self.frames,
                ready,
                self.textured.len(),
                scene.triangle_count(),
                lights.join(", "),
                camera.aspect
            );
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        log::info!("Surface resized to {}x{}", viewport.width, viewport.height);
    }
}
