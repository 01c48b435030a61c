//! Core engine implementation

use crate::{
    animation::{BehaviorBindingError, BehaviorSet},
    assets::TextureProvider,
    config::{Config, ConfigError, SceneConfig},
    frame::{FrameInfo, FrameScheduler},
    render::{Camera, Renderer, Viewport},
    scene::{CompositionError, Scene, SceneBuilder},
};
use thiserror::Error;

/// Composed scene plus everything needed to animate and render it
///
/// The texture provider and renderer stay with the host and are lent to the
/// engine on each call, so the engine holds no handles to external systems.
#[derive(Debug)]
pub struct SceneEngine {
    scene: Scene,
    camera: Camera,
    behaviors: BehaviorSet,
    scheduler: FrameScheduler,
    viewport: Viewport,
}

impl SceneEngine {
    /// Compose the configured scene and bind its behaviors
    ///
    /// Nothing is returned unless the configuration, every directive and every
    /// behavior is valid. Behaviors are bound before textures are requested,
    /// so a rejected configuration issues no texture loads.
    pub fn new(
        config: &SceneConfig,
        provider: &mut dyn TextureProvider,
        viewport: Viewport,
    ) -> EngineResult<Self> {
        log::info!("Initializing scene engine...");
        config.validate()?;

        let (scene, behaviors) = SceneBuilder::new(provider).compose_checked(&config.description(), |scene| {
            BehaviorSet::bind(scene, &config.behaviors).map_err(EngineError::from)
        })?;
        let camera = config.camera.to_camera(viewport.aspect());
        let scheduler = FrameScheduler::new(config.scheduler);

        log::info!(
            "Scene engine ready: {}x{} viewport, {} behaviors",
            viewport.width,
            viewport.height,
            behaviors.len()
        );
        Ok(Self { scene, camera, behaviors, scheduler, viewport })
    }

    /// Run one frame; see [`FrameScheduler::tick`]
    pub fn tick(&mut self, provider: &mut dyn TextureProvider, renderer: &mut dyn Renderer) -> FrameInfo {
        self.scheduler
            .tick(&mut self.scene, &self.camera, &self.behaviors, provider, renderer)
    }

    /// The host surface changed size
    ///
    /// Updates the camera aspect and forwards the new size to the renderer.
    /// A zero-sized surface (e.g. a minimised window) is still forwarded, but
    /// the camera keeps the last usable aspect.
    pub fn resize(&mut self, viewport: Viewport, renderer: &mut dyn Renderer) {
        if viewport == self.viewport {
            return;
        }
        log::debug!(
            "Viewport resized: {}x{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        if !viewport.is_empty() {
            self.camera.set_aspect_ratio(viewport.aspect());
        }
        renderer.resize(viewport);
    }

    /// The composed scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Bound behaviors
    pub fn behaviors(&self) -> &BehaviorSet {
        &self.behaviors
    }

    /// Frame scheduler
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Mutable frame scheduler, e.g. to inject a phase
    pub fn scheduler_mut(&mut self) -> &mut FrameScheduler {
        &mut self.scheduler
    }

    /// Current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration is unreadable or out of range
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scene description could not be composed
    #[error("Composition failed: {0}")]
    Composition(#[from] CompositionError),

    /// Behaviors could not be bound
    #[error("Behavior binding failed: {0}")]
    Binding(#[from] BehaviorBindingError),
}

/// Result type for engine setup
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DeferredTextureProvider;
    use crate::config::{animated_room, textured_room};
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct ResizeLog {
        sizes: Vec<Viewport>,
    }

    impl Renderer for ResizeLog {
        fn render(&mut self, _scene: &Scene, _camera: &Camera) {}

        fn resize(&mut self, viewport: Viewport) {
            self.sizes.push(viewport);
        }
    }

    #[test]
    fn test_new_uses_viewport_aspect() {
        let mut provider = DeferredTextureProvider::new();
        let engine = SceneEngine::new(&textured_room(), &mut provider, Viewport::new(800, 600)).unwrap();
        assert_relative_eq!(engine.camera().aspect, 800.0 / 600.0);
        assert_eq!(engine.scene().node_count(), 3);
        assert!(engine.behaviors().is_empty());
    }

    #[test]
    fn test_resize_updates_camera_and_renderer() {
        let mut provider = DeferredTextureProvider::new();
        let mut renderer = ResizeLog::default();
        let mut engine = SceneEngine::new(&animated_room(), &mut provider, Viewport::new(800, 600)).unwrap();

        engine.resize(Viewport::new(1920, 1080), &mut renderer);
        engine.resize(Viewport::new(1920, 1080), &mut renderer);

        assert_relative_eq!(engine.camera().aspect, 16.0 / 9.0);
        assert_eq!(renderer.sizes, vec![Viewport::new(1920, 1080)]);
    }

    #[test]
    fn test_empty_viewport_keeps_last_aspect() {
        let mut provider = DeferredTextureProvider::new();
        let mut renderer = ResizeLog::default();
        let mut engine = SceneEngine::new(&textured_room(), &mut provider, Viewport::new(800, 600)).unwrap();

        engine.resize(Viewport::new(0, 600), &mut renderer);
        assert_relative_eq!(engine.camera().aspect, 800.0 / 600.0);
        let projection = engine.camera().projection_matrix();
        assert!(projection.iter().all(|v| v.is_finite()));

        engine.resize(Viewport::new(1200, 600), &mut renderer);
        assert_relative_eq!(engine.camera().aspect, 2.0);
        assert_eq!(renderer.sizes, vec![Viewport::new(0, 600), Viewport::new(1200, 600)]);
    }

    #[test]
    fn test_empty_initial_viewport_has_usable_projection() {
        let mut provider = DeferredTextureProvider::new();
        let engine = SceneEngine::new(&textured_room(), &mut provider, Viewport::new(0, 0)).unwrap();
        assert!(engine.camera().aspect > 0.0);
        assert!(engine.camera().projection_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_binding_error_requests_no_textures() {
        let mut config = textured_room();
        config.behaviors.push(crate::animation::BehaviorDirective::ContinuousRotate {
            node: "ball".to_string(),
            axis: [0.0, 1.0, 0.0],
            angular_speed: 0.01,
        });
        let mut provider = DeferredTextureProvider::new();
        let result = SceneEngine::new(&config, &mut provider, Viewport::default());

        assert!(matches!(result, Err(EngineError::Binding(BehaviorBindingError::UnknownNode(_)))));
        assert_eq!(provider.requested_paths().count(), 0);
    }

    #[test]
    fn test_binding_error_surfaces() {
        let mut config = textured_room();
        config.behaviors.push(crate::animation::BehaviorDirective::Billboard {
            node: "ceiling".to_string(),
            target: [0.0; 3],
        });
        let mut provider = DeferredTextureProvider::new();
        let result = SceneEngine::new(&config, &mut provider, Viewport::default());
        assert!(matches!(result, Err(EngineError::Binding(BehaviorBindingError::UnknownNode(_)))));
    }
}
