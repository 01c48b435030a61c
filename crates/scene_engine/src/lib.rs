//! # Scene Engine
//!
//! Composes a small 3D scene from declarative directives and drives a per-frame
//! update/render loop that animates parts of it.
//!
//! ## Features
//!
//! - **Declarative Composition**: nodes and lights from TOML/RON scene files
//! - **Interned Resources**: equal geometry and materials share one handle
//! - **Asynchronous Textures**: pending until loaded, base color until then
//! - **Phase-Driven Animation**: orbit, billboard and self-rotation behaviors
//! - **Renderer Agnostic**: frames are submitted through a [`render::Renderer`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! struct NullRenderer;
//!
//! impl Renderer for NullRenderer {
//!     fn render(&mut self, _scene: &Scene, _camera: &Camera) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SceneConfig::load_from_file("scenes/room.toml")?;
//!     let mut textures = ThreadedImageLoader::new(&config.assets.root);
//!     let mut engine = SceneEngine::new(&config, &mut textures, Viewport::new(1280, 720))?;
//!     let mut renderer = NullRenderer;
//!     for _ in 0..600 {
//!         engine.tick(&mut textures, &mut renderer);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss, clippy::must_use_candidate)]

pub mod animation;
pub mod assets;
pub mod config;
pub mod foundation;
pub mod frame;
pub mod render;
pub mod scene;

mod engine;

#[cfg(test)]
mod tests;

pub use engine::{EngineError, EngineResult, SceneEngine};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::{BehaviorDirective, BehaviorSet},
        assets::{DeferredTextureProvider, ImageData, TextureHandle, TextureProvider, ThreadedImageLoader},
        config::{Config, SceneConfig},
        foundation::math::{Quat, Transform, Vec3},
        frame::{FrameInfo, FrameScheduler, PhaseClock},
        render::{Camera, Renderer, SurfaceAppearance, Viewport},
        scene::{Scene, SceneBuilder, SceneDescription},
        EngineError, SceneEngine,
    };
}
