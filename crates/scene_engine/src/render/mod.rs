//! # Rendering Data
//!
//! Everything a renderer needs to draw the scene, without any drawing.
//!
//! ## Architecture
//!
//! - **Geometry / Material**: immutable descriptors, deduplicated through an
//!   interning [`Registry`] so equal descriptors share one handle
//! - **Light**: ambient, directional and point sources
//! - **Camera**: the single perspective camera
//! - **Renderer**: the trait the frame scheduler submits frames to
//!
//! Material appearance is resolved per frame: a texture that has not arrived
//! yet renders as the material's base color.

pub mod camera;
pub mod geometry;
pub mod light;
pub mod material;
pub mod registry;
pub mod renderer;

pub use camera::Camera;
pub use geometry::{GeometryDescriptor, GeometryKind};
pub use light::{Light, LightKind};
pub use material::{MaterialDescriptor, ShadingModel, SurfaceAppearance};
pub use registry::{GeometryHandle, GeometryRegistry, Interned, MaterialHandle, MaterialRegistry, Registry};
pub use renderer::{Renderer, Viewport};
