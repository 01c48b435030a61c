//! Scene graph
//!
//! A [`Scene`] is composed once from a [`SceneDescription`] and then lives
//! for the whole session. It owns the nodes, the lights, the geometry and
//! material registries, and the texture handles requested during composition.
//!
//! ```text
//! SceneDescription ──▶ SceneBuilder ──▶ Scene ──▶ Renderer
//!                          │
//!                          └──▶ TextureProvider (requests only)
//! ```

mod builder;
mod directive;
mod graph;
mod node;

pub use builder::SceneBuilder;
pub use directive::{
    ColorSpec, GeometrySpec, LightDirective, LightDirectiveKind, MaterialSpec, PlacementDirective,
    SceneDescription,
};
pub use graph::Scene;
pub use node::{LightId, NodeId, SceneNode};

use thiserror::Error;

/// Reasons a scene description cannot be composed
///
/// Indices refer to the position of the offending directive in its list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompositionError {
    /// Geometry kind is not one of the known primitives
    #[error("Node {index}: unknown geometry kind '{kind}'")]
    UnknownGeometryKind {
        /// Directive index
        index: usize,
        /// Requested kind
        kind: String,
    },

    /// Dimensions or tessellation are unusable
    #[error("Node {index}: invalid geometry: {reason}")]
    InvalidGeometry {
        /// Directive index
        index: usize,
        /// What is wrong
        reason: String,
    },

    /// Material parameters are out of range
    #[error("Node {index}: invalid material: {reason}")]
    InvalidMaterial {
        /// Directive index
        index: usize,
        /// What is wrong
        reason: String,
    },

    /// Position, rotation or scale is not finite
    #[error("Node {index}: transform must be finite")]
    InvalidTransform {
        /// Directive index
        index: usize,
    },

    /// Light parameters are missing or out of range
    #[error("Light {index}: {reason}")]
    InvalidLight {
        /// Directive index
        index: usize,
        /// What is wrong
        reason: String,
    },

    /// Two nodes or two lights share a name
    #[error("Duplicate name '{0}'")]
    DuplicateName(String),
}

/// Result type for scene composition
pub type CompositionResult<T> = Result<T, CompositionError>;
