//! Scene nodes and their identifiers

use slotmap::new_key_type;

use crate::foundation::math::Transform;
use crate::render::{GeometryHandle, MaterialHandle};

new_key_type! {
    /// Stable identifier of a node within its scene
    pub struct NodeId;

    /// Stable identifier of a light within its scene
    pub struct LightId;
}

/// One placed, renderable object
///
/// Geometry and material are shared by handle; only the transform is owned
/// per node.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// This node's id
    pub id: NodeId,
    /// Optional name used by behaviors to address the node
    pub name: Option<String>,
    /// Interned geometry
    pub geometry: GeometryHandle,
    /// Interned material
    pub material: MaterialHandle,
    /// World transform
    pub transform: Transform,
}
