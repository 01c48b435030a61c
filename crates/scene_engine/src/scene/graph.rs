//! Root container owning every node, light and shared resource

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::assets::{TextureCache, TextureHandle};
use crate::foundation::math::Transform;
use crate::render::{
    GeometryDescriptor, GeometryHandle, GeometryRegistry, Light, MaterialDescriptor,
    MaterialHandle, MaterialRegistry, SurfaceAppearance,
};

use super::node::{LightId, NodeId, SceneNode};

/// A composed scene
///
/// Built once by the [`SceneBuilder`](super::SceneBuilder). After composition
/// the set of nodes and lights never changes; only transforms and light
/// positions are rewritten by animation behaviors.
#[derive(Debug, Default)]
pub struct Scene {
    geometries: GeometryRegistry,
    materials: MaterialRegistry,
    textures: TextureCache,
    nodes: SlotMap<NodeId, SceneNode>,
    node_order: Vec<NodeId>,
    node_names: HashMap<String, NodeId>,
    lights: SlotMap<LightId, Light>,
    light_order: Vec<LightId>,
    light_names: HashMap<String, LightId>,
}

impl Scene {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn intern_geometry(&mut self, descriptor: GeometryDescriptor) -> GeometryHandle {
        self.geometries.intern(descriptor)
    }

    pub(crate) fn intern_material(&mut self, descriptor: MaterialDescriptor) -> MaterialHandle {
        self.materials.intern(descriptor)
    }

    pub(crate) fn textures_mut(&mut self) -> &mut TextureCache {
        &mut self.textures
    }

    pub(crate) fn add_node(
        &mut self,
        name: Option<String>,
        geometry: GeometryHandle,
        material: MaterialHandle,
        transform: Transform,
    ) -> NodeId {
        let id = self.nodes.insert_with_key(|id| SceneNode {
            id,
            name: name.clone(),
            geometry,
            material,
            transform,
        });
        if let Some(name) = name {
            self.node_names.insert(name, id);
        }
        self.node_order.push(id);
        id
    }

    pub(crate) fn add_light(&mut self, light: Light) -> LightId {
        let name = light.name.clone();
        let id = self.lights.insert(light);
        if let Some(name) = name {
            self.light_names.insert(name, id);
        }
        self.light_order.push(id);
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    pub(crate) fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id)
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Find a node by name
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.node_names.get(name).copied()
    }

    /// Nodes in composition order
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.node_order.iter().filter_map(move |id| self.nodes.get(*id))
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    /// Triangles a renderer would draw for every node, counting shared geometry once per node
    pub fn triangle_count(&self) -> usize {
        self.nodes()
            .filter_map(|node| self.geometry(node.geometry))
            .map(GeometryDescriptor::triangle_count)
            .sum()
    }

    /// Look up a light
    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id)
    }

    /// Find a light by name
    pub fn find_light(&self, name: &str) -> Option<LightId> {
        self.light_names.get(name).copied()
    }

    /// Lights in composition order
    pub fn lights(&self) -> impl Iterator<Item = (LightId, &Light)> {
        self.light_order
            .iter()
            .filter_map(move |id| self.lights.get(*id).map(|light| (*id, light)))
    }

    /// Number of lights
    pub fn light_count(&self) -> usize {
        self.light_order.len()
    }

    /// Interned geometry descriptor
    pub fn geometry(&self, handle: GeometryHandle) -> Option<&GeometryDescriptor> {
        self.geometries.get(handle)
    }

    /// Interned material descriptor
    pub fn material(&self, handle: MaterialHandle) -> Option<&MaterialDescriptor> {
        self.materials.get(handle)
    }

    /// Geometry registry
    pub fn geometries(&self) -> &GeometryRegistry {
        &self.geometries
    }

    /// Material registry
    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Texture handles requested during composition
    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Texture handle used by a material, if it has one
    pub fn material_texture(&self, handle: MaterialHandle) -> Option<&TextureHandle> {
        let texture = self.materials.get(handle)?.texture.as_ref()?;
        self.textures.get(&texture.path)
    }

    /// What a node looks like right now
    ///
    /// Returns `None` only for an id that does not belong to this scene.
    pub fn appearance(&self, id: NodeId) -> Option<SurfaceAppearance<'_>> {
        let node = self.nodes.get(id)?;
        let material = self.materials.get(node.material)?;
        Some(material.appearance(self.material_texture(node.material)))
    }
}
