//! Scene composition from directives

use std::collections::HashSet;

use crate::assets::TextureProvider;
use crate::foundation::math::{utils, Transform, Vec3};
use crate::render::{GeometryDescriptor, GeometryKind, Light, MaterialDescriptor};

use super::directive::{
    GeometrySpec, LightDirective, LightDirectiveKind, MaterialSpec, PlacementDirective,
    SceneDescription,
};
use super::{CompositionError, CompositionResult, Scene};

/// Default sphere tessellation when a directive gives none
const DEFAULT_SPHERE_SEGMENTS: [u32; 2] = [32, 16];

/// A node whose directive passed validation
struct ValidatedNode {
    name: Option<String>,
    geometry: GeometryDescriptor,
    material: MaterialDescriptor,
    transform: Transform,
}

/// Composes scenes, requesting textures from a provider
///
/// Composition is all or nothing. Every directive is validated before the
/// first texture is requested, so a rejected description leaves the provider
/// untouched.
pub struct SceneBuilder<'a> {
    provider: &'a mut dyn TextureProvider,
}

impl<'a> SceneBuilder<'a> {
    /// Create a builder that requests textures from `provider`
    pub fn new(provider: &'a mut dyn TextureProvider) -> Self {
        Self { provider }
    }

    /// Build a scene with one node per placement directive, in order
    pub fn compose(&mut self, description: &SceneDescription) -> CompositionResult<Scene> {
        self.compose_checked(description, |_| Ok::<_, CompositionError>(()))
            .map(|(scene, ())| scene)
    }

    /// Build a scene, running `check` on it before any texture is requested
    ///
    /// When `check` fails the error is returned and the provider has seen no
    /// requests, same as for an invalid description.
    pub fn compose_checked<T, E>(
        &mut self,
        description: &SceneDescription,
        check: impl FnOnce(&Scene) -> Result<T, E>,
    ) -> Result<(Scene, T), E>
    where
        E: From<CompositionError>,
    {
        let nodes = validate_nodes(&description.nodes)?;
        let lights = validate_lights(&description.lights)?;

        let mut scene = Scene::new();
        for node in nodes {
            let geometry = scene.intern_geometry(node.geometry);
            let material = scene.intern_material(node.material);
            scene.add_node(node.name, geometry, material, node.transform);
        }
        for light in lights {
            scene.add_light(light);
        }

        let checked = check(&scene)?;

        let paths: Vec<String> = scene
            .nodes()
            .filter_map(|node| scene.material(node.material))
            .filter_map(|material| material.texture.as_ref().map(|texture| texture.path.clone()))
            .collect();
        for path in &paths {
            scene.textures_mut().get_or_request(path, self.provider);
        }

        log::info!(
            "Composed scene: {} nodes ({} triangles), {} geometries, {} materials, {} textures, {} lights",
            scene.node_count(),
            scene.triangle_count(),
            scene.geometries().len(),
            scene.materials().len(),
            scene.textures().len(),
            scene.light_count()
        );
        Ok((scene, checked))
    }
}

fn validate_nodes(directives: &[PlacementDirective]) -> CompositionResult<Vec<ValidatedNode>> {
    let mut names = HashSet::new();
    directives
        .iter()
        .enumerate()
        .map(|(index, directive)| {
            if let Some(name) = &directive.name {
                if !names.insert(name.as_str()) {
                    return Err(CompositionError::DuplicateName(name.clone()));
                }
            }
            let node = ValidatedNode {
                name: directive.name.clone(),
                geometry: validate_geometry(index, &directive.geometry)?,
                material: validate_material(index, &directive.material)?,
                transform: validate_transform(index, directive)?,
            };
            log::debug!(
                "Node {} ({}): {} with {} vertices at {:?}",
                index,
                directive.name.as_deref().unwrap_or("unnamed"),
                node.geometry.kind(),
                node.geometry.vertex_count(),
                directive.position
            );
            Ok(node)
        })
        .collect()
}

fn validate_geometry(index: usize, spec: &GeometrySpec) -> CompositionResult<GeometryDescriptor> {
    let kind: GeometryKind = spec
        .kind
        .parse()
        .map_err(|kind| CompositionError::UnknownGeometryKind { index, kind })?;

    let expected = match kind {
        GeometryKind::Plane => 2,
        GeometryKind::Sphere => 1,
        GeometryKind::Box => 3,
    };
    if spec.dims.len() != expected {
        return Err(CompositionError::InvalidGeometry {
            index,
            reason: format!("{} needs {} dimensions, got {}", kind, expected, spec.dims.len()),
        });
    }
    if let Some(bad) = spec.dims.iter().find(|d| !d.is_finite() || **d <= 0.0) {
        return Err(CompositionError::InvalidGeometry {
            index,
            reason: format!("dimension {} is not a positive finite number", bad),
        });
    }
    if let Some([w, h]) = spec.segments {
        if w == 0 || h == 0 {
            return Err(CompositionError::InvalidGeometry {
                index,
                reason: "segment counts must be at least 1".to_string(),
            });
        }
    }

    let d = &spec.dims;
    Ok(match kind {
        GeometryKind::Plane => {
            let [width_segments, height_segments] = spec.segments.unwrap_or([1, 1]);
            GeometryDescriptor::Plane { width: d[0], height: d[1], width_segments, height_segments }
        }
        GeometryKind::Sphere => {
            let [w, h] = spec.segments.unwrap_or(DEFAULT_SPHERE_SEGMENTS);
            GeometryDescriptor::sphere(d[0], w, h)
        }
        GeometryKind::Box => GeometryDescriptor::cuboid(d[0], d[1], d[2]),
    })
}

fn validate_material(index: usize, spec: &MaterialSpec) -> CompositionResult<MaterialDescriptor> {
    let invalid = |reason: String| CompositionError::InvalidMaterial { index, reason };

    let base_color = spec
        .color
        .to_vec3()
        .map_err(|literal| invalid(format!("malformed color '{}'", literal)))?;
    check_color(&base_color).map_err(invalid)?;
    for (label, value) in [("roughness", spec.roughness), ("metalness", spec.metalness)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(invalid(format!("{} {} is outside [0, 1]", label, value)));
        }
    }

    let mut material = MaterialDescriptor {
        model: spec.model,
        base_color,
        roughness: spec.roughness,
        metalness: spec.metalness,
        texture: None,
    };
    if let Some(texture) = &spec.texture {
        if texture.path.trim().is_empty() {
            return Err(invalid("texture path is empty".to_string()));
        }
        if !texture.repeat.iter().all(|r| r.is_finite()) {
            return Err(invalid("texture repeat must be finite".to_string()));
        }
        material = material.with_texture(texture.clone());
    }
    Ok(material)
}

/// Linear RGB components must lie in `[0, 1]`
fn check_color(color: &Vec3) -> Result<(), String> {
    match color.iter().find(|c| !(0.0..=1.0).contains(*c)) {
        Some(bad) => Err(format!("color component {} is outside [0, 1]", bad)),
        None => Ok(()),
    }
}

fn validate_transform(index: usize, directive: &PlacementDirective) -> CompositionResult<Transform> {
    let position = Vec3::from(directive.position);
    let rotation = Vec3::from(directive.rotation);
    let scale = Vec3::from(directive.scale);
    if !(utils::is_finite(&position) && utils::is_finite(&rotation) && utils::is_finite(&scale)) {
        return Err(CompositionError::InvalidTransform { index });
    }
    Ok(Transform::from_parts(position, rotation, scale))
}

fn validate_lights(directives: &[LightDirective]) -> CompositionResult<Vec<Light>> {
    let mut names = HashSet::new();
    directives
        .iter()
        .enumerate()
        .map(|(index, directive)| {
            if let Some(name) = &directive.name {
                if !names.insert(name.as_str()) {
                    return Err(CompositionError::DuplicateName(name.clone()));
                }
            }
            let light = validate_light(index, directive)?;
            Ok(match &directive.name {
                Some(name) => light.named(name.clone()),
                None => light,
            })
        })
        .collect()
}

fn validate_light(index: usize, directive: &LightDirective) -> CompositionResult<Light> {
    let invalid = |reason: String| CompositionError::InvalidLight { index, reason };

    let color = directive
        .color
        .to_vec3()
        .map_err(|literal| invalid(format!("malformed color '{}'", literal)))?;
    check_color(&color).map_err(invalid)?;
    if !directive.intensity.is_finite() || directive.intensity < 0.0 {
        return Err(invalid(format!("intensity {} must be a non-negative number", directive.intensity)));
    }

    match directive.kind {
        LightDirectiveKind::Ambient => Ok(Light::ambient(color, directive.intensity)),
        LightDirectiveKind::Point => {
            let position = directive
                .position
                .map(Vec3::from)
                .ok_or_else(|| invalid("point light needs a position".to_string()))?;
            if !utils::is_finite(&position) {
                return Err(invalid("position must be finite".to_string()));
            }
            Ok(Light::point(position, color, directive.intensity))
        }
        LightDirectiveKind::Directional => {
            let direction = directive
                .direction
                .map(Vec3::from)
                .ok_or_else(|| invalid("directional light needs a direction".to_string()))?;
            if !utils::is_finite(&direction) || direction.norm() <= f32::EPSILON {
                return Err(invalid("direction must be a finite non-zero vector".to_string()));
            }
            Ok(Light::directional(direction, color, directive.intensity))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{DeferredTextureProvider, TextureRef};
    use crate::foundation::math::constants::HALF_PI;
    use crate::render::{LightKind, ShadingModel};
    use crate::scene::directive::ColorSpec;
    use approx::assert_relative_eq;

    fn compose(description: &SceneDescription) -> (CompositionResult<Scene>, DeferredTextureProvider) {
        let mut provider = DeferredTextureProvider::new();
        let result = SceneBuilder::new(&mut provider).compose(description);
        (result, provider)
    }

    #[test]
    fn test_one_node_per_directive_in_order() {
        let description = SceneDescription {
            nodes: vec![
                PlacementDirective::new(GeometrySpec::plane(100.0, 100.0)).named("floor"),
                PlacementDirective::new(GeometrySpec::plane(50.0, 20.0)).named("wall"),
                PlacementDirective::new(GeometrySpec::sphere(3.0, 32, 32)).named("ball"),
            ],
            lights: Vec::new(),
        };
        let (scene, _) = compose(&description);
        let scene = scene.unwrap();

        let names: Vec<_> = scene.nodes().map(|n| n.name.clone().unwrap()).collect();
        assert_eq!(names, ["floor", "wall", "ball"]);
        assert_eq!(scene.geometries().len(), 3);
        assert_eq!(scene.materials().len(), 1);
    }

    #[test]
    fn test_equal_geometry_is_shared() {
        let description = SceneDescription {
            nodes: vec![
                PlacementDirective::new(GeometrySpec::cuboid(1.0, 2.0, 3.0)).at([-2.0, 0.0, 0.0]),
                PlacementDirective::new(GeometrySpec::cuboid(1.0, 2.0, 3.0)).at([2.0, 0.0, 0.0]),
            ],
            lights: Vec::new(),
        };
        let scene = compose(&description).0.unwrap();
        let nodes: Vec<_> = scene.nodes().collect();
        assert_eq!(nodes[0].geometry, nodes[1].geometry);
        assert_ne!(nodes[0].transform, nodes[1].transform);
    }

    #[test]
    fn test_rotation_uses_euler_xyz() {
        let description = SceneDescription {
            nodes: vec![PlacementDirective::new(GeometrySpec::plane(100.0, 100.0)).rotated([-HALF_PI, 0.0, 0.0])],
            lights: Vec::new(),
        };
        let scene = compose(&description).0.unwrap();
        let node = scene.nodes().next().unwrap();
        // A floor plane rotated -90° about X faces up
        assert_relative_eq!(node.transform.forward(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_unknown_kind_requests_nothing() {
        let description = SceneDescription {
            nodes: vec![
                PlacementDirective::new(GeometrySpec::plane(10.0, 10.0))
                    .with_material(MaterialSpec::textured(TextureRef::new("wood_floor.jpg"))),
                PlacementDirective::new(GeometrySpec { kind: "torus".to_string(), dims: vec![1.0], segments: None }),
            ],
            lights: Vec::new(),
        };
        let (result, provider) = compose(&description);
        match result {
            Err(CompositionError::UnknownGeometryKind { index, kind }) => {
                assert_eq!(index, 1);
                assert_eq!(kind, "torus");
            }
            other => panic!("expected unknown kind error, got {:?}", other),
        }
        assert_eq!(provider.requested_paths().count(), 0);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        for geometry in [
            GeometrySpec { kind: "plane".to_string(), dims: vec![1.0], segments: None },
            GeometrySpec::sphere(-1.0, 8, 8),
            GeometrySpec::sphere(f32::NAN, 8, 8),
            GeometrySpec::sphere(1.0, 0, 8),
        ] {
            let description = SceneDescription {
                nodes: vec![PlacementDirective::new(geometry)],
                lights: Vec::new(),
            };
            assert!(matches!(compose(&description).0, Err(CompositionError::InvalidGeometry { .. })));
        }
    }

    #[test]
    fn test_rejects_bad_material_and_transform() {
        let rough = SceneDescription {
            nodes: vec![PlacementDirective::new(GeometrySpec::sphere(1.0, 8, 8))
                .with_material(MaterialSpec::default().with_surface(1.5, 0.0))],
            lights: Vec::new(),
        };
        assert!(matches!(compose(&rough).0, Err(CompositionError::InvalidMaterial { .. })));

        let empty_texture = SceneDescription {
            nodes: vec![PlacementDirective::new(GeometrySpec::sphere(1.0, 8, 8))
                .with_material(MaterialSpec::textured(TextureRef::new("  ")))],
            lights: Vec::new(),
        };
        assert!(matches!(compose(&empty_texture).0, Err(CompositionError::InvalidMaterial { .. })));

        let moved = SceneDescription {
            nodes: vec![PlacementDirective::new(GeometrySpec::sphere(1.0, 8, 8)).at([f32::INFINITY, 0.0, 0.0])],
            lights: Vec::new(),
        };
        assert!(matches!(compose(&moved).0, Err(CompositionError::InvalidTransform { index: 0 })));
    }

    #[test]
    fn test_rejects_out_of_range_colors() {
        for rgb in [[-3.0, 9.0, 0.0], [0.5, 1.01, 0.5], [f32::NAN, 0.0, 0.0]] {
            let node = SceneDescription {
                nodes: vec![PlacementDirective::new(GeometrySpec::sphere(1.0, 8, 8))
                    .with_material(MaterialSpec::color(ColorSpec::Rgb(rgb)))],
                lights: Vec::new(),
            };
            assert!(matches!(compose(&node).0, Err(CompositionError::InvalidMaterial { index: 0, .. })));

            let light = SceneDescription {
                nodes: Vec::new(),
                lights: vec![LightDirective::ambient(ColorSpec::Rgb(rgb), 1.0)],
            };
            assert!(matches!(compose(&light).0, Err(CompositionError::InvalidLight { index: 0, .. })));
        }

        let edges = SceneDescription {
            nodes: vec![PlacementDirective::new(GeometrySpec::sphere(1.0, 8, 8))
                .with_material(MaterialSpec::color(ColorSpec::Rgb([0.0, 1.0, 0.0])))],
            lights: Vec::new(),
        };
        assert!(compose(&edges).0.is_ok());
    }

    #[test]
    fn test_failed_check_requests_no_textures() {
        let textured = |path: &str| SceneDescription {
            nodes: vec![PlacementDirective::new(GeometrySpec::plane(10.0, 10.0))
                .named("floor")
                .with_material(MaterialSpec::textured(TextureRef::new(path)))],
            lights: Vec::new(),
        };
        let mut provider = DeferredTextureProvider::new();
        let mut builder = SceneBuilder::new(&mut provider);

        let rejected = builder.compose_checked(&textured("brick_wall.jpg"), |scene| {
            assert_eq!(scene.node_count(), 1);
            Err::<(), _>(CompositionError::DuplicateName("floor".to_string()))
        });
        assert!(rejected.is_err());

        let (scene, count) = builder
            .compose_checked(&textured("wood_floor.jpg"), |scene| Ok::<_, CompositionError>(scene.node_count()))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(scene.textures().len(), 1);
        drop(builder);
        assert_eq!(provider.requested_paths().collect::<Vec<_>>(), ["wood_floor.jpg"]);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let description = SceneDescription {
            nodes: vec![
                PlacementDirective::new(GeometrySpec::sphere(1.0, 8, 8)).named("ball"),
                PlacementDirective::new(GeometrySpec::sphere(2.0, 8, 8)).named("ball"),
            ],
            lights: Vec::new(),
        };
        match compose(&description).0 {
            Err(CompositionError::DuplicateName(name)) => assert_eq!(name, "ball"),
            other => panic!("expected duplicate name error, got {:?}", other),
        }
    }

    #[test]
    fn test_shared_texture_requested_once() {
        let wood = MaterialSpec::textured(TextureRef::new("wood_floor.jpg"));
        let description = SceneDescription {
            nodes: vec![
                PlacementDirective::new(GeometrySpec::plane(10.0, 10.0)).with_material(wood.clone()),
                PlacementDirective::new(GeometrySpec::cuboid(1.0, 1.0, 1.0))
                    .with_material(wood.with_model(ShadingModel::Phong)),
            ],
            lights: Vec::new(),
        };
        let (scene, provider) = compose(&description);
        let scene = scene.unwrap();
        assert_eq!(scene.materials().len(), 2);
        assert_eq!(scene.textures().len(), 1);
        assert_eq!(provider.requested_paths().collect::<Vec<_>>(), ["wood_floor.jpg"]);
    }

    #[test]
    fn test_lights() {
        let description = SceneDescription {
            nodes: Vec::new(),
            lights: vec![
                LightDirective::ambient(ColorSpec::Hex("#404040".to_string()), 1.0),
                LightDirective::point([10.0, 10.0, 10.0], ColorSpec::Hex("0xffffff".to_string()), 1.0).named("lamp"),
            ],
        };
        let scene = compose(&description).0.unwrap();
        assert_eq!(scene.light_count(), 2);

        let lamp = scene.find_light("lamp").and_then(|id| scene.light(id)).unwrap();
        assert_eq!(lamp.kind, LightKind::Point { position: Vec3::new(10.0, 10.0, 10.0) });
        assert_relative_eq!(lamp.color, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_rejects_malformed_lights() {
        let mut no_position = LightDirective::point([0.0; 3], ColorSpec::white(), 1.0);
        no_position.position = None;
        let negative = LightDirective::ambient(ColorSpec::white(), -1.0);
        let zero_direction = LightDirective::directional([0.0; 3], ColorSpec::white(), 1.0);
        let bad_color = LightDirective::ambient(ColorSpec::Hex("grey".to_string()), 1.0);

        for light in [no_position, negative, zero_direction, bad_color] {
            let description = SceneDescription { nodes: Vec::new(), lights: vec![light] };
            assert!(matches!(compose(&description).0, Err(CompositionError::InvalidLight { index: 0, .. })));
        }
    }
}
