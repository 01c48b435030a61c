//! Declarative scene description
//!
//! These types are plain data: they deserialize from scene files and are
//! validated only when the [`SceneBuilder`](super::SceneBuilder) composes them.
//! Angles are radians, colors are linear RGB in `[0, 1]` or hex literals.

use serde::{Deserialize, Serialize};

use crate::assets::TextureRef;
use crate::foundation::math::Vec3;
use crate::render::ShadingModel;

/// Everything needed to compose a scene
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Placed objects, in composition order
    #[serde(default)]
    pub nodes: Vec<PlacementDirective>,
    /// Light sources, in composition order
    #[serde(default)]
    pub lights: Vec<LightDirective>,
}

/// One object to place in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementDirective {
    /// Name behaviors can refer to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Shape
    pub geometry: GeometrySpec,
    /// Surface
    #[serde(default)]
    pub material: MaterialSpec,
    /// World position
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in radians, applied X then Y then Z
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Per-axis scale
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl PlacementDirective {
    /// Place `geometry` at the origin with a default material
    pub fn new(geometry: GeometrySpec) -> Self {
        Self {
            name: None,
            geometry,
            material: MaterialSpec::default(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: unit_scale(),
        }
    }

    /// Set the name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the material
    pub fn with_material(mut self, material: MaterialSpec) -> Self {
        self.material = material;
        self
    }

    /// Set the position
    pub fn at(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }

    /// Set the Euler rotation
    pub fn rotated(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Unvalidated geometry request
///
/// `dims` holds `[width, height]` for planes, `[radius]` for spheres and
/// `[width, height, depth]` for boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySpec {
    /// Primitive name (`plane`, `sphere`, `box`)
    pub kind: String,
    /// Dimensions
    pub dims: Vec<f32>,
    /// Tessellation `[width_segments, height_segments]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<[u32; 2]>,
}

impl GeometrySpec {
    /// Plane request
    pub fn plane(width: f32, height: f32) -> Self {
        Self { kind: "plane".to_string(), dims: vec![width, height], segments: None }
    }

    /// Sphere request
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            kind: "sphere".to_string(),
            dims: vec![radius],
            segments: Some([width_segments, height_segments]),
        }
    }

    /// Box request
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self { kind: "box".to_string(), dims: vec![width, height, depth], segments: None }
    }
}

/// Unvalidated material request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Shading model
    #[serde(default)]
    pub model: ShadingModel,
    /// Base color
    #[serde(default = "ColorSpec::white")]
    pub color: ColorSpec,
    /// Base color texture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureRef>,
    /// Roughness in `[0, 1]`
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    /// Metalness in `[0, 1]`
    #[serde(default)]
    pub metalness: f32,
}

fn default_roughness() -> f32 {
    1.0
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self {
            model: ShadingModel::Standard,
            color: ColorSpec::white(),
            texture: None,
            roughness: default_roughness(),
            metalness: 0.0,
        }
    }
}

impl MaterialSpec {
    /// Untextured standard material
    pub fn color(color: ColorSpec) -> Self {
        Self { color, ..Default::default() }
    }

    /// White material sampling `texture`
    pub fn textured(texture: TextureRef) -> Self {
        Self { texture: Some(texture), ..Default::default() }
    }

    /// Set the shading model
    pub fn with_model(mut self, model: ShadingModel) -> Self {
        self.model = model;
        self
    }

    /// Set roughness and metalness
    pub fn with_surface(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }
}

/// Color as float triple or hex literal (`"#404040"`, `"0x404040"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Linear RGB components
    Rgb([f32; 3]),
    /// Hex literal, 6 digits
    Hex(String),
}

impl ColorSpec {
    /// Opaque white
    pub fn white() -> Self {
        ColorSpec::Rgb([1.0, 1.0, 1.0])
    }

    /// Convert to a color vector
    ///
    /// Fails with the offending literal when a hex string is malformed.
    pub fn to_vec3(&self) -> Result<Vec3, String> {
        match self {
            ColorSpec::Rgb([r, g, b]) => Ok(Vec3::new(*r, *g, *b)),
            ColorSpec::Hex(literal) => parse_hex(literal).ok_or_else(|| literal.clone()),
        }
    }
}

fn parse_hex(literal: &str) -> Option<Vec3> {
    let trimmed = literal.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    let channel = |shift: u32| ((value >> shift) & 0xff) as f32 / 255.0;
    Some(Vec3::new(channel(16), channel(8), channel(0)))
}

/// Kind of light a directive asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightDirectiveKind {
    /// Ambient light
    Ambient,
    /// Directional light, needs `direction`
    Directional,
    /// Point light, needs `position`
    Point,
}

/// One light to add to the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDirective {
    /// Name behaviors can refer to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Light kind
    pub kind: LightDirectiveKind,
    /// Light color
    #[serde(default = "ColorSpec::white")]
    pub color: ColorSpec,
    /// Intensity, non-negative
    #[serde(default = "default_intensity")]
    pub intensity: f32,
    /// Point light position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
    /// Directional light direction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<[f32; 3]>,
}

fn default_intensity() -> f32 {
    1.0
}

impl LightDirective {
    /// Ambient light directive
    pub fn ambient(color: ColorSpec, intensity: f32) -> Self {
        Self {
            name: None,
            kind: LightDirectiveKind::Ambient,
            color,
            intensity,
            position: None,
            direction: None,
        }
    }

    /// Point light directive
    pub fn point(position: [f32; 3], color: ColorSpec, intensity: f32) -> Self {
        Self {
            name: None,
            kind: LightDirectiveKind::Point,
            color,
            intensity,
            position: Some(position),
            direction: None,
        }
    }

    /// Directional light directive
    pub fn directional(direction: [f32; 3], color: ColorSpec, intensity: f32) -> Self {
        Self {
            name: None,
            kind: LightDirectiveKind::Directional,
            color,
            intensity,
            position: None,
            direction: Some(direction),
        }
    }

    /// Set the name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
