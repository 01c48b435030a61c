//! Material descriptors and surface appearance resolution

use serde::{Deserialize, Serialize};

use crate::assets::{ImageData, TextureHandle, TextureRef, TextureState, WrapMode};
use crate::foundation::math::Vec3;

use super::registry::{canonical_bits, Interned};

/// Lighting model a renderer should use for the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingModel {
    /// Metallic-roughness shading
    #[default]
    Standard,
    /// Classic Blinn-Phong shading; roughness and metalness are ignored
    Phong,
}

/// Surface description shared by any number of nodes
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDescriptor {
    /// Shading model
    pub model: ShadingModel,
    /// Base color (albedo) - linear RGB values
    pub base_color: Vec3,
    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,
    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metalness: f32,
    /// Optional base color texture, tinted by `base_color`
    pub texture: Option<TextureRef>,
}

impl Default for MaterialDescriptor {
    fn default() -> Self {
        Self {
            model: ShadingModel::Standard,
            base_color: Vec3::new(1.0, 1.0, 1.0),
            roughness: 1.0,
            metalness: 0.0,
            texture: None,
        }
    }
}

impl MaterialDescriptor {
    /// Standard material with the given base color
    pub fn standard(base_color: Vec3) -> Self {
        Self {
            base_color,
            ..Default::default()
        }
    }

    /// Phong material with the given base color
    pub fn phong(base_color: Vec3) -> Self {
        Self {
            model: ShadingModel::Phong,
            base_color,
            ..Default::default()
        }
    }

    /// Set roughness
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    /// Set metalness
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    /// Attach a base color texture
    pub fn with_texture(mut self, texture: TextureRef) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Resolve what the surface looks like right now
    ///
    /// `texture` is the handle requested for `self.texture`. A pending or
    /// missing texture falls back to the base color, so every frame has a
    /// defined appearance.
    pub fn appearance<'a>(&self, texture: Option<&'a TextureHandle>) -> SurfaceAppearance<'a> {
        match (&self.texture, texture.map(TextureHandle::state)) {
            (Some(tex), Some(TextureState::Ready(image))) => SurfaceAppearance::Textured {
                image,
                tint: self.base_color,
                wrap: tex.wrap,
                repeat: tex.repeat,
            },
            _ => SurfaceAppearance::BaseColor(self.base_color),
        }
    }
}

/// What a renderer should draw for a surface this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceAppearance<'a> {
    /// Sample `image`, multiplied by `tint`
    Textured {
        /// Pixel data
        image: &'a ImageData,
        /// Base color multiplier
        tint: Vec3,
        /// Wrapping mode
        wrap: WrapMode,
        /// UV repeat factors
        repeat: [f32; 2],
    },
    /// Flat base color (untextured, or texture not ready)
    BaseColor(Vec3),
}

impl SurfaceAppearance<'_> {
    /// True for the textured variant
    pub fn is_textured(&self) -> bool {
        matches!(self, SurfaceAppearance::Textured { .. })
    }
}

/// Structural identity of a material descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterialKey {
    model: ShadingModel,
    color: [u32; 3],
    roughness: u32,
    metalness: u32,
    texture: Option<(String, WrapMode, [u32; 2])>,
}

impl Interned for MaterialDescriptor {
    type Key = MaterialKey;

    fn intern_key(&self) -> MaterialKey {
        MaterialKey {
            model: self.model,
            color: [
                canonical_bits(self.base_color.x),
                canonical_bits(self.base_color.y),
                canonical_bits(self.base_color.z),
            ],
            roughness: canonical_bits(self.roughness),
            metalness: canonical_bits(self.metalness),
            texture: self.texture.as_ref().map(|tex| {
                (
                    tex.path.clone(),
                    tex.wrap,
                    [canonical_bits(tex.repeat[0]), canonical_bits(tex.repeat[1])],
                )
            }),
        }
    }
}
