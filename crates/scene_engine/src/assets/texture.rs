//! Texture handles with an explicit pending/ready lifecycle

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use super::ImageData;

/// Texture wrapping modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Repeat the texture
    #[default]
    Repeat,
    /// Mirror the texture
    MirroredRepeat,
    /// Clamp to edge
    ClampToEdge,
}

/// A material's reference to a texture resource plus its sampling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureRef {
    /// Opaque resource identifier, resolved by the texture provider
    pub path: String,
    /// Wrapping mode on both axes
    #[serde(default)]
    pub wrap: WrapMode,
    /// UV repeat factors
    #[serde(default = "default_repeat")]
    pub repeat: [f32; 2],
}

fn default_repeat() -> [f32; 2] {
    [1.0, 1.0]
}

impl TextureRef {
    /// Reference a texture with default wrapping and no repeat
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            wrap: WrapMode::default(),
            repeat: default_repeat(),
        }
    }

    /// Set wrap mode and repeat factors
    pub fn with_wrap(mut self, wrap: WrapMode, repeat: [f32; 2]) -> Self {
        self.wrap = wrap;
        self.repeat = repeat;
        self
    }
}

/// Observable state of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState<'a> {
    /// Pixel data has not arrived (or never will)
    Pending,
    /// Pixel data is available
    Ready(&'a ImageData),
}

/// Shared handle to a texture that becomes ready at most once
///
/// Clones share the same underlying slot, so the provider can keep one clone
/// to resolve while materials hold the others.
#[derive(Clone)]
pub struct TextureHandle {
    path: Arc<str>,
    image: Arc<OnceLock<ImageData>>,
}

impl TextureHandle {
    /// Create a pending texture for `path`
    pub fn pending(path: &str) -> Self {
        Self {
            path: Arc::from(path),
            image: Arc::new(OnceLock::new()),
        }
    }

    /// Resource identifier this handle was requested with
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current state
    pub fn state(&self) -> TextureState<'_> {
        match self.image.get() {
            Some(image) => TextureState::Ready(image),
            None => TextureState::Pending,
        }
    }

    /// True once pixel data has arrived
    pub fn is_ready(&self) -> bool {
        self.image.get().is_some()
    }

    /// Transition to ready
    ///
    /// Returns `false` and drops `image` when the texture is already ready.
    pub fn resolve(&self, image: ImageData) -> bool {
        let resolved = self.image.set(image).is_ok();
        if resolved {
            log::debug!("Texture '{}' is ready", self.path);
        } else {
            log::warn!("Texture '{}' was resolved twice, keeping the first image", self.path);
        }
        resolved
    }

    /// True when both handles share the same slot
    pub fn same_texture(&self, other: &TextureHandle) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureHandle")
            .field("path", &self.path)
            .field("ready", &self.is_ready())
            .finish()
    }
}
