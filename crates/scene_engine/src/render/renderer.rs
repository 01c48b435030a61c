//! Renderer boundary
//!
//! The engine never draws anything itself. Once per tick the frame scheduler
//! hands the scene and camera to a [`Renderer`], which owns whatever GPU or
//! output state it needs.

use crate::scene::Scene;

use super::Camera;

/// Size of the host drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height; a zero dimension is treated as one pixel
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// Consumer of composed scenes
pub trait Renderer {
    /// Draw one frame synchronously
    fn render(&mut self, scene: &Scene, camera: &Camera);

    /// The host surface changed size
    fn resize(&mut self, _viewport: Viewport) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_viewport_aspect() {
        assert_relative_eq!(Viewport::new(1920, 1080).aspect(), 16.0 / 9.0);
        assert_relative_eq!(Viewport::new(640, 0).aspect(), 640.0);
        assert_relative_eq!(Viewport::new(0, 480).aspect(), 1.0 / 480.0);
        assert!(Viewport::new(0, 480).is_empty());
        assert!(!Viewport::default().is_empty());
    }
}
