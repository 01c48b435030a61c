//! Immutable shape descriptors

use std::fmt;
use std::str::FromStr;

use super::registry::{canonical_bits, Interned};

/// Kinds of primitive shapes the engine can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Flat rectangle in the local XY plane, facing +Z
    Plane,
    /// UV sphere centered on the origin
    Sphere,
    /// Axis-aligned box centered on the origin
    Box,
}

impl GeometryKind {
    /// Lower-case name used in scene files
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Plane => "plane",
            GeometryKind::Sphere => "sphere",
            GeometryKind::Box => "box",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plane" => Ok(GeometryKind::Plane),
            "sphere" => Ok(GeometryKind::Sphere),
            "box" | "cube" => Ok(GeometryKind::Box),
            other => Err(other.to_string()),
        }
    }
}

/// Shape descriptor with dimensions and tessellation
///
/// Two descriptors with equal values intern to the same geometry handle.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryDescriptor {
    /// Rectangle of `width` x `height`
    Plane {
        /// Extent along local X
        width: f32,
        /// Extent along local Y
        height: f32,
        /// Subdivisions along X
        width_segments: u32,
        /// Subdivisions along Y
        height_segments: u32,
    },
    /// Sphere of `radius`
    Sphere {
        /// Sphere radius
        radius: f32,
        /// Horizontal segments
        width_segments: u32,
        /// Vertical segments
        height_segments: u32,
    },
    /// Box of `width` x `height` x `depth`
    Box {
        /// Extent along X
        width: f32,
        /// Extent along Y
        height: f32,
        /// Extent along Z
        depth: f32,
    },
}

impl GeometryDescriptor {
    /// Single-segment plane
    pub fn plane(width: f32, height: f32) -> Self {
        GeometryDescriptor::Plane { width, height, width_segments: 1, height_segments: 1 }
    }

    /// Sphere with explicit tessellation
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        GeometryDescriptor::Sphere { radius, width_segments, height_segments }
    }

    /// Box with the given extents
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        GeometryDescriptor::Box { width, height, depth }
    }

    /// Which primitive this describes
    pub fn kind(&self) -> GeometryKind {
        match self {
            GeometryDescriptor::Plane { .. } => GeometryKind::Plane,
            GeometryDescriptor::Sphere { .. } => GeometryKind::Sphere,
            GeometryDescriptor::Box { .. } => GeometryKind::Box,
        }
    }

    /// Number of vertices a renderer would generate for this shape
    pub fn vertex_count(&self) -> usize {
        match *self {
            GeometryDescriptor::Plane { width_segments, height_segments, .. } => {
                (width_segments as usize + 1) * (height_segments as usize + 1)
            }
            GeometryDescriptor::Sphere { width_segments, height_segments, .. } => {
                (width_segments as usize + 1) * (height_segments as usize + 1)
            }
            GeometryDescriptor::Box { .. } => 24,
        }
    }

    /// Number of triangles a renderer would generate for this shape
    pub fn triangle_count(&self) -> usize {
        match *self {
            GeometryDescriptor::Plane { width_segments, height_segments, .. } => {
                2 * width_segments as usize * height_segments as usize
            }
            // The pole rows collapse to a single triangle per segment
            GeometryDescriptor::Sphere { width_segments, height_segments, .. } => {
                let w = width_segments as usize;
                let h = height_segments as usize;
                2 * w * h.saturating_sub(1)
            }
            GeometryDescriptor::Box { .. } => 12,
        }
    }
}

/// Structural identity of a geometry descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometryKey {
    kind: GeometryKind,
    dims: [u32; 3],
    segments: [u32; 2],
}

impl Interned for GeometryDescriptor {
    type Key = GeometryKey;

    fn intern_key(&self) -> GeometryKey {
        match *self {
            GeometryDescriptor::Plane { width, height, width_segments, height_segments } => GeometryKey {
                kind: GeometryKind::Plane,
                dims: [canonical_bits(width), canonical_bits(height), 0],
                segments: [width_segments, height_segments],
            },
            GeometryDescriptor::Sphere { radius, width_segments, height_segments } => GeometryKey {
                kind: GeometryKind::Sphere,
                dims: [canonical_bits(radius), 0, 0],
                segments: [width_segments, height_segments],
            },
            GeometryDescriptor::Box { width, height, depth } => GeometryKey {
                kind: GeometryKind::Box,
                dims: [canonical_bits(width), canonical_bits(height), canonical_bits(depth)],
                segments: [1, 1],
            },
        }
    }
}
