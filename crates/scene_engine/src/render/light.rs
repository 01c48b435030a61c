//! Light sources

use crate::foundation::math::Vec3;

/// Light types and their spatial parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction
    Ambient,
    /// Directional light (like sunlight)
    Directional {
        /// Normalized direction the light travels in
        direction: Vec3,
    },
    /// Point light (like a lightbulb)
    Point {
        /// World-space position
        position: Vec3,
    },
}

/// Light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Optional name used by behaviors to address the light
    pub name: Option<String>,
    /// Light type
    pub kind: LightKind,
    /// Light color (linear RGB)
    pub color: Vec3,
    /// Light intensity
    pub intensity: f32,
}

impl Light {
    /// Create an ambient light
    pub fn ambient(color: Vec3, intensity: f32) -> Self {
        Self { name: None, kind: LightKind::Ambient, color, intensity }
    }

    /// Create a directional light
    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            name: None,
            kind: LightKind::Directional { direction: direction.normalize() },
            color,
            intensity,
        }
    }

    /// Create a point light
    pub fn point(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self { name: None, kind: LightKind::Point { position }, color, intensity }
    }

    /// Attach a name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Position of a point light
    pub fn position(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Point { position } => Some(position),
            _ => None,
        }
    }

    /// Move a point light; ignored for other kinds
    pub fn set_position(&mut self, new_position: Vec3) {
        if let LightKind::Point { position } = &mut self.kind {
            *position = new_position;
        }
    }

    /// True for point lights
    pub fn is_point(&self) -> bool {
        matches!(self.kind, LightKind::Point { .. })
    }

    /// Lower-case kind name for logging
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            LightKind::Ambient => "ambient",
            LightKind::Directional { .. } => "directional",
            LightKind::Point { .. } => "point",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_directional_is_normalized() {
        let light = Light::directional(Vec3::new(0.0, -4.0, 0.0), Vec3::new(1.0, 1.0, 1.0), 1.0);
        match light.kind {
            LightKind::Directional { direction } => assert_relative_eq!(direction.norm(), 1.0),
            _ => panic!("expected directional light"),
        }
    }

    #[test]
    fn test_only_point_lights_move() {
        let mut point = Light::point(Vec3::new(10.0, 10.0, 10.0), Vec3::new(1.0, 1.0, 1.0), 1.0);
        point.set_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(point.position(), Some(Vec3::new(1.0, 2.0, 3.0)));

        let mut ambient = Light::ambient(Vec3::new(0.25, 0.25, 0.25), 1.0);
        ambient.set_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(ambient.position(), None);
        assert_eq!(ambient.kind, LightKind::Ambient);
        assert_eq!((point.kind_name(), ambient.kind_name()), ("point", "ambient"));
    }
}
