//! Built-in scene configurations

use crate::animation::BehaviorDirective;
use crate::assets::TextureRef;
use crate::foundation::math::constants::HALF_PI;
use crate::render::ShadingModel;
use crate::scene::{ColorSpec, GeometrySpec, LightDirective, MaterialSpec, PlacementDirective};

use super::SceneConfig;

/// Wood floor, brick wall, metal sphere, ambient fill and one point light
pub fn textured_room() -> SceneConfig {
    let nodes = vec![
        PlacementDirective::new(GeometrySpec::plane(100.0, 100.0))
            .named("floor")
            .rotated([-HALF_PI, 0.0, 0.0])
            .with_material(MaterialSpec::textured(TextureRef::new("textures/wood_floor.jpg"))),
        PlacementDirective::new(GeometrySpec::plane(50.0, 20.0))
            .named("wall")
            .at([0.0, 10.0, -25.0])
            .with_material(
                MaterialSpec::textured(TextureRef::new("textures/brick_wall.jpg")).with_model(ShadingModel::Phong),
            ),
        PlacementDirective::new(GeometrySpec::sphere(3.0, 32, 32))
            .named("sphere")
            .at([5.0, 3.0, 0.0])
            .with_material(
                MaterialSpec::textured(TextureRef::new("textures/metal_plate.jpg")).with_surface(0.2, 0.9),
            ),
    ];
    let lights = vec![
        LightDirective::ambient(ColorSpec::Hex("#404040".to_string()), 1.0).named("ambient"),
        LightDirective::point([10.0, 10.0, 10.0], ColorSpec::Hex("#ffffff".to_string()), 1.0).named("lamp"),
    ];

    SceneConfig {
        camera: Default::default(),
        scheduler: Default::default(),
        assets: Default::default(),
        nodes,
        lights,
        behaviors: Vec::new(),
    }
}

/// The textured room with an orbiting lamp, a wall facing the camera and a
/// spinning sphere
pub fn animated_room() -> SceneConfig {
    let mut config = textured_room();
    config.behaviors = vec![
        BehaviorDirective::Orbit {
            light: "lamp".to_string(),
            radius: 30.0,
            height: 5.0,
            angular_speed: 0.01,
        },
        BehaviorDirective::Billboard { node: "wall".to_string(), target: config.camera.position },
        BehaviorDirective::ContinuousRotate {
            node: "sphere".to_string(),
            axis: [0.0, 1.0, 0.0],
            angular_speed: 0.01,
        },
    ];
    config
}
