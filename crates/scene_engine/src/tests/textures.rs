use std::time::{Duration, Instant};

use super::RecordingRenderer;
use crate::assets::{DeferredTextureProvider, ImageData, TextureProvider, TextureRef, TextureState, ThreadedImageLoader};
use crate::config::textured_room;
use crate::foundation::math::Vec3;
use crate::render::{SurfaceAppearance, Viewport};
use crate::scene::{ColorSpec, GeometrySpec, MaterialSpec, PlacementDirective};
use crate::SceneEngine;

#[test]
fn test_pending_forever_never_blocks() {
    let mut provider = DeferredTextureProvider::new();
    let mut renderer = RecordingRenderer::default();
    let mut engine = SceneEngine::new(&textured_room(), &mut provider, Viewport::default()).unwrap();

    for _ in 0..50 {
        engine.tick(&mut provider, &mut renderer);
    }

    assert_eq!(renderer.frames.len(), 50);
    assert!(renderer.frames.iter().all(|f| f.textured.iter().all(|t| !t)));

    let scene = engine.scene();
    for node in scene.nodes() {
        let base = scene.material(node.material).unwrap().base_color;
        assert_eq!(scene.appearance(node.id), Some(SurfaceAppearance::BaseColor(base)));
    }
}

#[test]
fn test_ready_transition_happens_at_tick_start() {
    let mut provider = DeferredTextureProvider::new();
    let mut renderer = RecordingRenderer::default();
    let mut engine = SceneEngine::new(&textured_room(), &mut provider, Viewport::default()).unwrap();

    for _ in 0..3 {
        engine.tick(&mut provider, &mut renderer);
    }

    provider.complete("textures/wood_floor.jpg", ImageData::solid_color(4, 4, [160, 110, 60, 255]));
    // Delivered but not applied until the next frame boundary
    let floor = engine.scene().find_node("floor").unwrap();
    assert!(!engine.scene().appearance(floor).unwrap().is_textured());

    engine.tick(&mut provider, &mut renderer);

    let textured: Vec<_> = renderer.frames.iter().map(|f| f.textured.clone()).collect();
    assert_eq!(textured[2], [false, false, false]);
    assert_eq!(textured[3], [true, false, false]);
}

#[test]
fn test_partial_arrival_keeps_other_fallbacks() {
    let mut config = textured_room();
    config.lights.clear();
    config.nodes = vec![
        PlacementDirective::new(GeometrySpec::plane(1.0, 1.0))
            .named("tinted")
            .with_material(MaterialSpec {
                color: ColorSpec::Rgb([0.5, 0.25, 1.0]),
                ..MaterialSpec::textured(TextureRef::new("a.png"))
            }),
        PlacementDirective::new(GeometrySpec::plane(1.0, 1.0))
            .named("plain")
            .with_material(MaterialSpec::textured(TextureRef::new("b.png"))),
    ];

    let mut provider = DeferredTextureProvider::new();
    let mut renderer = RecordingRenderer::default();
    let mut engine = SceneEngine::new(&config, &mut provider, Viewport::default()).unwrap();

    provider.complete("a.png", ImageData::solid_color(1, 1, [255, 255, 255, 255]));
    engine.tick(&mut provider, &mut renderer);

    let scene = engine.scene();
    match scene.appearance(scene.find_node("tinted").unwrap()).unwrap() {
        SurfaceAppearance::Textured { tint, .. } => assert_eq!(tint, Vec3::new(0.5, 0.25, 1.0)),
        other => panic!("expected textured, got {:?}", other),
    }
    assert_eq!(
        scene.appearance(scene.find_node("plain").unwrap()),
        Some(SurfaceAppearance::BaseColor(Vec3::new(1.0, 1.0, 1.0)))
    );
}

#[test]
fn test_threaded_loader_decodes_real_file() {
    let root = std::env::temp_dir().join(format!("scene_engine_textures_{}", std::process::id()));
    std::fs::create_dir_all(root.join("textures")).unwrap();
    let image = image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 50, 255]));
    image.save(root.join("textures/metal_plate.png")).unwrap();

    let mut loader = ThreadedImageLoader::new(&root);
    let handle = loader.request("textures/metal_plate.png");
    let missing = loader.request("textures/missing.png");

    let deadline = Instant::now() + Duration::from_secs(5);
    while loader.in_flight() > 0 && Instant::now() < deadline {
        loader.pump();
        std::thread::sleep(Duration::from_millis(5));
    }
    let _ = std::fs::remove_dir_all(&root);

    assert!(handle.is_ready());
    assert!(!missing.is_ready());
    match handle.state() {
        TextureState::Ready(data) => {
            assert_eq!((data.width, data.height), (2, 2));
            assert_eq!(&data.data[..4], &[200, 100, 50, 255]);
        }
        TextureState::Pending => panic!("texture should be ready"),
    }
}
