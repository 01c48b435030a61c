use crate::assets::DeferredTextureProvider;
use crate::config::{animated_room, textured_room, Config, ConfigFormat, SceneConfig};
use crate::render::Viewport;
use crate::SceneEngine;

const ROOM_TOML: &str = include_str!("../../../../room_demo/scenes/room.toml");
const ANIMATED_ROOM_RON: &str = include_str!("../../../../room_demo/scenes/animated_room.ron");

#[test]
fn test_room_toml_matches_preset() {
    let config = SceneConfig::from_str_as(ROOM_TOML, ConfigFormat::Toml).unwrap();
    assert_eq!(config, textured_room());
}

#[test]
fn test_animated_room_ron_matches_preset() {
    let config = SceneConfig::from_str_as(ANIMATED_ROOM_RON, ConfigFormat::Ron).unwrap();
    assert_eq!(config.behaviors, animated_room().behaviors);
    assert_eq!(config.nodes, animated_room().nodes);
    assert_eq!(config.lights, animated_room().lights);
}

#[test]
fn test_scene_files_compose() {
    for (text, format) in [(ROOM_TOML, ConfigFormat::Toml), (ANIMATED_ROOM_RON, ConfigFormat::Ron)] {
        let config = SceneConfig::from_str_as(text, format).unwrap();
        let mut provider = DeferredTextureProvider::new();
        let engine = SceneEngine::new(&config, &mut provider, Viewport::default()).unwrap();
        assert_eq!(engine.scene().node_count(), 3);
        assert_eq!(engine.scene().textures().len(), 3);
    }
}

#[test]
fn test_malformed_file_is_parse_error() {
    let result = SceneConfig::from_str_as("[[nodes]]\ngeometry = 3\n", ConfigFormat::Toml);
    assert!(matches!(result, Err(crate::config::ConfigError::Parse(_))));
}
