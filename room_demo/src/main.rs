//! Room demo application
//!
//! Composes the textured room (or any scene file), loads its textures on a
//! background thread and runs the frame loop against a headless renderer.
//!
//! ```text
//! room_demo [room|animated|<scene.toml|scene.ron>] [--frames N] [--size WxH] [--assets DIR]
//! ```

mod headless;

use std::time::{Duration, Instant};

use scene_engine::assets::ThreadedImageLoader;
use scene_engine::config::{animated_room, textured_room, Config, ConfigError, SceneConfig};
use scene_engine::foundation::logging;
use scene_engine::render::Viewport;
use scene_engine::{EngineError, SceneEngine};
use thiserror::Error;

use headless::HeadlessRenderer;

const FRAME_TIME: Duration = Duration::from_millis(16);

/// Demo errors
#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Usage: {0}")]
    Usage(String),
}

/// Command line options
struct Options {
    scene: String,
    frames: u64,
    viewport: Viewport,
    assets: Option<String>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, DemoError> {
        let mut options = Options {
            scene: "room".to_string(),
            frames: 300,
            viewport: Viewport::new(1280, 720),
            assets: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--frames" => {
                    let value = args.next().ok_or_else(|| DemoError::Usage("--frames needs a value".to_string()))?;
                    options.frames = value
                        .parse()
                        .map_err(|_| DemoError::Usage(format!("invalid frame count '{}'", value)))?;
                }
                "--size" => {
                    let value = args.next().ok_or_else(|| DemoError::Usage("--size needs WxH".to_string()))?;
                    options.viewport = parse_size(&value)
                        .ok_or_else(|| DemoError::Usage(format!("invalid size '{}'", value)))?;
                }
                "--assets" => {
                    options.assets =
                        Some(args.next().ok_or_else(|| DemoError::Usage("--assets needs a directory".to_string()))?);
                }
                other if other.starts_with("--") => {
                    return Err(DemoError::Usage(format!("unknown option '{}'", other)));
                }
                scene => options.scene = scene.to_string(),
            }
        }
        Ok(options)
    }

    fn load_scene(&self) -> Result<SceneConfig, DemoError> {
        let mut config = match self.scene.as_str() {
            "room" => textured_room(),
            "animated" => animated_room(),
            path => SceneConfig::load_from_file(path)?,
        };
        if let Some(root) = &self.assets {
            config.assets.root.clone_from(root);
        }
        Ok(config)
    }
}

fn parse_size(value: &str) -> Option<Viewport> {
    let (w, h) = value.split_once('x')?;
    let viewport = Viewport::new(w.trim().parse().ok()?, h.trim().parse().ok()?);
    (viewport.width > 0 && viewport.height > 0).then_some(viewport)
}

fn run(options: &Options) -> Result<(), DemoError> {
    let config = options.load_scene()?;
    log::info!(
        "Scene '{}': {} nodes, {} lights, {} behaviors, assets from '{}'",
        options.scene,
        config.nodes.len(),
        config.lights.len(),
        config.behaviors.len(),
        config.assets.root
    );

    let mut textures = ThreadedImageLoader::new(&config.assets.root);
    let mut renderer = HeadlessRenderer::new(60);
    let mut engine = SceneEngine::new(&config, &mut textures, options.viewport)?;

    let start = Instant::now();
    for _ in 0..options.frames {
        let frame_start = Instant::now();
        engine.tick(&mut textures, &mut renderer);
        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    let elapsed = start.elapsed().as_secs_f32();
    log::info!(
        "Rendered {} frames in {:.2}s ({:.1} fps), final phase {:.2}, {}/{} textures ready",
        renderer.frames(),
        elapsed,
        renderer.frames() as f32 / elapsed.max(f32::EPSILON),
        engine.scheduler().phase(),
        engine.scene().textures().ready_count(),
        engine.scene().textures().len()
    );
    Ok(())
}

fn main() {
    logging::init_with_filter("info");
    log::info!("Starting room demo");

    let result = Options::parse(std::env::args().skip(1)).and_then(|options| run(&options));
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, DemoError> {
        Options::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]).unwrap();
        assert_eq!(options.scene, "room");
        assert_eq!(options.frames, 300);
        assert_eq!(options.viewport, Viewport::new(1280, 720));
    }

    #[test]
    fn test_options() {
        let options = parse(&["animated", "--frames", "10", "--size", "800x600", "--assets", "media"]).unwrap();
        assert_eq!(options.scene, "animated");
        assert_eq!(options.frames, 10);
        assert_eq!(options.viewport, Viewport::new(800, 600));
        assert_eq!(options.load_scene().unwrap().assets.root, "media");
    }

    #[test]
    fn test_bad_options() {
        assert!(matches!(parse(&["--frames"]), Err(DemoError::Usage(_))));
        assert!(matches!(parse(&["--size", "0x10"]), Err(DemoError::Usage(_))));
        assert!(matches!(parse(&["--fast"]), Err(DemoError::Usage(_))));
    }
}
