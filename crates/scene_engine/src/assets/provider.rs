//! Texture providers: the boundary to whatever actually fetches pixel data

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use super::{AssetError, ImageData, TextureHandle};

/// Source of texture data
///
/// `request` must return immediately with a pending handle. Completions are
/// applied in `pump`, which the frame scheduler calls once at the start of
/// every tick.
pub trait TextureProvider {
    /// Start loading `path` and return its pending handle
    fn request(&mut self, path: &str) -> TextureHandle;

    /// Apply every completion that has arrived since the last call
    fn pump(&mut self) {}
}

type Completion = (u64, Result<ImageData, AssetError>);

/// Decodes image files on worker threads
///
/// Each request spawns a short-lived thread that reads and decodes the file
/// with the `image` crate. Results travel back over a channel and are applied
/// in [`TextureProvider::pump`]. A failed load is logged and the handle stays
/// pending for good.
pub struct ThreadedImageLoader {
    root: PathBuf,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    in_flight: HashMap<u64, TextureHandle>,
    next_request: u64,
}

impl ThreadedImageLoader {
    /// Create a loader resolving paths relative to `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            root: root.into(),
            sender,
            receiver,
            in_flight: HashMap::new(),
            next_request: 0,
        }
    }

    /// Number of requests that have not completed yet
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

impl TextureProvider for ThreadedImageLoader {
    fn request(&mut self, path: &str) -> TextureHandle {
        let handle = TextureHandle::pending(path);
        let id = self.next_request;
        self.next_request += 1;
        self.in_flight.insert(id, handle.clone());

        let full_path = self.root.join(path);
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name(format!("texture-load-{id}"))
            .spawn(move || {
                let result = ImageData::from_file(&full_path);
                // The loader may already be gone during teardown
                let _ = sender.send((id, result));
            });

        if let Err(e) = spawned {
            log::warn!("Could not start loader thread for '{}': {}", path, e);
            self.in_flight.remove(&id);
        } else {
            log::debug!("Requested texture '{}' (request {})", path, id);
        }

        handle
    }

    fn pump(&mut self) {
        while let Ok((id, result)) = self.receiver.try_recv() {
            let Some(handle) = self.in_flight.remove(&id) else {
                continue;
            };
            match result {
                Ok(image) => {
                    handle.resolve(image);
                }
                Err(e) => {
                    log::warn!(
                        "Texture '{}' failed to load, falling back to base color: {}",
                        handle.path(),
                        e
                    );
                }
            }
        }
    }
}

/// Provider whose data is supplied by the host
///
/// Useful when pixel data comes from somewhere the engine cannot reach
/// (a browser fetch, an archive, a test). `complete` queues the data and the
/// next `pump` applies it.
#[derive(Debug, Default)]
pub struct DeferredTextureProvider {
    requested: HashMap<String, TextureHandle>,
    queued: Vec<(String, ImageData)>,
}

impl DeferredTextureProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue pixel data for `path`; applied on the next pump
    pub fn complete(&mut self, path: &str, image: ImageData) {
        self.queued.push((path.to_string(), image));
    }

    /// Paths requested so far
    pub fn requested_paths(&self) -> impl Iterator<Item = &str> {
        self.requested.keys().map(String::as_str)
    }
}

impl TextureProvider for DeferredTextureProvider {
    fn request(&mut self, path: &str) -> TextureHandle {
        self.requested
            .entry(path.to_string())
            .or_insert_with(|| TextureHandle::pending(path))
            .clone()
    }

    fn pump(&mut self) {
        for (path, image) in self.queued.drain(..) {
            match self.requested.get(&path) {
                Some(handle) => {
                    handle.resolve(image);
                }
                None => log::warn!("Dropping data for texture '{}' that was never requested", path),
            }
        }
    }
}
