//! Path-keyed cache of texture handles

use std::collections::BTreeMap;

use super::{TextureHandle, TextureProvider};

/// Deduplicates texture requests so each path reaches the provider once
///
/// Ordered by path so iteration (and therefore logging) is deterministic.
#[derive(Debug, Default)]
pub struct TextureCache {
    handles: BTreeMap<String, TextureHandle>,
}

impl TextureCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `path`, requesting it from `provider` on first use
    pub fn get_or_request(&mut self, path: &str, provider: &mut dyn TextureProvider) -> TextureHandle {
        if let Some(handle) = self.handles.get(path) {
            return handle.clone();
        }
        let handle = provider.request(path);
        self.handles.insert(path.to_string(), handle.clone());
        handle
    }

    /// Look up a previously requested handle
    pub fn get(&self, path: &str) -> Option<&TextureHandle> {
        self.handles.get(path)
    }

    /// Number of distinct textures
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True when no texture was requested
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of textures with pixel data
    pub fn ready_count(&self) -> usize {
        self.handles.values().filter(|h| h.is_ready()).count()
    }

    /// Iterate over `(path, handle)` pairs in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TextureHandle)> {
        self.handles.iter().map(|(path, handle)| (path.as_str(), handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{DeferredTextureProvider, ImageData};

    #[test]
    fn test_one_request_per_path() {
        let mut provider = DeferredTextureProvider::new();
        let mut cache = TextureCache::new();

        let a = cache.get_or_request("wood_floor.jpg", &mut provider);
        let b = cache.get_or_request("wood_floor.jpg", &mut provider);
        let _ = cache.get_or_request("brick_wall.jpg", &mut provider);

        assert!(a.same_texture(&b));
        assert_eq!(cache.len(), 2);
        assert_eq!(provider.requested_paths().count(), 2);
    }

    #[test]
    fn test_ready_count_tracks_resolution() {
        let mut provider = DeferredTextureProvider::new();
        let mut cache = TextureCache::new();
        cache.get_or_request("metal_plate.jpg", &mut provider);
        assert_eq!(cache.ready_count(), 0);

        provider.complete("metal_plate.jpg", ImageData::solid_color(1, 1, [0, 0, 0, 255]));
        provider.pump();
        assert_eq!(cache.ready_count(), 1);
    }
}
