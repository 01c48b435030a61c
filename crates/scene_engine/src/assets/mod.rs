//! Asset management system
//!
//! Textures are the only asynchronous resource in the engine. A request
//! returns a [`TextureHandle`] immediately; the pixel data arrives later and
//! flips the handle from pending to ready exactly once. Providers apply
//! completions in [`TextureProvider::pump`], which the frame scheduler calls on
//! a frame boundary, so a texture never becomes ready halfway through a tick.

pub mod image_loader;
pub mod texture;
pub mod provider;
pub mod texture_cache;

pub use image_loader::ImageData;
pub use texture::{TextureHandle, TextureState, TextureRef, WrapMode};
pub use provider::{TextureProvider, ThreadedImageLoader, DeferredTextureProvider};
pub use texture_cache::TextureCache;

use thiserror::Error;

/// Asset loading errors
///
/// Never fatal for the render loop: a failed texture stays pending and its
/// material renders with the base color.
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
