//! Decoding texture files into RGBA8 pixels
//!
//! Decoding goes through the `image` crate; the format comes from the file
//! contents, so a misnamed extension still decodes.

use std::io::ErrorKind;
use std::path::Path;

use crate::assets::AssetError;

/// Decoded image data ready for a renderer to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data, row-major, 4 bytes per pixel
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Read and decode an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AssetError::NotFound(path.display().to_string()),
            _ => AssetError::IoError(e),
        })?;

        let image = Self::from_bytes(&bytes)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        log::debug!("Decoded {} ({}x{})", path.display(), image.width, image.height);
        Ok(image)
    }

    /// Decode an in-memory PNG or JPEG
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(e.to_string()))?
            .into_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Image of one repeated color
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            data: color.repeat(pixels),
            width,
            height,
        }
    }

    /// RGBA of the pixel at `(x, y)`, if inside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let bytes = self.data.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}
