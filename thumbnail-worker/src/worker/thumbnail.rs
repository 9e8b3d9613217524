//! Thumbnail rendering from source image bytes
//!
//! Decodes the source, resizes it to the configured max dimension while
//! maintaining aspect ratio, and encodes the result as JPEG.
//!
//! Rendering is CPU-bound and runs under `spawn_blocking` so it does not
//! stall the async runtime.

use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageOutputFormat};
use thiserror::Error;
use tracing::debug;

/// Parameters for thumbnail rendering
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Maximum dimension (width or height) in pixels
    pub max_dimension: u32,
    /// JPEG quality (0-100)
    pub quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_dimension: 256,
            quality: 85,
        }
    }
}

/// Errors from thumbnail rendering
#[derive(Error, Debug)]
pub enum ThumbnailError {
    /// Source bytes are not a decodable image
    #[error("Failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),

    /// Encoding the resized image failed
    #[error("Failed to encode thumbnail: {0}")]
    Encode(#[source] image::ImageError),

    /// The blocking render task panicked or was cancelled
    #[error("Render task failed: {0}")]
    Canceled(String),
}

/// A rendered thumbnail
#[derive(Debug, Clone)]
pub struct ThumbnailImage {
    /// JPEG bytes of the thumbnail
    pub data: Bytes,
    /// Thumbnail width in pixels
    pub width: u32,
    /// Thumbnail height in pixels
    pub height: u32,
}

/// Renders thumbnails from source image bytes
pub struct Thumbnailer {
    config: ThumbnailConfig,
}

impl Thumbnailer {
    /// Creates a renderer with the given configuration
    #[must_use]
    pub const fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Renders a thumbnail on the current thread
    ///
    /// CPU-intensive; async callers should go through `generate_async`.
    ///
    /// # Errors
    ///
    /// Returns `ThumbnailError` on unsupported or corrupt input
    pub fn generate(&self, source: &[u8]) -> Result<ThumbnailImage, ThumbnailError> {
        let img = image::load_from_memory(source).map_err(ThumbnailError::Decode)?;
        let (orig_w, orig_h) = img.dimensions();

        // Already within bounds: re-encode without scaling
        if orig_w <= self.config.max_dimension && orig_h <= self.config.max_dimension {
            let data = self.encode_jpeg(&img)?;
            return Ok(ThumbnailImage {
                data,
                width: orig_w,
                height: orig_h,
            });
        }

        let (new_w, new_h) = self.scaled_dimensions(orig_w, orig_h);
        let resized = img.resize_exact(new_w.max(1), new_h.max(1), FilterType::Triangle);
        let data = self.encode_jpeg(&resized)?;

        debug!(
            width = new_w,
            height = new_h,
            size = data.len(),
            "Thumbnail rendered"
        );

        Ok(ThumbnailImage {
            data,
            width: new_w,
            height: new_h,
        })
    }

    /// Renders a thumbnail on the blocking thread pool
    ///
    /// # Errors
    ///
    /// Returns `ThumbnailError` on unsupported or corrupt input, or when the
    /// render task fails to complete
    pub async fn generate_async(self: Arc<Self>, source: Bytes) -> Result<ThumbnailImage, ThumbnailError> {
        let renderer = Arc::clone(&self);

        tokio::task::spawn_blocking(move || renderer.generate(&source))
            .await
            .map_err(|e| ThumbnailError::Canceled(e.to_string()))?
    }

    /// New dimensions maintaining aspect ratio
    fn scaled_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let max_dim = self.config.max_dimension;

        if width > height {
            let ratio = max_dim as f32 / width as f32;
            (max_dim, ((height as f32) * ratio).round() as u32)
        } else {
            let ratio = max_dim as f32 / height as f32;
            (((width as f32) * ratio).round() as u32, max_dim)
        }
    }

    fn encode_jpeg(&self, img: &DynamicImage) -> Result<Bytes, ThumbnailError> {
        let mut buf = Vec::new();
        let mut cursor = Cursor::new(&mut buf);

        img.write_to(&mut cursor, ImageOutputFormat::Jpeg(self.config.quality))
            .map_err(ThumbnailError::Encode)?;

        Ok(Bytes::from(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .expect("encoding test fixture");
        buf
    }

    #[test]
    fn scaled_dimensions_landscape() {
        let renderer = Thumbnailer::new(ThumbnailConfig::default());
        let (w, h) = renderer.scaled_dimensions(1200, 800);
        assert_eq!(w, 256);
        assert_eq!(h, 171);
    }

    #[test]
    fn scaled_dimensions_portrait() {
        let renderer = Thumbnailer::new(ThumbnailConfig::default());
        let (w, h) = renderer.scaled_dimensions(800, 1200);
        assert_eq!(w, 171);
        assert_eq!(h, 256);
    }

    #[test]
    fn scaled_dimensions_square() {
        let renderer = Thumbnailer::new(ThumbnailConfig::default());
        let (w, h) = renderer.scaled_dimensions(1000, 1000);
        assert_eq!(w, 256);
        assert_eq!(h, 256);
    }

    #[test]
    fn resizes_oversized_image() {
        let renderer = Thumbnailer::new(ThumbnailConfig::default());
        let thumbnail = renderer.generate(&png_bytes(1024, 512)).unwrap();

        assert_eq!(thumbnail.width, 256);
        assert_eq!(thumbnail.height, 128);
        assert!(!thumbnail.data.is_empty());
    }

    #[test]
    fn keeps_small_image_dimensions() {
        let renderer = Thumbnailer::new(ThumbnailConfig::default());
        let thumbnail = renderer.generate(&png_bytes(100, 50)).unwrap();

        assert_eq!(thumbnail.width, 100);
        assert_eq!(thumbnail.height, 50);
    }

    #[test]
    fn rejects_corrupt_input() {
        let renderer = Thumbnailer::new(ThumbnailConfig::default());

        assert!(matches!(
            renderer.generate(b"definitely not an image"),
            Err(ThumbnailError::Decode(_))
        ));
    }
}
