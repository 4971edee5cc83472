//! Aspect-preserving thumbnail generation.

use image::imageops::FilterType;
use image::DynamicImage;
use std::io::{BufRead, Seek};
use std::path::Path;

use super::decode::ImageDecoder;
use crate::config::ThumbnailConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::Thumbnail;

/// Decodes images and resizes them to a fixed width.
#[derive(Debug, Clone)]
pub struct ThumbnailGenerator {
    decoder: ImageDecoder,
    width: u32,
}

impl ThumbnailGenerator {
    /// Create a new thumbnail generator with the given configuration.
    pub fn new(config: &ThumbnailConfig) -> Self {
        Self {
            decoder: ImageDecoder,
            width: config.width,
        }
    }

    /// Open, decode and resize the image at `path`.
    pub fn generate_path(&self, path: &Path) -> PipelineResult<Thumbnail> {
        let decoded = self.decoder.decode_path(path)?;
        self.resize(&decoded.image, path)
    }

    /// Decode and resize an already-open stream.
    pub fn generate<R: BufRead + Seek>(&self, reader: R, path: &Path) -> PipelineResult<Thumbnail> {
        let decoded = self.decoder.decode(reader, path)?;
        self.resize(&decoded.image, path)
    }

    /// Resize a decoded image to the target width with Lanczos resampling.
    pub fn resize(&self, image: &DynamicImage, path: &Path) -> PipelineResult<Thumbnail> {
        let height = target_height(self.width, image.width(), image.height()).ok_or_else(|| {
            PipelineError::Resize {
                path: path.to_path_buf(),
                message: format!(
                    "Cannot scale {}x{} to width {}",
                    image.width(),
                    image.height(),
                    self.width
                ),
            }
        })?;

        let pixels = image
            .resize_exact(self.width, height, FilterType::Lanczos3)
            .into_rgba8();

        Ok(Thumbnail {
            width: pixels.width(),
            height: pixels.height(),
            pixels,
        })
    }
}

/// Height that keeps the source aspect ratio at `target_width`.
///
/// Computes `round(target_width * height / width)`, never less than 1.
/// Returns `None` for zero-sized inputs or a height that overflows `u32`.
pub fn target_height(target_width: u32, width: u32, height: u32) -> Option<u32> {
    if target_width == 0 || width == 0 || height == 0 {
        return None;
    }
    let width = u64::from(width);
    let scaled = (u64::from(target_width) * u64::from(height) + width / 2) / width;
    u32::try_from(scaled.max(1)).ok()
}
