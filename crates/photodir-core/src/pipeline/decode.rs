//! Full image decoding with content-based format detection.

use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// Decodes whole images into memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

/// Result of decoding an image.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Open `path` and decode it. The handle is closed before returning.
    pub fn decode_path(&self, path: &Path) -> PipelineResult<DecodedImage> {
        let file = File::open(path).map_err(|source| PipelineError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        self.decode(BufReader::new(file), path)
    }

    /// Decode an already-open stream. The format is detected from content.
    pub fn decode<R: BufRead + Seek>(&self, reader: R, path: &Path) -> PipelineResult<DecodedImage> {
        let reader = ImageReader::new(reader)
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = reader.format().ok_or_else(|| PipelineError::Decode {
            path: path.to_path_buf(),
            message: "Unrecognized image format".to_string(),
        })?;
        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}
