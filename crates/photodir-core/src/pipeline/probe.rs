//! Header-only image detection.
//!
//! The probe identifies a file's format from its magic bytes and reads just
//! enough of the header to learn its dimensions. It never allocates the pixel
//! grid, which keeps the crawl cheap even over large trees.

use image::{ImageError, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};

/// Format and dimensions of an image, read from its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbedImage {
    /// Detected format
    pub format: ImageFormat,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Result of probing a readable file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A supported raster image
    Image(ProbedImage),
    /// Anything else: documents, sidecar files, unsupported formats
    NotAnImage,
}

/// Cheap image detector with configurable limits.
#[derive(Debug, Clone, Default)]
pub struct ImageProbe {
    limits: LimitsConfig,
}

impl ImageProbe {
    /// Create a new probe with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Open `path` and probe it.
    ///
    /// The file handle lives only for the duration of this call.
    pub fn probe_path(&self, path: &Path) -> PipelineResult<ProbeOutcome> {
        let file = File::open(path).map_err(|source| PipelineError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        if self.limits.max_file_size_mb > 0 {
            if let Ok(metadata) = file.metadata() {
                let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
                if metadata.len() > max_bytes {
                    return Err(PipelineError::FileTooLarge {
                        path: path.to_path_buf(),
                        size_mb: metadata.len() / (1024 * 1024),
                        max_mb: self.limits.max_file_size_mb,
                    });
                }
            }
        }

        probe(BufReader::new(file), path)
    }
}

/// Probe an already-open stream.
///
/// Unknown content and formats this build cannot decode yield
/// [`ProbeOutcome::NotAnImage`]. A recognized format whose header cannot be
/// read is a [`PipelineError::Probe`].
pub fn probe<R: BufRead + Seek>(reader: R, path: &Path) -> PipelineResult<ProbeOutcome> {
    let reader = ImageReader::new(reader)
        .with_guessed_format()
        .map_err(|e| PipelineError::Probe {
            path: path.to_path_buf(),
            message: format!("Cannot read file header: {}", e),
        })?;

    let format = match reader.format() {
        Some(format) if format.reading_enabled() => format,
        _ => return Ok(ProbeOutcome::NotAnImage),
    };

    match reader.into_dimensions() {
        Ok((width, height)) => Ok(ProbeOutcome::Image(ProbedImage {
            format,
            width,
            height,
        })),
        Err(ImageError::Unsupported(_)) => Ok(ProbeOutcome::NotAnImage),
        Err(e) => Err(PipelineError::Probe {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}
