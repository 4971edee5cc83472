//! Structured progress events emitted by the crawler and thumbnail pipeline.
//!
//! Per-entry outcomes (skips, failures, probes, thumbnails) are turned into
//! an [`Event`] and handed to a [`Reporter`]. Phase boundaries and timings
//! are still logged straight to `tracing`. [`TracingReporter`] is the default
//! and forwards events to `tracing`; front-ends can wrap it to drive progress
//! bars, and tests can record events to assert on them.

use std::path::Path;
use std::time::Duration;

use image::ImageFormat;

use crate::error::PipelineError;

/// Why an entry was left out of the tree without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file's content is not a supported raster format
    NotAnImage,
    /// Hidden entries are excluded by configuration
    Hidden,
    /// Symbolic links to directories are never followed
    SymlinkedDirectory,
}

/// A single step of a build.
#[derive(Debug)]
pub enum Event<'a> {
    /// An entry was skipped for an expected reason
    Skipped { path: &'a Path, reason: SkipReason },

    /// An entry failed; the build continues without it
    Error { error: &'a PipelineError },

    /// An image header was read successfully
    Probed {
        path: &'a Path,
        format: ImageFormat,
        width: u32,
        height: u32,
    },

    /// The thumbnail phase is about to spawn `total` units of work
    ThumbnailsStarted { total: usize },

    /// One thumbnail was generated
    Thumbnailed {
        path: &'a Path,
        width: u32,
        height: u32,
        elapsed: Duration,
    },
}

/// Receiver for build events.
///
/// Implementations are shared across thumbnail tasks, so they must be
/// thread-safe and should return quickly.
pub trait Reporter: Send + Sync {
    fn report(&self, event: &Event<'_>);
}

/// Default reporter that logs each event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &Event<'_>) {
        match event {
            Event::Skipped { path, reason } => {
                tracing::debug!(path = %path.display(), ?reason, "skipping entry");
            }
            Event::Error { error } => {
                tracing::error!(path = %error.path().display(), "{error}");
            }
            Event::Probed {
                path,
                format,
                width,
                height,
            } => {
                tracing::debug!(
                    path = %path.display(),
                    ?format,
                    width,
                    height,
                    "found image"
                );
            }
            Event::ThumbnailsStarted { total } => {
                tracing::info!(total, "generating thumbnails");
            }
            Event::Thumbnailed {
                path,
                width,
                height,
                elapsed,
            } => {
                tracing::debug!(
                    path = %path.display(),
                    width,
                    height,
                    duration = ?elapsed,
                    "generated thumbnail"
                );
            }
        }
    }
}
