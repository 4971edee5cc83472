//! Photodir Core - crawl a directory for photos and build previews.
//!
//! Given a root directory, photodir finds every image below it, builds a
//! tree containing only the branches that lead to images, and attaches a
//! resized preview to each image.
//!
//! # Architecture
//!
//! ```text
//! root → Crawler (sequential, post-order, pruned) → tree
//!      → ThumbnailPipeline (one task per image, joined) → same tree with thumbnails
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use photodir_core::{Config, PhotoDir};
//!
//! #[tokio::main]
//! async fn main() -> photodir_core::Result<()> {
//!     let photodir = PhotoDir::new(Config::load()?)?;
//!     let tree = photodir.build("./photos".as_ref()).await;
//!     println!("{} images", tree.image_count());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod reporter;
pub mod types;

#[cfg(test)]
mod test_helpers;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PhotodirError, PipelineError, PipelineResult, Result};
pub use pipeline::{Crawler, ThumbnailPipeline};
pub use reporter::{Event, Reporter, SkipReason, TracingReporter};
pub use types::{DirectoryNode, ImageFile, Thumbnail, ThumbnailStats};

/// Image format reported in [`Event::Probed`].
pub use image::ImageFormat;

use std::path::Path;
use std::sync::Arc;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Photodir orchestrator - the main entry point.
///
/// Runs the crawl and then the thumbnail pipeline, returning the finished
/// tree. Nothing is cached: every call rebuilds from the filesystem.
pub struct PhotoDir {
    config: Config,
    crawler: Crawler,
    thumbnails: ThumbnailPipeline,
}

impl PhotoDir {
    /// Create a new instance that logs through `tracing`.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_reporter(config, Arc::new(TracingReporter))
    }

    /// Create a new instance that sends build events to `reporter`.
    pub fn with_reporter(config: Config, reporter: Arc<dyn Reporter>) -> Result<Self> {
        config.validate()?;
        tracing::debug!("Initializing photodir v{}", VERSION);
        Ok(Self {
            crawler: Crawler::new(&config.crawl, config.limits.clone(), Arc::clone(&reporter)),
            thumbnails: ThumbnailPipeline::new(&config.thumbnail, reporter),
            config,
        })
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawl `root` and generate thumbnails for everything found.
    ///
    /// Never fails: unreadable directories, non-images and broken images are
    /// reported and left out (or left without a thumbnail).
    pub async fn build(&self, root: &Path) -> DirectoryNode {
        self.build_with_stats(root).await.0
    }

    /// Like [`PhotoDir::build`], also returning thumbnail statistics.
    pub async fn build_with_stats(&self, root: &Path) -> (DirectoryNode, ThumbnailStats) {
        tracing::info!(path = %root.display(), "crawling directories for images");
        let crawler = self.crawler.clone();
        let owned_root = root.to_path_buf();
        let crawl = tokio::task::spawn_blocking(move || crawler.crawl(&owned_root));
        let mut tree = match crawl.await {
            Ok(tree) => tree,
            Err(e) => {
                tracing::error!(path = %root.display(), "Crawl task failed: {e}");
                DirectoryNode::new(root)
            }
        };
        tracing::info!(
            images = tree.image_count(),
            directories = tree.directory_count(),
            "crawl complete"
        );

        let stats = self.thumbnails.generate_thumbnails(&mut tree).await;
        (tree, stats)
    }
}
