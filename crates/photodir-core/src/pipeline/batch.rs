//! Concurrent thumbnail generation over a crawled tree.
//!
//! Every image in the tree gets its own task. All tasks are spawned before
//! any is awaited, and [`ThumbnailPipeline::generate_thumbnails`] returns only
//! after the whole set has been joined. Each task decodes on the blocking
//! pool and hands back its result tagged with the index of the image record
//! it belongs to; the joiner writes it into that record through the `&mut`
//! borrow taken from the tree, so updates land in the tree itself and never
//! in a detached copy.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::thumbnail::ThumbnailGenerator;
use crate::config::ThumbnailConfig;
use crate::error::PipelineError;
use crate::reporter::{Event, Reporter};
use crate::types::{DirectoryNode, Thumbnail, ThumbnailStats};

/// Fans thumbnail work out across the tree and joins it.
#[derive(Clone)]
pub struct ThumbnailPipeline {
    generator: ThumbnailGenerator,
    max_concurrency: usize,
    reporter: Arc<dyn Reporter>,
}

impl ThumbnailPipeline {
    /// Create a new pipeline.
    ///
    /// `config.max_concurrency == 0` runs every decode at once; a positive
    /// value caps simultaneous decodes without changing the result.
    pub fn new(config: &ThumbnailConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            generator: ThumbnailGenerator::new(config),
            max_concurrency: config.max_concurrency,
            reporter,
        }
    }

    /// Generate a thumbnail for every image under `root`.
    ///
    /// Failures are reported and leave that image's thumbnail empty; they
    /// never affect other images. Must be called from within a Tokio runtime.
    pub async fn generate_thumbnails(&self, root: &mut DirectoryNode) -> ThumbnailStats {
        let start = Instant::now();
        let mut slots = root.image_slots();
        self.reporter.report(&Event::ThumbnailsStarted { total: slots.len() });

        let limiter =
            (self.max_concurrency > 0).then(|| Arc::new(Semaphore::new(self.max_concurrency)));

        let mut tasks = JoinSet::new();
        let mut units = HashMap::with_capacity(slots.len());
        for (index, slot) in slots.iter().enumerate() {
            let path = slot.path.clone();
            let generator = self.generator.clone();
            let reporter = Arc::clone(&self.reporter);
            let limiter = limiter.clone();
            let handle = tasks.spawn(async move {
                // Held until this unit finishes; a closed semaphore means no cap.
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                (index, run_unit(generator, reporter, path).await)
            });
            units.insert(handle.id(), index);
        }

        let mut stats = ThumbnailStats::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Some(thumbnail))) => {
                    slots[index].thumbnail = Some(thumbnail);
                    stats.generated += 1;
                }
                Ok((_, None)) => stats.failed += 1,
                Err(e) => {
                    stats.failed += 1;
                    match units.get(&e.id()) {
                        Some(&index) => {
                            let error = PipelineError::Task {
                                path: slots[index].path.clone(),
                                message: e.to_string(),
                            };
                            self.reporter.report(&Event::Error { error: &error });
                        }
                        None => tracing::error!("Thumbnail task aborted: {e}"),
                    }
                }
            }
        }

        stats.elapsed = start.elapsed();
        tracing::info!(
            generated = stats.generated,
            failed = stats.failed,
            duration = ?stats.elapsed,
            "thumbnails complete"
        );
        stats
    }
}

/// Decode and resize one image on the blocking pool.
async fn run_unit(
    generator: ThumbnailGenerator,
    reporter: Arc<dyn Reporter>,
    path: PathBuf,
) -> Option<Thumbnail> {
    let started = Instant::now();
    let task_path = path.clone();
    let result = tokio::task::spawn_blocking(move || generator.generate_path(&task_path))
        .await
        .unwrap_or_else(|e| {
            Err(PipelineError::Task {
                path: path.clone(),
                message: e.to_string(),
            })
        });

    match result {
        Ok(thumbnail) => {
            reporter.report(&Event::Thumbnailed {
                path: &path,
                width: thumbnail.width,
                height: thumbnail.height,
                elapsed: started.elapsed(),
            });
            Some(thumbnail)
        }
        Err(error) => {
            reporter.report(&Event::Error { error: &error });
            None
        }
    }
}
