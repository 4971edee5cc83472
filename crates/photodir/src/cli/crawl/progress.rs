//! Progress display for the crawl command.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use photodir_core::{Event, Reporter, TracingReporter};

/// Reporter that drives a spinner while crawling and a bar while generating
/// thumbnails. Every event is also forwarded to [`TracingReporter`].
pub struct ProgressReporter {
    bar: ProgressBar,
    logger: TracingReporter,
    found: AtomicUsize,
    generating: AtomicBool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_bar(create_spinner())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            logger: TracingReporter,
            found: AtomicUsize::new(0),
            generating: AtomicBool::new(false),
        }
    }

    /// Remove the progress display.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn tick_thumbnail(&self) {
        if self.generating.load(Ordering::Relaxed) {
            self.bar.inc(1);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ProgressReporter {
    fn report(&self, event: &Event<'_>) {
        self.logger.report(event);

        match event {
            Event::Probed { .. } => {
                let found = self.found.fetch_add(1, Ordering::Relaxed) + 1;
                self.bar.set_message(format!("{found} images found"));
                self.bar.tick();
            }
            Event::ThumbnailsStarted { total } => {
                self.generating.store(true, Ordering::Relaxed);
                self.bar.set_style(bar_style());
                self.bar.set_length(*total as u64);
                self.bar.set_position(0);
                self.bar.set_message("generating thumbnails");
            }
            Event::Thumbnailed { .. } | Event::Error { .. } => self.tick_thumbnail(),
            Event::Skipped { .. } => {}
        }
    }
}

fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] crawling: {msg}")
            .unwrap(),
    );
    pb.set_message("starting...");
    pb
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap()
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use photodir_core::ImageFormat;
    use std::path::Path;
    use std::time::Duration;

    fn hidden() -> ProgressReporter {
        ProgressReporter::with_bar(ProgressBar::hidden())
    }

    #[test]
    fn test_counts_probed_images() {
        let reporter = hidden();
        for _ in 0..3 {
            reporter.report(&Event::Probed {
                path: Path::new("/p.png"),
                format: ImageFormat::Png,
                width: 1,
                height: 1,
            });
        }
        assert_eq!(reporter.found.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_bar_advances_only_after_start() {
        let reporter = hidden();
        let error = photodir_core::PipelineError::Probe {
            path: "/bad.png".into(),
            message: "eof".to_string(),
        };
        reporter.report(&Event::Error { error: &error });
        assert_eq!(reporter.bar.position(), 0);

        reporter.report(&Event::ThumbnailsStarted { total: 2 });
        reporter.report(&Event::Thumbnailed {
            path: Path::new("/ok.png"),
            width: 360,
            height: 240,
            elapsed: Duration::from_millis(1),
        });
        reporter.report(&Event::Error { error: &error });
        assert_eq!(reporter.bar.position(), 2);
        assert_eq!(reporter.bar.length(), Some(2));
    }
}
