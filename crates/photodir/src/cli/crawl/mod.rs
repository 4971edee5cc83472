//! The `photodir crawl` command.

mod progress;
mod render;

use clap::Args;
use photodir_core::{Config, PhotoDir};
use std::path::PathBuf;
use std::sync::Arc;

use progress::ProgressReporter;
use render::{print_summary, render_tree};

/// Arguments for the `crawl` command.
#[derive(Args, Debug, Default)]
pub struct CrawlArgs {
    /// Directory to crawl (defaults to `crawl.root` from the config file)
    #[arg(env = "PHOTODIR_ROOT")]
    pub path: Option<PathBuf>,

    /// Thumbnail width in pixels; height follows the image's aspect ratio
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Maximum thumbnails decoded at once (0 = no limit)
    #[arg(short = 'j', long)]
    pub max_concurrency: Option<usize>,

    /// Skip files and directories whose name starts with a dot
    #[arg(long)]
    pub no_hidden: bool,
}

/// Execute the crawl command.
pub async fn execute(args: CrawlArgs, config: Config) -> anyhow::Result<()> {
    let (root, config) = apply_overrides(&args, config);

    if !root.is_dir() {
        anyhow::bail!(
            "Not a directory: {:?}\n\n  Hint: Check the path and try again.",
            root
        );
    }

    let reporter = Arc::new(ProgressReporter::new());
    let photodir = PhotoDir::with_reporter(config, reporter.clone())?;

    let start = std::time::Instant::now();
    let (tree, stats) = photodir.build_with_stats(&root).await;
    reporter.finish();

    let mut rendered = String::new();
    render_tree(&tree, &mut rendered)?;
    print!("{rendered}");

    print_summary(&tree, &stats, start.elapsed());
    Ok(())
}

/// Merge command-line flags into the loaded configuration.
fn apply_overrides(args: &CrawlArgs, mut config: Config) -> (PathBuf, Config) {
    if let Some(width) = args.width {
        config.thumbnail.width = width;
    }
    if let Some(max) = args.max_concurrency {
        config.thumbnail.max_concurrency = max;
    }
    if args.no_hidden {
        config.crawl.include_hidden = false;
    }

    let root = match &args.path {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            PathBuf::from(expanded)
        }
        None => config.crawl_root(),
    };
    (root, config)
}
