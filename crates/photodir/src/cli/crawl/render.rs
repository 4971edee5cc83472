//! Text rendering of a crawled tree.

use std::fmt::{self, Write};
use std::time::Duration;

use photodir_core::{DirectoryNode, ImageFile, ThumbnailStats};

/// Render `root` as an indented listing, one line per directory and image.
///
/// ```text
/// photos/
///   beach.jpg  4000x3000 -> 360x270
///   2024/
///     broken.png  64x64 (no preview)
/// ```
pub fn render_tree(root: &DirectoryNode, out: &mut impl Write) -> fmt::Result {
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        writeln!(out, "{:indent$}{}/", "", node.name, indent = depth * 2)?;
        for image in &node.images {
            write_image(image, depth + 1, out)?;
        }
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }
    Ok(())
}

fn write_image(image: &ImageFile, depth: usize, out: &mut impl Write) -> fmt::Result {
    write!(
        out,
        "{:indent$}{}  {}x{}",
        "",
        image.name,
        image.width,
        image.height,
        indent = depth * 2
    )?;
    match &image.thumbnail {
        Some(thumb) => writeln!(out, " -> {}x{}", thumb.width, thumb.height),
        None => writeln!(out, " (no preview)"),
    }
}

/// Print a formatted summary table after a crawl.
pub fn print_summary(tree: &DirectoryNode, stats: &ThumbnailStats, elapsed: Duration) {
    let rate = if stats.elapsed.as_secs_f64() > 0.0 {
        stats.generated as f64 / stats.elapsed.as_secs_f64()
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Directories:  {:>8}", tree.directory_count());
    eprintln!("    Images:       {:>8}", tree.image_count());
    eprintln!("    Thumbnails:   {:>8}", stats.generated);
    if stats.failed > 0 {
        eprintln!("    Failed:       {:>8}", stats.failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
}
