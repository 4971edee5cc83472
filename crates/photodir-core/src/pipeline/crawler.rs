//! Depth-first directory crawl that builds the pruned image tree.
//!
//! Directories are resolved post-order: a child is fully crawled before its
//! parent decides whether to keep it, and only children that lead to at least
//! one image are attached. The walk uses an explicit stack so that deeply
//! nested trees cannot exhaust the call stack.

use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::probe::{ImageProbe, ProbeOutcome};
use crate::config::{CrawlConfig, LimitsConfig};
use crate::error::PipelineError;
use crate::reporter::{Event, Reporter, SkipReason};
use crate::types::{DirectoryNode, ImageFile};

/// Sequential filesystem crawler.
#[derive(Clone)]
pub struct Crawler {
    probe: ImageProbe,
    include_hidden: bool,
    reporter: Arc<dyn Reporter>,
}

/// A directory whose entries are still being visited.
struct Frame {
    node: DirectoryNode,
    entries: std::vec::IntoIter<DirEntry>,
}

impl Crawler {
    /// Create a new crawler.
    pub fn new(crawl: &CrawlConfig, limits: LimitsConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            probe: ImageProbe::new(limits),
            include_hidden: crawl.include_hidden,
            reporter,
        }
    }

    /// Crawl `root` and return its pruned tree.
    ///
    /// The root node is always returned, even when nothing below it is an
    /// image. Unreadable directories and files are reported and skipped.
    pub fn crawl(&self, root: &Path) -> DirectoryNode {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        tracing::debug!(path = %root.display(), "crawling directory");

        // `current` is the directory being visited; `stack` holds its ancestors.
        let mut current = self.open(DirectoryNode::new(root));
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            let Some(entry) = current.entries.next() else {
                match stack.pop() {
                    Some(parent) => {
                        let done = std::mem::replace(&mut current, parent);
                        if done.node.has_images() {
                            current.node.children.push(done.node);
                        }
                    }
                    None => return current.node,
                }
                continue;
            };

            let path = entry.path();
            if !self.include_hidden && is_hidden(&entry) {
                self.reporter.report(&Event::Skipped {
                    path: &path,
                    reason: SkipReason::Hidden,
                });
                continue;
            }

            match entry_kind(&entry, &path) {
                EntryKind::Directory => {
                    tracing::debug!(path = %path.display(), "crawling directory");
                    let child = self.open(DirectoryNode::new(path));
                    stack.push(std::mem::replace(&mut current, child));
                }
                EntryKind::LinkedDirectory => {
                    self.reporter.report(&Event::Skipped {
                        path: &path,
                        reason: SkipReason::SymlinkedDirectory,
                    });
                }
                EntryKind::File => {
                    if let Some(image) = self.probe_file(&entry, path) {
                        current.node.images.push(image);
                    }
                }
            }
        }
    }

    /// List a directory's entries into a new frame.
    ///
    /// A directory that cannot be listed yields a frame with no entries, so
    /// it contributes nothing to the tree.
    fn open(&self, node: DirectoryNode) -> Frame {
        let entries = match list_dir(&node.path) {
            Ok(entries) => entries,
            Err(error) => {
                self.reporter.report(&Event::Error { error: &error });
                Vec::new()
            }
        };
        Frame {
            node,
            entries: entries.into_iter(),
        }
    }

    fn probe_file(&self, entry: &DirEntry, path: PathBuf) -> Option<ImageFile> {
        match self.probe.probe_path(&path) {
            Ok(ProbeOutcome::Image(probed)) => {
                self.reporter.report(&Event::Probed {
                    path: &path,
                    format: probed.format,
                    width: probed.width,
                    height: probed.height,
                });
                Some(ImageFile {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path,
                    width: probed.width,
                    height: probed.height,
                    thumbnail: None,
                })
            }
            Ok(ProbeOutcome::NotAnImage) => {
                self.reporter.report(&Event::Skipped {
                    path: &path,
                    reason: SkipReason::NotAnImage,
                });
                None
            }
            Err(error) => {
                self.reporter.report(&Event::Error { error: &error });
                None
            }
        }
    }
}

/// Read all entries of `path` in the order the filesystem returns them.
///
/// Entries that fail individually are dropped with a warning.
fn list_dir(path: &Path) -> Result<Vec<DirEntry>, PipelineError> {
    let read_dir = fs::read_dir(path).map_err(|source| PipelineError::DirectoryRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::warn!(path = %path.display(), "skipping unreadable entry: {e}"),
        }
    }
    Ok(entries)
}

enum EntryKind {
    Directory,
    LinkedDirectory,
    File,
}

/// Classify an entry without descending through symlinks.
///
/// A link is resolved only to tell whether it points at a directory; links
/// to files (and dangling links) are probed like regular files.
fn entry_kind(entry: &DirEntry, path: &Path) -> EntryKind {
    match entry.file_type() {
        Ok(t) if t.is_dir() => EntryKind::Directory,
        Ok(t) if t.is_symlink() => match fs::metadata(path) {
            Ok(target) if target.is_dir() => EntryKind::LinkedDirectory,
            _ => EntryKind::File,
        },
        _ => EntryKind::File,
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::testing::{Recorded, RecordingReporter};
    use crate::reporter::TracingReporter;
    use crate::test_helpers::{write_jpeg, write_png};

    fn crawler() -> Crawler {
        Crawler::new(
            &CrawlConfig::default(),
            LimitsConfig::default(),
            Arc::new(TracingReporter),
        )
    }

    fn names(nodes: &[DirectoryNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_empty_root_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let tree = crawler().crawl(dir.path());
        assert!(tree.children.is_empty());
        assert!(tree.images.is_empty());
        assert!(!tree.has_images());
        assert_eq!(tree.path, dir.path());
    }

    #[test]
    fn test_prunes_branches_without_images() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::create_dir_all(root.join("c/d/e")).unwrap();
        write_jpeg(&root.join("a/photo.jpg"), 30, 20);
        fs::write(root.join("b/notes.txt"), "not a picture").unwrap();

        let tree = crawler().crawl(root);
        assert_eq!(names(&tree.children), vec!["a"]);
        let a = &tree.children[0];
        assert_eq!(a.images.len(), 1);
        assert_eq!(a.images[0].name, "photo.jpg");
        assert_eq!((a.images[0].width, a.images[0].height), (30, 20));
        assert!(a.images[0].thumbnail.is_none());
        assert_eq!(a.images[0].path, root.join("a/photo.jpg"));
    }

    #[test]
    fn test_keeps_intermediate_directories_of_deep_images() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("x/y/z")).unwrap();
        write_png(&root.join("x/y/z/deep.png"), 4, 4);

        let tree = crawler().crawl(root);
        assert_eq!(names(&tree.children), vec!["x"]);
        let x = &tree.children[0];
        assert!(x.images.is_empty());
        assert_eq!(names(&x.children), vec!["y"]);
        assert_eq!(names(&x.children[0].children), vec!["z"]);
        assert_eq!(tree.image_count(), 1);
    }

    #[test]
    fn test_handles_very_deep_nesting() {
        let dir = tempfile::tempdir().unwrap();
        let mut deepest = dir.path().to_path_buf();
        for _ in 0..200 {
            deepest.push("d");
        }
        fs::create_dir_all(&deepest).unwrap();
        write_png(&deepest.join("bottom.png"), 2, 2);

        let tree = crawler().crawl(dir.path());
        assert_eq!(tree.image_count(), 1);
        assert_eq!(tree.directory_count(), 201);
    }

    #[test]
    fn test_missing_root_reports_error_and_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let reporter = Arc::new(RecordingReporter::default());
        let crawler = Crawler::new(
            &CrawlConfig::default(),
            LimitsConfig::default(),
            reporter.clone(),
        );

        let tree = crawler.crawl(&missing);
        assert!(!tree.has_images());
        assert_eq!(reporter.events(), vec![Recorded::Error(missing)]);
    }

    #[test]
    fn test_reports_skips_and_probes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_png(&root.join("pic.png"), 6, 3);
        fs::write(root.join("readme.md"), "# hello").unwrap();
        let reporter = Arc::new(RecordingReporter::default());
        let crawler = Crawler::new(
            &CrawlConfig::default(),
            LimitsConfig::default(),
            reporter.clone(),
        );

        crawler.crawl(root);
        let events = reporter.events();
        assert!(events.contains(&Recorded::Probed(root.join("pic.png"), 6, 3)));
        assert!(events.contains(&Recorded::Skipped(
            root.join("readme.md"),
            SkipReason::NotAnImage
        )));
        assert!(!events.iter().any(|e| matches!(e, Recorded::Error(_))));
    }

    #[test]
    fn test_hidden_entries_excluded_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".cache")).unwrap();
        write_png(&root.join(".cache/thumb.png"), 2, 2);
        write_png(&root.join(".hidden.png"), 2, 2);
        write_png(&root.join("shown.png"), 2, 2);

        let all = crawler().crawl(root);
        assert_eq!(all.image_count(), 3);

        let visible = Crawler::new(
            &CrawlConfig {
                include_hidden: false,
                ..CrawlConfig::default()
            },
            LimitsConfig::default(),
            Arc::new(TracingReporter),
        )
        .crawl(root);
        assert_eq!(visible.image_count(), 1);
        assert_eq!(visible.images[0].name, "shown.png");
        assert!(visible.children.is_empty());
    }

    #[test]
    fn test_listing_order_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for name in ["c.png", "a.png", "b.png"] {
            write_png(&root.join(name), 2, 2);
        }
        let listed: Vec<String> = fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();

        let tree = crawler().crawl(root);
        let crawled: Vec<String> = tree.images.iter().map(|i| i.name.clone()).collect();
        assert_eq!(crawled, listed);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_to_directories_are_skipped_and_to_files_probed() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("real")).unwrap();
        write_png(&root.join("real/a.png"), 5, 4);
        symlink(root.join("real"), root.join("link")).unwrap();
        symlink(root.join("real/a.png"), root.join("alias.png")).unwrap();
        let reporter = Arc::new(RecordingReporter::default());
        let crawler = Crawler::new(
            &CrawlConfig::default(),
            LimitsConfig::default(),
            reporter.clone(),
        );

        let tree = crawler.crawl(root);
        assert_eq!(names(&tree.children), vec!["real"]);
        assert_eq!(tree.images.len(), 1);
        assert_eq!(tree.images[0].name, "alias.png");
        assert_eq!((tree.images[0].width, tree.images[0].height), (5, 4));
        assert_eq!(tree.image_count(), 2);

        let events = reporter.events();
        assert!(events.contains(&Recorded::Skipped(
            root.join("link"),
            SkipReason::SymlinkedDirectory
        )));
        assert!(events.contains(&Recorded::Probed(root.join("alias.png"), 5, 4)));
        assert!(!events.iter().any(|e| matches!(e, Recorded::Error(_))));
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let tree = crawler().crawl(Path::new("no-such-photo-dir"));
        assert!(tree.path.is_absolute());
        assert!(tree.path.ends_with("no-such-photo-dir"));
        assert_eq!(tree.name, "no-such-photo-dir");
    }
}
