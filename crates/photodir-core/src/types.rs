//! Core data types: the pruned directory tree and its image records.
//!
//! A [`DirectoryNode`] owns its children and images by value in ordered
//! vectors. The tree's shape is fixed once the crawl finishes; afterwards the
//! only mutation is filling in each [`ImageFile::thumbnail`], which the
//! thumbnail pipeline does through `&mut` borrows into these vectors.

use image::RgbaImage;
use std::path::PathBuf;
use std::time::Duration;

/// A directory kept in the result tree because it, or a descendant, holds images.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryNode {
    /// Last path segment (the full path for a root without one, e.g. `/`)
    pub name: String,

    /// Absolute path to the directory
    pub path: PathBuf,

    /// Sub-directories that lead to at least one image, in listing order
    pub children: Vec<DirectoryNode>,

    /// Images found directly in this directory, in listing order
    pub images: Vec<ImageFile>,
}

/// A discovered image file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    /// Just the filename portion
    pub name: String,

    /// Absolute path to the source file
    pub path: PathBuf,

    /// Width in pixels, from the header probe
    pub width: u32,

    /// Height in pixels, from the header probe
    pub height: u32,

    /// Resized preview; `None` until generated, or if generation failed
    pub thumbnail: Option<Thumbnail>,
}

/// A resized raster preview.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    /// Preview width in pixels (the configured target width)
    pub width: u32,

    /// Preview height in pixels, derived from the source aspect ratio
    pub height: u32,

    /// Decoded RGBA pixels
    pub pixels: RgbaImage,
}

/// Summary of one thumbnail pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThumbnailStats {
    /// Images that received a thumbnail
    pub generated: usize,

    /// Images left without a thumbnail
    pub failed: usize,

    /// Wall-clock time from first spawn to final join
    pub elapsed: Duration,
}

impl ThumbnailStats {
    /// Total number of units of work that were joined.
    pub fn total(&self) -> usize {
        self.generated + self.failed
    }
}

impl DirectoryNode {
    /// Create an empty node for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path,
            children: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Whether this node or any descendant contains at least one image.
    ///
    /// This is the gate the crawler applies to candidate children before
    /// attaching them to their parent.
    pub fn has_images(&self) -> bool {
        !self.images.is_empty() || self.children.iter().any(DirectoryNode::has_images)
    }

    /// Total images in this subtree.
    pub fn image_count(&self) -> usize {
        self.images.len()
            + self
                .children
                .iter()
                .map(DirectoryNode::image_count)
                .sum::<usize>()
    }

    /// Total directories in this subtree, including `self`.
    pub fn directory_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(DirectoryNode::directory_count)
            .sum::<usize>()
    }

    /// Iterate over every image in the subtree, depth-first, pre-order.
    pub fn images_iter(&self) -> impl Iterator<Item = &ImageFile> {
        let mut stack: Vec<&DirectoryNode> = self.children.iter().rev().collect();
        let mut pending = self.images.iter();
        std::iter::from_fn(move || loop {
            if let Some(image) = pending.next() {
                return Some(image);
            }
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            pending = node.images.iter();
        })
    }

    /// Mutable borrows of every image record in the subtree.
    ///
    /// Each borrow points at the record owned by the tree, so writes through
    /// the returned references are visible to anyone holding the root.
    pub fn image_slots(&mut self) -> Vec<&mut ImageFile> {
        let mut slots = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            let DirectoryNode {
                children, images, ..
            } = node;
            slots.extend(images.iter_mut());
            stack.extend(children.iter_mut().rev());
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> ImageFile {
        ImageFile {
            name: name.to_string(),
            path: PathBuf::from("/photos").join(name),
            width: 640,
            height: 480,
            thumbnail: None,
        }
    }

    fn sample_tree() -> DirectoryNode {
        let mut root = DirectoryNode::new("/photos");
        let mut a = DirectoryNode::new("/photos/a");
        a.images.push(image("a1.jpg"));
        let mut nested = DirectoryNode::new("/photos/a/nested");
        nested.images.push(image("n1.png"));
        a.children.push(nested);
        let mut b = DirectoryNode::new("/photos/b");
        b.images.push(image("b1.gif"));
        root.images.push(image("root.jpg"));
        root.children.push(a);
        root.children.push(b);
        root
    }

    #[test]
    fn test_new_uses_last_segment() {
        let node = DirectoryNode::new("/photos/2024/summer");
        assert_eq!(node.name, "summer");
        assert!(!node.has_images());
    }

    #[test]
    fn test_new_root_without_segment() {
        let node = DirectoryNode::new("/");
        assert_eq!(node.name, "/");
    }

    #[test]
    fn test_has_images_through_descendant() {
        let mut parent = DirectoryNode::new("/p");
        let mut child = DirectoryNode::new("/p/c");
        let mut grandchild = DirectoryNode::new("/p/c/g");
        grandchild.images.push(image("deep.png"));
        child.children.push(grandchild);
        parent.children.push(child);
        assert!(parent.has_images());
    }

    #[test]
    fn test_counts() {
        let tree = sample_tree();
        assert_eq!(tree.image_count(), 4);
        assert_eq!(tree.directory_count(), 4);
    }

    #[test]
    fn test_images_iter_preorder() {
        let tree = sample_tree();
        let names: Vec<&str> = tree.images_iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["root.jpg", "a1.jpg", "n1.png", "b1.gif"]);
    }

    #[test]
    fn test_image_slots_write_through() {
        let mut tree = sample_tree();
        for slot in tree.image_slots() {
            slot.thumbnail = Some(Thumbnail {
                width: 4,
                height: 3,
                pixels: RgbaImage::new(4, 3),
            });
        }
        assert!(tree.images_iter().all(|i| i.thumbnail.is_some()));
        let nested = &tree.children[0].children[0].images[0];
        assert_eq!(nested.thumbnail.as_ref().map(|t| t.height), Some(3));
    }

    #[test]
    fn test_image_slots_order_matches_iter() {
        let mut tree = sample_tree();
        let expected: Vec<String> = tree.images_iter().map(|i| i.name.clone()).collect();
        let slots: Vec<String> = tree
            .image_slots()
            .into_iter()
            .map(|i| i.name.clone())
            .collect();
        assert_eq!(slots, expected);
    }

    #[test]
    fn test_stats_total() {
        let stats = ThumbnailStats {
            generated: 3,
            failed: 2,
            elapsed: Duration::from_millis(5),
        };
        assert_eq!(stats.total(), 5);
    }
}
