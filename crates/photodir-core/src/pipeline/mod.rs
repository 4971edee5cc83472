//! Crawl and thumbnail pipeline components.
//!
//! - **probe**: header-only format and dimension detection
//! - **decode**: full pixel decode with content-based format detection
//! - **thumbnail**: aspect-preserving Lanczos resize to a fixed width
//! - **crawler**: sequential post-order walk that builds the pruned tree
//! - **batch**: concurrent fan-out/join of thumbnail generation

pub mod batch;
pub mod crawler;
pub mod decode;
pub mod probe;
pub mod thumbnail;

// Re-exports for convenient access
pub use batch::ThumbnailPipeline;
pub use crawler::Crawler;
pub use decode::{DecodedImage, ImageDecoder};
pub use probe::{probe, ImageProbe, ProbeOutcome, ProbedImage};
pub use thumbnail::{target_height, ThumbnailGenerator};
