//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Fixed preview width used when no configuration overrides it.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 360;

/// Crawl settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Directory crawled when none is given on the command line
    pub root: String,

    /// Descend into and probe entries whose name starts with a dot
    pub include_hidden: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            include_hidden: true,
        }
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Target width in pixels; height always follows the source aspect ratio
    pub width: u32,

    /// Maximum simultaneous decodes (0 = one task per image, unbounded)
    pub max_concurrency: usize,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_THUMBNAIL_WIDTH,
            max_concurrency: 0,
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes (0 = unlimited)
    pub max_file_size_mb: u64,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
