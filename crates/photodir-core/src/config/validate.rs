//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnail.width == 0 {
            return Err(ConfigError::ValidationError(
                "thumbnail.width must be > 0".into(),
            ));
        }
        if self.crawl.root.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "crawl.root must not be empty".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}
