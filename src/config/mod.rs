pub mod images;

pub use images::ImageConfig;

use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// YAML file holding the base image configuration
    pub config_path: Option<PathBuf>,
    /// Overrides the file's `override_image` when set
    pub override_image: Option<bool>,
    /// Appended after the file's ignore patterns
    pub extra_patterns: Vec<String>,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let config_path = std::env::var("IMAGE_CONFIG_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let override_image = match std::env::var("OVERRIDE_IMAGE") {
            Ok(value) => Some(
                parse_flag(&value)
                    .map_err(|_| Error::Config("Invalid OVERRIDE_IMAGE value".to_string()))?,
            ),
            Err(_) => None,
        };

        let extra_patterns = std::env::var("IGNORED_PATTERNS")
            .map(|value| split_patterns(&value))
            .unwrap_or_default();

        Ok(Settings {
            config_path,
            override_image,
            extra_patterns,
        })
    }

    /// Build the effective image configuration: file first, then environment
    pub fn image_config(&self) -> Result<ImageConfig> {
        let mut config = match &self.config_path {
            Some(path) => ImageConfig::from_file(path)?,
            None => ImageConfig::default(),
        };

        if let Some(override_image) = self.override_image {
            config.override_image = override_image;
        }

        if !self.extra_patterns.is_empty() {
            debug!(
                "Adding {} ignore patterns from environment",
                self.extra_patterns.len()
            );
            config
                .ignored_patterns
                .extend(self.extra_patterns.iter().cloned());
            config.validate()?;
        }

        Ok(config)
    }
}

/// Coerce a loosely typed flag into a boolean
pub fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("Invalid boolean flag: {other}"))),
    }
}

/// One pattern per line; blank lines are dropped
fn split_patterns(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
