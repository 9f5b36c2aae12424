use crate::error::{Error, Result};
use crate::processor::filter::validate_patterns;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Image processor configuration as stored in YAML
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub ignored_patterns: Vec<String>,
    #[serde(default)]
    pub override_image: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            ignored_patterns: Vec::new(),
            override_image: false,
        }
    }
}

fn default_version() -> u32 {
    1
}

impl ImageConfig {
    /// Load image configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read image config from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_yaml_str(&content).map_err(|e| {
            Error::Config(format!(
                "Invalid image config in {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: ImageConfig = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse image config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration, compiling every ignore pattern
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported config version: {}. Expected version 1",
                self.version
            )));
        }

        if let Some(index) = self
            .ignored_patterns
            .iter()
            .position(|pattern| pattern.trim().is_empty())
        {
            return Err(Error::Config(format!(
                "Ignore pattern #{} cannot be empty",
                index + 1
            )));
        }

        validate_patterns(&self.ignored_patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
version: 1
ignored_patterns:
  - '/ads\//'
  - '#feeds\.feedburner\.com#i'
  - 'pixel\.gif$'
override_image: true
"#;

        let file = create_test_config(config_content);
        let config = ImageConfig::from_file(file.path()).unwrap();

        assert_eq!(config.version, 1);
        assert_eq!(config.ignored_patterns.len(), 3);
        assert_eq!(config.ignored_patterns[0], r"/ads\//");
        assert!(config.override_image);
    }

    #[test]
    fn test_defaults() {
        let config = ImageConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ImageConfig::default());
        assert!(!config.override_image);
        assert!(config.ignored_patterns.is_empty());
    }

    #[test]
    fn test_reject_invalid_pattern() {
        let config_content = r#"
version: 1
ignored_patterns:
  - '/ads/'
  - '/[unclosed/'
"#;

        let file = create_test_config(config_content);
        let result = ImageConfig::from_file(file.path());

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("#2"));
    }

    #[test]
    fn test_reject_empty_pattern() {
        let result = ImageConfig::from_yaml_str("ignored_patterns: ['  ']");
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_reject_unknown_version() {
        let result = ImageConfig::from_yaml_str("version: 2");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unsupported config version"));
    }

    #[test]
    fn test_missing_file() {
        let result = ImageConfig::from_file("/nonexistent/images.yaml");
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }
}
