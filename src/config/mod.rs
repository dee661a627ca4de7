//! Configuration management for skimmer.
//!
//! Configuration is read from `~/.config/skimmer/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use crate::bridge::BridgeConfig;
use crate::extract::ExtractionConfig;
use crate::orchestrator::BrowserConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserConfig,
    pub extraction: ExtractionConfig,
    pub bridge: BridgeConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating it if missing.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/skimmer/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("skimmer").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# skimmer configuration

[browser]
# Run the browser without a visible window
headless = true

# Page load timeout in seconds
timeout_secs = 30

# Wait time after page load for dynamic content (milliseconds)
wait_after_load_ms = 1000

# Maximum extractions running at once
max_concurrency = 5

# user_agent = "Mozilla/5.0 ..."

[extraction]
# "filter" drops images smaller than the minimum size or not visible,
# "keep_all" keeps every image that was found
image_policy = "filter"
min_image_width = 100.0
min_image_height = 100.0

# Element budget for the readability parser
max_elements_to_parse = 9000

# Include background images declared in same-origin stylesheets
collect_stylesheet_images = true

[bridge]
# Seconds between liveness checks
liveness_interval_secs = 5

# Buffered messages per direction
queue_capacity = 100
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ImagePolicy;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert!(config.browser.headless);
        assert_eq!(config.browser.timeout_secs, 30);
        assert_eq!(config.extraction.image_policy, ImagePolicy::Filter);
        assert_eq!(config.extraction.min_image_width, 100.0);
        assert_eq!(config.bridge.liveness_interval_secs, 5);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[extraction]
image_policy = "keep_all"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.extraction.image_policy, ImagePolicy::KeepAll);
        assert_eq!(config.extraction.max_elements_to_parse, 9000);
        assert_eq!(config.browser.max_concurrency, 5);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.bridge.queue_capacity, 100);
        assert_eq!(config.browser.wait_after_load_ms, 1000);
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.browser.timeout_secs, 30);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.extraction.image_policy, ImagePolicy::Filter);
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[browser]\ntimeout_secs = \"soon\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
