//! # Application configuration (`Fleet.toml`)
//!
//! The web binary embeds a `Fleet.toml` at compile time and parses it with
//! [`FleetConfig::from_toml`]. Every section and field has a default, so an
//! empty file is equivalent to [`FleetConfig::default`].
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//!
//! [list]
//! page_size = 20
//! scroll_threshold = 0.8
//! scroll_throttle_ms = 100
//!
//! [image]
//! max_dimension = 1450
//! jpeg_quality = 85
//! max_upload_bytes = 5242880
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::image::{ImageLimits, JPEG_QUALITY, MAX_DIMENSION, MAX_UPLOAD_BYTES};
use crate::list::{DEFAULT_PAGE_SIZE, DEFAULT_SCROLL_THRESHOLD, DEFAULT_SCROLL_THROTTLE_MS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub image: ImageConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the fleet REST API, without a trailing `/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Fraction of the document that must be scrolled past to load more.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,
    #[serde(default = "default_scroll_throttle_ms")]
    pub scroll_throttle_ms: f64,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_scroll_threshold() -> f64 {
    DEFAULT_SCROLL_THRESHOLD
}

fn default_scroll_throttle_ms() -> f64 {
    DEFAULT_SCROLL_THROTTLE_MS
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            scroll_threshold: default_scroll_threshold(),
            scroll_throttle_ms: default_scroll_throttle_ms(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_dimension() -> u32 {
    MAX_DIMENSION
}

fn default_jpeg_quality() -> u8 {
    JPEG_QUALITY
}

fn default_max_upload_bytes() -> usize {
    MAX_UPLOAD_BYTES
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            jpeg_quality: default_jpeg_quality(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ImageConfig {
    pub fn limits(&self) -> ImageLimits {
        ImageLimits {
            max_upload_bytes: self.max_upload_bytes,
            max_dimension: self.max_dimension,
            jpeg_quality: self.jpeg_quality,
        }
    }
}

impl FleetConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "Fleet.toml"
    }

    /// Parse and validate from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Builder method to override the API origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".into()));
        }
        if self.list.page_size == 0 {
            return Err(ConfigError::Invalid("list.page_size must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.list.scroll_threshold) {
            return Err(ConfigError::Invalid(
                "list.scroll_threshold must be between 0 and 1".into(),
            ));
        }
        if self.image.max_dimension == 0 {
            return Err(ConfigError::Invalid("image.max_dimension must be positive".into()));
        }
        if !(1..=100).contains(&self.image.jpeg_quality) {
            return Err(ConfigError::Invalid(
                "image.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = FleetConfig::from_toml("").unwrap();
        assert_eq!(config, FleetConfig::default());
        assert_eq!(config.list.page_size, 20);
        assert_eq!(config.image.max_dimension, 1450);
        assert_eq!(config.image.jpeg_quality, 85);
        assert_eq!(config.image.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_partial_sections() {
        let config = FleetConfig::from_toml(
            r#"
            [api]
            base_url = "https://fleet.example.com"

            [list]
            page_size = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://fleet.example.com");
        assert_eq!(config.list.page_size, 10);
        assert_eq!(config.list.scroll_threshold, 0.8);
        assert_eq!(config.image, ImageConfig::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(FleetConfig::from_toml("[list]\npage_size = 0").is_err());
        assert!(FleetConfig::from_toml("[image]\njpeg_quality = 0").is_err());
        assert!(FleetConfig::from_toml("[api]\nbase_url = \"\"").is_err());
        assert!(FleetConfig::from_toml("[list]\nscroll_threshold = 1.5").is_err());
        assert!(matches!(
            FleetConfig::from_toml("[list]\npage_size = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_roundtrip() {
        let config = FleetConfig::default().with_base_url("https://api.example.com");
        let text = config.to_toml().unwrap();
        assert_eq!(FleetConfig::from_toml(&text).unwrap(), config);
    }
}
