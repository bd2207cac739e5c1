//! Render configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transport::DEFAULT_MAX_DEPTH;
use crate::Color;

/// Errors raised while loading or validating a [`RenderConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Render configuration.
///
/// Every field has a default, so a JSON file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of horizontal bands, each rendered by its own worker
    pub workers: usize,
    /// Half of the vertical field of view, in degrees
    pub half_fov_degrees: f32,
    /// Maximum reflection/refraction recursion depth
    pub max_depth: u32,
    /// Abandon the render if it takes longer than this
    pub timeout_ms: Option<u64>,
    /// Color returned by rays that hit nothing
    pub background: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            half_fov_degrees: 30.0,
            max_depth: DEFAULT_MAX_DEPTH,
            timeout_ms: None,
            background: [1.0, 1.0, 1.0],
        }
    }
}

impl RenderConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check the values the renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.workers == 0 {
            return Err(ConfigError::Invalid("at least one worker is required".into()));
        }
        if !(self.half_fov_degrees > 0.0 && self.half_fov_degrees < 90.0) {
            return Err(ConfigError::Invalid(format!(
                "half field of view must be in (0, 90) degrees, got {}",
                self.half_fov_degrees
            )));
        }
        Ok(())
    }

    /// The configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Background as a color.
    pub fn background_color(&self) -> Color {
        Color::from(self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.background_color(), Color::ONE);
        assert!(config.timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = RenderConfig::from_json_str(r#"{ "width": 64, "height": 48, "timeout_ms": 2500 }"#).unwrap();

        assert_eq!(config.width, 64);
        assert_eq!(config.height, 48);
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.half_fov_degrees, 30.0);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            RenderConfig::from_json_str(r#"{ "workers": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            RenderConfig::from_json_str(r#"{ "half_fov_degrees": 90.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            RenderConfig::from_json_str(r#"{ "width": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(RenderConfig::from_json_str("{ width: "), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RenderConfig::from_json_file("/no/such/config.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
