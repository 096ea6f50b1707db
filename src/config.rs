//! Render settings
//!
//! Settings are plain serde structs read from TOML. Every field has a default,
//! so a settings file only needs to list the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Settings consumed by the rendering manager and the application window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Vertical field of view in degrees
    pub field_of_view: f64,
    pub near_clip: f64,
    pub far_clip: f64,
    /// Keep the viewer's small feature culling enabled
    pub small_feature_culling: bool,
    /// First light slot handed out by the light manager; slot 0 is the sun
    pub start_light: u32,
    /// Cloud scroll speed in texture widths per second
    pub cloud_speed: f32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            field_of_view: 55.0,
            near_clip: 1.0,
            far_clip: 6666.0,
            small_feature_culling: false,
            start_light: 1,
            cloud_speed: 0.05,
            window_width: 1200,
            window_height: 800,
        }
    }
}

impl RenderSettings {
    /// Load settings from a `.toml` file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&contents)?;
        log::info!("loaded render settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects values the renderer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_light == 0 {
            return Err(ConfigError::Invalid(
                "start_light must be at least 1, light 0 belongs to the sun".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_values() {
        let settings = RenderSettings::default();
        assert_eq!(settings.field_of_view, 55.0);
        assert_eq!(settings.start_light, 1);
        assert!(!settings.small_feature_culling);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = RenderSettings::from_toml_str("field_of_view = 70.0\n").unwrap();
        assert_eq!(settings.field_of_view, 70.0);
        assert_eq!(settings.far_clip, RenderSettings::default().far_clip);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = RenderSettings::from_toml_str("field_of_view = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_written_settings_load_back() {
        let mut settings = RenderSettings::default();
        settings.small_feature_culling = true;
        let text = settings.to_toml_string().unwrap();
        assert_eq!(RenderSettings::from_toml_str(&text).unwrap(), settings);
    }

    #[test]
    fn test_start_light_zero_rejected() {
        let err = RenderSettings::from_toml_str("start_light = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(RenderSettings::from_toml_str("start_light = 3\n").is_ok());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = RenderSettings::load_from_file("settings.ron").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
