use crate::error::ConfigError;
use crate::export::{
    DEFAULT_FALLBACK_COLOR, ExportSettings, Orientation, PageOptions, RasterOptions,
    TextLayoutOptions, page::DEFAULT_MARGIN,
};
use crate::render::Theme;
use serde::Deserialize;
use std::fs;

/// Export settings as read from a JSON config file. Every field is optional.
///
/// ```json
/// { "pixelRatio": 3, "background": "#f8fafc", "margin": 32, "orientation": "landscape" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    pub pixel_ratio: f32,
    pub background: String,
    pub margin: f64,
    pub orientation: Option<Orientation>,
    pub fallback_color: String,
    pub theme: Theme,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pixel_ratio: 2.0,
            background: "#ffffff".to_string(),
            margin: DEFAULT_MARGIN,
            orientation: None,
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
            theme: Theme::default(),
        }
    }
}

impl ExportConfig {
    /// Load a config from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content).map_err(|message| ConfigError::Parse {
            path: path.to_string(),
            message,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    pub fn into_settings(self) -> ExportSettings {
        ExportSettings {
            raster: RasterOptions {
                pixel_ratio: self.pixel_ratio,
                background: self.background.clone(),
                fallback_color: self.fallback_color,
            },
            page: PageOptions {
                margin: self.margin,
                orientation: self.orientation,
                background: self.background,
            },
            text: TextLayoutOptions::default(),
            theme: self.theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ExportConfig::from_json(r#"{"margin": 32, "orientation": "portrait"}"#).unwrap();
        assert_eq!(config.margin, 32.0);
        assert_eq!(config.orientation, Some(Orientation::Portrait));
        assert_eq!(config.pixel_ratio, 2.0);
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn test_theme_overrides() {
        let config =
            ExportConfig::from_json(r#"{"theme": {"accent": "oklch(0.6 0.2 260)"}}"#).unwrap();
        let settings = config.into_settings();
        assert_eq!(settings.theme.accent, "oklch(0.6 0.2 260)");
        assert_eq!(settings.theme.background, Theme::default().background);
    }
}
