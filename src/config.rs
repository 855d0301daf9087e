use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::toolbar::hex_to_rgb;
use crate::tools::Tool;

/// How an arrow gesture previews itself while the pointer moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowPreviewMode {
    /// Preview on a separate layer composited over committed ink
    #[default]
    Layered,
    /// Clear the whole surface before every preview frame.
    /// Anything drawn before the arrow gesture is lost.
    Destructive,
}

/// Overlay configuration.
///
/// Every field has a default so partial config files keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old configs
pub struct OverlayConfig {
    pub brush_width: f32,
    pub eraser_width: f32,
    pub arrow_width: f32,
    pub arrow_head_length: f32,
    /// Opacity of the arrow preview, between 0.0 and 1.0
    pub preview_alpha: f32,
    pub default_tool: Tool,
    /// Hex color, e.g. `#ff0000`
    pub default_color: String,
    /// Hex colors offered as swatches
    pub palette: Vec<String>,
    pub arrow_preview: ArrowPreviewMode,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            brush_width: 3.0,
            eraser_width: 20.0,
            arrow_width: 3.0,
            arrow_head_length: 15.0,
            preview_alpha: 0.7,
            default_tool: Tool::Brush,
            default_color: "#ff0000".to_owned(),
            palette: [
                "#ff0000", "#ff9900", "#ffff00", "#00cc00", "#0066ff", "#9900ff", "#000000",
                "#ffffff",
            ]
            .iter()
            .map(|c| (*c).to_owned())
            .collect(),
            arrow_preview: ArrowPreviewMode::Layered,
        }
    }
}

impl OverlayConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        log::info!("Loading overlay config from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check widths, alpha and colors
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("brush_width", self.brush_width),
            ("eraser_width", self.eraser_width),
            ("arrow_width", self.arrow_width),
            ("arrow_head_length", self.arrow_head_length),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        if !(0.0..=1.0).contains(&self.preview_alpha) {
            return Err(ConfigError::InvalidValue {
                field: "preview_alpha",
                reason: format!("must be within 0.0..=1.0, got {}", self.preview_alpha),
            });
        }

        self.default_color()?;
        self.palette_colors()?;
        Ok(())
    }

    pub fn default_color(&self) -> ConfigResult<Color32> {
        parse_color(&self.default_color)
    }

    pub fn palette_colors(&self) -> ConfigResult<Vec<Color32>> {
        self.palette.iter().map(|hex| parse_color(hex)).collect()
    }
}

fn parse_color(hex: &str) -> ConfigResult<Color32> {
    hex_to_rgb(hex).ok_or_else(|| ConfigError::InvalidColor(hex.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = OverlayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_color().unwrap(), Color32::from_rgb(255, 0, 0));
        assert_eq!(config.arrow_preview, ArrowPreviewMode::Layered);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            OverlayConfig::from_json(r#"{ "eraser_width": 32, "arrow_preview": "destructive" }"#)
                .unwrap();
        assert_eq!(config.eraser_width, 32.0);
        assert_eq!(config.brush_width, 3.0);
        assert_eq!(config.arrow_preview, ArrowPreviewMode::Destructive);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            OverlayConfig::from_json(r#"{ "brush_width": 0 }"#),
            Err(ConfigError::InvalidValue { field: "brush_width", .. })
        ));
        assert!(matches!(
            OverlayConfig::from_json(r#"{ "preview_alpha": 1.5 }"#),
            Err(ConfigError::InvalidValue { field: "preview_alpha", .. })
        ));
        assert!(matches!(
            OverlayConfig::from_json(r##"{ "palette": ["#12345"] }"##),
            Err(ConfigError::InvalidColor(_))
        ));
        assert!(matches!(OverlayConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = OverlayConfig::load("/definitely/not/here/slide_ink.json");
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }
}
