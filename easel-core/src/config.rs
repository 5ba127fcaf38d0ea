//! Editor configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{EditError, EditResult};
use crate::navigator::ControlSettings;
use crate::style::{TextFill, TextStyle};

/// Defaults for newly added text elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    /// Font id.
    pub font: String,
    /// Font size in points.
    pub font_size: f32,
    /// Glyph color.
    pub color: Color,
    /// Left edge of the new box.
    pub x: f32,
    /// Top edge of the new box.
    pub y: f32,
    /// Width of the new box.
    pub width: f32,
    /// Height of the new box.
    pub height: f32,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            font: "sans-serif".to_string(),
            font_size: 20.0,
            color: Color::BLACK,
            x: 50.0,
            y: 50.0,
            width: 100.0,
            height: 40.0,
        }
    }
}

impl TextDefaults {
    /// Typography for a new text element.
    #[must_use]
    pub fn style(&self) -> TextStyle {
        TextStyle {
            font: self.font.clone(),
            size: self.font_size,
            fill: TextFill::Solid(self.color),
            ..TextStyle::default()
        }
    }
}

/// Defaults for newly added image elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDefaults {
    /// Left edge of the new box.
    pub x: f32,
    /// Top edge of the new box.
    pub y: f32,
    /// Width of the new box.
    pub width: f32,
    /// Height of the new box.
    pub height: f32,
}

impl Default for ImageDefaults {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            width: 300.0,
            height: 300.0,
        }
    }
}

/// Settings for one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Width of a new canvas.
    pub canvas_width: u32,
    /// Height of a new canvas.
    pub canvas_height: u32,
    /// Fill of a new canvas.
    pub background_color: Color,
    /// Maximum undo depth; `None` keeps every step.
    pub history_limit: Option<usize>,
    /// New text element defaults.
    pub text_defaults: TextDefaults,
    /// New image element defaults.
    pub image_defaults: ImageDefaults,
    /// Pixels moved per nudge arrow press.
    pub nudge_step: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1080,
            canvas_height: 1080,
            background_color: Color::WHITE,
            history_limit: None,
            text_defaults: TextDefaults::default(),
            image_defaults: ImageDefaults::default(),
            nudge_step: 10.0,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Serialization`] for malformed JSON, or the errors
    /// of [`EditorConfig::validate`].
    pub fn from_json(json: &str) -> EditResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidCanvasSize`] for a zero canvas dimension,
    /// or [`EditError::InvalidProperty`] for any other bad setting.
    pub fn validate(&self) -> EditResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(EditError::InvalidCanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.history_limit == Some(0) {
            return Err(EditError::invalid("history limit", "must be at least 1"));
        }
        if !self.nudge_step.is_finite() || self.nudge_step <= 0.0 {
            return Err(EditError::invalid(
                "nudge step",
                format!("must be > 0, got {}", self.nudge_step),
            ));
        }
        self.text_defaults.style().validate()?;
        let t = &self.text_defaults;
        let i = &self.image_defaults;
        for (property, value) in [
            ("text x", t.x),
            ("text y", t.y),
            ("image x", i.x),
            ("image y", i.y),
        ] {
            if !value.is_finite() {
                return Err(EditError::invalid(property, "must be finite"));
            }
        }
        for (property, value) in [
            ("text width", t.width),
            ("text height", t.height),
            ("image width", i.width),
            ("image height", i.height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EditError::invalid(
                    property,
                    format!("must be >= 0, got {value}"),
                ));
            }
        }
        Ok(())
    }

    /// Settings passed to panel controls.
    #[must_use]
    pub const fn control_settings(&self) -> ControlSettings {
        ControlSettings {
            nudge_step: self.nudge_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!((config.canvas_width, config.canvas_height), (1080, 1080));
        assert_eq!(config.background_color, Color::WHITE);
        assert!(config.history_limit.is_none());
        assert_eq!(config.text_defaults.style(), TextStyle::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EditorConfig::from_json(
            r#"{"canvas_width": 1920, "history_limit": 50, "text_defaults": {"font_size": 32}}"#,
        )
        .expect("valid config");
        assert_eq!(config.canvas_width, 1920);
        assert_eq!(config.canvas_height, 1080);
        assert_eq!(config.history_limit, Some(50));
        assert!((config.text_defaults.font_size - 32.0).abs() < f32::EPSILON);
        assert_eq!(config.text_defaults.font, "sans-serif");
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"canvas_height": 0}"#),
            Err(EditError::InvalidCanvasSize { .. })
        ));
        assert!(EditorConfig::from_json(r#"{"history_limit": 0}"#).is_err());
        assert!(EditorConfig::from_json(r#"{"nudge_step": -1}"#).is_err());
        assert!(matches!(
            EditorConfig::from_json("{not json"),
            Err(EditError::Serialization(_))
        ));
    }
}
