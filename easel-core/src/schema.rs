//! Exported document handed to renderers and persisted by hosts.
//!
//! A [`CanvasDocument`] lists layers bottom to top with their paint index, so
//! a renderer can draw it without knowing anything about editing.

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::element::{BackgroundLayer, Element};
use crate::error::{EditError, EditResult};

/// Current document format version.
pub const DOCUMENT_VERSION: u32 = 1;

/// One paintable layer above the background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDocument {
    /// Paint index; 0 is drawn first.
    pub z: usize,
    /// The element at this index.
    pub element: Element,
}

/// Canonical, render-ready view of a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Format version.
    #[serde(default = "CanvasDocument::default_version")]
    pub version: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Background layer.
    #[serde(default)]
    pub background: BackgroundLayer,
    /// Frame width around the canvas.
    #[serde(default)]
    pub border_size: f32,
    /// Frame color.
    #[serde(default)]
    pub border_color: Color,
    /// Layers in paint order.
    #[serde(default)]
    pub layers: Vec<LayerDocument>,
}

impl CanvasDocument {
    const fn default_version() -> u32 {
        DOCUMENT_VERSION
    }

    /// Build a document from a canvas.
    #[must_use]
    pub fn from_canvas(canvas: &Canvas) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            width: canvas.width(),
            height: canvas.height(),
            background: canvas.background().clone(),
            border_size: canvas.border_size(),
            border_color: canvas.border_color(),
            layers: canvas
                .elements()
                .iter()
                .enumerate()
                .map(|(z, element)| LayerDocument {
                    z,
                    element: element.clone(),
                })
                .collect(),
        }
    }

    /// Turn the document back into a canvas.
    ///
    /// Layers are ordered by `z`; ties keep document order.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] for an unsupported version, or
    /// any error of [`Canvas::validate`].
    pub fn into_canvas(self) -> EditResult<Canvas> {
        if self.version > DOCUMENT_VERSION {
            return Err(EditError::invalid(
                "document version",
                format!("{} is newer than {DOCUMENT_VERSION}", self.version),
            ));
        }
        let mut layers = self.layers;
        layers.sort_by_key(|layer| layer.z);
        let canvas = Canvas::from_parts(
            self.width,
            self.height,
            self.background,
            layers.into_iter().map(|layer| layer.element).collect(),
            self.border_size,
            self.border_color,
        );
        canvas.validate()?;
        Ok(canvas)
    }

    /// Serialize as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> EditResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document from JSON without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Serialization`] for malformed JSON.
    pub fn from_json(json: &str) -> EditResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&Canvas> for CanvasDocument {
    fn from(canvas: &Canvas) -> Self {
        Self::from_canvas(canvas)
    }
}
