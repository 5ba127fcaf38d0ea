//! Edit commands: the single protocol through which a canvas changes.
//!
//! Every option-panel control, pointer gesture and scripted edit produces an
//! [`EditCommand`]. Commands are plain data; the dispatcher validates and
//! applies them.

use serde::{Deserialize, Serialize};

use crate::change::Target;
use crate::color::Color;
use crate::element::{
    check_blur, check_scale, AnchorEdge, Crop, Element, ElementId, ElementKind, ImageTint,
    Transform,
};
use crate::error::{EditError, EditResult};
use crate::style::{Border, Fill, Opacity, ScaleMode, Shadow, TextStyle};

/// An atomic description of one mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EditCommand {
    /// Put a new element on top of the canvas.
    AddElement {
        /// The element, with its final id.
        element: Element,
    },
    /// Take an element off the canvas.
    RemoveElement {
        /// Element to remove.
        id: ElementId,
    },
    /// Move an element to another paint-order index.
    ReorderElement {
        /// Element to move.
        id: ElementId,
        /// Target index, clamped to the top.
        index: usize,
    },
    /// Change the canvas dimensions.
    ResizeCanvas {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// Set the frame drawn around the whole canvas.
    SetCanvasBorder {
        /// Frame width in pixels.
        size: f32,
        /// Frame color.
        color: Color,
    },
    /// Replace the background paint.
    SetBackgroundFill {
        /// New paint.
        fill: Fill,
    },
    /// Replace the background border.
    SetBorder {
        /// New border.
        border: Border,
    },
    /// Change the background layer opacity.
    SetBackgroundOpacity {
        /// New opacity.
        opacity: Opacity,
    },
    /// Change how an image background is fitted.
    SetBackgroundScale {
        /// Zoom in percent.
        percent: u32,
        /// Fit mode.
        mode: ScaleMode,
    },
    /// Change the background blur radius.
    SetBackgroundBlur {
        /// Radius in pixels, `0..=25`.
        radius: f32,
    },
    /// Blend a color over the background, or remove the blend.
    SetBackgroundBlend {
        /// Blend color; `None` removes it.
        color: Option<Color>,
    },
    /// Move, resize, rotate or flip an element.
    SetTransform {
        /// Target element.
        id: ElementId,
        /// New transform; the position is clamped into the canvas.
        transform: Transform,
    },
    /// Change an element's opacity.
    SetOpacity {
        /// Target element.
        id: ElementId,
        /// New opacity.
        opacity: Opacity,
    },
    /// Change an element's drop shadow.
    SetShadow {
        /// Target element.
        id: ElementId,
        /// New shadow.
        shadow: Shadow,
    },
    /// Snap an element to one edge of the canvas.
    SetAnchor {
        /// Target element.
        id: ElementId,
        /// Edge to snap to.
        edge: AnchorEdge,
    },
    /// Replace a text element's content.
    SetTextContent {
        /// Target text element.
        id: ElementId,
        /// New content.
        content: String,
    },
    /// Replace a text element's typography.
    SetTextStyle {
        /// Target text element.
        id: ElementId,
        /// New style.
        style: TextStyle,
    },
    /// Replace an image element's source.
    SetImageSource {
        /// Target image element.
        id: ElementId,
        /// New source URI.
        source: String,
    },
    /// Change an image element's color overlay.
    SetImageTint {
        /// Target image element.
        id: ElementId,
        /// New overlay.
        tint: ImageTint,
    },
    /// Change an image element's crop.
    SetCrop {
        /// Target image element.
        id: ElementId,
        /// New crop.
        crop: Crop,
    },
}

impl EditCommand {
    /// Shorthand for a solid background color.
    #[must_use]
    pub const fn set_background_color(color: Color) -> Self {
        Self::SetBackgroundFill {
            fill: Fill::Color(color),
        }
    }

    /// What the command acts on.
    #[must_use]
    pub const fn target(&self) -> Target {
        match self {
            Self::AddElement { element } => Target::Element(element.id()),
            Self::ResizeCanvas { .. } | Self::SetCanvasBorder { .. } => Target::Canvas,
            Self::SetBackgroundFill { .. }
            | Self::SetBorder { .. }
            | Self::SetBackgroundOpacity { .. }
            | Self::SetBackgroundScale { .. }
            | Self::SetBackgroundBlur { .. }
            | Self::SetBackgroundBlend { .. } => Target::Background,
            Self::RemoveElement { id }
            | Self::ReorderElement { id, .. }
            | Self::SetTransform { id, .. }
            | Self::SetOpacity { id, .. }
            | Self::SetShadow { id, .. }
            | Self::SetAnchor { id, .. }
            | Self::SetTextContent { id, .. }
            | Self::SetTextStyle { id, .. }
            | Self::SetImageSource { id, .. }
            | Self::SetImageTint { id, .. }
            | Self::SetCrop { id, .. } => Target::Element(*id),
        }
    }

    /// The element kind the command needs, for commands that only apply to one.
    #[must_use]
    pub const fn required_kind(&self) -> Option<ElementKind> {
        match self {
            Self::SetTextContent { .. } | Self::SetTextStyle { .. } => Some(ElementKind::Text),
            Self::SetImageSource { .. } | Self::SetImageTint { .. } | Self::SetCrop { .. } => {
                Some(ElementKind::Image)
            }
            _ => None,
        }
    }

    /// Short description for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AddElement { .. } => "add element",
            Self::RemoveElement { .. } => "remove element",
            Self::ReorderElement { .. } => "reorder element",
            Self::ResizeCanvas { .. } => "resize canvas",
            Self::SetCanvasBorder { .. } => "set canvas border",
            Self::SetBackgroundFill { .. } => "set background fill",
            Self::SetBorder { .. } => "set border",
            Self::SetBackgroundOpacity { .. } => "set background opacity",
            Self::SetBackgroundScale { .. } => "set background scale",
            Self::SetBackgroundBlur { .. } => "set background blur",
            Self::SetBackgroundBlend { .. } => "set background blend",
            Self::SetTransform { .. } => "set transform",
            Self::SetOpacity { .. } => "set opacity",
            Self::SetShadow { .. } => "set shadow",
            Self::SetAnchor { .. } => "set anchor",
            Self::SetTextContent { .. } => "set text content",
            Self::SetTextStyle { .. } => "set text style",
            Self::SetImageSource { .. } => "set image source",
            Self::SetImageTint { .. } => "set image tint",
            Self::SetCrop { .. } => "set crop",
        }
    }

    /// Check every value the command carries.
    ///
    /// Deserialized commands can hold values no constructor would produce, so
    /// the dispatcher calls this before touching the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] or [`EditError::InvalidCanvasSize`].
    pub fn validate(&self) -> EditResult<()> {
        match self {
            Self::AddElement { element } => element.validate(),
            Self::ResizeCanvas { width, height } => {
                if *width == 0 || *height == 0 {
                    return Err(EditError::InvalidCanvasSize {
                        width: *width,
                        height: *height,
                    });
                }
                Ok(())
            }
            Self::SetCanvasBorder { size, .. } => {
                if !size.is_finite() || *size < 0.0 {
                    return Err(EditError::invalid(
                        "canvas border",
                        format!("size must be >= 0, got {size}"),
                    ));
                }
                Ok(())
            }
            Self::SetBackgroundFill { fill } => fill.validate(),
            Self::SetBorder { border } => border.validate(),
            Self::SetBackgroundScale { percent, .. } => check_scale(*percent),
            Self::SetBackgroundBlur { radius } => check_blur(*radius),
            Self::SetTransform { transform, .. } => transform.validate(),
            Self::SetShadow { shadow, .. } => shadow.validate(),
            Self::SetTextStyle { style, .. } => style.validate(),
            Self::SetImageSource { source, .. } if source.is_empty() => {
                Err(EditError::invalid("image source", "empty source"))
            }
            Self::SetImageTint {
                tint: ImageTint::Gradient(gradient),
                ..
            } => gradient.validate(),
            Self::RemoveElement { .. }
            | Self::ReorderElement { .. }
            | Self::SetBackgroundOpacity { .. }
            | Self::SetBackgroundBlend { .. }
            | Self::SetOpacity { .. }
            | Self::SetAnchor { .. }
            | Self::SetTextContent { .. }
            | Self::SetImageSource { .. }
            | Self::SetImageTint { .. }
            | Self::SetCrop { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_targets() {
        let id = ElementId::new();
        assert_eq!(
            EditCommand::set_background_color(Color::RED).target(),
            Target::Background
        );
        assert_eq!(
            EditCommand::ResizeCanvas {
                width: 10,
                height: 10
            }
            .target(),
            Target::Canvas
        );
        let cmd = EditCommand::SetCrop {
            id,
            crop: Crop::None,
        };
        assert_eq!(cmd.target(), Target::Element(id));
        assert_eq!(cmd.required_kind(), Some(ElementKind::Image));
        assert_eq!(cmd.label(), "set crop");
    }

    #[test]
    fn test_command_validation() {
        assert!(EditCommand::SetBackgroundBlur { radius: 26.0 }.validate().is_err());
        assert!(EditCommand::SetBackgroundBlur { radius: 25.0 }.validate().is_ok());
        assert!(matches!(
            EditCommand::ResizeCanvas {
                width: 0,
                height: 5
            }
            .validate(),
            Err(EditError::InvalidCanvasSize { .. })
        ));
        assert!(EditCommand::SetImageSource {
            id: ElementId::new(),
            source: String::new()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_command_deserialization_rejects_bad_opacity() {
        let id = ElementId::new();
        let json = format!(r#"{{"type":"set_opacity","data":{{"id":"{id}","opacity":150}}}}"#);
        assert!(serde_json::from_str::<EditCommand>(&json).is_err());

        let json = format!(r#"{{"type":"set_opacity","data":{{"id":"{id}","opacity":40}}}}"#);
        let cmd: EditCommand = serde_json::from_str(&json).expect("valid command");
        assert_eq!(cmd.target(), Target::Element(id));
    }

    #[test]
    fn test_deserialized_border_is_revalidated() {
        let json = r#"{"type":"set_border","data":{"border":{
            "paint":{"type":"off"},"size":-3.0,"opacity":100
        }}}"#;
        let cmd: EditCommand = serde_json::from_str(json).expect("parses");
        assert!(cmd.validate().is_err());
    }
}
