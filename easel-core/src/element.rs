//! Canvas elements - the building blocks of a composition.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::{Color, Gradient};
use crate::error::{EditError, EditResult};
use crate::style::{Border, Fill, Opacity, ScaleMode, Shadow, TextStyle, MAX_BACKGROUND_BLUR};

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse the hyphenated string form.
    ///
    /// # Errors
    ///
    /// Returns the UUID parse error if `input` is not a UUID.
    pub fn parse(input: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(input).map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three kinds of editable objects, each with its own option panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A text element.
    Text,
    /// An image element.
    Image,
    /// The canvas background layer.
    Background,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Background => "background",
        })
    }
}

/// Position, size, rotation and mirroring of an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Transform {
    /// X position (pixels from the canvas's left edge).
    pub x: f32,
    /// Y position (pixels from the canvas's top edge).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// In-plane rotation in degrees.
    #[serde(default)]
    pub rotation_z: f32,
    /// Tilt around the horizontal axis in degrees.
    #[serde(default)]
    pub rotation_x: f32,
    /// Tilt around the vertical axis in degrees.
    #[serde(default)]
    pub rotation_y: f32,
    /// Mirrored left-to-right.
    #[serde(default)]
    pub flipped_h: bool,
    /// Mirrored top-to-bottom.
    #[serde(default)]
    pub flipped_v: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(0.0, 0.0, 100.0, 100.0)
    }
}

impl Transform {
    /// An unrotated, unflipped box.
    #[must_use]
    pub const fn at(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation_z: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            flipped_h: false,
            flipped_v: false,
        }
    }

    /// Same transform moved to `(x, y)`.
    #[must_use]
    pub const fn with_position(self, x: f32, y: f32) -> Self {
        Self { x, y, ..self }
    }

    /// Check that every component is finite and the size is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] otherwise.
    pub fn validate(&self) -> EditResult<()> {
        let components = [
            self.x,
            self.y,
            self.width,
            self.height,
            self.rotation_z,
            self.rotation_x,
            self.rotation_y,
        ];
        if components.iter().any(|v| !v.is_finite()) {
            return Err(EditError::invalid("transform", "components must be finite"));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(EditError::invalid(
                "transform",
                format!("size must be >= 0, got {}x{}", self.width, self.height),
            ));
        }
        Ok(())
    }

    /// Check if a point (in canvas coordinates) is within the unrotated box.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Horizontal snap position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAnchor {
    /// Flush with the left edge.
    Left,
    /// Centered horizontally.
    Center,
    /// Flush with the right edge.
    Right,
}

/// Vertical snap position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAnchor {
    /// Flush with the top edge.
    Top,
    /// Centered vertically.
    Center,
    /// Flush with the bottom edge.
    Bottom,
}

/// Where an element has been snapped to inside the canvas, per axis.
///
/// An axis is cleared when the element is moved along it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    /// Horizontal snap, if any.
    pub horizontal: Option<HorizontalAnchor>,
    /// Vertical snap, if any.
    pub vertical: Option<VerticalAnchor>,
}

/// One of the position buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorEdge {
    /// Snap to the top edge.
    VerticalTop,
    /// Center vertically.
    VerticalCenter,
    /// Snap to the bottom edge.
    VerticalBottom,
    /// Snap to the left edge.
    HorizontalLeft,
    /// Center horizontally.
    HorizontalCenter,
    /// Snap to the right edge.
    HorizontalRight,
}

impl AnchorEdge {
    /// All edges in button order.
    pub const ALL: [Self; 6] = [
        Self::VerticalTop,
        Self::VerticalCenter,
        Self::VerticalBottom,
        Self::HorizontalLeft,
        Self::HorizontalCenter,
        Self::HorizontalRight,
    ];

    /// Record this edge on `anchor`, leaving the other axis alone.
    #[must_use]
    pub const fn apply(self, anchor: Anchor) -> Anchor {
        match self {
            Self::VerticalTop => Anchor {
                vertical: Some(VerticalAnchor::Top),
                ..anchor
            },
            Self::VerticalCenter => Anchor {
                vertical: Some(VerticalAnchor::Center),
                ..anchor
            },
            Self::VerticalBottom => Anchor {
                vertical: Some(VerticalAnchor::Bottom),
                ..anchor
            },
            Self::HorizontalLeft => Anchor {
                horizontal: Some(HorizontalAnchor::Left),
                ..anchor
            },
            Self::HorizontalCenter => Anchor {
                horizontal: Some(HorizontalAnchor::Center),
                ..anchor
            },
            Self::HorizontalRight => Anchor {
                horizontal: Some(HorizontalAnchor::Right),
                ..anchor
            },
        }
    }

    /// Move `transform` to this edge of a `canvas_width` × `canvas_height` canvas.
    #[must_use]
    pub fn resolve(self, transform: Transform, canvas_width: f32, canvas_height: f32) -> Transform {
        let free_x = (canvas_width - transform.width).max(0.0);
        let free_y = (canvas_height - transform.height).max(0.0);
        match self {
            Self::VerticalTop => Transform { y: 0.0, ..transform },
            Self::VerticalCenter => Transform {
                y: free_y / 2.0,
                ..transform
            },
            Self::VerticalBottom => Transform {
                y: free_y,
                ..transform
            },
            Self::HorizontalLeft => Transform { x: 0.0, ..transform },
            Self::HorizontalCenter => Transform {
                x: free_x / 2.0,
                ..transform
            },
            Self::HorizontalRight => Transform {
                x: free_x,
                ..transform
            },
        }
    }
}

/// Color overlay drawn over an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ImageTint {
    /// No overlay.
    #[default]
    None,
    /// Single color overlay.
    Solid(Color),
    /// Gradient overlay.
    Gradient(Gradient),
}

/// Fixed crop proportions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
    /// Free-form crop.
    Free,
    /// 1:1.
    Square,
    /// 4:3 landscape.
    FourThree,
    /// 3:4 portrait.
    ThreeFour,
    /// 16:9 landscape.
    SixteenNine,
    /// 9:16 portrait.
    NineSixteen,
}

impl AspectRatio {
    /// All ratios in picker order.
    pub const ALL: [Self; 6] = [
        Self::Free,
        Self::Square,
        Self::FourThree,
        Self::ThreeFour,
        Self::SixteenNine,
        Self::NineSixteen,
    ];

    /// Width divided by height, `None` for free-form.
    #[must_use]
    pub fn ratio(self) -> Option<f32> {
        match self {
            Self::Free => None,
            Self::Square => Some(1.0),
            Self::FourThree => Some(4.0 / 3.0),
            Self::ThreeFour => Some(3.0 / 4.0),
            Self::SixteenNine => Some(16.0 / 9.0),
            Self::NineSixteen => Some(9.0 / 16.0),
        }
    }
}

/// Mask shapes an image can be cropped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropShape {
    /// Plain rectangle.
    Rectangle,
    /// Rectangle with rounded corners.
    RoundedRectangle,
    /// Circle inscribed in the box.
    Circle,
    /// Heart.
    Heart,
    /// Five-pointed star.
    Star,
}

impl CropShape {
    /// All shapes in picker order.
    pub const ALL: [Self; 5] = [
        Self::Rectangle,
        Self::RoundedRectangle,
        Self::Circle,
        Self::Heart,
        Self::Star,
    ];
}

/// Crop applied to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Crop {
    /// Uncropped.
    #[default]
    None,
    /// Cropped to proportions.
    Aspect(AspectRatio),
    /// Masked to a shape.
    Shape(CropShape),
}

/// A text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// Unique identifier.
    pub id: ElementId,
    /// The text as typed.
    pub content: String,
    /// Typography.
    pub style: TextStyle,
    /// Position and size.
    pub transform: Transform,
    /// Element opacity.
    #[serde(default)]
    pub opacity: Opacity,
    /// Drop shadow.
    #[serde(default)]
    pub shadow: Shadow,
    /// Snap position.
    #[serde(default)]
    pub anchor: Anchor,
}

impl TextElement {
    /// Create a text element with default appearance.
    #[must_use]
    pub fn new(content: impl Into<String>, style: TextStyle, transform: Transform) -> Self {
        Self {
            id: ElementId::new(),
            content: content.into(),
            style,
            transform,
            opacity: Opacity::OPAQUE,
            shadow: Shadow::Off,
            anchor: Anchor::default(),
        }
    }
}

/// An image element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    /// Unique identifier.
    pub id: ElementId,
    /// Image source URI.
    pub source: String,
    /// Position and size.
    pub transform: Transform,
    /// Color overlay.
    #[serde(default)]
    pub tint: ImageTint,
    /// Crop.
    #[serde(default)]
    pub crop: Crop,
    /// Drop shadow.
    #[serde(default)]
    pub shadow: Shadow,
    /// Element opacity.
    #[serde(default)]
    pub opacity: Opacity,
    /// Snap position.
    #[serde(default)]
    pub anchor: Anchor,
}

impl ImageElement {
    /// Create an image element with default appearance.
    #[must_use]
    pub fn new(source: impl Into<String>, transform: Transform) -> Self {
        Self {
            id: ElementId::new(),
            source: source.into(),
            transform,
            tint: ImageTint::None,
            crop: Crop::None,
            shadow: Shadow::Off,
            opacity: Opacity::OPAQUE,
            anchor: Anchor::default(),
        }
    }
}

/// A positionable canvas element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Element {
    /// Text.
    Text(TextElement),
    /// Image.
    Image(ImageElement),
}

impl Element {
    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> ElementId {
        match self {
            Self::Text(text) => text.id,
            Self::Image(image) => image.id,
        }
    }

    /// Which variant this is.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Image(_) => ElementKind::Image,
        }
    }

    /// Position and size.
    #[must_use]
    pub const fn transform(&self) -> &Transform {
        match self {
            Self::Text(text) => &text.transform,
            Self::Image(image) => &image.transform,
        }
    }

    /// Element opacity.
    #[must_use]
    pub const fn opacity(&self) -> Opacity {
        match self {
            Self::Text(text) => text.opacity,
            Self::Image(image) => image.opacity,
        }
    }

    /// Drop shadow.
    #[must_use]
    pub const fn shadow(&self) -> &Shadow {
        match self {
            Self::Text(text) => &text.shadow,
            Self::Image(image) => &image.shadow,
        }
    }

    /// Snap position.
    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        match self {
            Self::Text(text) => text.anchor,
            Self::Image(image) => image.anchor,
        }
    }

    /// The text variant, if this is one.
    #[must_use]
    pub const fn as_text(&self) -> Option<&TextElement> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
        }
    }

    /// The image variant, if this is one.
    #[must_use]
    pub const fn as_image(&self) -> Option<&ImageElement> {
        match self {
            Self::Image(image) => Some(image),
            Self::Text(_) => None,
        }
    }

    /// Check if a point (in canvas coordinates) is within this element.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.transform().contains_point(x, y)
    }

    /// Check every property of the element.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] for the first invalid value found.
    pub fn validate(&self) -> EditResult<()> {
        self.transform().validate()?;
        self.shadow().validate()?;
        match self {
            Self::Text(text) => text.style.validate(),
            Self::Image(image) => {
                if image.source.is_empty() {
                    return Err(EditError::invalid("image source", "empty source"));
                }
                match &image.tint {
                    ImageTint::Gradient(gradient) => gradient.validate(),
                    ImageTint::None | ImageTint::Solid(_) => Ok(()),
                }
            }
        }
    }

    pub(crate) fn transform_mut(&mut self) -> &mut Transform {
        match self {
            Self::Text(text) => &mut text.transform,
            Self::Image(image) => &mut image.transform,
        }
    }

    pub(crate) fn anchor_mut(&mut self) -> &mut Anchor {
        match self {
            Self::Text(text) => &mut text.anchor,
            Self::Image(image) => &mut image.anchor,
        }
    }

    pub(crate) fn set_opacity(&mut self, opacity: Opacity) {
        match self {
            Self::Text(text) => text.opacity = opacity,
            Self::Image(image) => image.opacity = opacity,
        }
    }

    pub(crate) fn set_shadow(&mut self, shadow: Shadow) {
        match self {
            Self::Text(text) => text.shadow = shadow,
            Self::Image(image) => image.shadow = shadow,
        }
    }
}

impl From<TextElement> for Element {
    fn from(text: TextElement) -> Self {
        Self::Text(text)
    }
}

impl From<ImageElement> for Element {
    fn from(image: ImageElement) -> Self {
        Self::Image(image)
    }
}

/// The background layer beneath every element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundLayer {
    /// Paint.
    pub fill: Fill,
    /// Border stroke.
    #[serde(default)]
    pub border: Border,
    /// How an image fill is fitted.
    #[serde(default)]
    pub scale_mode: ScaleMode,
    /// Zoom applied to an image fill, in percent.
    #[serde(default = "BackgroundLayer::default_scale")]
    pub scale_percent: u32,
    /// Gaussian blur radius in pixels.
    #[serde(default)]
    pub blur_radius: f32,
    /// Layer opacity.
    #[serde(default)]
    pub opacity: Opacity,
    /// Color blended over the fill, if any.
    #[serde(default)]
    pub blend: Option<Color>,
}

impl BackgroundLayer {
    const fn default_scale() -> u32 {
        100
    }

    /// A plain background in `color`.
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self {
            fill: Fill::Color(color),
            border: Border::off(),
            scale_mode: ScaleMode::AspectFill,
            scale_percent: Self::default_scale(),
            blur_radius: 0.0,
            opacity: Opacity::OPAQUE,
            blend: None,
        }
    }

    /// Check every property of the layer.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] for the first invalid value found.
    pub fn validate(&self) -> EditResult<()> {
        self.fill.validate()?;
        self.border.validate()?;
        check_blur(self.blur_radius)?;
        check_scale(self.scale_percent)
    }
}

impl Default for BackgroundLayer {
    fn default() -> Self {
        Self::solid(Color::WHITE)
    }
}

pub(crate) fn check_blur(radius: f32) -> EditResult<()> {
    if !radius.is_finite() || !(0.0..=MAX_BACKGROUND_BLUR).contains(&radius) {
        return Err(EditError::invalid(
            "background blur",
            format!("must be within 0..={MAX_BACKGROUND_BLUR}, got {radius}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_scale(percent: u32) -> EditResult<()> {
    if percent == 0 {
        return Err(EditError::invalid("background scale", "must be > 0"));
    }
    Ok(())
}
