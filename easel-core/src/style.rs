//! Visual property values: opacity, fills, borders, shadows and text style.
//!
//! Every value with a range invariant validates on construction. Values
//! that arrive through deserialization are re-checked by the dispatcher via
//! their `validate` methods before they can reach a canvas.

use serde::{Deserialize, Serialize};

use crate::color::{Color, Gradient};
use crate::error::{EditError, EditResult};
use crate::texture::TextureReference;

/// Largest blur radius the background layer accepts.
pub const MAX_BACKGROUND_BLUR: f32 = 25.0;

fn check_non_negative(property: &'static str, value: f32) -> EditResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EditError::invalid(
            property,
            format!("must be a finite value >= 0, got {value}"),
        ));
    }
    Ok(())
}

/// Opacity as a whole percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Opacity(u8);

impl Opacity {
    /// Fully opaque.
    pub const OPAQUE: Self = Self(100);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self(0);

    /// Create an opacity from a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if `percent > 100`.
    pub fn new(percent: u8) -> EditResult<Self> {
        if percent > 100 {
            return Err(EditError::invalid(
                "opacity",
                format!("must be within 0..=100, got {percent}"),
            ));
        }
        Ok(Self(percent))
    }

    /// Create an opacity from a slider value, rounding to the nearest percent.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if the value is outside `[0, 100]`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_slider(value: f32) -> EditResult<Self> {
        if !(0.0..=100.0).contains(&value) {
            return Err(EditError::invalid(
                "opacity",
                format!("must be within 0..=100, got {value}"),
            ));
        }
        Ok(Self(value.round() as u8))
    }

    /// The percentage.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// The opacity as a `0.0..=1.0` fraction.
    #[must_use]
    pub fn as_fraction(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self::OPAQUE
    }
}

impl TryFrom<u8> for Opacity {
    type Error = EditError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Opacity> for u8 {
    fn from(opacity: Opacity) -> Self {
        opacity.0
    }
}

/// A compass direction, used for shadow angles and nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the top edge.
    Up,
    /// Towards the bottom edge.
    Down,
    /// Towards the left edge.
    Left,
    /// Towards the right edge.
    Right,
}

impl Direction {
    /// All directions in button order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit offset in screen coordinates (y grows downwards).
    #[must_use]
    pub const fn offset(self) -> (f32, f32) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// How a border is painted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum BorderPaint {
    /// No border is drawn.
    #[default]
    Off,
    /// Single color.
    Solid(Color),
    /// Gradient stroke.
    Gradient(Gradient),
    /// Textured stroke.
    Texture(TextureReference),
}

/// A border around the background layer.
///
/// The size and opacity are kept while the paint is [`BorderPaint::Off`] so
/// re-enabling the border restores the previous stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    paint: BorderPaint,
    size: f32,
    opacity: Opacity,
}

impl Border {
    /// Stroke width the border starts with.
    pub const DEFAULT_SIZE: f32 = 5.0;

    fn build(paint: BorderPaint, size: f32, opacity: u8) -> EditResult<Self> {
        let border = Self {
            paint,
            size,
            opacity: Opacity::new(opacity)?,
        };
        border.validate()?;
        Ok(border)
    }

    /// A disabled border with default stroke settings.
    #[must_use]
    pub fn off() -> Self {
        Self {
            paint: BorderPaint::Off,
            size: Self::DEFAULT_SIZE,
            opacity: Opacity::OPAQUE,
        }
    }

    /// Solid border.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if `size` is negative or
    /// `opacity > 100`.
    pub fn solid(color: Color, size: f32, opacity: u8) -> EditResult<Self> {
        Self::build(BorderPaint::Solid(color), size, opacity)
    }

    /// Gradient border.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] on a bad size, opacity or gradient.
    pub fn gradient(gradient: Gradient, size: f32, opacity: u8) -> EditResult<Self> {
        Self::build(BorderPaint::Gradient(gradient), size, opacity)
    }

    /// Textured border.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] on a bad size, opacity or texture.
    pub fn texture(texture: TextureReference, size: f32, opacity: u8) -> EditResult<Self> {
        Self::build(BorderPaint::Texture(texture), size, opacity)
    }

    /// Check size and paint.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if any part is out of range.
    pub fn validate(&self) -> EditResult<()> {
        check_non_negative("border size", self.size)?;
        match &self.paint {
            BorderPaint::Off | BorderPaint::Solid(_) => Ok(()),
            BorderPaint::Gradient(gradient) => gradient.validate(),
            BorderPaint::Texture(texture) => texture.validate(),
        }
    }

    /// How the border is painted.
    #[must_use]
    pub const fn paint(&self) -> &BorderPaint {
        &self.paint
    }

    /// Stroke width in pixels.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Stroke opacity.
    #[must_use]
    pub const fn opacity(&self) -> Opacity {
        self.opacity
    }

    /// Whether a stroke is drawn.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        !matches!(self.paint, BorderPaint::Off)
    }

    /// Same stroke with a different paint.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if the new paint is invalid.
    pub fn with_paint(&self, paint: BorderPaint) -> EditResult<Self> {
        Self::build(paint, self.size, self.opacity.percent())
    }

    /// Same border with a different stroke width.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if `size` is negative.
    pub fn with_size(&self, size: f32) -> EditResult<Self> {
        Self::build(self.paint.clone(), size, self.opacity.percent())
    }

    /// Same border with a different opacity.
    #[must_use]
    pub fn with_opacity(&self, opacity: Opacity) -> Self {
        Self {
            opacity,
            ..self.clone()
        }
    }

    /// Turn the border off, keeping size and opacity.
    #[must_use]
    pub fn disabled(&self) -> Self {
        Self {
            paint: BorderPaint::Off,
            ..self.clone()
        }
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::off()
    }
}

/// Parameters of an enabled drop shadow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowSpec {
    direction: Direction,
    blur_radius: f32,
    color: Color,
    opacity: Opacity,
}

impl ShadowSpec {
    /// Create shadow parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if the blur is negative or the
    /// opacity exceeds 100.
    pub fn new(
        direction: Direction,
        blur_radius: f32,
        color: Color,
        opacity: u8,
    ) -> EditResult<Self> {
        let spec = Self {
            direction,
            blur_radius,
            color,
            opacity: Opacity::new(opacity)?,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the blur radius.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if the blur is negative.
    pub fn validate(&self) -> EditResult<()> {
        check_non_negative("shadow blur", self.blur_radius)
    }

    /// Direction the shadow falls in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Blur radius in pixels.
    #[must_use]
    pub const fn blur_radius(&self) -> f32 {
        self.blur_radius
    }

    /// Shadow color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Shadow opacity.
    #[must_use]
    pub const fn opacity(&self) -> Opacity {
        self.opacity
    }

    /// Same shadow falling in another direction.
    #[must_use]
    pub const fn with_direction(self, direction: Direction) -> Self {
        Self { direction, ..self }
    }

    /// Same shadow with another blur radius.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if the blur is negative.
    pub fn with_blur(self, blur_radius: f32) -> EditResult<Self> {
        check_non_negative("shadow blur", blur_radius)?;
        Ok(Self {
            blur_radius,
            ..self
        })
    }

    /// Same shadow in another color.
    #[must_use]
    pub const fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    /// Same shadow with another opacity.
    #[must_use]
    pub const fn with_opacity(self, opacity: Opacity) -> Self {
        Self { opacity, ..self }
    }
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self {
            direction: Direction::Down,
            blur_radius: 0.0,
            color: Color::BLACK,
            opacity: Opacity::OPAQUE,
        }
    }
}

/// Drop shadow of a text or image element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Shadow {
    /// No shadow.
    #[default]
    Off,
    /// Shadow drawn with the given parameters.
    On(ShadowSpec),
}

impl Shadow {
    /// The parameters, if the shadow is on.
    #[must_use]
    pub const fn spec(&self) -> Option<&ShadowSpec> {
        match self {
            Self::Off => None,
            Self::On(spec) => Some(spec),
        }
    }

    /// The parameters to edit from: the current ones, or the defaults when off.
    #[must_use]
    pub fn spec_or_default(&self) -> ShadowSpec {
        self.spec().copied().unwrap_or_default()
    }

    /// Check the parameters, if any.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if the blur is negative.
    pub fn validate(&self) -> EditResult<()> {
        self.spec().map_or(Ok(()), ShadowSpec::validate)
    }
}

/// How a background image is fitted into the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Cover the canvas, cropping overflow.
    #[default]
    AspectFill,
    /// Centered at natural size.
    Center,
    /// Aligned to the top edge.
    Top,
    /// Aligned to the bottom edge.
    Bottom,
    /// Aligned to the left edge.
    Left,
    /// Aligned to the right edge.
    Right,
    /// Fit entirely inside the canvas.
    Fit,
}

impl ScaleMode {
    /// All modes in picker order.
    pub const ALL: [Self; 7] = [
        Self::AspectFill,
        Self::Center,
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::Fit,
    ];

    /// Picker label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AspectFill => "Aspect Fill",
            Self::Center => "Center",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Fit => "Fit",
        }
    }
}

/// Paint of the background layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Fill {
    /// Solid color.
    Color(Color),
    /// Gradient.
    Gradient(Gradient),
    /// Stock texture.
    Texture(TextureReference),
    /// User image from the gallery or camera, by source URI.
    Image(String),
}

impl Fill {
    /// Check the carried value.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] on a malformed gradient, texture or
    /// empty image source.
    pub fn validate(&self) -> EditResult<()> {
        match self {
            Self::Color(_) => Ok(()),
            Self::Gradient(gradient) => gradient.validate(),
            Self::Texture(texture) => texture.validate(),
            Self::Image(source) if source.is_empty() => {
                Err(EditError::invalid("fill", "empty image source"))
            }
            Self::Image(_) => Ok(()),
        }
    }

    /// The solid color, if this is a color fill.
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self::Color(Color::WHITE)
    }
}

/// Paint of text glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TextFill {
    /// Solid color.
    Solid(Color),
    /// Gradient across the text box.
    Gradient(Gradient),
    /// Texture clipped to the glyphs.
    Texture(TextureReference),
}

impl Default for TextFill {
    fn default() -> Self {
        Self::Solid(Color::BLACK)
    }
}

/// Horizontal alignment of text lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
    /// Justified.
    Justify,
}

impl TextAlignment {
    /// All alignments in button order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Center, Self::Right, Self::Justify];
}

/// Letter case transform applied when text is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCase {
    /// As typed.
    #[default]
    Normal,
    /// ALL CAPS.
    Uppercase,
    /// all lowercase.
    Lowercase,
    /// First Letter Of Each Word. Words are split on any character that is
    /// not a letter, a digit or an apostrophe.
    Capitalize,
}

impl TextCase {
    /// All cases in button order.
    pub const ALL: [Self; 4] = [Self::Normal, Self::Uppercase, Self::Lowercase, Self::Capitalize];

    /// Transform `text` for display.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Normal => text.to_string(),
            Self::Uppercase => text.to_uppercase(),
            Self::Lowercase => text.to_lowercase(),
            Self::Capitalize => {
                let mut out = String::with_capacity(text.len());
                let mut at_word_start = true;
                for c in text.chars() {
                    if at_word_start && c.is_alphabetic() {
                        out.extend(c.to_uppercase());
                        at_word_start = false;
                    } else {
                        out.push(c);
                        at_word_start = !c.is_alphanumeric() && c != '\'';
                    }
                }
                out
            }
        }
    }
}

/// Typography of a text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct TextStyle {
    /// Font family identifier.
    pub font: String,
    /// Font size in scaled pixels.
    pub size: f32,
    /// Glyph paint.
    pub fill: TextFill,
    /// Line alignment.
    pub alignment: TextAlignment,
    /// Letter case transform.
    pub case: TextCase,
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Underline decoration.
    pub underline: bool,
    /// Extra spacing between letters, in ems.
    pub letter_spacing: f32,
    /// Line height multiplier.
    pub line_spacing: f32,
    /// Arc bend applied to the baseline; 0 is straight.
    pub curve: i32,
    /// Wrap width in pixels; 0 disables wrapping.
    pub paragraph_width: u32,
}

impl TextStyle {
    /// Check size, spacing and fill.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if any field is out of range.
    pub fn validate(&self) -> EditResult<()> {
        if self.font.is_empty() {
            return Err(EditError::invalid("font", "empty font id"));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(EditError::invalid(
                "text size",
                format!("must be > 0, got {}", self.size),
            ));
        }
        if !self.letter_spacing.is_finite() {
            return Err(EditError::invalid("letter spacing", "must be finite"));
        }
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(EditError::invalid(
                "line spacing",
                format!("must be > 0, got {}", self.line_spacing),
            ));
        }
        match &self.fill {
            TextFill::Solid(_) => Ok(()),
            TextFill::Gradient(gradient) => gradient.validate(),
            TextFill::Texture(texture) => texture.validate(),
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "sans-serif".to_string(),
            size: 20.0,
            fill: TextFill::default(),
            alignment: TextAlignment::default(),
            case: TextCase::default(),
            bold: false,
            italic: false,
            underline: false,
            letter_spacing: 0.0,
            line_spacing: 1.0,
            curve: 0,
            paragraph_width: 0,
        }
    }
}
