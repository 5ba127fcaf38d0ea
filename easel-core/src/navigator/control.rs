//! Leaf controls: how one panel widget reads and writes one property.

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::change::Target;
use crate::color::{Color, Gradient};
use crate::command::EditCommand;
use crate::element::{
    Anchor, AnchorEdge, AspectRatio, Crop, CropShape, Element, ElementId, ImageElement,
    ImageTint, TextElement, Transform,
};
use crate::error::{EditError, EditResult};
use crate::style::{
    BorderPaint, Direction, Fill, Opacity, ScaleMode, Shadow, ShadowSpec, TextAlignment,
    TextCase, TextFill, TextStyle,
};
use crate::texture::TextureReference;

/// Inclusive range and step of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    /// Smallest value.
    pub min: f32,
    /// Largest value.
    pub max: f32,
    /// Increment between stops.
    pub step: f32,
}

impl SliderRange {
    const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Check that `value` lies within the range.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] for a value outside the range.
    pub fn check(&self, property: &'static str, value: f32) -> EditResult<f32> {
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(EditError::invalid(
                property,
                format!("must be within {}..={}, got {value}", self.min, self.max),
            ));
        }
        Ok(value)
    }

    /// Pull a displayed value into the range.
    #[must_use]
    pub fn fit(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Slider ranges.
pub mod ranges {
    use super::SliderRange;
    use crate::style::MAX_BACKGROUND_BLUR;

    /// Percent opacity.
    pub const OPACITY: SliderRange = SliderRange::new(0.0, 100.0, 1.0);
    /// Background border width.
    pub const BORDER_SIZE: SliderRange = SliderRange::new(0.0, 50.0, 1.0);
    /// Background image zoom in percent.
    pub const SCALE: SliderRange = SliderRange::new(10.0, 300.0, 1.0);
    /// Background blur radius.
    pub const BACKGROUND_BLUR: SliderRange = SliderRange::new(0.0, MAX_BACKGROUND_BLUR, 1.0);
    /// Shadow blur radius.
    pub const SHADOW_BLUR: SliderRange = SliderRange::new(0.0, 50.0, 1.0);
    /// Font size.
    pub const TEXT_SIZE: SliderRange = SliderRange::new(8.0, 200.0, 1.0);
    /// Image width.
    pub const IMAGE_SIZE: SliderRange = SliderRange::new(0.0, 1024.0, 1.0);
    /// Rotation in degrees, for every axis.
    pub const ROTATION: SliderRange = SliderRange::new(-180.0, 180.0, 1.0);
    /// Letter spacing in ems.
    pub const LETTER_SPACING: SliderRange = SliderRange::new(-0.5, 1.0, 0.05);
    /// Line height multiplier.
    pub const LINE_SPACING: SliderRange = SliderRange::new(0.5, 3.0, 0.1);
    /// Baseline curve.
    pub const CURVE: SliderRange = SliderRange::new(-100.0, 100.0, 1.0);
    /// Wrap width.
    pub const PARAGRAPH_WIDTH: SliderRange = SliderRange::new(0.0, 1080.0, 1.0);
}

/// Mirroring axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left-to-right.
    Horizontal,
    /// Mirror top-to-bottom.
    Vertical,
}

/// Rotation axis of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationAxis {
    /// In-plane.
    Z,
    /// Tilt around the horizontal axis.
    X,
    /// Tilt around the vertical axis.
    Y,
}

/// Text style switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleFlag {
    /// Bold weight.
    Bold,
    /// Italic slant.
    Italic,
    /// Underline.
    Underline,
}

/// Tunables that affect what a control emits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    /// Distance moved by one press of a nudge arrow.
    pub nudge_step: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self { nudge_step: 10.0 }
    }
}

/// One user interaction with the active control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ControlInput {
    /// Slider moved.
    Value(f32),
    /// Swatch picked.
    Color(Color),
    /// Gradient picked.
    Gradient(Gradient),
    /// Texture picked.
    Texture(TextureReference),
    /// Image chosen, captured or produced by the eraser.
    Source(String),
    /// Text typed.
    Text(String),
    /// Switch set.
    Toggle(bool),
    /// Arrow pressed.
    Direction(Direction),
    /// Scale type picked.
    ScaleMode(ScaleMode),
    /// Alignment picked.
    Alignment(TextAlignment),
    /// Case picked.
    Case(TextCase),
    /// Crop proportions picked.
    Aspect(AspectRatio),
    /// Crop shape picked.
    Shape(CropShape),
    /// Font picked.
    Font(String),
    /// Position button pressed.
    Anchor(AnchorEdge),
    /// Flip button pressed.
    Flip(FlipAxis),
    /// The control's single button pressed.
    Activate,
    /// Remove or reset the value.
    Clear,
}

impl ControlInput {
    /// Short name used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Color(_) => "color",
            Self::Gradient(_) => "gradient",
            Self::Texture(_) => "texture",
            Self::Source(_) => "source",
            Self::Text(_) => "text",
            Self::Toggle(_) => "toggle",
            Self::Direction(_) => "direction",
            Self::ScaleMode(_) => "scale mode",
            Self::Alignment(_) => "alignment",
            Self::Case(_) => "case",
            Self::Aspect(_) => "aspect",
            Self::Shape(_) => "shape",
            Self::Font(_) => "font",
            Self::Anchor(_) => "anchor",
            Self::Flip(_) => "flip",
            Self::Activate => "activate",
            Self::Clear => "clear",
        }
    }
}

/// State a control displays, read from the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ControlValue {
    /// Slider position.
    Slider {
        /// Current value, fitted into the range.
        value: f32,
        /// Slider range.
        range: SliderRange,
    },
    /// Selected swatch, if the property currently holds a solid color.
    Swatch(Option<Color>),
    /// Selected gradient, if any.
    Gradient(Option<Gradient>),
    /// Selected texture, if any.
    Texture(Option<TextureReference>),
    /// Current image source, if any.
    Source(Option<String>),
    /// Current text.
    Text(String),
    /// Switch state.
    Toggle(bool),
    /// Shadow direction.
    Direction(Direction),
    /// Selected scale type.
    ScaleMode(ScaleMode),
    /// Selected alignment.
    Alignment(TextAlignment),
    /// Selected case.
    Case(TextCase),
    /// Current crop.
    Crop(Crop),
    /// Selected font.
    Font(String),
    /// Current snap position.
    Anchor(Anchor),
    /// Current mirroring.
    Flip {
        /// Mirrored left-to-right.
        horizontal: bool,
        /// Mirrored top-to-bottom.
        vertical: bool,
    },
}

/// Binding of a leaf mode to one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Background solid color.
    BackgroundColor,
    /// Background gradient.
    BackgroundGradient,
    /// Background texture.
    BackgroundTexture,
    /// Background image from the gallery or camera.
    BackgroundImage,
    /// Border on/off.
    BorderOff,
    /// Border width.
    BorderSize,
    /// Border solid color.
    BorderSolid,
    /// Border gradient.
    BorderGradient,
    /// Border texture.
    BorderTexture,
    /// Border opacity.
    BorderOpacity,
    /// Background layer opacity.
    BackgroundOpacity,
    /// Background image zoom.
    BackgroundScaleAmount,
    /// Background scale type.
    BackgroundScaleType,
    /// Background blur.
    BackgroundBlur,
    /// Background blend color.
    BackgroundBlend,
    /// Text content and nudge arrows.
    TextEdit,
    /// Text solid color.
    TextColor,
    /// Text gradient.
    TextGradient,
    /// Text texture.
    TextTexture,
    /// Font size.
    TextSize,
    /// Font family.
    TextFont,
    /// Text alignment.
    TextAlignment,
    /// Text case.
    TextCase,
    /// One text style switch.
    TextFlag(StyleFlag),
    /// Baseline curve.
    TextCurve,
    /// Wrap width.
    TextParagraph,
    /// Line height multiplier.
    TextLineSpacing,
    /// Letter spacing.
    TextLetterSpacing,
    /// Image source replacement or erased result.
    ImageSource,
    /// Image width, keeping the aspect ratio.
    ImageSize,
    /// Crop proportions.
    CropAspect,
    /// Crop shape.
    CropShape,
    /// Image solid tint.
    TintSolid,
    /// Image gradient tint.
    TintGradient,
    /// Shadow on/off.
    ShadowOff,
    /// Shadow direction.
    ShadowAngle,
    /// Shadow blur.
    ShadowBlur,
    /// Shadow color.
    ShadowColor,
    /// Shadow opacity.
    ShadowOpacity,
    /// Snap position.
    Position,
    /// Rotation around one axis.
    Rotation(RotationAxis),
    /// Mirroring.
    Flip,
    /// Element opacity.
    ElementOpacity,
}

impl Control {
    /// Display name used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BackgroundColor => "background color",
            Self::BackgroundGradient => "background gradient",
            Self::BackgroundTexture => "background texture",
            Self::BackgroundImage => "background image",
            Self::BorderOff => "border off",
            Self::BorderSize => "border size",
            Self::BorderSolid => "border color",
            Self::BorderGradient => "border gradient",
            Self::BorderTexture => "border texture",
            Self::BorderOpacity => "border opacity",
            Self::BackgroundOpacity => "background opacity",
            Self::BackgroundScaleAmount => "scale amount",
            Self::BackgroundScaleType => "scale type",
            Self::BackgroundBlur => "background blur",
            Self::BackgroundBlend => "background blend",
            Self::TextEdit => "text edit",
            Self::TextColor => "text color",
            Self::TextGradient => "text gradient",
            Self::TextTexture => "text texture",
            Self::TextSize => "text size",
            Self::TextFont => "font",
            Self::TextAlignment => "alignment",
            Self::TextCase => "case",
            Self::TextFlag(StyleFlag::Bold) => "bold",
            Self::TextFlag(StyleFlag::Italic) => "italic",
            Self::TextFlag(StyleFlag::Underline) => "underline",
            Self::TextCurve => "curve",
            Self::TextParagraph => "auto paragraph",
            Self::TextLineSpacing => "line spacing",
            Self::TextLetterSpacing => "letter spacing",
            Self::ImageSource => "image source",
            Self::ImageSize => "image size",
            Self::CropAspect => "crop aspect",
            Self::CropShape => "crop shape",
            Self::TintSolid => "tint color",
            Self::TintGradient => "tint gradient",
            Self::ShadowOff => "shadow off",
            Self::ShadowAngle => "shadow angle",
            Self::ShadowBlur => "shadow blur",
            Self::ShadowColor => "shadow color",
            Self::ShadowOpacity => "shadow opacity",
            Self::Position => "position",
            Self::Rotation(RotationAxis::Z) => "rotation",
            Self::Rotation(RotationAxis::X) => "rotation x",
            Self::Rotation(RotationAxis::Y) => "rotation y",
            Self::Flip => "flip",
            Self::ElementOpacity => "opacity",
        }
    }

    const fn unsupported(self, input: &ControlInput) -> EditError {
        EditError::UnsupportedInput {
            control: self.name(),
            input: input.kind(),
        }
    }

    /// Read the displayed state from `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] or [`EditError::KindMismatch`]
    /// when `target` no longer matches the canvas.
    #[allow(clippy::too_many_lines, clippy::cast_precision_loss)]
    pub fn read(self, canvas: &Canvas, target: Target) -> EditResult<ControlValue> {
        let background = canvas.background();
        let value = match self {
            Self::BackgroundColor => ControlValue::Swatch(background.fill.color()),
            Self::BackgroundGradient => ControlValue::Gradient(match &background.fill {
                Fill::Gradient(gradient) => Some(gradient.clone()),
                _ => None,
            }),
            Self::BackgroundTexture => ControlValue::Texture(match &background.fill {
                Fill::Texture(texture) => Some(texture.clone()),
                _ => None,
            }),
            Self::BackgroundImage => ControlValue::Source(match &background.fill {
                Fill::Image(source) => Some(source.clone()),
                _ => None,
            }),
            Self::BorderOff => ControlValue::Toggle(background.border.is_on()),
            Self::BorderSize => slider(ranges::BORDER_SIZE, background.border.size()),
            Self::BorderSolid => ControlValue::Swatch(match background.border.paint() {
                BorderPaint::Solid(color) => Some(*color),
                _ => None,
            }),
            Self::BorderGradient => ControlValue::Gradient(match background.border.paint() {
                BorderPaint::Gradient(gradient) => Some(gradient.clone()),
                _ => None,
            }),
            Self::BorderTexture => ControlValue::Texture(match background.border.paint() {
                BorderPaint::Texture(texture) => Some(texture.clone()),
                _ => None,
            }),
            Self::BorderOpacity => opacity_slider(background.border.opacity()),
            Self::BackgroundOpacity => opacity_slider(background.opacity),
            Self::BackgroundScaleAmount => {
                slider(ranges::SCALE, background.scale_percent as f32)
            }
            Self::BackgroundScaleType => ControlValue::ScaleMode(background.scale_mode),
            Self::BackgroundBlur => slider(ranges::BACKGROUND_BLUR, background.blur_radius),
            Self::BackgroundBlend => ControlValue::Swatch(background.blend),
            Self::TextEdit => ControlValue::Text(text(canvas, target)?.content.clone()),
            Self::TextColor => ControlValue::Swatch(match &text(canvas, target)?.style.fill {
                TextFill::Solid(color) => Some(*color),
                _ => None,
            }),
            Self::TextGradient => ControlValue::Gradient(match &text(canvas, target)?.style.fill {
                TextFill::Gradient(gradient) => Some(gradient.clone()),
                _ => None,
            }),
            Self::TextTexture => ControlValue::Texture(match &text(canvas, target)?.style.fill {
                TextFill::Texture(texture) => Some(texture.clone()),
                _ => None,
            }),
            Self::TextSize => slider(ranges::TEXT_SIZE, text(canvas, target)?.style.size),
            Self::TextFont => ControlValue::Font(text(canvas, target)?.style.font.clone()),
            Self::TextAlignment => ControlValue::Alignment(text(canvas, target)?.style.alignment),
            Self::TextCase => ControlValue::Case(text(canvas, target)?.style.case),
            Self::TextFlag(flag) => {
                let style = &text(canvas, target)?.style;
                ControlValue::Toggle(match flag {
                    StyleFlag::Bold => style.bold,
                    StyleFlag::Italic => style.italic,
                    StyleFlag::Underline => style.underline,
                })
            }
            Self::TextCurve => slider(ranges::CURVE, text(canvas, target)?.style.curve as f32),
            Self::TextParagraph => slider(
                ranges::PARAGRAPH_WIDTH,
                text(canvas, target)?.style.paragraph_width as f32,
            ),
            Self::TextLineSpacing => {
                slider(ranges::LINE_SPACING, text(canvas, target)?.style.line_spacing)
            }
            Self::TextLetterSpacing => slider(
                ranges::LETTER_SPACING,
                text(canvas, target)?.style.letter_spacing,
            ),
            Self::ImageSource => {
                ControlValue::Source(Some(image(canvas, target)?.source.clone()))
            }
            Self::ImageSize => slider(ranges::IMAGE_SIZE, image(canvas, target)?.transform.width),
            Self::CropAspect | Self::CropShape => ControlValue::Crop(image(canvas, target)?.crop),
            Self::TintSolid => ControlValue::Swatch(match &image(canvas, target)?.tint {
                ImageTint::Solid(color) => Some(*color),
                _ => None,
            }),
            Self::TintGradient => ControlValue::Gradient(match &image(canvas, target)?.tint {
                ImageTint::Gradient(gradient) => Some(gradient.clone()),
                _ => None,
            }),
            Self::ShadowOff => {
                ControlValue::Toggle(element(canvas, target)?.shadow().spec().is_some())
            }
            Self::ShadowAngle => {
                let spec = element(canvas, target)?.shadow().spec_or_default();
                ControlValue::Direction(spec.direction())
            }
            Self::ShadowBlur => slider(
                ranges::SHADOW_BLUR,
                element(canvas, target)?.shadow().spec_or_default().blur_radius(),
            ),
            Self::ShadowColor => ControlValue::Swatch(
                element(canvas, target)?
                    .shadow()
                    .spec()
                    .map(ShadowSpec::color),
            ),
            Self::ShadowOpacity => {
                opacity_slider(element(canvas, target)?.shadow().spec_or_default().opacity())
            }
            Self::Position => ControlValue::Anchor(element(canvas, target)?.anchor()),
            Self::Rotation(axis) => {
                let transform = element(canvas, target)?.transform();
                slider(ranges::ROTATION, rotation(transform, axis))
            }
            Self::Flip => {
                let transform = element(canvas, target)?.transform();
                ControlValue::Flip {
                    horizontal: transform.flipped_h,
                    vertical: transform.flipped_v,
                }
            }
            Self::ElementOpacity => opacity_slider(element(canvas, target)?.opacity()),
        };
        Ok(value)
    }

    /// Turn one interaction into exactly one command.
    ///
    /// The canvas is only read; the returned command still has to be dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnsupportedInput`] for input this control does not
    /// take, [`EditError::InvalidProperty`] for out-of-range values, and the
    /// lookup errors of [`Control::read`].
    #[allow(clippy::too_many_lines)]
    pub fn emit(
        self,
        canvas: &Canvas,
        target: Target,
        input: ControlInput,
        settings: &ControlSettings,
    ) -> EditResult<EditCommand> {
        let border = &canvas.background().border;
        let command = match (self, input) {
            (Self::BackgroundColor, ControlInput::Color(color)) => {
                EditCommand::set_background_color(color)
            }
            (Self::BackgroundGradient, ControlInput::Gradient(gradient)) => {
                EditCommand::SetBackgroundFill {
                    fill: Fill::Gradient(gradient),
                }
            }
            (Self::BackgroundTexture, ControlInput::Texture(texture)) => {
                EditCommand::SetBackgroundFill {
                    fill: Fill::Texture(texture),
                }
            }
            (Self::BackgroundImage, ControlInput::Source(source)) => {
                EditCommand::SetBackgroundFill {
                    fill: Fill::Image(source),
                }
            }
            (Self::BorderOff, ControlInput::Activate | ControlInput::Toggle(false)) => {
                EditCommand::SetBorder {
                    border: border.disabled(),
                }
            }
            (Self::BorderOff, ControlInput::Toggle(true)) => EditCommand::SetBorder {
                border: if border.is_on() {
                    border.clone()
                } else {
                    border.with_paint(BorderPaint::Solid(Color::BLACK))?
                },
            },
            (Self::BorderSize, ControlInput::Value(value)) => EditCommand::SetBorder {
                border: border.with_size(ranges::BORDER_SIZE.check("border size", value)?)?,
            },
            (Self::BorderSolid, ControlInput::Color(color)) => EditCommand::SetBorder {
                border: border.with_paint(BorderPaint::Solid(color))?,
            },
            (Self::BorderGradient, ControlInput::Gradient(gradient)) => EditCommand::SetBorder {
                border: border.with_paint(BorderPaint::Gradient(gradient))?,
            },
            (Self::BorderTexture, ControlInput::Texture(texture)) => EditCommand::SetBorder {
                border: border.with_paint(BorderPaint::Texture(texture))?,
            },
            (Self::BorderOpacity, ControlInput::Value(value)) => EditCommand::SetBorder {
                border: border.with_opacity(Opacity::from_slider(value)?),
            },
            (Self::BackgroundOpacity, ControlInput::Value(value)) => {
                EditCommand::SetBackgroundOpacity {
                    opacity: Opacity::from_slider(value)?,
                }
            }
            (Self::BackgroundScaleAmount, ControlInput::Value(value)) => {
                EditCommand::SetBackgroundScale {
                    percent: whole(ranges::SCALE.check("background scale", value)?),
                    mode: canvas.background().scale_mode,
                }
            }
            (Self::BackgroundScaleType, ControlInput::ScaleMode(mode)) => {
                EditCommand::SetBackgroundScale {
                    percent: canvas.background().scale_percent,
                    mode,
                }
            }
            (Self::BackgroundBlur, ControlInput::Value(value)) => EditCommand::SetBackgroundBlur {
                radius: ranges::BACKGROUND_BLUR.check("background blur", value)?,
            },
            (Self::BackgroundBlend, ControlInput::Color(color)) => {
                EditCommand::SetBackgroundBlend { color: Some(color) }
            }
            (Self::BackgroundBlend, ControlInput::Clear) => {
                EditCommand::SetBackgroundBlend { color: None }
            }
            (Self::TextEdit, ControlInput::Text(content)) => {
                let id = text(canvas, target)?.id;
                EditCommand::SetTextContent { id, content }
            }
            (Self::TextEdit, ControlInput::Direction(direction)) => {
                let element = text(canvas, target)?;
                let (dx, dy) = direction.offset();
                let t = element.transform;
                EditCommand::SetTransform {
                    id: element.id,
                    transform: t.with_position(
                        t.x + dx * settings.nudge_step,
                        t.y + dy * settings.nudge_step,
                    ),
                }
            }
            (Self::TextColor, ControlInput::Color(color)) => {
                restyle(canvas, target, |s| s.fill = TextFill::Solid(color))?
            }
            (Self::TextGradient, ControlInput::Gradient(gradient)) => {
                restyle(canvas, target, |s| s.fill = TextFill::Gradient(gradient))?
            }
            (Self::TextTexture, ControlInput::Texture(texture)) => {
                restyle(canvas, target, |s| s.fill = TextFill::Texture(texture))?
            }
            (Self::TextSize, ControlInput::Value(value)) => {
                let size = ranges::TEXT_SIZE.check("text size", value)?;
                restyle(canvas, target, |s| s.size = size)?
            }
            (Self::TextFont, ControlInput::Font(font)) => {
                restyle(canvas, target, |s| s.font = font)?
            }
            (Self::TextAlignment, ControlInput::Alignment(alignment)) => {
                restyle(canvas, target, |s| s.alignment = alignment)?
            }
            (Self::TextCase, ControlInput::Case(case)) => {
                restyle(canvas, target, |s| s.case = case)?
            }
            (Self::TextFlag(flag), ControlInput::Toggle(on)) => {
                restyle(canvas, target, |s| *flag_mut(s, flag) = on)?
            }
            (Self::TextFlag(flag), ControlInput::Activate) => restyle(canvas, target, |s| {
                let slot = flag_mut(s, flag);
                *slot = !*slot;
            })?,
            (Self::TextCurve, ControlInput::Value(value)) => {
                let curve = whole_signed(ranges::CURVE.check("curve", value)?);
                restyle(canvas, target, |s| s.curve = curve)?
            }
            (Self::TextCurve, ControlInput::Clear) => restyle(canvas, target, |s| s.curve = 0)?,
            (Self::TextParagraph, ControlInput::Value(value)) => {
                let width = whole(ranges::PARAGRAPH_WIDTH.check("auto paragraph", value)?);
                restyle(canvas, target, |s| s.paragraph_width = width)?
            }
            (Self::TextParagraph, ControlInput::Toggle(false) | ControlInput::Clear) => {
                restyle(canvas, target, |s| s.paragraph_width = 0)?
            }
            (Self::TextLineSpacing, ControlInput::Value(value)) => {
                let spacing = ranges::LINE_SPACING.check("line spacing", value)?;
                restyle(canvas, target, |s| s.line_spacing = spacing)?
            }
            (Self::TextLetterSpacing, ControlInput::Value(value)) => {
                let spacing = ranges::LETTER_SPACING.check("letter spacing", value)?;
                restyle(canvas, target, |s| s.letter_spacing = spacing)?
            }
            (Self::ImageSource, ControlInput::Source(source)) => EditCommand::SetImageSource {
                id: image(canvas, target)?.id,
                source,
            },
            (Self::ImageSize, ControlInput::Value(value)) => {
                let element = image(canvas, target)?;
                let width = ranges::IMAGE_SIZE.check("image size", value)?;
                let t = element.transform;
                let height = if t.width > 0.0 {
                    width * t.height / t.width
                } else {
                    width
                };
                EditCommand::SetTransform {
                    id: element.id,
                    transform: Transform { width, height, ..t },
                }
            }
            (Self::CropAspect, ControlInput::Aspect(aspect)) => EditCommand::SetCrop {
                id: image(canvas, target)?.id,
                crop: Crop::Aspect(aspect),
            },
            (Self::CropShape, ControlInput::Shape(shape)) => EditCommand::SetCrop {
                id: image(canvas, target)?.id,
                crop: Crop::Shape(shape),
            },
            (Self::CropAspect | Self::CropShape, ControlInput::Clear) => EditCommand::SetCrop {
                id: image(canvas, target)?.id,
                crop: Crop::None,
            },
            (Self::TintSolid, ControlInput::Color(color)) => EditCommand::SetImageTint {
                id: image(canvas, target)?.id,
                tint: ImageTint::Solid(color),
            },
            (Self::TintGradient, ControlInput::Gradient(gradient)) => EditCommand::SetImageTint {
                id: image(canvas, target)?.id,
                tint: ImageTint::Gradient(gradient),
            },
            (Self::TintSolid | Self::TintGradient, ControlInput::Clear) => {
                EditCommand::SetImageTint {
                    id: image(canvas, target)?.id,
                    tint: ImageTint::None,
                }
            }
            (Self::ShadowOff, ControlInput::Activate | ControlInput::Toggle(false)) => {
                EditCommand::SetShadow {
                    id: element(canvas, target)?.id(),
                    shadow: Shadow::Off,
                }
            }
            (Self::ShadowOff, ControlInput::Toggle(true)) => {
                reshadow(canvas, target, Ok)?
            }
            (Self::ShadowAngle, ControlInput::Direction(direction)) => {
                reshadow(canvas, target, |spec| Ok(spec.with_direction(direction)))?
            }
            (Self::ShadowBlur, ControlInput::Value(value)) => {
                let blur = ranges::SHADOW_BLUR.check("shadow blur", value)?;
                reshadow(canvas, target, |spec| spec.with_blur(blur))?
            }
            (Self::ShadowColor, ControlInput::Color(color)) => {
                reshadow(canvas, target, |spec| Ok(spec.with_color(color)))?
            }
            (Self::ShadowOpacity, ControlInput::Value(value)) => {
                let opacity = Opacity::from_slider(value)?;
                reshadow(canvas, target, |spec| Ok(spec.with_opacity(opacity)))?
            }
            (Self::Position, ControlInput::Anchor(edge)) => EditCommand::SetAnchor {
                id: element(canvas, target)?.id(),
                edge,
            },
            (Self::Rotation(axis), ControlInput::Value(value)) => {
                let degrees = ranges::ROTATION.check("rotation", value)?;
                retransform(canvas, target, |t| *rotation_mut(t, axis) = degrees)?
            }
            (Self::Rotation(axis), ControlInput::Clear) => {
                retransform(canvas, target, |t| *rotation_mut(t, axis) = 0.0)?
            }
            (Self::Flip, ControlInput::Flip(FlipAxis::Horizontal)) => {
                retransform(canvas, target, |t| t.flipped_h = !t.flipped_h)?
            }
            (Self::Flip, ControlInput::Flip(FlipAxis::Vertical)) => {
                retransform(canvas, target, |t| t.flipped_v = !t.flipped_v)?
            }
            (Self::Flip, ControlInput::Clear) => retransform(canvas, target, |t| {
                t.flipped_h = false;
                t.flipped_v = false;
            })?,
            (Self::ElementOpacity, ControlInput::Value(value)) => EditCommand::SetOpacity {
                id: element(canvas, target)?.id(),
                opacity: Opacity::from_slider(value)?,
            },
            (control, input) => return Err(control.unsupported(&input)),
        };
        Ok(command)
    }
}

fn slider(range: SliderRange, value: f32) -> ControlValue {
    ControlValue::Slider {
        value: range.fit(value),
        range,
    }
}

fn opacity_slider(opacity: Opacity) -> ControlValue {
    slider(ranges::OPACITY, f32::from(opacity.percent()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(value: f32) -> u32 {
    value.max(0.0).round() as u32
}

#[allow(clippy::cast_possible_truncation)]
fn whole_signed(value: f32) -> i32 {
    value.round() as i32
}

const fn rotation(transform: &Transform, axis: RotationAxis) -> f32 {
    match axis {
        RotationAxis::Z => transform.rotation_z,
        RotationAxis::X => transform.rotation_x,
        RotationAxis::Y => transform.rotation_y,
    }
}

fn rotation_mut(transform: &mut Transform, axis: RotationAxis) -> &mut f32 {
    match axis {
        RotationAxis::Z => &mut transform.rotation_z,
        RotationAxis::X => &mut transform.rotation_x,
        RotationAxis::Y => &mut transform.rotation_y,
    }
}

fn flag_mut(style: &mut TextStyle, flag: StyleFlag) -> &mut bool {
    match flag {
        StyleFlag::Bold => &mut style.bold,
        StyleFlag::Italic => &mut style.italic,
        StyleFlag::Underline => &mut style.underline,
    }
}

fn element_id(target: Target) -> EditResult<ElementId> {
    match target {
        Target::Element(id) => Ok(id),
        Target::Canvas | Target::Background => Err(EditError::invalid(
            "target",
            "control needs an element target",
        )),
    }
}

fn element(canvas: &Canvas, target: Target) -> EditResult<&Element> {
    let id = element_id(target)?;
    canvas.element(id).ok_or(EditError::UnknownElement(id))
}

fn text(canvas: &Canvas, target: Target) -> EditResult<&TextElement> {
    let found = element(canvas, target)?;
    found.as_text().ok_or(EditError::KindMismatch {
        id: found.id(),
        expected: crate::element::ElementKind::Text,
        found: found.kind(),
    })
}

fn image(canvas: &Canvas, target: Target) -> EditResult<&ImageElement> {
    let found = element(canvas, target)?;
    found.as_image().ok_or(EditError::KindMismatch {
        id: found.id(),
        expected: crate::element::ElementKind::Image,
        found: found.kind(),
    })
}

fn restyle(
    canvas: &Canvas,
    target: Target,
    edit: impl FnOnce(&mut TextStyle),
) -> EditResult<EditCommand> {
    let element = text(canvas, target)?;
    let mut style = element.style.clone();
    edit(&mut style);
    Ok(EditCommand::SetTextStyle {
        id: element.id,
        style,
    })
}

fn retransform(
    canvas: &Canvas,
    target: Target,
    edit: impl FnOnce(&mut Transform),
) -> EditResult<EditCommand> {
    let element = element(canvas, target)?;
    let mut transform = *element.transform();
    edit(&mut transform);
    Ok(EditCommand::SetTransform {
        id: element.id(),
        transform,
    })
}

/// Edit the shadow, turning it on with default parameters if it was off.
fn reshadow(
    canvas: &Canvas,
    target: Target,
    edit: impl FnOnce(ShadowSpec) -> EditResult<ShadowSpec>,
) -> EditResult<EditCommand> {
    let element = element(canvas, target)?;
    let spec = edit(element.shadow().spec_or_default())?;
    Ok(EditCommand::SetShadow {
        id: element.id(),
        shadow: Shadow::On(spec),
    })
}
