//! Colors, gradients and the built-in swatch palette.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};

/// A packed RGBA color (`0xRRGGBBAA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    /// Opaque red.
    pub const RED: Self = Self::rgb(0xFF, 0x00, 0x00);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0x00, 0xFF, 0x00);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0x00, 0x00, 0xFF);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::rgb(0xFF, 0xFF, 0x00);
    /// Opaque cyan.
    pub const CYAN: Self = Self::rgb(0x00, 0xFF, 0xFF);
    /// Opaque magenta.
    pub const MAGENTA: Self = Self::rgb(0xFF, 0x00, 0xFF);

    /// Build a color from its four channels.
    #[must_use]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    /// Build an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 0xFF)
    }

    /// Wrap an already packed `0xRRGGBBAA` value.
    #[must_use]
    pub const fn from_packed(rgba: u32) -> Self {
        Self(rgba)
    }

    /// The packed `0xRRGGBBAA` value.
    #[must_use]
    pub const fn packed(self) -> u32 {
        self.0
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        self.0 as u8
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0xFFFF_FF00) | alpha as u32)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] for any other shape.
    pub fn parse_hex(input: &str) -> EditResult<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EditError::invalid("color", format!("not a hex color: {input}")));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|e| EditError::invalid("color", format!("{input}: {e}")))?;
        match digits.len() {
            6 => Ok(Self((value << 8) | 0xFF)),
            8 => Ok(Self(value)),
            _ => Err(EditError::invalid(
                "color",
                format!("expected 6 or 8 hex digits, got {input}"),
            )),
        }
    }

    /// Format as `#RRGGBBAA`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:08X}", self.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = EditError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Direction a gradient runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    /// From the top edge to the bottom edge.
    TopToBottom,
    /// From the left edge to the right edge.
    #[default]
    LeftToRight,
    /// Diagonal, top-left corner to bottom-right corner.
    TopLeftToBottomRight,
    /// Diagonal, bottom-left corner to top-right corner.
    BottomLeftToTopRight,
}

/// A linear gradient through two or more colors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gradient {
    colors: Vec<Color>,
    #[serde(default)]
    direction: GradientDirection,
}

impl Gradient {
    /// Create a gradient through `colors` in order.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if fewer than two colors are given.
    pub fn new(colors: Vec<Color>, direction: GradientDirection) -> EditResult<Self> {
        let gradient = Self { colors, direction };
        gradient.validate()?;
        Ok(gradient)
    }

    /// Two-stop left-to-right gradient.
    #[must_use]
    pub fn linear(start: Color, end: Color) -> Self {
        Self {
            colors: vec![start, end],
            direction: GradientDirection::LeftToRight,
        }
    }

    /// Check the stop count.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidProperty`] if fewer than two colors are present.
    pub fn validate(&self) -> EditResult<()> {
        if self.colors.len() < 2 {
            return Err(EditError::invalid(
                "gradient",
                format!("needs at least 2 colors, got {}", self.colors.len()),
            ));
        }
        Ok(())
    }

    /// All color stops in order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Gradient direction.
    #[must_use]
    pub const fn direction(&self) -> GradientDirection {
        self.direction
    }

    /// First color stop.
    #[must_use]
    pub fn start_color(&self) -> Color {
        self.colors.first().copied().unwrap_or(Color::BLACK)
    }

    /// Last color stop.
    #[must_use]
    pub fn end_color(&self) -> Color {
        self.colors.last().copied().unwrap_or_else(|| self.start_color())
    }
}

/// A named two-stop gradient offered in the gradient picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientPreset {
    /// Display name.
    pub name: &'static str,
    /// Start color.
    pub start: Color,
    /// End color.
    pub end: Color,
}

impl GradientPreset {
    /// Materialize the preset as a left-to-right gradient.
    #[must_use]
    pub fn gradient(&self) -> Gradient {
        Gradient::linear(self.start, self.end)
    }
}

/// Swatches shown in every solid-color row, in display order.
pub const SWATCHES: [Color; 16] = [
    Color::rgb(0x79, 0x55, 0x48), // brown
    Color::rgb(0xFF, 0x57, 0x22), // deep orange
    Color::rgb(0x9C, 0x27, 0xB0), // purple
    Color::rgb(0x3F, 0x51, 0xB5), // indigo
    Color::rgb(0x00, 0xBC, 0xD4), // cyan
    Color::rgb(0x4C, 0xAF, 0x50), // green
    Color::rgb(0xFF, 0xEB, 0x3B), // yellow
    Color::rgb(0xFF, 0x98, 0x00), // orange
    Color::BLACK,
    Color::WHITE,
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::CYAN,
    Color::MAGENTA,
];

/// Gradients shown in every gradient row, in display order.
pub const GRADIENT_PRESETS: [GradientPreset; 6] = [
    GradientPreset {
        name: "Purple Dream",
        start: Color::rgb(0x66, 0x7E, 0xEA),
        end: Color::rgb(0x76, 0x4B, 0xA2),
    },
    GradientPreset {
        name: "Pink Sunset",
        start: Color::rgb(0xF0, 0x93, 0xFB),
        end: Color::rgb(0xF5, 0x57, 0x6C),
    },
    GradientPreset {
        name: "Ocean Blue",
        start: Color::rgb(0x4F, 0xAC, 0xFE),
        end: Color::rgb(0x00, 0xF2, 0xFE),
    },
    GradientPreset {
        name: "Fresh Mint",
        start: Color::rgb(0x43, 0xE9, 0x7B),
        end: Color::rgb(0x38, 0xF9, 0xD7),
    },
    GradientPreset {
        name: "Warm Flame",
        start: Color::rgb(0xFA, 0x70, 0x9A),
        end: Color::rgb(0xFE, 0xE1, 0x40),
    },
    GradientPreset {
        name: "Deep Sea",
        start: Color::rgb(0x30, 0xCF, 0xD0),
        end: Color::rgb(0x33, 0x08, 0x67),
    },
];
