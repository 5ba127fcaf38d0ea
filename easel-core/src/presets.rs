//! Canvas size presets offered by the resize sheet.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Group a preset is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetCategory {
    /// Print paper sizes at 300 dpi.
    Standard,
    /// Plain aspect ratios.
    Basic,
    /// Social network post and header sizes.
    SocialMedia,
}

impl PresetCategory {
    /// All categories in sheet order.
    pub const ALL: [Self; 3] = [Self::Standard, Self::Basic, Self::SocialMedia];

    /// Section heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Basic => "Basic",
            Self::SocialMedia => "Social Media",
        }
    }
}

impl fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CanvasPreset {
    /// Display name.
    pub name: &'static str,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Section it is listed under.
    pub category: PresetCategory,
}

impl CanvasPreset {
    const fn new(name: &'static str, width: u32, height: u32, category: PresetCategory) -> Self {
        Self {
            name,
            width,
            height,
            category,
        }
    }

    /// Subtitle shown under the name, e.g. `"2480 x 3508 px"`.
    #[must_use]
    pub fn dimensions(&self) -> String {
        format!("{} x {} px", self.width, self.height)
    }
}

/// Every preset in sheet order.
pub static PRESETS: [CanvasPreset; 18] = [
    CanvasPreset::new("A4", 2480, 3508, PresetCategory::Standard),
    CanvasPreset::new("A3", 3508, 4961, PresetCategory::Standard),
    CanvasPreset::new("Letter", 2550, 3300, PresetCategory::Standard),
    CanvasPreset::new("Legal", 2550, 4200, PresetCategory::Standard),
    CanvasPreset::new("Square", 1080, 1080, PresetCategory::Basic),
    CanvasPreset::new("Portrait", 1080, 1920, PresetCategory::Basic),
    CanvasPreset::new("Landscape", 1920, 1080, PresetCategory::Basic),
    CanvasPreset::new("4:3", 1600, 1200, PresetCategory::Basic),
    CanvasPreset::new("16:9", 1920, 1080, PresetCategory::Basic),
    CanvasPreset::new("Instagram Post", 1080, 1080, PresetCategory::SocialMedia),
    CanvasPreset::new("Instagram Story", 1080, 1920, PresetCategory::SocialMedia),
    CanvasPreset::new("Facebook Post", 1200, 630, PresetCategory::SocialMedia),
    CanvasPreset::new("Facebook Cover", 820, 312, PresetCategory::SocialMedia),
    CanvasPreset::new("Twitter Post", 1200, 675, PresetCategory::SocialMedia),
    CanvasPreset::new("Twitter Header", 1500, 500, PresetCategory::SocialMedia),
    CanvasPreset::new("LinkedIn Post", 1200, 627, PresetCategory::SocialMedia),
    CanvasPreset::new("YouTube Thumbnail", 1280, 720, PresetCategory::SocialMedia),
    CanvasPreset::new("Pinterest Pin", 1000, 1500, PresetCategory::SocialMedia),
];

/// Presets listed under `category`.
pub fn presets_in(category: PresetCategory) -> impl Iterator<Item = &'static CanvasPreset> {
    PRESETS.iter().filter(move |p| p.category == category)
}

/// Look up a preset by name, ignoring case.
#[must_use]
pub fn find_preset(name: &str) -> Option<&'static CanvasPreset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
