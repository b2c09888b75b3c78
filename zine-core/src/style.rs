//! Text styling: style records, partial updates, and named presets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align to the left edge.
    Left,
    /// Center horizontally.
    Center,
    /// Align to the right edge.
    Right,
    /// Justify both edges.
    Justify,
}

/// Style record for a text element or a text slot.
///
/// Defaults: Inter, 16px, weight 400, line height 1.5, left-aligned, black on
/// transparent, 10px padding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font family name.
    #[serde(default = "TextStyle::default_font_family")]
    pub font_family: String,
    /// Font size in pixels.
    #[serde(default = "TextStyle::default_font_size")]
    pub font_size: f32,
    /// CSS font weight (100-900).
    #[serde(default = "TextStyle::default_font_weight")]
    pub font_weight: u16,
    /// Line height multiplier.
    #[serde(default = "TextStyle::default_line_height")]
    pub line_height: f32,
    /// Horizontal alignment.
    #[serde(default = "TextStyle::default_text_align")]
    pub text_align: TextAlign,
    /// Text color as a CSS color string.
    #[serde(default = "TextStyle::default_color")]
    pub color: String,
    /// Background color as a CSS color string.
    #[serde(default = "TextStyle::default_background_color")]
    pub background_color: String,
    /// Inner padding in pixels.
    #[serde(default = "TextStyle::default_padding")]
    pub padding: f32,
}

impl TextStyle {
    fn default_font_family() -> String {
        "Inter".to_string()
    }

    const fn default_font_size() -> f32 {
        16.0
    }

    const fn default_font_weight() -> u16 {
        400
    }

    const fn default_line_height() -> f32 {
        1.5
    }

    const fn default_text_align() -> TextAlign {
        TextAlign::Left
    }

    fn default_color() -> String {
        "#000000".to_string()
    }

    fn default_background_color() -> String {
        "transparent".to_string()
    }

    const fn default_padding() -> f32 {
        10.0
    }

    /// Apply a partial update, replacing only the fields the patch carries.
    pub fn apply(&mut self, patch: &TextStylePatch) {
        if let Some(ref font_family) = patch.font_family {
            self.font_family = font_family.clone();
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(font_weight) = patch.font_weight {
            self.font_weight = font_weight;
        }
        if let Some(line_height) = patch.line_height {
            self.line_height = line_height;
        }
        if let Some(text_align) = patch.text_align {
            self.text_align = text_align;
        }
        if let Some(ref color) = patch.color {
            self.color = color.clone();
        }
        if let Some(ref background_color) = patch.background_color {
            self.background_color = background_color.clone();
        }
        if let Some(padding) = patch.padding {
            self.padding = padding;
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: Self::default_font_family(),
            font_size: Self::default_font_size(),
            font_weight: Self::default_font_weight(),
            line_height: Self::default_line_height(),
            text_align: Self::default_text_align(),
            color: Self::default_color(),
            background_color: Self::default_background_color(),
            padding: Self::default_padding(),
        }
    }
}

/// Partial [`TextStyle`] update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStylePatch {
    /// New font family, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// New font size, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// New font weight, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    /// New line height, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    /// New alignment, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// New text color, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// New background color, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// New padding, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
}

/// Named text style presets for quick slot typography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextPreset {
    /// Large centered text filling the box.
    FillBox,
    /// Section heading.
    Heading,
    /// Body copy.
    Body,
    /// Pull quote.
    Quote,
    /// Oversized editorial headline.
    EditorialHero,
    /// Huge standalone numeral.
    BoldNumber,
    /// Small muted caption.
    MinimalCaption,
    /// Centered impact statement.
    ImpactStatement,
    /// Small sidebar label.
    SidebarLabel,
    /// Magazine masthead title.
    MagazineTitle,
}

/// The concrete style values a preset applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Font weight.
    pub font_weight: u16,
    /// Alignment.
    pub text_align: TextAlign,
    /// Padding in pixels.
    pub padding: f32,
    /// Line height multiplier.
    pub line_height: f32,
    /// Text color override, when the preset sets one.
    pub color: Option<&'static str>,
}

impl TextPreset {
    /// The style values this preset applies.
    #[must_use]
    pub const fn style(self) -> PresetStyle {
        match self {
            Self::FillBox => PresetStyle {
                font_size: 48.0,
                font_weight: 700,
                text_align: TextAlign::Center,
                padding: 40.0,
                line_height: 1.2,
                color: None,
            },
            Self::Heading => PresetStyle {
                font_size: 32.0,
                font_weight: 700,
                text_align: TextAlign::Left,
                padding: 20.0,
                line_height: 1.3,
                color: None,
            },
            Self::Body => PresetStyle {
                font_size: 16.0,
                font_weight: 400,
                text_align: TextAlign::Left,
                padding: 20.0,
                line_height: 1.6,
                color: None,
            },
            Self::Quote => PresetStyle {
                font_size: 24.0,
                font_weight: 500,
                text_align: TextAlign::Center,
                padding: 40.0,
                line_height: 1.5,
                color: None,
            },
            Self::EditorialHero => PresetStyle {
                font_size: 72.0,
                font_weight: 900,
                text_align: TextAlign::Left,
                padding: 30.0,
                line_height: 0.9,
                color: Some("#000000"),
            },
            Self::BoldNumber => PresetStyle {
                font_size: 120.0,
                font_weight: 900,
                text_align: TextAlign::Center,
                padding: 20.0,
                line_height: 0.8,
                color: Some("#000000"),
            },
            Self::MinimalCaption => PresetStyle {
                font_size: 12.0,
                font_weight: 400,
                text_align: TextAlign::Left,
                padding: 15.0,
                line_height: 1.8,
                color: Some("#666666"),
            },
            Self::ImpactStatement => PresetStyle {
                font_size: 56.0,
                font_weight: 700,
                text_align: TextAlign::Center,
                padding: 50.0,
                line_height: 1.1,
                color: Some("#000000"),
            },
            Self::SidebarLabel => PresetStyle {
                font_size: 14.0,
                font_weight: 600,
                text_align: TextAlign::Left,
                padding: 20.0,
                line_height: 1.4,
                color: Some("#000000"),
            },
            Self::MagazineTitle => PresetStyle {
                font_size: 64.0,
                font_weight: 900,
                text_align: TextAlign::Left,
                padding: 25.0,
                line_height: 0.95,
                color: Some("#000000"),
            },
        }
    }
}

impl FromStr for TextPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fill-box" => Ok(Self::FillBox),
            "heading" => Ok(Self::Heading),
            "body" => Ok(Self::Body),
            "quote" => Ok(Self::Quote),
            "editorial-hero" => Ok(Self::EditorialHero),
            "bold-number" => Ok(Self::BoldNumber),
            "minimal-caption" => Ok(Self::MinimalCaption),
            "impact-statement" => Ok(Self::ImpactStatement),
            "sidebar-label" => Ok(Self::SidebarLabel),
            "magazine-title" => Ok(Self::MagazineTitle),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// A preset name that does not match any known preset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown text preset: {0}")]
pub struct UnknownPreset(
    /// The unrecognized preset name.
    pub String,
);
