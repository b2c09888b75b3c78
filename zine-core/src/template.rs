//! Layout templates: named, reusable slot/text arrangements used to seed pages.

use serde::{Deserialize, Serialize};

use crate::error::TemplateValidationError;
use crate::style::TextStyle;

/// Fixed set of catalog categories.
///
/// A closed enum: templates carrying a category outside this set are rejected
/// when parsed or registered instead of being silently dropped from browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutCategory {
    /// Plain full/split page layouts.
    Basic,
    /// Cover page layouts.
    Cover,
    /// Editorial spreads.
    Editorial,
    /// Regular grids.
    Grid,
    /// Image and text combinations.
    Combined,
    /// User-defined layouts.
    Custom,
}

/// All categories in display order.
pub const ALL_CATEGORIES: [LayoutCategory; 6] = [
    LayoutCategory::Basic,
    LayoutCategory::Cover,
    LayoutCategory::Editorial,
    LayoutCategory::Grid,
    LayoutCategory::Combined,
    LayoutCategory::Custom,
];

impl LayoutCategory {
    /// Human-readable category name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Cover => "Cover Page",
            Self::Editorial => "Editorial",
            Self::Grid => "Grid",
            Self::Combined => "Image + Text",
            Self::Custom => "Custom",
        }
    }

    /// Icon shown next to the category in pickers.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Basic | Self::Cover => "\u{1f4c4}",
            Self::Editorial => "\u{1f4f0}",
            Self::Grid => "\u{2b1c}",
            Self::Combined => "\u{1f5bc}\u{fe0f}",
            Self::Custom => "\u{2b50}",
        }
    }
}

/// A slot rectangle inside a template definition.
///
/// `slot_type` stays a free-form string here: template definitions are
/// untrusted input and its presence is checked by [`LayoutTemplate::validate`]
/// rather than at parse time, so one pass can report every problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSpec {
    /// Left edge, percent.
    pub x: f32,
    /// Top edge, percent.
    pub y: f32,
    /// Width, percent.
    pub width: f32,
    /// Height, percent.
    pub height: f32,
    /// Declared slot type; required.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub slot_type: Option<String>,
    /// Paint order override; defaults to the slot's position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Optional solid background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl SlotSpec {
    /// An image slot covering the given percentage rectangle.
    #[must_use]
    pub fn image(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            slot_type: Some("image".to_string()),
            z_index: None,
            background_color: None,
        }
    }
}

/// A text element inside a template definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElementSpec {
    /// Template-scoped element id, e.g. `title`.
    pub id: String,
    /// Left edge, percent.
    pub x: f32,
    /// Top edge, percent.
    pub y: f32,
    /// Width, percent.
    pub width: f32,
    /// Height, percent.
    pub height: f32,
    /// Paint order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Initial content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Initial style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

/// Aspect-ratio compatibility constraint.
///
/// A template with no constraint is compatible with every page shape; bounds
/// are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatioRange {
    /// Minimum width/height ratio, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f32>,
    /// Maximum width/height ratio, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f32>,
}

impl AspectRatioRange {
    /// Whether the given ratio falls inside this range.
    #[must_use]
    pub fn matches(&self, ratio: f32) -> bool {
        if let Some(min) = self.min {
            if ratio < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if ratio > max {
                return false;
            }
        }
        true
    }
}

/// A named, reusable page layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTemplate {
    /// Unique template id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display icon.
    pub icon: String,
    /// Catalog category.
    pub category: LayoutCategory,
    /// Slot rectangles.
    pub slots: Vec<SlotSpec>,
    /// Seed text elements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_elements: Vec<TextElementSpec>,
    /// Aspect-ratio compatibility constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatioRange>,
}

impl LayoutTemplate {
    /// Validate the template, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateValidationError`] listing all problems found; a
    /// malformed template produces the complete error set in one call.
    pub fn validate(&self) -> Result<(), TemplateValidationError> {
        let mut errors = Vec::new();

        if self.id.is_empty() {
            errors.push("Layout must have an id".to_string());
        }
        if self.name.is_empty() {
            errors.push("Layout must have a name".to_string());
        }
        if self.icon.is_empty() {
            errors.push("Layout must have an icon".to_string());
        }
        if self.slots.is_empty() {
            errors.push("Layout must have at least one slot".to_string());
        }

        for (index, slot) in self.slots.iter().enumerate() {
            if !(0.0..=100.0).contains(&slot.x) {
                errors.push(format!("Slot {index}: x must be between 0 and 100"));
            }
            if !(0.0..=100.0).contains(&slot.y) {
                errors.push(format!("Slot {index}: y must be between 0 and 100"));
            }
            if !(slot.width > 0.0 && slot.width <= 100.0) {
                errors.push(format!("Slot {index}: width must be between 0 and 100"));
            }
            if !(slot.height > 0.0 && slot.height <= 100.0) {
                errors.push(format!("Slot {index}: height must be between 0 and 100"));
            }
            if slot.slot_type.as_deref().is_none_or(str::is_empty) {
                errors.push(format!("Slot {index}: type is required"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(TemplateValidationError::new(errors))
        }
    }
}
