//! Project configuration: page size, bleed, margins, binding.

use serde::{Deserialize, Serialize};

use crate::geometry::{to_mm, Unit};

/// Binding gutter width applied to flat-bound exports, in millimeters.
pub const BINDING_GUTTER_MM: f32 = 5.0;

/// How the finished zine is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingType {
    /// Simple folded multi-page booklet.
    Folded,
    /// Flat binding: adds a gutter and mirrors alternating pages for print.
    Flat,
}

impl BindingType {
    /// Lenient parse for imported payloads; anything but `flat` folds.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        if s == "flat" {
            Self::Flat
        } else {
            Self::Folded
        }
    }
}

/// Caller-supplied configuration for initializing a project.
///
/// Optional fields resolve to defaults: per-side bleeds fall back to the
/// shared `bleed` scalar, margins to zero, binding to folded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInput {
    /// Page width in `unit`.
    pub width: f32,
    /// Page height in `unit`.
    pub height: f32,
    /// Unit for width/height.
    pub unit: Option<Unit>,
    /// Shared bleed scalar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bleed: Option<f32>,
    /// Top bleed override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bleed_top: Option<f32>,
    /// Right bleed override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bleed_right: Option<f32>,
    /// Bottom bleed override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bleed_bottom: Option<f32>,
    /// Left bleed override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bleed_left: Option<f32>,
    /// Page margin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<f32>,
    /// Default inner margin for slots, percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_inner_margin_percent: Option<f32>,
    /// Binding type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_type: Option<BindingType>,
}

/// Resolved project configuration.
///
/// Immutable until the project is reinitialized. Width and height are
/// positive; bleed values are non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Page width in `unit`.
    pub width: f32,
    /// Page height in `unit`.
    pub height: f32,
    /// Unit for width/height.
    pub unit: Unit,
    /// Shared bleed scalar the per-side values defaulted from.
    pub bleed: f32,
    /// Top bleed.
    pub bleed_top: f32,
    /// Right bleed.
    pub bleed_right: f32,
    /// Bottom bleed.
    pub bleed_bottom: f32,
    /// Left bleed.
    pub bleed_left: f32,
    /// Page margin.
    pub margin: f32,
    /// Default inner margin for slots, percent.
    pub slot_inner_margin_percent: f32,
    /// Binding type.
    pub binding_type: BindingType,
}

impl ProjectConfig {
    /// Resolve a caller-supplied input into a full configuration.
    ///
    /// Per-side bleeds default to the shared `bleed` scalar; negative bleed
    /// values are floored at zero.
    #[must_use]
    pub fn from_input(input: &ConfigInput) -> Self {
        let bleed = input.bleed.unwrap_or(0.0).max(0.0);
        Self {
            width: input.width,
            height: input.height,
            unit: input.unit.unwrap_or(Unit::Mm),
            bleed,
            bleed_top: input.bleed_top.unwrap_or(bleed).max(0.0),
            bleed_right: input.bleed_right.unwrap_or(bleed).max(0.0),
            bleed_bottom: input.bleed_bottom.unwrap_or(bleed).max(0.0),
            bleed_left: input.bleed_left.unwrap_or(bleed).max(0.0),
            margin: input.margin.unwrap_or(0.0),
            slot_inner_margin_percent: input.slot_inner_margin_percent.unwrap_or(0.0),
            binding_type: input.binding_type.unwrap_or(BindingType::Folded),
        }
    }

    /// Trim size of an exported page in millimeters.
    #[must_use]
    pub fn export_size_mm(&self) -> (f32, f32) {
        (to_mm(self.width, self.unit), to_mm(self.height, self.unit))
    }

    /// Binding geometry for the page at `page_index` (document order).
    ///
    /// Flat binding reserves a gutter on the inner edge and mirrors
    /// odd-indexed pages so facing pages line up in print.
    #[must_use]
    pub fn page_binding(&self, page_index: usize) -> PageBinding {
        match self.binding_type {
            BindingType::Folded => PageBinding {
                gutter_mm: 0.0,
                mirrored: false,
            },
            BindingType::Flat => PageBinding {
                gutter_mm: BINDING_GUTTER_MM,
                mirrored: page_index % 2 == 1,
            },
        }
    }
}

/// Per-page binding geometry for export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBinding {
    /// Gutter width reserved on the inner edge, millimeters.
    pub gutter_mm: f32,
    /// Whether the gutter sits on the opposite edge for this page.
    pub mirrored: bool,
}
