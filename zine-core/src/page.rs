//! Pages and their contents: image slots and floating text elements.

use serde::{Deserialize, Serialize};

use crate::asset::generate_id;
use crate::geometry::Rect;
use crate::style::{TextStyle, TextStylePatch};
use crate::template::LayoutTemplate;

/// What a slot holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Holds one image asset.
    #[default]
    Image,
    /// Holds inline text instead of an image.
    Text,
}

/// How an image fills its slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Crop to fill the slot.
    #[default]
    Cover,
    /// Letterbox to fit inside the slot.
    Contain,
}

impl FitMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Cover => Self::Contain,
            Self::Contain => Self::Cover,
        }
    }

    /// Lenient parse for imported payloads: only an exact `contain` is
    /// contain, everything else covers.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        if s == "contain" {
            Self::Contain
        } else {
            Self::Cover
        }
    }
}

/// Upper bound for a slot's inner margin in pixels.
pub const MAX_SLOT_INNER_MARGIN_PX: f32 = 200.0;

/// A rectangular region on a page holding at most one image asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Position and size, percent of the page content area.
    #[serde(flatten)]
    pub rect: Rect,
    /// What the slot holds.
    #[serde(rename = "type", default)]
    pub kind: SlotKind,
    /// Paint order among all elements on the page; ties break by position.
    pub z_index: i32,
    /// Referenced asset id, or `None` for an empty slot.
    pub asset_id: Option<String>,
    /// How the image fills the slot.
    #[serde(default)]
    pub fit: FitMode,
    /// Inner margin in pixels, clamped to 0-200.
    #[serde(default)]
    pub inner_margin_px: f32,
    /// Optional solid background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Inline text content for text slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    /// Inline text style for text slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

/// An independently positioned text box on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// Page-unique element id.
    pub id: String,
    /// Position and size, percent of the page content area.
    #[serde(flatten)]
    pub rect: Rect,
    /// Paint order among all elements on the page.
    #[serde(default)]
    pub z_index: i32,
    /// Whether the element is locked against editing.
    #[serde(default)]
    pub locked: bool,
    /// Text content.
    #[serde(default)]
    pub content: String,
    /// Text style.
    #[serde(default)]
    pub style: TextStyle,
}

/// Input for adding an ad-hoc text element to a page.
#[derive(Debug, Clone, Default)]
pub struct NewTextElement {
    /// Caller-supplied id; generated when absent.
    pub id: Option<String>,
    /// Position and size; defaults to a 40x20 box at (20, 20).
    pub rect: Option<Rect>,
    /// Paint order; defaults above the page's existing text elements.
    pub z_index: Option<i32>,
    /// Initial lock state.
    pub locked: bool,
    /// Initial content; defaults to an edit prompt.
    pub content: Option<String>,
    /// Style overrides merged onto the default style.
    pub style: Option<TextStylePatch>,
}

/// Geometry/content update for an existing text element.
#[derive(Debug, Clone, Default)]
pub struct TextElementUpdate {
    /// New rectangle, if moving or resizing.
    pub rect: Option<Rect>,
    /// New paint order.
    pub z_index: Option<i32>,
    /// New lock state.
    pub locked: Option<bool>,
    /// New content.
    pub content: Option<String>,
}

/// One page of the project.
///
/// Pages live in document order; that order drives export sequencing and PDF
/// page order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Document-unique page id.
    pub id: String,
    /// Id of the layout template the page was created from.
    pub layout: String,
    /// Per-page margin override; `None` uses the project margin.
    #[serde(default)]
    pub margin_override: Option<f32>,
    /// Image slots, in template order.
    pub slots: Vec<Slot>,
    /// Floating text elements.
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
}

impl Page {
    /// Instantiate a page from a layout template.
    ///
    /// Every slot becomes an empty image slot (`fit` cover, no asset, zero
    /// inner margin) with `z_index` defaulting to its position; template text
    /// elements get page-scoped unique ids.
    #[must_use]
    pub fn from_template(id: String, template: &LayoutTemplate) -> Self {
        let slots = template
            .slots
            .iter()
            .enumerate()
            .map(|(index, spec)| Slot {
                rect: Rect::new(spec.x, spec.y, spec.width, spec.height),
                kind: SlotKind::Image,
                z_index: spec.z_index.unwrap_or_else(|| {
                    i32::try_from(index).unwrap_or(i32::MAX)
                }),
                asset_id: None,
                fit: FitMode::Cover,
                inner_margin_px: 0.0,
                background_color: spec.background_color.clone(),
                text_content: None,
                text_style: None,
            })
            .collect();

        let text_elements = template
            .text_elements
            .iter()
            .map(|spec| TextElement {
                id: format!("{id}-{}-{}", spec.id, generate_id()),
                rect: Rect::new(spec.x, spec.y, spec.width, spec.height),
                z_index: spec.z_index.unwrap_or(0),
                locked: false,
                content: spec.content.clone().unwrap_or_default(),
                style: spec.style.clone().unwrap_or_default(),
            })
            .collect();

        Self {
            id,
            layout: template.id.clone(),
            margin_override: None,
            slots,
            text_elements,
        }
    }

    /// Deep-copy this page under a new id, minting fresh text element ids.
    ///
    /// Slots are copied by value; they carry no identity of their own.
    #[must_use]
    pub fn duplicate_as(&self, new_id: String) -> Self {
        let text_elements = self
            .text_elements
            .iter()
            .map(|el| TextElement {
                id: format!("{new_id}-{}-{}", el.id, generate_id()),
                ..el.clone()
            })
            .collect();
        Self {
            id: new_id,
            layout: self.layout.clone(),
            margin_override: self.margin_override,
            slots: self.slots.clone(),
            text_elements,
        }
    }

    /// Highest z-index among all slots and text elements, floored at zero.
    #[must_use]
    pub fn max_z_index(&self) -> i32 {
        let slot_max = self.slots.iter().map(|s| s.z_index).max().unwrap_or(0);
        let text_max = self
            .text_elements
            .iter()
            .map(|el| el.z_index)
            .max()
            .unwrap_or(0);
        slot_max.max(text_max).max(0)
    }

    /// Lowest z-index among all slots and text elements, capped at zero.
    #[must_use]
    pub fn min_z_index(&self) -> i32 {
        let slot_min = self.slots.iter().map(|s| s.z_index).min().unwrap_or(0);
        let text_min = self
            .text_elements
            .iter()
            .map(|el| el.z_index)
            .min()
            .unwrap_or(0);
        slot_min.min(text_min).min(0)
    }
}
