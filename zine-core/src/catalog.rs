//! Layout catalog: registry of layout templates, queried by id, category, or
//! aspect-ratio compatibility.

use crate::error::TemplateValidationError;
use crate::style::{TextAlign, TextStyle};
use crate::template::{
    AspectRatioRange, LayoutCategory, LayoutTemplate, SlotSpec, TextElementSpec, ALL_CATEGORIES,
};

/// Registry of layout templates.
///
/// Templates are validated on registration and kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct LayoutCatalog {
    templates: Vec<LayoutTemplate>,
}

impl LayoutCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with the built-in templates.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        for template in builtin_templates() {
            // Built-ins are covered by tests; a failure here is a programming
            // error in the template table.
            if let Err(e) = catalog.register(template) {
                tracing::error!("built-in layout rejected: {e}");
            }
        }
        catalog
    }

    /// Validate and register a template.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateValidationError`] carrying every violation found;
    /// the template is not registered if any check fails.
    pub fn register(&mut self, template: LayoutTemplate) -> Result<(), TemplateValidationError> {
        template.validate()?;
        tracing::debug!(id = %template.id, category = ?template.category, "layout registered");
        self.templates.push(template);
        Ok(())
    }

    /// Remove a template by id. Returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        self.templates.len() < before
    }

    /// Look up a template by id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&LayoutTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// All templates in a category.
    #[must_use]
    pub fn by_category(&self, category: LayoutCategory) -> Vec<&LayoutTemplate> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// All templates compatible with the given width/height ratio.
    ///
    /// A template with no aspect-ratio constraint matches every ratio; bounds
    /// are inclusive.
    #[must_use]
    pub fn by_aspect_ratio(&self, ratio: f32) -> Vec<&LayoutTemplate> {
        self.templates
            .iter()
            .filter(|t| t.aspect_ratio.as_ref().is_none_or(|r| r.matches(ratio)))
            .collect()
    }

    /// All registered templates in insertion order.
    #[must_use]
    pub fn all(&self) -> &[LayoutTemplate] {
        &self.templates
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog has no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The fixed category set with display metadata.
    #[must_use]
    pub fn categories() -> Vec<CategoryInfo> {
        ALL_CATEGORIES
            .iter()
            .map(|&category| CategoryInfo {
                category,
                name: category.display_name(),
                icon: category.icon(),
            })
            .collect()
    }
}

/// Display metadata for one catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CategoryInfo {
    /// The category.
    pub category: LayoutCategory,
    /// Display name.
    pub name: &'static str,
    /// Display icon.
    pub icon: &'static str,
}

fn heading_style(font_size: f32, font_weight: u16, text_align: TextAlign) -> TextStyle {
    TextStyle {
        font_size,
        font_weight,
        text_align,
        ..TextStyle::default()
    }
}

/// The built-in layout set shipped with the application.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn builtin_templates() -> Vec<LayoutTemplate> {
    vec![
        LayoutTemplate {
            id: "full-page".to_string(),
            name: "Full Page".to_string(),
            icon: "\u{25a1}".to_string(),
            category: LayoutCategory::Basic,
            slots: vec![SlotSpec::image(0.0, 0.0, 100.0, 100.0)],
            text_elements: Vec::new(),
            aspect_ratio: None,
        },
        LayoutTemplate {
            id: "two-horizontal".to_string(),
            name: "Two Horizontal".to_string(),
            icon: "\u{2637}".to_string(),
            category: LayoutCategory::Basic,
            slots: vec![
                SlotSpec::image(0.0, 0.0, 100.0, 50.0),
                SlotSpec::image(0.0, 50.0, 100.0, 50.0),
            ],
            text_elements: Vec::new(),
            aspect_ratio: None,
        },
        LayoutTemplate {
            id: "two-vertical".to_string(),
            name: "Two Vertical".to_string(),
            icon: "\u{25eb}".to_string(),
            category: LayoutCategory::Basic,
            slots: vec![
                SlotSpec::image(0.0, 0.0, 50.0, 100.0),
                SlotSpec::image(50.0, 0.0, 50.0, 100.0),
            ],
            text_elements: Vec::new(),
            aspect_ratio: None,
        },
        LayoutTemplate {
            id: "three-column".to_string(),
            name: "Three Column".to_string(),
            icon: "\u{2630}".to_string(),
            category: LayoutCategory::Basic,
            slots: vec![
                SlotSpec::image(0.0, 0.0, 33.33, 100.0),
                SlotSpec::image(33.33, 0.0, 33.34, 100.0),
                SlotSpec::image(66.67, 0.0, 33.33, 100.0),
            ],
            text_elements: Vec::new(),
            // Three side-by-side columns need a page wider than it is tall
            aspect_ratio: Some(AspectRatioRange {
                min: Some(1.0),
                max: None,
            }),
        },
        LayoutTemplate {
            id: "grid-2x2".to_string(),
            name: "Grid 2\u{d7}2".to_string(),
            icon: "\u{229e}".to_string(),
            category: LayoutCategory::Grid,
            slots: vec![
                SlotSpec::image(0.0, 0.0, 50.0, 50.0),
                SlotSpec::image(50.0, 0.0, 50.0, 50.0),
                SlotSpec::image(0.0, 50.0, 50.0, 50.0),
                SlotSpec::image(50.0, 50.0, 50.0, 50.0),
            ],
            text_elements: Vec::new(),
            aspect_ratio: None,
        },
        LayoutTemplate {
            id: "cover-title".to_string(),
            name: "Cover with Title".to_string(),
            icon: "\u{1f4d5}".to_string(),
            category: LayoutCategory::Cover,
            slots: vec![SlotSpec::image(0.0, 0.0, 100.0, 100.0)],
            text_elements: vec![
                TextElementSpec {
                    id: "title".to_string(),
                    x: 10.0,
                    y: 35.0,
                    width: 80.0,
                    height: 20.0,
                    z_index: Some(10),
                    content: Some("Title".to_string()),
                    style: Some(heading_style(64.0, 900, TextAlign::Center)),
                },
                TextElementSpec {
                    id: "subtitle".to_string(),
                    x: 10.0,
                    y: 58.0,
                    width: 80.0,
                    height: 10.0,
                    z_index: Some(10),
                    content: Some("Subtitle".to_string()),
                    style: Some(heading_style(20.0, 400, TextAlign::Center)),
                },
            ],
            aspect_ratio: None,
        },
        LayoutTemplate {
            id: "editorial-hero".to_string(),
            name: "Editorial Hero".to_string(),
            icon: "\u{1f4f0}".to_string(),
            category: LayoutCategory::Editorial,
            slots: vec![SlotSpec::image(0.0, 30.0, 100.0, 70.0)],
            text_elements: vec![TextElementSpec {
                id: "headline".to_string(),
                x: 5.0,
                y: 5.0,
                width: 90.0,
                height: 22.0,
                z_index: Some(10),
                content: Some("Headline".to_string()),
                style: Some(heading_style(72.0, 900, TextAlign::Left)),
            }],
            // Portrait-leaning pages only
            aspect_ratio: Some(AspectRatioRange {
                min: None,
                max: Some(1.0),
            }),
        },
        LayoutTemplate {
            id: "hero-caption".to_string(),
            name: "Hero + Caption".to_string(),
            icon: "\u{1f5bc}\u{fe0f}".to_string(),
            category: LayoutCategory::Combined,
            slots: vec![SlotSpec::image(0.0, 0.0, 100.0, 80.0)],
            text_elements: vec![TextElementSpec {
                id: "caption".to_string(),
                x: 5.0,
                y: 83.0,
                width: 90.0,
                height: 12.0,
                z_index: Some(5),
                content: Some("Caption".to_string()),
                style: Some(heading_style(14.0, 400, TextAlign::Left)),
            }],
            aspect_ratio: None,
        },
    ]
}
