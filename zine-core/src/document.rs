//! The project document: the single mutable aggregate for an editing session.
//!
//! Every mutation of project state goes through a named method on
//! [`ZineDocument`]. Mutations are synchronous and run to completion; targeted
//! mutators are silent no-ops when the page, slot, element, or asset they name
//! does not exist. Validation failures surface only at the import/template
//! boundaries, never from mutators.

use serde::{Deserialize, Serialize};

use crate::asset::{generate_id, MediaAsset, NewMediaAsset};
use crate::config::{ConfigInput, ProjectConfig};
use crate::geometry::Rect;
use crate::page::{
    FitMode, NewTextElement, Page, Slot, SlotKind, TextElement, TextElementUpdate,
    MAX_SLOT_INNER_MARGIN_PX,
};
use crate::style::{TextPreset, TextStyle, TextStylePatch};
use crate::template::LayoutTemplate;

/// Editor color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Parse a persisted preference; only the exact names are accepted.
    #[must_use]
    pub fn parse_saved(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// UI preferences carried by the document.
///
/// Not part of the page/slot data model; excluded from the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiPrefs {
    /// Active color theme.
    pub theme: Theme,
    /// Whether layout guides are shown.
    pub show_guides: bool,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            show_guides: true,
        }
    }
}

/// Project identity and bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    /// Server-side project id, once saved.
    pub id: Option<String>,
    /// Project title.
    pub title: String,
    /// Last-saved timestamp, RFC 3339.
    pub updated_at: Option<String>,
}

/// Partial [`ProjectMeta`] update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ProjectMetaPatch {
    /// New id.
    pub id: Option<Option<String>>,
    /// New title.
    pub title: Option<String>,
    /// New timestamp.
    pub updated_at: Option<Option<String>>,
}

/// The project document for one editing session.
///
/// Construct with [`ZineDocument::new`], bring to life with
/// [`ZineDocument::initialize`], and pass by reference to whatever layer
/// needs it; there is no ambient global instance.
#[derive(Debug, Clone, Default)]
pub struct ZineDocument {
    pub(crate) config: Option<ProjectConfig>,
    pub(crate) initialized: bool,
    pub(crate) media_assets: Vec<MediaAsset>,
    pub(crate) pages: Vec<Page>,
    pub(crate) selected_page_id: Option<String>,
    pub(crate) copied_page: Option<Page>,
    pub(crate) project_meta: ProjectMeta,
    pub(crate) ui: UiPrefs,
}

impl ZineDocument {
    /// Create an empty, uninitialized document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Initialize the project with a page configuration.
    ///
    /// Resolves config defaults, clears all pages and media, and marks the
    /// document initialized. Always succeeds.
    pub fn initialize(&mut self, input: &ConfigInput) {
        self.config = Some(ProjectConfig::from_input(input));
        self.initialized = true;
        self.pages.clear();
        self.media_assets.clear();
        self.selected_page_id = None;
    }

    /// Clear everything, including project metadata.
    pub fn reset(&mut self) {
        self.config = None;
        self.initialized = false;
        self.media_assets.clear();
        self.pages.clear();
        self.selected_page_id = None;
        self.copied_page = None;
        self.project_meta = ProjectMeta::default();
    }

    /// Merge a metadata patch; untouched fields keep their value.
    pub fn set_project_meta(&mut self, patch: ProjectMetaPatch) {
        if let Some(id) = patch.id {
            self.project_meta.id = id;
        }
        if let Some(title) = patch.title {
            self.project_meta.title = title;
        }
        if let Some(updated_at) = patch.updated_at {
            self.project_meta.updated_at = updated_at;
        }
    }

    // -----------------------------------------------------------------------
    // Media pool
    // -----------------------------------------------------------------------

    /// Append an asset to the media pool, generating an id when the caller
    /// supplied none. Returns the asset id.
    pub fn add_media_asset(&mut self, input: NewMediaAsset) -> String {
        let asset = MediaAsset::from_new(input);
        let id = asset.id.clone();
        self.media_assets.push(asset);
        id
    }

    /// Replace the asset with id `old_id` in place, swapping an upload
    /// placeholder for the finalized asset. No-op when `old_id` is absent.
    pub fn replace_media_asset(&mut self, old_id: &str, input: NewMediaAsset) {
        if let Some(existing) = self.media_assets.iter_mut().find(|a| a.id == old_id) {
            let mut asset = MediaAsset::from_new(input);
            asset.is_uploading = false;
            *existing = asset;
        }
    }

    /// Remove an asset from the pool by id.
    ///
    /// Slots referencing the asset keep their `asset_id`; the dangling
    /// reference renders as a missing image until reassigned.
    pub fn remove_media_asset(&mut self, id: &str) {
        self.media_assets.retain(|a| a.id != id);
    }

    /// Record upload progress (percent) on an in-flight asset.
    pub fn set_media_upload_progress(&mut self, id: &str, progress: f32) {
        if let Some(asset) = self.media_assets.iter_mut().find(|a| a.id == id) {
            asset.upload_progress = Some(progress);
        }
    }

    /// Mark an in-flight upload as failed.
    pub fn fail_media_upload(&mut self, id: &str, error: impl Into<String>) {
        if let Some(asset) = self.media_assets.iter_mut().find(|a| a.id == id) {
            asset.is_uploading = false;
            asset.upload_error = Some(error.into());
        }
    }

    // -----------------------------------------------------------------------
    // Pages
    // -----------------------------------------------------------------------

    /// Append a page instantiated from a layout template and select it.
    /// Returns the new page id.
    pub fn add_page(&mut self, template: &LayoutTemplate) -> String {
        let id = generate_id();
        let page = Page::from_template(id.clone(), template);
        self.pages.push(page);
        self.selected_page_id = Some(id.clone());
        id
    }

    /// Deep-copy a page and insert the copy immediately after the source,
    /// selecting it. Returns the new page id, or `None` when the source is
    /// missing.
    pub fn duplicate_page(&mut self, page_id: &str) -> Option<String> {
        let index = self.pages.iter().position(|p| p.id == page_id)?;
        let new_id = generate_id();
        let copy = self.pages[index].duplicate_as(new_id.clone());
        self.pages.insert(index + 1, copy);
        self.selected_page_id = Some(new_id.clone());
        Some(new_id)
    }

    /// Store a deep clone of a page in the one-slot clipboard, overwriting
    /// any previous clipboard content.
    pub fn copy_page(&mut self, page_id: &str) {
        if let Some(page) = self.page(page_id) {
            self.copied_page = Some(page.clone());
        }
    }

    /// Append the clipboard page to the end of the document and select it.
    /// Returns the new page id, or `None` when the clipboard is empty.
    pub fn paste_page(&mut self) -> Option<String> {
        let source = self.copied_page.as_ref()?;
        let new_id = generate_id();
        let copy = source.duplicate_as(new_id.clone());
        self.pages.push(copy);
        self.selected_page_id = Some(new_id.clone());
        Some(new_id)
    }

    /// Remove a page by id. When the removed page was selected, selection
    /// falls back to the first remaining page, or clears.
    pub fn remove_page(&mut self, page_id: &str) {
        let Some(index) = self.pages.iter().position(|p| p.id == page_id) else {
            return;
        };
        self.pages.remove(index);
        if self.selected_page_id.as_deref() == Some(page_id) {
            self.selected_page_id = self.pages.first().map(|p| p.id.clone());
        }
    }

    /// Move the page at `from` to position `to`, preserving all other pages'
    /// relative order. No-op when `from` is out of bounds; `to` clamps to the
    /// end.
    pub fn reorder_pages(&mut self, from: usize, to: usize) {
        if from >= self.pages.len() {
            return;
        }
        let page = self.pages.remove(from);
        let to = to.min(self.pages.len());
        self.pages.insert(to, page);
    }

    /// Set the current page selection.
    pub fn select_page(&mut self, page_id: impl Into<String>) {
        self.selected_page_id = Some(page_id.into());
    }

    /// Set or clear a page's margin override.
    pub fn set_page_margin_override(&mut self, page_id: &str, margin: Option<f32>) {
        if let Some(page) = self.page_mut(page_id) {
            page.margin_override = margin;
        }
    }

    // -----------------------------------------------------------------------
    // Slots
    // -----------------------------------------------------------------------

    /// Assign (or clear) the asset shown in a slot.
    pub fn set_asset_to_slot(
        &mut self,
        page_id: &str,
        slot_index: usize,
        asset_id: Option<String>,
    ) {
        if let Some(slot) = self.slot_mut(page_id, slot_index) {
            slot.asset_id = asset_id;
        }
    }

    /// Set a slot's fit mode.
    pub fn set_slot_fit(&mut self, page_id: &str, slot_index: usize, fit: FitMode) {
        if let Some(slot) = self.slot_mut(page_id, slot_index) {
            slot.fit = fit;
        }
    }

    /// Flip a slot between cover and contain.
    pub fn toggle_slot_fit(&mut self, page_id: &str, slot_index: usize) {
        if let Some(slot) = self.slot_mut(page_id, slot_index) {
            slot.fit = slot.fit.toggled();
        }
    }

    /// Set a slot's inner margin in pixels, clamped to 0-200. Non-finite
    /// values are treated as zero.
    pub fn set_slot_inner_margin(&mut self, page_id: &str, slot_index: usize, pixels: f32) {
        if let Some(slot) = self.slot_mut(page_id, slot_index) {
            let px = if pixels.is_finite() { pixels } else { 0.0 };
            slot.inner_margin_px = px.clamp(0.0, MAX_SLOT_INNER_MARGIN_PX);
        }
    }

    /// Set or clear a slot's solid background color.
    pub fn set_slot_background_color(
        &mut self,
        page_id: &str,
        slot_index: usize,
        color: Option<String>,
    ) {
        if let Some(slot) = self.slot_mut(page_id, slot_index) {
            slot.background_color = color;
        }
    }

    /// Change what a slot holds. Switching to text releases the image asset.
    pub fn set_slot_kind(&mut self, page_id: &str, slot_index: usize, kind: SlotKind) {
        if let Some(slot) = self.slot_mut(page_id, slot_index) {
            slot.kind = kind;
            if kind == SlotKind::Text {
                slot.asset_id = None;
            }
        }
    }

    /// Set a text slot's content.
    pub fn set_slot_text(&mut self, page_id: &str, slot_index: usize, content: impl Into<String>) {
        if let Some(slot) = self.slot_mut(page_id, slot_index) {
            slot.text_content = Some(content.into());
        }
    }

    /// Merge a style patch into a slot's text style, starting from the
    /// default style when the slot has none yet.
    pub fn update_slot_text_style(
        &mut self,
        page_id: &str,
        slot_index: usize,
        patch: &TextStylePatch,
    ) {
        if let Some(slot) = self.slot_mut(page_id, slot_index) {
            slot.text_style
                .get_or_insert_with(TextStyle::default)
                .apply(patch);
        }
    }

    /// Apply a named typography preset to a slot's text style.
    pub fn apply_text_preset(&mut self, page_id: &str, slot_index: usize, preset: TextPreset) {
        let style = preset.style();
        let patch = TextStylePatch {
            font_size: Some(style.font_size),
            font_weight: Some(style.font_weight),
            text_align: Some(style.text_align),
            padding: Some(style.padding),
            line_height: Some(style.line_height),
            color: style.color.map(str::to_string),
            ..TextStylePatch::default()
        };
        self.update_slot_text_style(page_id, slot_index, &patch);
    }

    // -----------------------------------------------------------------------
    // Text elements
    // -----------------------------------------------------------------------

    /// Add a floating text element to a page. Returns the element id, or
    /// `None` when the page is missing.
    pub fn add_text_element(&mut self, page_id: &str, input: NewTextElement) -> Option<String> {
        let page = self.page_mut(page_id)?;
        let id = input.id.unwrap_or_else(generate_id);
        let z_index = input.z_index.unwrap_or_else(|| {
            i32::try_from(page.text_elements.len()).unwrap_or(0) + 100
        });
        let mut style = TextStyle::default();
        if let Some(ref patch) = input.style {
            style.apply(patch);
        }
        page.text_elements.push(TextElement {
            id: id.clone(),
            rect: input.rect.unwrap_or(Rect::new(20.0, 20.0, 40.0, 20.0)),
            z_index,
            locked: input.locked,
            content: input
                .content
                .unwrap_or_else(|| "Double-click to edit".to_string()),
            style,
        });
        Some(id)
    }

    /// Apply a geometry/content update to a text element.
    pub fn update_text_element(
        &mut self,
        page_id: &str,
        element_id: &str,
        update: &TextElementUpdate,
    ) {
        if let Some(element) = self.text_element_mut(page_id, element_id) {
            if let Some(rect) = update.rect {
                element.rect = rect;
            }
            if let Some(z_index) = update.z_index {
                element.z_index = z_index;
            }
            if let Some(locked) = update.locked {
                element.locked = locked;
            }
            if let Some(ref content) = update.content {
                element.content = content.clone();
            }
        }
    }

    /// Merge a style patch into a text element's style.
    pub fn update_text_element_style(
        &mut self,
        page_id: &str,
        element_id: &str,
        patch: &TextStylePatch,
    ) {
        if let Some(element) = self.text_element_mut(page_id, element_id) {
            element.style.apply(patch);
        }
    }

    /// Remove a text element from a page.
    pub fn remove_text_element(&mut self, page_id: &str, element_id: &str) {
        if let Some(page) = self.page_mut(page_id) {
            page.text_elements.retain(|el| el.id != element_id);
        }
    }

    // -----------------------------------------------------------------------
    // Z-order
    // -----------------------------------------------------------------------
    //
    // Front/back take the max/min z-index across slots AND text elements on
    // the page, then go one beyond it. Values drift outward over time; only
    // relative order matters for paint.

    /// Paint a text element above everything else on its page.
    pub fn bring_text_element_to_front(&mut self, page_id: &str, element_id: &str) {
        if let Some(page) = self.page_mut(page_id) {
            let z = page.max_z_index() + 1;
            if let Some(element) = page.text_elements.iter_mut().find(|el| el.id == element_id) {
                element.z_index = z;
            }
        }
    }

    /// Paint a text element below everything else on its page.
    pub fn send_text_element_to_back(&mut self, page_id: &str, element_id: &str) {
        if let Some(page) = self.page_mut(page_id) {
            let z = page.min_z_index() - 1;
            if let Some(element) = page.text_elements.iter_mut().find(|el| el.id == element_id) {
                element.z_index = z;
            }
        }
    }

    /// Paint a slot above everything else on its page.
    pub fn bring_slot_to_front(&mut self, page_id: &str, slot_index: usize) {
        if let Some(page) = self.page_mut(page_id) {
            let z = page.max_z_index() + 1;
            if let Some(slot) = page.slots.get_mut(slot_index) {
                slot.z_index = z;
            }
        }
    }

    /// Paint a slot below everything else on its page.
    pub fn send_slot_to_back(&mut self, page_id: &str, slot_index: usize) {
        if let Some(page) = self.page_mut(page_id) {
            let z = page.min_z_index() - 1;
            if let Some(slot) = page.slots.get_mut(slot_index) {
                slot.z_index = z;
            }
        }
    }

    // -----------------------------------------------------------------------
    // UI preferences
    // -----------------------------------------------------------------------

    /// Set the editor theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.ui.theme = theme;
    }

    /// Flip between light and dark.
    pub fn toggle_theme(&mut self) {
        self.ui.theme = self.ui.theme.toggled();
    }

    /// Toggle layout guide visibility.
    pub fn toggle_guides(&mut self) {
        self.ui.show_guides = !self.ui.show_guides;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The resolved project configuration, once initialized.
    #[must_use]
    pub fn config(&self) -> Option<&ProjectConfig> {
        self.config.as_ref()
    }

    /// Whether the project has been initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The media pool.
    #[must_use]
    pub fn media_assets(&self) -> &[MediaAsset] {
        &self.media_assets
    }

    /// All pages in document order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Look up a page by id.
    #[must_use]
    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    /// The currently selected page, if any.
    #[must_use]
    pub fn selected_page(&self) -> Option<&Page> {
        let id = self.selected_page_id.as_deref()?;
        self.page(id)
    }

    /// The currently selected page id.
    #[must_use]
    pub fn selected_page_id(&self) -> Option<&str> {
        self.selected_page_id.as_deref()
    }

    /// The page in the copy/paste clipboard.
    #[must_use]
    pub fn copied_page(&self) -> Option<&Page> {
        self.copied_page.as_ref()
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Project identity and bookkeeping.
    #[must_use]
    pub fn project_meta(&self) -> &ProjectMeta {
        &self.project_meta
    }

    /// UI preferences.
    #[must_use]
    pub fn ui(&self) -> &UiPrefs {
        &self.ui
    }

    // -----------------------------------------------------------------------
    // Internal lookups
    // -----------------------------------------------------------------------

    fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    fn slot_mut(&mut self, page_id: &str, slot_index: usize) -> Option<&mut Slot> {
        self.page_mut(page_id)?.slots.get_mut(slot_index)
    }

    fn text_element_mut(&mut self, page_id: &str, element_id: &str) -> Option<&mut TextElement> {
        self.page_mut(page_id)?
            .text_elements
            .iter_mut()
            .find(|el| el.id == element_id)
    }
}
