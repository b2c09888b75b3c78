//! Versioned JSON codec: the durable interchange format between the live
//! document and the backend.
//!
//! Export is a direct structural snapshot of the three serialized fields.
//! Import has one hard validation gate (`zineConfig` present, `pages`
//! list-shaped) and otherwise normalizes leniently: ids are coerced to
//! strings, missing z-indices re-derive from position, unknown fit modes
//! cover, and the legacy `innerMarginPercent` field still feeds
//! `innerMarginPx`. Transient state (clipboard, UI prefs, selection, upload
//! progress) is outside the wire format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::asset::MediaAsset;
use crate::config::{BindingType, ConfigInput, ProjectConfig};
use crate::document::{ProjectMeta, ZineDocument};
use crate::error::{ZineError, ZineResult};
use crate::geometry::{Rect, Unit};
use crate::page::{FitMode, Page, Slot, SlotKind, TextElement};
use crate::style::TextStyle;

/// Current project payload version.
pub const PROJECT_DATA_VERSION: u32 = 1;

/// The versioned wire payload for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    /// Payload format version.
    pub version: u32,
    /// Project configuration; absent when exporting an uninitialized
    /// document (such a payload will not re-import).
    pub zine_config: Option<ProjectConfig>,
    /// The media pool.
    pub media_assets: Vec<MediaAsset>,
    /// All pages in document order.
    pub pages: Vec<Page>,
}

/// Options controlling how imported project metadata is set.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Full metadata to apply after import.
    pub meta: Option<ProjectMeta>,
    /// Title to use when no full metadata is given.
    pub title: Option<String>,
}

/// Snapshot the serialized fields of a document into a wire payload.
#[must_use]
pub fn export_project_data(doc: &ZineDocument) -> ProjectData {
    ProjectData {
        version: PROJECT_DATA_VERSION,
        zine_config: doc.config().cloned(),
        media_assets: doc.media_assets().to_vec(),
        pages: doc.pages().to_vec(),
    }
}

/// Export a document as a JSON string.
///
/// # Errors
///
/// Returns [`ZineError::Serialization`] if the payload cannot be encoded.
pub fn export_json(doc: &ZineDocument, pretty: bool) -> ZineResult<String> {
    let payload = export_project_data(doc);
    let json = if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    Ok(json)
}

/// Import a project from a JSON string.
///
/// # Errors
///
/// Returns [`ZineError::InvalidProject`] if the string is not JSON or the
/// payload fails the validation gate.
pub fn import_from_json(doc: &mut ZineDocument, json: &str, options: ImportOptions) -> ZineResult<()> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| ZineError::InvalidProject(format!("not valid JSON: {e}")))?;
    import_from_value(doc, &value, options)
}

/// Import a project from an already-parsed JSON value.
///
/// On success the document is initialized, its first page selected, and its
/// metadata set from `options`. On failure the document is left untouched.
///
/// # Errors
///
/// Returns [`ZineError::InvalidProject`] if `zineConfig` is absent or `pages`
/// is not an array, or if a field has an unusable type.
pub fn import_from_value(
    doc: &mut ZineDocument,
    value: &Value,
    options: ImportOptions,
) -> ZineResult<()> {
    let config_value = value.get("zineConfig");
    if config_value.is_none_or(Value::is_null) {
        return Err(ZineError::InvalidProject(
            "missing zineConfig".to_string(),
        ));
    }
    if !value.get("pages").is_some_and(Value::is_array) {
        return Err(ZineError::InvalidProject(
            "pages must be an array".to_string(),
        ));
    }

    let raw: RawProject = serde_json::from_value(value.clone())
        .map_err(|e| ZineError::InvalidProject(e.to_string()))?;

    let config = raw.zine_config.resolve();
    let media_assets = raw
        .media_assets
        .into_iter()
        .map(RawAsset::normalize)
        .collect();
    let pages: Vec<Page> = raw.pages.into_iter().map(RawPage::normalize).collect();

    doc.config = Some(config);
    doc.media_assets = media_assets;
    doc.selected_page_id = pages.first().map(|p| p.id.clone());
    doc.pages = pages;
    doc.initialized = true;
    doc.project_meta = options.meta.unwrap_or_else(|| ProjectMeta {
        id: None,
        title: options.title.unwrap_or_default(),
        updated_at: None,
    });

    tracing::debug!(
        pages = doc.pages.len(),
        assets = doc.media_assets.len(),
        "project imported"
    );
    Ok(())
}

/// Coerce a JSON value to a string id: strings pass through, numbers are
/// formatted, everything else is `None`.
fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    zine_config: RawConfig,
    #[serde(default)]
    media_assets: Vec<RawAsset>,
    #[serde(default)]
    pages: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    unit: Option<String>,
    bleed: Option<f32>,
    bleed_top: Option<f32>,
    bleed_right: Option<f32>,
    bleed_bottom: Option<f32>,
    bleed_left: Option<f32>,
    margin: Option<f32>,
    slot_inner_margin_percent: Option<f32>,
    binding_type: Option<String>,
}

impl RawConfig {
    /// Default missing fields exactly the way `initialize` does.
    fn resolve(self) -> ProjectConfig {
        ProjectConfig::from_input(&ConfigInput {
            width: self.width,
            height: self.height,
            unit: self.unit.as_deref().map(Unit::parse_lenient),
            bleed: self.bleed,
            bleed_top: self.bleed_top,
            bleed_right: self.bleed_right,
            bleed_bottom: self.bleed_bottom,
            bleed_left: self.bleed_left,
            margin: self.margin,
            slot_inner_margin_percent: self.slot_inner_margin_percent,
            binding_type: self.binding_type.as_deref().map(BindingType::parse_lenient),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAsset {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(rename = "type", default)]
    media_type: String,
    thumbnail: Option<String>,
    original_url: Option<String>,
    image_id: Option<String>,
    upload_error: Option<String>,
}

impl RawAsset {
    fn normalize(self) -> MediaAsset {
        let id = coerce_id(&self.id).unwrap_or_default();
        MediaAsset {
            image_id: self.image_id.unwrap_or_else(|| id.clone()),
            thumbnail: self.thumbnail.unwrap_or_else(|| self.url.clone()),
            original_url: self.original_url.unwrap_or_else(|| self.url.clone()),
            id,
            name: self.name,
            url: self.url,
            media_type: self.media_type,
            // In-flight upload state is transient and never survives import
            is_uploading: false,
            upload_progress: None,
            upload_error: self.upload_error,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    layout: String,
    margin_override: Option<f32>,
    #[serde(default)]
    slots: Vec<RawSlot>,
    #[serde(default)]
    text_elements: Vec<RawTextElement>,
}

impl RawPage {
    fn normalize(self) -> Page {
        let slots = self
            .slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.normalize(index))
            .collect();
        let text_elements = self
            .text_elements
            .into_iter()
            .map(RawTextElement::normalize)
            .collect();
        Page {
            id: coerce_id(&self.id).unwrap_or_default(),
            layout: self.layout,
            margin_override: self.margin_override,
            slots,
            text_elements,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSlot {
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(rename = "type")]
    slot_type: Option<String>,
    z_index: Option<i32>,
    #[serde(default)]
    asset_id: Value,
    fit: Option<String>,
    inner_margin_px: Option<f32>,
    /// Legacy field from payloads written before the pixel-based margin.
    inner_margin_percent: Option<f32>,
    background_color: Option<String>,
    text_content: Option<String>,
    text_style: Option<TextStyle>,
}

impl RawSlot {
    fn normalize(self, index: usize) -> Slot {
        let kind = match self.slot_type.as_deref() {
            Some("text") => SlotKind::Text,
            _ => SlotKind::Image,
        };
        Slot {
            rect: Rect::new(self.x, self.y, self.width, self.height),
            kind,
            z_index: self
                .z_index
                .unwrap_or_else(|| i32::try_from(index).unwrap_or(i32::MAX)),
            asset_id: coerce_id(&self.asset_id),
            fit: self
                .fit
                .as_deref()
                .map_or(FitMode::Cover, FitMode::parse_lenient),
            inner_margin_px: self
                .inner_margin_px
                .or(self.inner_margin_percent)
                .unwrap_or(0.0),
            background_color: self.background_color,
            text_content: self.text_content,
            text_style: self.text_style,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTextElement {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    z_index: i32,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    content: String,
    style: Option<TextStyle>,
}

impl RawTextElement {
    fn normalize(self) -> TextElement {
        TextElement {
            id: coerce_id(&self.id).unwrap_or_default(),
            rect: Rect::new(self.x, self.y, self.width, self.height),
            z_index: self.z_index,
            locked: self.locked,
            content: self.content,
            style: self.style.unwrap_or_default(),
        }
    }
}
