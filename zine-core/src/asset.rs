//! Media assets: the project-wide image pool referenced by page slots.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh string id.
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// An image in the project's media pool.
///
/// Owned exclusively by the document; slots reference assets by id and never
/// own them. During an upload the pool holds a placeholder with
/// `is_uploading` set, later swapped out whole via
/// [`crate::ZineDocument::replace_media_asset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    /// Unique id within the pool, compared as a string.
    pub id: String,
    /// Display name, usually the source filename.
    pub name: String,
    /// Display-resolution URL.
    pub url: String,
    /// MIME type of the source image.
    #[serde(rename = "type")]
    pub media_type: String,
    /// Thumbnail URL; falls back to `url`.
    pub thumbnail: String,
    /// Full-resolution URL used for PDF export; falls back to `url`.
    pub original_url: String,
    /// Backend image identifier; falls back to the asset id.
    pub image_id: String,
    /// Whether an upload for this asset is still in flight.
    #[serde(default)]
    pub is_uploading: bool,
    /// Upload progress in percent while in flight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_progress: Option<f32>,
    /// Set when the upload failed; absent from payloads that never failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_error: Option<String>,
}

/// Input for adding an asset to the pool.
///
/// Optional fields resolve the way the pool defaults them: a missing id is
/// generated, thumbnail and original URL fall back to `url`, the backend
/// image id falls back to the asset id.
#[derive(Debug, Clone, Default)]
pub struct NewMediaAsset {
    /// Caller-supplied id; generated when absent.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Display-resolution URL.
    pub url: String,
    /// MIME type.
    pub media_type: String,
    /// Thumbnail URL.
    pub thumbnail: Option<String>,
    /// Full-resolution URL.
    pub original_url: Option<String>,
    /// Backend image identifier.
    pub image_id: Option<String>,
    /// Whether this is an in-flight upload placeholder.
    pub is_uploading: bool,
}

impl MediaAsset {
    /// Resolve a [`NewMediaAsset`] into a pool entry.
    #[must_use]
    pub fn from_new(input: NewMediaAsset) -> Self {
        let id = input.id.unwrap_or_else(generate_id);
        Self {
            image_id: input.image_id.unwrap_or_else(|| id.clone()),
            thumbnail: input.thumbnail.unwrap_or_else(|| input.url.clone()),
            original_url: input.original_url.unwrap_or_else(|| input.url.clone()),
            id,
            name: input.name,
            url: input.url,
            media_type: input.media_type,
            is_uploading: input.is_uploading,
            upload_progress: None,
            upload_error: None,
        }
    }
}
