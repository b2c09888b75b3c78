//! Image upload pipeline: decode, derive sized variants, hand off to storage.

use std::io::Cursor;
use std::sync::Arc;

use axum::extract::{Multipart, Path as UrlPath, State};
use axum::http::StatusCode;
use axum::Json;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::storage::{StorageBackend, StorageError};
use crate::AppState;

/// MIME types the pipeline accepts.
pub const SUPPORTED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// One derived size tier.
struct VariantSpec {
    name: &'static str,
    max_dim: u32,
    jpeg_quality: u8,
}

/// Size tiers derived for every upload. Downscale only, aspect preserved.
const VARIANT_SPECS: [VariantSpec; 3] = [
    VariantSpec {
        name: "original",
        max_dim: 4000,
        jpeg_quality: 95,
    },
    VariantSpec {
        name: "display",
        max_dim: 1200,
        jpeg_quality: 85,
    },
    VariantSpec {
        name: "thumbnail",
        max_dim: 300,
        jpeg_quality: 80,
    },
];

/// Errors from the upload pipeline.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No file field in the request.
    #[error("image file is required")]
    MissingFile,

    /// MIME type outside the allow-list.
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    /// The bytes did not decode as an image.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// A variant failed to encode.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// Storage refused the blob.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::MissingFile => Self::BadRequest(err.to_string()),
            UploadError::UnsupportedType(mime) => Self::UnsupportedMedia(mime),
            UploadError::Decode(_) | UploadError::Encode(_) => Self::BadRequest(err.to_string()),
            UploadError::Storage(e) => Self::Internal(e.into()),
        }
    }
}

/// One stored size tier of an uploaded image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageVariant {
    /// Public URL.
    pub url: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Encoded size in bytes.
    pub size: usize,
}

/// The three size tiers of an uploaded image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageVariants {
    /// Near-source resolution (capped at 4000px).
    pub original: ImageVariant,
    /// Editor display resolution (capped at 1200px).
    pub display: ImageVariant,
    /// Thumbnail (capped at 300px).
    pub thumbnail: ImageVariant,
}

/// Upload response for one image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    /// Backend image identifier.
    pub id: String,
    /// Stored variants.
    pub variants: ImageVariants,
}

/// Per-file failure in a batch upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadFailure {
    /// Source filename.
    pub filename: String,
    /// What went wrong.
    pub error: String,
}

/// Partial-success summary for a batch upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadResponse {
    /// Successfully processed images.
    pub uploaded: Vec<UploadedImage>,
    /// Files that failed, with reasons.
    pub errors: Vec<BatchUploadFailure>,
}

/// Whether a MIME type is accepted by the pipeline.
#[must_use]
pub fn is_supported_type(mime: &str) -> bool {
    SUPPORTED_IMAGE_TYPES.contains(&mime)
}

fn generate_image_id() -> String {
    format!("img_{}", Uuid::new_v4().simple())
}

/// Scale down to fit within `max_dim` on the longest edge; never enlarges.
fn fit_within(img: &DynamicImage, max_dim: u32) -> DynamicImage {
    if img.width() <= max_dim && img.height() <= max_dim {
        img.clone()
    } else {
        img.resize(max_dim, max_dim, FilterType::Lanczos3)
    }
}

/// Encode a variant. PNG sources keep PNG (alpha survives); everything else
/// is re-encoded as JPEG at the tier's quality.
fn encode_variant(
    img: &DynamicImage,
    source_mime: &str,
    jpeg_quality: u8,
) -> Result<(Vec<u8>, &'static str, &'static str), UploadError> {
    let mut buf = Vec::new();
    if source_mime == "image/png" {
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(UploadError::Encode)?;
        Ok((buf, "png", "image/png"))
    } else {
        let rgb = img.to_rgb8();
        let mut cursor = Cursor::new(&mut buf);
        let encoder = JpegEncoder::new_with_quality(&mut cursor, jpeg_quality);
        rgb.write_with_encoder(encoder).map_err(UploadError::Encode)?;
        Ok((buf, "jpg", "image/jpeg"))
    }
}

/// Decode an upload, derive all size tiers, and store them.
///
/// # Errors
///
/// Fails on unsupported MIME types, undecodable bytes, encode failures, and
/// storage errors. Variants already stored before a failure are left behind
/// for the id-level delete to clean up.
pub async fn process_and_store(
    storage: &dyn StorageBackend,
    mime: &str,
    bytes: &[u8],
) -> Result<UploadedImage, UploadError> {
    if !is_supported_type(mime) {
        return Err(UploadError::UnsupportedType(mime.to_string()));
    }

    let source = image::load_from_memory(bytes).map_err(UploadError::Decode)?;
    let id = generate_image_id();

    let original = store_variant(storage, &id, &source, mime, &VARIANT_SPECS[0]).await?;
    let display = store_variant(storage, &id, &source, mime, &VARIANT_SPECS[1]).await?;
    let thumbnail = store_variant(storage, &id, &source, mime, &VARIANT_SPECS[2]).await?;

    let uploaded = UploadedImage {
        id,
        variants: ImageVariants {
            original,
            display,
            thumbnail,
        },
    };
    tracing::info!(
        id = %uploaded.id,
        width = uploaded.variants.original.width,
        height = uploaded.variants.original.height,
        "image processed"
    );
    Ok(uploaded)
}

/// Derive one size tier and hand it to storage.
async fn store_variant(
    storage: &dyn StorageBackend,
    id: &str,
    source: &DynamicImage,
    mime: &str,
    spec: &VariantSpec,
) -> Result<ImageVariant, UploadError> {
    let resized = fit_within(source, spec.max_dim);
    let (encoded, ext, content_type) = encode_variant(&resized, mime, spec.jpeg_quality)?;
    let key = format!("images/{id}/{}.{ext}", spec.name);
    storage.put(&key, &encoded, content_type).await?;
    Ok(ImageVariant {
        url: storage.url_for(&key),
        width: resized.width(),
        height: resized.height(),
        size: encoded.len(),
    })
}

/// One file pulled out of a multipart request.
struct UploadPart {
    filename: String,
    mime: String,
    bytes: Vec<u8>,
}

async fn collect_parts(mut multipart: Multipart) -> Result<Vec<UploadPart>, ApiError> {
    let mut parts = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        if field.file_name().is_none() {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let mime = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read upload: {e}")))?;
        parts.push(UploadPart {
            filename,
            mime,
            bytes: bytes.to_vec(),
        });
    }
    Ok(parts)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /images` — single file upload.
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedImage>), ApiError> {
    let parts = collect_parts(multipart).await?;
    let part = parts.into_iter().next().ok_or(UploadError::MissingFile)?;

    let uploaded = process_and_store(state.storage.as_ref(), &part.mime, &part.bytes).await?;
    Ok((StatusCode::CREATED, Json(uploaded)))
}

/// `POST /images/batch` — multi-file upload with a partial-success summary.
pub async fn upload_batch(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BatchUploadResponse>, ApiError> {
    let parts = collect_parts(multipart).await?;
    if parts.is_empty() {
        return Err(UploadError::MissingFile.into());
    }

    let mut uploaded = Vec::new();
    let mut errors = Vec::new();
    for part in parts {
        match process_and_store(state.storage.as_ref(), &part.mime, &part.bytes).await {
            Ok(result) => uploaded.push(result),
            Err(e) => {
                tracing::warn!(filename = %part.filename, "batch upload entry failed: {e}");
                errors.push(BatchUploadFailure {
                    filename: part.filename,
                    error: e.to_string(),
                });
            }
        }
    }
    Ok(Json(BatchUploadResponse { uploaded, errors }))
}

/// `DELETE /images/{id}` — remove all stored variants of an image.
pub async fn delete_image(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(ApiError::BadRequest("invalid image id".to_string()));
    }
    delete_variants(state.storage.as_ref(), &id)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Remove every stored variant of an image id.
///
/// # Errors
///
/// Returns the storage error when the backing store fails.
pub async fn delete_variants(storage: &dyn StorageBackend, id: &str) -> Result<(), StorageError> {
    storage.delete_prefix(&format!("images/{id}")).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FilesystemStorage;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([120, 40, 200, 255]),
        ));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .expect("encode test png");
        buf
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([10, 180, 90]),
        ));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
            .expect("encode test jpeg");
        buf
    }

    #[tokio::test]
    async fn test_small_image_is_never_upscaled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FilesystemStorage::new(dir.path(), "/uploads").expect("storage");

        let uploaded = process_and_store(&storage, "image/png", &png_bytes(64, 48))
            .await
            .expect("process");

        for variant in [
            &uploaded.variants.original,
            &uploaded.variants.display,
            &uploaded.variants.thumbnail,
        ] {
            assert_eq!(variant.width, 64);
            assert_eq!(variant.height, 48);
            assert!(variant.size > 0);
        }
        assert!(uploaded.id.starts_with("img_"));
        assert!(uploaded
            .variants
            .thumbnail
            .url
            .starts_with("/uploads/images/"));
    }

    #[tokio::test]
    async fn test_large_image_downscales_per_tier() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FilesystemStorage::new(dir.path(), "/uploads").expect("storage");

        let uploaded = process_and_store(&storage, "image/jpeg", &jpeg_bytes(2000, 1000))
            .await
            .expect("process");

        // Under the original cap: untouched
        assert_eq!(uploaded.variants.original.width, 2000);
        // Display capped at 1200 on the long edge, aspect preserved
        assert_eq!(uploaded.variants.display.width, 1200);
        assert_eq!(uploaded.variants.display.height, 600);
        // Thumbnail capped at 300
        assert_eq!(uploaded.variants.thumbnail.width, 300);
        assert_eq!(uploaded.variants.thumbnail.height, 150);
    }

    #[tokio::test]
    async fn test_png_keeps_png_jpeg_gets_jpeg() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FilesystemStorage::new(dir.path(), "/uploads").expect("storage");

        let png = process_and_store(&storage, "image/png", &png_bytes(10, 10))
            .await
            .expect("png");
        assert!(png.variants.display.url.ends_with(".png"));

        let jpeg = process_and_store(&storage, "image/jpeg", &jpeg_bytes(10, 10))
            .await
            .expect("jpeg");
        assert!(jpeg.variants.display.url.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_unsupported_type_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FilesystemStorage::new(dir.path(), "/uploads").expect("storage");

        let result = process_and_store(&storage, "image/svg+xml", b"<svg/>").await;
        assert!(matches!(result, Err(UploadError::UnsupportedType(_))));
    }

    #[tokio::test]
    async fn test_undecodable_bytes_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FilesystemStorage::new(dir.path(), "/uploads").expect("storage");

        let result = process_and_store(&storage, "image/jpeg", b"not an image").await;
        assert!(matches!(result, Err(UploadError::Decode(_))));
    }

    #[tokio::test]
    async fn test_delete_variants_cleans_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FilesystemStorage::new(dir.path(), "/uploads").expect("storage");

        let uploaded = process_and_store(&storage, "image/png", &png_bytes(10, 10))
            .await
            .expect("process");
        let image_dir = dir.path().join("images").join(&uploaded.id);
        assert!(image_dir.exists());

        delete_variants(&storage, &uploaded.id).await.expect("delete");
        assert!(!image_dir.exists());
    }
}
