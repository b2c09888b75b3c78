//! Layout catalog endpoints: built-in browsing plus user-defined custom
//! layouts persisted as JSON files.

use std::path::Path;

use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use zine_core::{CategoryInfo, LayoutCatalog, LayoutCategory, LayoutTemplate};

use crate::error::ApiError;
use crate::AppState;

/// Load previously saved custom layouts from disk into the catalog.
///
/// Unparsable or invalid files are skipped with a warning; a missing
/// directory is treated as empty. Returns how many layouts were loaded.
///
/// # Errors
///
/// Returns an error when the directory exists but cannot be read.
pub fn load_custom_layouts(catalog: &mut LayoutCatalog, dir: &Path) -> std::io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }
    let mut loaded = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        let contents = std::fs::read_to_string(&path)?;
        match serde_json::from_str::<LayoutTemplate>(&contents) {
            Ok(template) => match catalog.register(template) {
                Ok(()) => loaded += 1,
                Err(e) => {
                    tracing::warn!("skipping invalid custom layout {}: {e}", path.display());
                }
            },
            Err(e) => {
                tracing::warn!("skipping unparsable custom layout {}: {e}", path.display());
            }
        }
    }
    Ok(loaded)
}

fn layout_path(dir: &Path, id: &str) -> std::path::PathBuf {
    let safe: String = id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    dir.join(format!("{safe}.json"))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /layouts` — every registered template.
pub async fn list_layouts(State(state): State<AppState>) -> Json<Vec<LayoutTemplate>> {
    let catalog = state.catalog.read().unwrap_or_else(std::sync::PoisonError::into_inner);
    Json(catalog.all().to_vec())
}

/// `GET /layouts/categories` — the fixed category set.
pub async fn list_categories() -> Json<Vec<CategoryInfo>> {
    Json(LayoutCatalog::categories())
}

/// `GET /layouts/custom` — user-defined templates only.
pub async fn list_custom(State(state): State<AppState>) -> Json<Vec<LayoutTemplate>> {
    let catalog = state.catalog.read().unwrap_or_else(std::sync::PoisonError::into_inner);
    Json(
        catalog
            .by_category(LayoutCategory::Custom)
            .into_iter()
            .cloned()
            .collect(),
    )
}

/// `POST /layouts/custom` — validate, register, and persist a template.
///
/// The template is forced into the `custom` category. Re-posting an existing
/// id replaces the stored layout. Validation failures return the complete
/// error set.
pub async fn create_custom(
    State(state): State<AppState>,
    Json(mut template): Json<LayoutTemplate>,
) -> Result<(StatusCode, Json<LayoutTemplate>), ApiError> {
    template.category = LayoutCategory::Custom;

    // Validate before touching the catalog so a bad update cannot evict the
    // stored layout it was meant to replace
    template
        .validate()
        .map_err(|e| ApiError::LayoutValidation(e.errors))?;

    {
        let mut catalog = state
            .catalog
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        catalog.remove(&template.id);
        catalog
            .register(template.clone())
            .map_err(|e| ApiError::LayoutValidation(e.errors))?;
    }

    let json = serde_json::to_string_pretty(&template)
        .map_err(|e| ApiError::Internal(e.into()))?;
    tokio::fs::create_dir_all(&state.layouts_dir)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;
    tokio::fs::write(layout_path(&state.layouts_dir, &template.id), json)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;

    tracing::info!(id = %template.id, "custom layout saved");
    Ok((StatusCode::CREATED, Json(template)))
}

/// `DELETE /layouts/custom/{id}` — unregister and remove from disk.
pub async fn delete_custom(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<Value>, ApiError> {
    {
        let mut catalog = state
            .catalog
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let is_custom = catalog
            .get_by_id(&id)
            .is_some_and(|t| t.category == LayoutCategory::Custom);
        if !is_custom {
            return Err(ApiError::NotFound("Custom layout not found".to_string()));
        }
        catalog.remove(&id);
    }

    match tokio::fs::remove_file(layout_path(&state.layouts_dir, &id)).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(ApiError::Internal(e.into())),
    }
    Ok(Json(serde_json::json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use zine_core::SlotSpec;

    fn custom_template(id: &str) -> LayoutTemplate {
        LayoutTemplate {
            id: id.to_string(),
            name: "Mine".to_string(),
            icon: "\u{2b50}".to_string(),
            category: LayoutCategory::Custom,
            slots: vec![SlotSpec::image(0.0, 0.0, 100.0, 100.0)],
            text_elements: Vec::new(),
            aspect_ratio: None,
        }
    }

    #[test]
    fn test_load_custom_layouts_skips_bad_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = custom_template("my-layout");
        std::fs::write(
            dir.path().join("my-layout.json"),
            serde_json::to_string(&good).expect("encode"),
        )
        .expect("write good");
        std::fs::write(dir.path().join("broken.json"), "{nope").expect("write broken");

        let mut invalid = custom_template("invalid");
        invalid.slots[0].x = 400.0;
        std::fs::write(
            dir.path().join("invalid.json"),
            serde_json::to_string(&invalid).expect("encode"),
        )
        .expect("write invalid");

        let mut catalog = LayoutCatalog::new();
        let loaded = load_custom_layouts(&mut catalog, dir.path()).expect("load");
        assert_eq!(loaded, 1);
        assert!(catalog.get_by_id("my-layout").is_some());
        assert!(catalog.get_by_id("invalid").is_none());
    }

    #[test]
    fn test_load_from_missing_dir_is_empty() {
        let mut catalog = LayoutCatalog::new();
        let loaded =
            load_custom_layouts(&mut catalog, Path::new("/nonexistent/layouts")).expect("load");
        assert_eq!(loaded, 0);
    }

    #[test]
    fn test_layout_path_sanitizes() {
        let dir = Path::new("/data/layouts");
        assert_eq!(
            layout_path(dir, "../evil"),
            dir.join("___evil.json")
        );
    }
}
