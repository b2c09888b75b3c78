//! Book persistence: one JSON file per project, CRUD over the data directory.

use std::path::{Path, PathBuf};

use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::AppState;

/// A stored book: project payload plus server-side bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Client-chosen book id.
    pub id: String,
    /// Book title.
    pub title: String,
    /// The project payload (`{ zineConfig, mediaAssets, pages }`); stored
    /// verbatim, the core codec owns its interpretation.
    pub data: Value,
    /// Free-form client metadata.
    #[serde(default)]
    pub metadata: Value,
    /// Owner, when the deployment runs with accounts.
    #[serde(default)]
    pub user_id: Option<String>,
    /// First-save timestamp, RFC 3339. Preserved across upserts.
    pub created_at: String,
    /// Last-save timestamp, RFC 3339.
    pub updated_at: String,
}

/// Listing entry for a stored book.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    /// Book id.
    pub id: String,
    /// Book title.
    pub title: String,
    /// Last-save timestamp.
    pub updated_at: String,
    /// First-save timestamp.
    pub created_at: String,
    /// Owner.
    pub user_id: Option<String>,
}

/// Save request body; `id` and `data` are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBookRequest {
    /// Book id.
    pub id: Option<String>,
    /// Title; defaults to "Untitled".
    pub title: Option<String>,
    /// Project payload.
    pub data: Option<Value>,
    /// Free-form metadata.
    pub metadata: Option<Value>,
    /// Owner.
    pub user_id: Option<String>,
}

/// File-per-book store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct BookStore {
    data_dir: PathBuf,
}

impl BookStore {
    /// Open (and create if needed) the store directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// The directory books are stored in.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", sanitize_filename(id)))
    }

    /// List all books, newest first. Unparsable files are skipped with a
    /// warning rather than failing the whole listing.
    pub async fn list(&self) -> std::io::Result<Vec<BookSummary>> {
        let mut entries = tokio::fs::read_dir(&self.data_dir).await?;
        let mut books = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let contents = tokio::fs::read_to_string(&path).await?;
            match serde_json::from_str::<Book>(&contents) {
                Ok(book) => books.push(BookSummary {
                    id: book.id,
                    title: book.title,
                    updated_at: book.updated_at,
                    created_at: book.created_at,
                    user_id: book.user_id,
                }),
                Err(e) => {
                    tracing::warn!("skipping unparsable book file {}: {e}", path.display());
                }
            }
        }
        // RFC 3339 sorts lexicographically
        books.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(books)
    }

    /// Load a book by id.
    pub async fn get(&self, id: &str) -> std::io::Result<Option<Book>> {
        let path = self.path_for(id);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let book = serde_json::from_str(&contents)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
                Ok(Some(book))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Upsert a book. An existing record keeps its original `createdAt` and
    /// owner; `updatedAt` is stamped with the current time.
    pub async fn save(
        &self,
        id: String,
        title: String,
        data: Value,
        metadata: Value,
        user_id: Option<String>,
    ) -> std::io::Result<Book> {
        let now = Utc::now().to_rfc3339();
        let mut created_at = now.clone();
        let mut user_id = user_id;

        if let Some(existing) = self.get(&id).await.unwrap_or_default() {
            created_at = existing.created_at;
            if existing.user_id.is_some() {
                user_id = existing.user_id;
            }
        }

        let book = Book {
            id,
            title,
            data,
            metadata,
            user_id,
            created_at,
            updated_at: now,
        };
        let json = serde_json::to_string_pretty(&book)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        tokio::fs::write(self.path_for(&book.id), json).await?;
        tracing::info!(id = %book.id, title = %book.title, "book saved");
        Ok(book)
    }

    /// Delete a book by id. Returns whether a record existed.
    pub async fn delete(&self, id: &str) -> std::io::Result<bool> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => {
                tracing::info!(id, "book deleted");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Sanitize a book id for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /books`
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookSummary>>, ApiError> {
    let books = state
        .books
        .list()
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok(Json(books))
}

/// `GET /books/{id}`
pub async fn get_book(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .books
        .get(&id)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?;
    Ok(Json(book))
}

/// `POST /books`
pub async fn save_book(
    State(state): State<AppState>,
    Json(request): Json<SaveBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let id = request
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Book id is required".to_string()))?;
    let data = request
        .data
        .ok_or_else(|| ApiError::BadRequest("Book data is required".to_string()))?;

    let book = state
        .books
        .save(
            id,
            request.title.unwrap_or_else(|| "Untitled".to_string()),
            data,
            request.metadata.unwrap_or_else(|| Value::Object(Default::default())),
            request.user_id,
        )
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// `DELETE /books/{id}`
pub async fn delete_book(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<Value>, ApiError> {
    let existed = state
        .books
        .delete(&id)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;
    if !existed {
        return Err(ApiError::NotFound("Book not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
