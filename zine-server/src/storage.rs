//! Pluggable blob storage behind the upload pipeline.
//!
//! The filesystem backend is the default; the trait is the seam a future
//! object-storage provider would implement.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The key would escape the storage root or contains invalid characters.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Blob storage for uploaded image variants.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store a blob under `key`.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError>;

    /// Delete the blob at `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every blob under `prefix`. Missing prefixes are not an error.
    async fn delete_prefix(&self, prefix: &str) -> Result<(), StorageError>;

    /// Public URL the stored blob is served from.
    fn url_for(&self, key: &str) -> String;
}

/// Keys are relative paths: alphanumerics, `.`, `_`, `-`, and `/` separators,
/// with no empty or dot-only segments.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('/')
        && key.split('/').all(|segment| {
            !segment.is_empty()
                && !segment.chars().all(|c| c == '.')
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        });
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Stores blobs as files under a root directory, served from a public base
/// path (e.g. `/uploads`).
#[derive(Debug, Clone)]
pub struct FilesystemStorage {
    root: PathBuf,
    public_base: String,
}

impl FilesystemStorage {
    /// Create the backend, ensuring the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the root directory cannot be created.
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            public_base: public_base.into(),
        })
    }

    /// The directory blobs are stored under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl StorageBackend for FilesystemStorage {
    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(key, size = bytes.len(), "blob stored");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match tokio::fs::remove_file(self.root.join(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<(), StorageError> {
        validate_key(prefix)?;
        match tokio::fs::remove_dir_all(self.root.join(prefix)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_roundtrip_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FilesystemStorage::new(dir.path(), "/uploads").expect("storage");

        storage
            .put("images/img_1/display.jpg", b"bytes", "image/jpeg")
            .await
            .expect("put");

        let on_disk = std::fs::read(dir.path().join("images/img_1/display.jpg")).expect("read");
        assert_eq!(on_disk, b"bytes");
        assert_eq!(
            storage.url_for("images/img_1/display.jpg"),
            "/uploads/images/img_1/display.jpg"
        );
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FilesystemStorage::new(dir.path(), "/uploads").expect("storage");
        storage.delete("images/none.jpg").await.expect("delete");
        storage.delete_prefix("images/img_x").await.expect("prefix");
    }

    #[tokio::test]
    async fn test_delete_prefix_removes_variants() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FilesystemStorage::new(dir.path(), "/uploads").expect("storage");
        for variant in ["original.jpg", "display.jpg", "thumbnail.jpg"] {
            storage
                .put(&format!("images/img_2/{variant}"), b"x", "image/jpeg")
                .await
                .expect("put");
        }

        storage.delete_prefix("images/img_2").await.expect("delete");
        assert!(!dir.path().join("images/img_2").exists());
    }

    #[tokio::test]
    async fn test_traversal_keys_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FilesystemStorage::new(dir.path(), "/uploads").expect("storage");

        for key in ["../escape.jpg", "/absolute.jpg", "a//b.jpg", "a/../b.jpg", ""] {
            let result = storage.put(key, b"x", "image/jpeg").await;
            assert!(
                matches!(result, Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
