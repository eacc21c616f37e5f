//! Binary image storage.
//!
//! Records only hold a storage key (e.g. `restaurant/3f2a...c1.jpg`); the
//! bytes live behind an [`ImageStorage`] backend. Keys are generated by the
//! backend on upload and are always `"{namespace}/{uuid}.{ext}"`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::ImageFormat;
use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Namespace used for restaurant photos.
pub const NAMESPACE_RESTAURANT: &str = "restaurant";

/// Namespace used for article preview images.
pub const NAMESPACE_ARTICLE: &str = "article";

/// Namespace used for menu photos.
pub const NAMESPACE_MENU: &str = "menu";

/// Maximum namespace length.
const MAX_NAMESPACE_LEN: usize = 32;

/// Image formats accepted on upload.
const ACCEPTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::WebP,
    ImageFormat::Gif,
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct StoredImage {
    pub key: String,
    pub content_type: &'static str,
    pub size_bytes: u64,
}

/// A backend that stores and serves image bytes by key.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store `bytes` under a fresh key in `namespace`.
    ///
    /// Rejects payloads that are not a supported image format.
    async fn put(&self, namespace: &str, bytes: &[u8]) -> Result<StoredImage, CoreError>;

    /// Fetch the bytes for `key`, or `None` if nothing is stored there.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError>;

    /// Remove the bytes for `key`. Returns `true` if something was removed.
    async fn delete(&self, key: &str) -> Result<bool, CoreError>;
}

// ---------------------------------------------------------------------------
// Key and format helpers
// ---------------------------------------------------------------------------

/// Detect the image format from the leading bytes.
pub fn sniff_format(bytes: &[u8]) -> Result<ImageFormat, CoreError> {
    let format = image::guess_format(bytes)
        .map_err(|_| CoreError::Validation("Uploaded file is not a recognised image".into()))?;

    if ACCEPTED_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format {format:?}. Supported: PNG, JPEG, WebP, GIF"
        )))
    }
}

/// MIME type for a stored key, derived from its extension.
pub fn content_type_for_key(key: &str) -> Option<&'static str> {
    ImageFormat::from_path(key).ok().map(|f| f.to_mime_type())
}

/// Namespaces are short lowercase slugs.
pub fn validate_namespace(namespace: &str) -> Result<(), CoreError> {
    let valid = !namespace.is_empty()
        && namespace.len() <= MAX_NAMESPACE_LEN
        && namespace
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid storage namespace '{namespace}'"
        )))
    }
}

/// Keys are relative paths without `.`/`..` segments.
pub fn validate_key(key: &str) -> Result<(), CoreError> {
    let valid = !key.is_empty()
        && !key.contains('\\')
        && key
            .split('/')
            .all(|part| !part.is_empty() && part != "." && part != "..");

    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Invalid storage key '{key}'")))
    }
}

fn generate_key(namespace: &str, format: ImageFormat) -> String {
    let ext = format.extensions_str().first().copied().unwrap_or("bin");
    format!("{namespace}/{}.{ext}", uuid::Uuid::new_v4())
}

// ---------------------------------------------------------------------------
// Local filesystem backend
// ---------------------------------------------------------------------------

/// Stores images as plain files under a root directory.
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    root: PathBuf,
}

impl LocalImageStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CoreError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

fn io_error(action: &str, key: &str, err: std::io::Error) -> CoreError {
    tracing::error!(error = %err, key, "Image storage {action} failed");
    CoreError::Internal(format!("Failed to {action} image '{key}'"))
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn put(&self, namespace: &str, bytes: &[u8]) -> Result<StoredImage, CoreError> {
        validate_namespace(namespace)?;
        let format = sniff_format(bytes)?;

        let key = generate_key(namespace, format);
        let path = self.path_for(&key)?;

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| io_error("store", &key, e))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| io_error("store", &key, e))?;

        tracing::debug!(key = %key, size = bytes.len(), "Stored image");

        Ok(StoredImage {
            key,
            content_type: format.to_mime_type(),
            size_bytes: bytes.len() as u64,
        })
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", key, e)),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, CoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error("delete", key, e)),
        }
    }
}
