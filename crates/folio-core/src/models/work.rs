use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Category;

/// Largest image accepted for upload (4 MiB).
pub const MAX_IMAGE_BYTES: u64 = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: i64,
    pub title: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "categoryId")]
    pub category_id: i64,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Embedded category, only present on list responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Work {
    /// Category name from the embedded category, if the backend sent one
    pub fn embedded_category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

/// Payload for `POST /works`, sent as a multipart form.
#[derive(Debug, Clone)]
pub struct NewWork {
    pub title: String,
    pub category_id: i64,
    pub image: Vec<u8>,
    pub file_name: String,
}

impl NewWork {
    pub fn new(title: impl Into<String>, category_id: i64, image: Vec<u8>, file_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category_id,
            image,
            file_name: file_name.into(),
        }
    }

    /// Read the image from disk, using its file name for the upload
    pub async fn from_path(title: impl Into<String>, category_id: i64, path: &Path) -> Result<Self> {
        let image = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image file: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self::new(title, category_id, image, file_name))
    }

    pub fn image_len(&self) -> u64 {
        self.image.len() as u64
    }

    /// MIME type guessed from the file extension
    pub fn mime_type(&self) -> &'static str {
        let ext = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }
}
