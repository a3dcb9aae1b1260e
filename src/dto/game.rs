use std::path::Path;

use serde::{Deserialize, Serialize};

// ============ Response DTOs ============

/// A catalog entry as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Server-assigned identifier
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Server-relative path, e.g. `/uploads/x.png`
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_urls: Option<Vec<String>>,
}

impl Game {
    /// Video links, empty when the server sent none.
    #[must_use]
    pub fn videos(&self) -> &[String] {
        self.video_urls.as_deref().unwrap_or_default()
    }
}

// ============ Request DTOs ============

/// POST /api/games - multipart create request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub name: String,
    pub description: String,
    pub image: Option<ImageFile>,
    /// Sent as a JSON array in the `videoUrls` field when present
    pub video_urls: Option<Vec<String>>,
}

/// An image selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Build an image from in-memory bytes, deriving the content type from the file name.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn from_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;

        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Self::new(file_name, bytes))
    }
}

/// Map a file extension to an image content type.
fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
