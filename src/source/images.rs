//! Remote image downloads with a disk cache.
//!
//! Images are keyed by the SHA-256 of their URL, so the same artwork used by
//! the podcast and several episodes is fetched once and shared by one file
//! node.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::traits::{HostError, ImageAsset, ImageLinker};
use crate::simplecast::DEFAULT_TIMEOUT;

/// Extensions we store images under
const EXTENSIONS: [&str; 4] = ["jpg", "png", "gif", "webp"];

/// Downloads images into a cache directory
pub struct CachedImageLinker {
    http_client: reqwest::Client,
    cache_dir: PathBuf,
}

impl CachedImageLinker {
    /// Create a linker caching into `cache_dir`
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self, HostError> {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| HostError::Image(format!("HTTP client: {}", e)))?;
        Ok(Self::with_client(http_client, cache_dir))
    }

    /// Create a linker with a preconfigured HTTP client
    pub fn with_client(http_client: reqwest::Client, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            http_client,
            cache_dir: cache_dir.into(),
        }
    }

    /// Default cache location (user cache directory)
    pub fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("simplecast-source")
            .join("images")
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Find a cached file for a key, whatever its extension
    fn cached_path(&self, key: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.cache_dir.join(format!("{}.{}", key, ext)))
            .find(|path| path.exists())
    }

    async fn download(&self, url: &str) -> Result<(Vec<u8>, String), HostError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| HostError::Image(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HostError::Image(format!(
                "{}: HTTP {}: {}",
                url,
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        let data = response
            .bytes()
            .await
            .map_err(|e| HostError::Image(format!("{}: {}", url, e)))?
            .to_vec();

        Ok((data, mime_type))
    }
}

#[async_trait]
impl ImageLinker for CachedImageLinker {
    async fn link(&self, parent_id: &str, url: &str) -> Result<ImageAsset, HostError> {
        let key = cache_key(url);

        if let Some(path) = self.cached_path(&key) {
            tracing::debug!("Image cache hit for {}", url);
            let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            return Ok(ImageAsset {
                node_id: file_node_id(&key),
                url: url.to_string(),
                mime_type: mime_for_extension(&path).to_string(),
                path,
                size,
            });
        }

        tracing::debug!("Downloading image for {} from {}", parent_id, url);
        let (data, mime_type) = self.download(url).await?;

        fs::create_dir_all(&self.cache_dir).map_err(|e| {
            HostError::Image(format!("create {}: {}", self.cache_dir.display(), e))
        })?;
        let path = self
            .cache_dir
            .join(format!("{}.{}", key, extension_for_mime(&mime_type)));
        fs::write(&path, &data)
            .map_err(|e| HostError::Image(format!("write {}: {}", path.display(), e)))?;

        Ok(ImageAsset {
            node_id: file_node_id(&key),
            url: url.to_string(),
            path,
            mime_type,
            size: data.len() as u64,
        })
    }
}

/// Cache key for a URL
fn cache_key(url: &str) -> String {
    Sha256::digest(url.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn file_node_id(key: &str) -> String {
    format!("File__{}", key)
}

fn extension_for_mime(mime_type: &str) -> &'static str {
    if mime_type.contains("png") {
        "png"
    } else if mime_type.contains("gif") {
        "gif"
    } else if mime_type.contains("webp") {
        "webp"
    } else {
        "jpg"
    }
}

fn mime_for_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}
