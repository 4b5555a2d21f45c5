mod cloudinary;
mod local;

use std::sync::Arc;

use crate::config::ImageStoreConfig;

pub use cloudinary::CloudinaryStore;
pub use local::LocalStore;

/// Largest player photo accepted for upload (5 MiB).
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Folder that player photos are filed under.
pub const PLAYER_PHOTO_FOLDER: &str = "players";

/// An image ready for upload: its MIME type and base64-encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime: String,
    pub base64: String,
}

impl ImagePayload {
    /// Encode raw bytes as an upload payload.
    #[must_use]
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        use base64::Engine as _;

        Self {
            mime: mime.to_string(),
            base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// `data:<mime>;base64,<payload>` form, as accepted by hosted image services.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }

    /// File extension derived from the MIME subtype, e.g. `image/png` → `png`.
    #[must_use]
    pub fn extension(&self) -> &str {
        match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/svg+xml" => "svg",
            other => other
                .strip_prefix("image/")
                .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
                .unwrap_or("bin"),
        }
    }
}

/// Durable storage for uploaded images.
///
/// Implementations return a URL that can be stored on the record and served to
/// browsers as-is.
#[async_trait::async_trait]
pub trait ImageStore: std::fmt::Debug + Send + Sync {
    /// Store `payload` under `folder` and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the image could not be stored.
    async fn upload(&self, payload: &ImagePayload, folder: &str) -> anyhow::Result<String>;
}

/// Build the image store selected by configuration.
#[must_use]
pub fn from_config(config: &ImageStoreConfig) -> Arc<dyn ImageStore> {
    match config {
        ImageStoreConfig::Cloudinary {
            cloud_name,
            upload_preset,
        } => Arc::new(CloudinaryStore::new(cloud_name, upload_preset)),
        ImageStoreConfig::Local {
            upload_dir,
            public_base_url,
        } => Arc::new(LocalStore::new(upload_dir.clone(), public_base_url)),
    }
}
