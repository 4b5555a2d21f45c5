use std::path::PathBuf;

use base64::Engine as _;
use uuid::Uuid;

use super::{ImagePayload, ImageStore};

/// Writes images under a local directory served at `/uploads`.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStore {
    #[must_use]
    pub fn new(root: PathBuf, public_base_url: &str) -> Self {
        Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ImageStore for LocalStore {
    async fn upload(&self, payload: &ImagePayload, folder: &str) -> anyhow::Result<String> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&payload.base64)
            .map_err(|e| anyhow::anyhow!("Image payload is not valid base64: {e}"))?;

        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create upload dir: {e}"))?;

        let file_name = format!("{}.{}", Uuid::new_v4(), payload.extension());
        tokio::fs::write(dir.join(&file_name), &bytes)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write file: {e}"))?;

        Ok(format!("{}/uploads/{folder}/{file_name}", self.public_base_url))
    }
}
