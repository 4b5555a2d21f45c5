use serde::{Deserialize, Serialize};

use super::{ImagePayload, ImageStore};

/// Unsigned uploads to a Cloudinary upload preset.
#[derive(Debug, Clone)]
pub struct CloudinaryStore {
    client: reqwest::Client,
    endpoint: String,
    upload_preset: String,
}

#[derive(Serialize)]
struct UploadForm<'a> {
    file: String,
    upload_preset: &'a str,
    folder: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryStore {
    #[must_use]
    pub fn new(cloud_name: &str, upload_preset: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("https://api.cloudinary.com/v1_1/{cloud_name}/image/upload"),
            upload_preset: upload_preset.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ImageStore for CloudinaryStore {
    async fn upload(&self, payload: &ImagePayload, folder: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&UploadForm {
                file: payload.data_uri(),
                upload_preset: &self.upload_preset,
                folder,
            })
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Image upload request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Image service returned {status}: {body}"));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Unexpected image service response: {e}"))?;

        tracing::debug!(folder, url = %uploaded.secure_url, "image uploaded");
        Ok(uploaded.secure_url)
    }
}
