use super::types::UploadResponse;
use super::ImageHost;
use crate::domain::ImageUpload;
use async_trait::async_trait;
use cookbook_errors::AppError;
use reqwest::multipart::{Form, Part};

const CLOUDINARY_API_URL: &str = "https://api.cloudinary.com/v1_1";

/// Unsigned uploads through a Cloudinary upload preset.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    http_client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

impl CloudinaryClient {
    pub fn new(cloud_name: &str, upload_preset: String) -> Self {
        Self::with_base_url(CLOUDINARY_API_URL, cloud_name, upload_preset)
    }

    pub fn with_base_url(base_url: &str, cloud_name: &str, upload_preset: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            upload_url: format!(
                "{}/{}/image/upload",
                base_url.trim_end_matches('/'),
                cloud_name
            ),
            upload_preset,
        }
    }
}

#[async_trait]
impl ImageHost for CloudinaryClient {
    async fn upload(&self, image: ImageUpload) -> Result<String, AppError> {
        let size = image.bytes.len();
        let file = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| AppError::ImageUploadFailed(e.to_string()))?;
        let form = Form::new()
            .part("file", file)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .http_client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::ImageUploadFailed(e.to_string()))?;

        let status = response.status();
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::ImageUploadFailed(e.to_string()))?;

        match body.secure_url {
            Some(url) if status.is_success() => {
                tracing::info!("Uploaded {} byte image to {}", size, url);
                Ok(url)
            }
            _ => {
                let reason = body
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| format!("HTTP {}", status));
                tracing::error!("Cloudinary upload failed: {}", reason);
                Err(AppError::ImageUploadFailed(reason))
            }
        }
    }

    fn host_name(&self) -> &'static str {
        "cloudinary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_url() {
        let client =
            CloudinaryClient::with_base_url("http://localhost:9000/", "demo", "preset".into());
        assert_eq!(client.upload_url, "http://localhost:9000/demo/image/upload");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_upload_failure() {
        let client = CloudinaryClient::with_base_url("http://127.0.0.1:9", "demo", "preset".into());
        let err = client
            .upload(ImageUpload::jpeg(vec![0xFF, 0xD8]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ImageUploadFailed(_)));
    }
}
