use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub secure_url: Option<String>,
    pub error: Option<UploadError>,
}

#[derive(Debug, Deserialize)]
pub struct UploadError {
    pub message: String,
}
