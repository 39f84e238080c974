/// A picture picked by the user, handed to the image host as-is.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("recipe_{}.jpg", chrono::Utc::now().timestamp_millis()),
            content_type: "image/jpeg".to_string(),
            bytes,
        }
    }
}
