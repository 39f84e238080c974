//! Image host that never leaves the process. Used by tests and local runs
//! without Cloudinary credentials.

use super::ImageHost;
use crate::domain::ImageUpload;
use async_trait::async_trait;
use cookbook_errors::AppError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct FakeImageHost {
    uploads: AtomicUsize,
    failing: AtomicBool,
}

impl FakeImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose uploads always fail.
    pub fn failing() -> Self {
        let host = Self::new();
        host.set_failing(true);
        host
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn upload(&self, image: ImageUpload) -> Result<String, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::ImageUploadFailed("fake host is down".to_string()));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("https://images.test/{}/{}", n, image.file_name))
    }

    fn host_name(&self) -> &'static str {
        "fake"
    }
}
