//! Object storage for recipe photos.
//!
//! The host receives the raw picture and hands back a public HTTPS URL; the
//! rest of the crate never touches image bytes beyond passing them through.

mod cloudinary;
mod fake;
mod types;

pub use cloudinary::CloudinaryClient;
pub use fake::FakeImageHost;

use crate::domain::ImageUpload;
use async_trait::async_trait;
use cookbook_errors::AppError;
use std::fmt;

#[async_trait]
pub trait ImageHost: Send + Sync + fmt::Debug {
    /// Uploads the picture and returns its public URL. Failures are reported
    /// as [`AppError::ImageUploadFailed`].
    async fn upload(&self, image: ImageUpload) -> Result<String, AppError>;

    fn host_name(&self) -> &'static str;
}
