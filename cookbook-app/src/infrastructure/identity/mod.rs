//! Sign-up and sign-in against an external identity service.

mod fake;
mod firebase;
mod types;

pub use fake::FakeIdentityProvider;
pub use firebase::FirebaseAuthClient;

use crate::domain::AuthUser;
use async_trait::async_trait;
use cookbook_errors::AppError;
use std::fmt;

#[async_trait]
pub trait IdentityProvider: Send + Sync + fmt::Debug {
    /// Creates the account and sets its display name.
    async fn register(&self, name: &str, email: &str, password: &str)
        -> Result<AuthUser, AppError>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AppError>;

    fn provider_name(&self) -> &'static str;
}
