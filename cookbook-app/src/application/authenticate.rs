use super::store_error;
use crate::domain::{AuthUser, User};
use crate::infrastructure::db::UserRepository;
use crate::infrastructure::identity::IdentityProvider;
use crate::infrastructure::security::InputSanitizer;
use cookbook_errors::AppError;
use std::sync::Arc;

/// Registration and sign-in. Passwords never leave this service except on
/// the way to the identity provider.
pub struct Accounts {
    provider: Arc<dyn IdentityProvider>,
    users: UserRepository,
}

impl Accounts {
    pub fn new(provider: Arc<dyn IdentityProvider>, users: UserRepository) -> Self {
        Self { provider, users }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AppError> {
        let name = InputSanitizer::validate_name(name)?;
        let email = InputSanitizer::validate_email(email)?;
        InputSanitizer::validate_password(password)?;

        let user = self.provider.register(&name, &email, password).await?;

        let profile = User::new(user.uid.clone(), user.email.clone(), name);
        self.users.upsert(&profile).await.map_err(store_error)?;

        tracing::info!(
            "Registered user {} via {}",
            user.uid,
            self.provider.provider_name()
        );
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        let email = InputSanitizer::validate_email(email)?;
        if password.is_empty() {
            return Err(AppError::validation("Please enter your password"));
        }

        let user = self.provider.login(&email, password).await.inspect_err(|e| {
            tracing::warn!("Sign-in failed for {}: {}", email, e);
        })?;

        tracing::info!("User {} signed in", user.uid);
        Ok(user)
    }

    pub async fn profile(&self, uid: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .find_by_uid(uid)
            .await
            .map_err(store_error)?
            .map(User::from))
    }
}
