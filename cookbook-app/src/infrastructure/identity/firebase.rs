use super::types::{AccountResponse, ErrorEnvelope, PasswordRequest, UpdateProfileRequest};
use super::IdentityProvider;
use crate::domain::AuthUser;
use async_trait::async_trait;
use cookbook_errors::AppError;
use serde::Serialize;

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Email/password accounts through the Firebase Identity Toolkit REST API.
#[derive(Debug, Clone)]
pub struct FirebaseAuthClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirebaseAuthClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(IDENTITY_TOOLKIT_URL, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn call<B: Serialize>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<AccountResponse, AppError> {
        let response = self
            .http_client
            .post(format!("{}/accounts:{}", self.base_url, method))
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(AppError::remote)?;

        if !response.status().is_success() {
            let status = response.status();
            let envelope: Option<ErrorEnvelope> = response.json().await.ok();
            let code = envelope
                .map(|e| e.error.message)
                .unwrap_or_else(|| status.to_string());
            tracing::warn!("Identity provider rejected accounts:{}: {}", method, code);
            return Err(map_error_code(&code));
        }

        response.json().await.map_err(AppError::remote)
    }
}

/// Firebase reports failures as upper-case codes, sometimes followed by
/// ` : detail`.
fn map_error_code(code: &str) -> AppError {
    let head = code.split(':').next().unwrap_or(code).trim();
    match head {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED" => {
            AppError::InvalidCredentials
        }
        "EMAIL_EXISTS" => AppError::validation("That email is already registered"),
        "INVALID_EMAIL" => AppError::validation("Please enter a valid email"),
        "WEAK_PASSWORD" => AppError::validation("Password should be at least 6 characters"),
        _ => AppError::RemoteFailure(format!("identity provider: {}", code)),
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AppError> {
        let account = self
            .call(
                "signUp",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;

        let id_token = account
            .id_token
            .as_deref()
            .ok_or_else(|| AppError::remote("sign-up response carried no id token"))?;
        self.call(
            "update",
            &UpdateProfileRequest {
                id_token,
                display_name: name,
                return_secure_token: false,
            },
        )
        .await?;

        tracing::info!("Registered account {}", account.local_id);
        Ok(AuthUser {
            uid: account.local_id,
            email: account.email,
            display_name: Some(name.to_string()),
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        let account = self
            .call(
                "signInWithPassword",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;

        Ok(AuthUser {
            uid: account.local_id,
            email: account.email,
            display_name: account.display_name.filter(|n| !n.is_empty()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "firebase"
    }
}
