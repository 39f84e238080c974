use cookbook_errors::AppError;
use serde::{Deserialize, Serialize};

/// Profile stored alongside the identity provider account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    pub fn new(uid: String, email: String, name: String) -> Self {
        Self {
            uid,
            email,
            name,
            created_at: None,
        }
    }
}

/// A signed-in user as returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl AuthUser {
    /// Name shown next to the user's reviews.
    pub fn display_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or("Anonymous"),
        }
    }
}

/// Who is calling. Passed explicitly into every operation that needs an identity.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    user: Option<AuthUser>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: AuthUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> Result<&AuthUser, AppError> {
        self.user.as_ref().ok_or(AppError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_context_requires_sign_in() {
        let ctx = AuthContext::anonymous();
        assert_eq!(ctx.require_user().unwrap_err(), AppError::Unauthenticated);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = AuthUser {
            uid: "u1".into(),
            email: "ana@example.com".into(),
            display_name: None,
        };
        assert_eq!(user.display_name(), "ana");

        let named = AuthUser {
            display_name: Some("Ana".into()),
            ..user
        };
        assert_eq!(named.display_name(), "Ana");
    }
}
