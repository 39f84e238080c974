//! Cookie sessions. The session only remembers who signed in; every handler
//! turns that into an explicit [`AuthContext`].

use crate::error::ApiError;
use cookbook_app::domain::{AuthContext, AuthUser};
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

pub const SESSION_COOKIE: &str = "cookbook_session";
const USER_KEY: &str = "user";
const INACTIVITY_DAYS: i64 = 7;

pub fn layer(secure_cookies: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_secure(secure_cookies)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(INACTIVITY_DAYS)))
}

pub async fn auth_context(session: &Session) -> Result<AuthContext, ApiError> {
    let user: Option<AuthUser> = session.get(USER_KEY).await?;
    Ok(match user {
        Some(user) => AuthContext::signed_in(user),
        None => AuthContext::anonymous(),
    })
}

/// Stores the user under a fresh session id.
pub async fn sign_in(session: &Session, user: &AuthUser) -> Result<(), ApiError> {
    session.cycle_id().await?;
    session.insert(USER_KEY, user).await?;
    Ok(())
}

pub async fn sign_out(session: &Session) -> Result<(), ApiError> {
    session.flush().await?;
    Ok(())
}
