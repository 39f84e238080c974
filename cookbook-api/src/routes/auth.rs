use crate::error::ApiError;
use crate::session;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cookbook_app::domain::{AuthUser, User};
use cookbook_app::AppContext;
use cookbook_errors::AppError;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub user: AuthUser,
    pub profile: Option<User>,
}

/// POST /api/auth/register. Signs the new user in.
pub async fn register(
    State(ctx): State<AppContext>,
    session: Session,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthUser>), ApiError> {
    let user = ctx
        .accounts
        .register(&req.name, &req.email, &req.password)
        .await?;
    session::sign_in(&session, &user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/auth/login
pub async fn login(
    State(ctx): State<AppContext>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthUser>, ApiError> {
    let user = ctx.accounts.login(&req.email, &req.password).await?;
    session::sign_in(&session, &user).await?;
    Ok(Json(user))
}

/// POST /api/auth/logout
pub async fn logout(session: Session) -> Result<StatusCode, ApiError> {
    session::sign_out(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn me(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Json<MeResponse>, ApiError> {
    let auth = session::auth_context(&session).await?;
    let user = auth.user().cloned().ok_or(AppError::Unauthenticated)?;
    let profile = ctx.accounts.profile(&user.uid).await?;
    Ok(Json(MeResponse { user, profile }))
}
