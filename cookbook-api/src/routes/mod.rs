mod auth;
mod favorites;
mod recipes;
mod reviews;

use crate::error::ApiError;
use crate::session;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use cookbook_app::domain::AuthContext;
use cookbook_app::AppContext;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// Recipe photos come straight from phone cameras.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn create_router(ctx: AppContext, secure_cookies: bool) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/api/recipes/{id}",
            get(recipes::get).put(recipes::update).delete(recipes::delete),
        )
        .route("/api/users/{uid}/recipes", get(recipes::list_by_creator))
        .route("/api/favorites", get(favorites::list))
        .route(
            "/api/recipes/{id}/favorite",
            get(favorites::status).post(favorites::toggle),
        )
        .route(
            "/api/recipes/{id}/reviews",
            get(reviews::list).put(reviews::submit),
        )
        .route(
            "/api/recipes/{id}/reviews/{review_id}",
            delete(reviews::remove),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(session::layer(secure_cookies)),
        )
        .with_state(ctx)
}

async fn health() -> &'static str {
    "ok"
}

/// Counts a write against the caller's quota. Anonymous callers are turned
/// away by the service itself.
fn check_write_quota(ctx: &AppContext, auth: &AuthContext) -> Result<(), ApiError> {
    if let Some(user) = auth.user() {
        ctx.rate_limiter.check_rate_limit(&user.uid)?;
    }
    Ok(())
}
