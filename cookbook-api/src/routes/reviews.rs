use super::check_write_quota;
use crate::error::ApiError;
use crate::session;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cookbook_app::domain::{RatingSummary, Review};
use cookbook_app::AppContext;
use cookbook_errors::AppError;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ReviewRequest {
    pub rating: i32,
    pub comment: String,
}

#[derive(Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
    pub summary: RatingSummary,
    /// Average formatted for display, e.g. `4.0`.
    pub average: String,
    /// The caller's own review, for prefilling the form.
    pub my_review: Option<Review>,
}

/// GET /api/recipes/{id}/reviews
pub async fn list(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ReviewsResponse>, ApiError> {
    let auth = session::auth_context(&session).await?;
    if ctx.recipes.get(id).await?.is_none() {
        return Err(AppError::NotFound.into());
    }

    let detail = ctx.reviews.detail(id).await?;
    let my_review = match auth.user() {
        Some(user) => ctx.reviews.user_review(id, &user.uid).await?,
        None => None,
    };

    Ok(Json(ReviewsResponse {
        average: detail.summary.display_average(),
        reviews: detail.reviews,
        summary: detail.summary,
        my_review,
    }))
}

/// PUT /api/recipes/{id}/reviews. Creates the caller's review or replaces it.
pub async fn submit(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<Review>, ApiError> {
    let auth = session::auth_context(&session).await?;
    check_write_quota(&ctx, &auth)?;
    let review = ctx
        .reviews
        .add_or_update(&auth, id, req.rating, &req.comment)
        .await?;
    Ok(Json(review))
}

/// DELETE /api/recipes/{id}/reviews/{review_id}
pub async fn remove(
    State(ctx): State<AppContext>,
    session: Session,
    Path((id, review_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let auth = session::auth_context(&session).await?;
    ctx.reviews.remove(&auth, id, review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
