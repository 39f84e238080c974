use crate::error::ApiError;
use crate::session;
use axum::extract::{Path, State};
use axum::Json;
use cookbook_app::domain::{FavoriteEntry, FavoriteStatus};
use cookbook_app::AppContext;
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ToggleRequest {
    /// The state the client is showing. Looked up when omitted.
    pub currently_favorite: Option<bool>,
}

/// GET /api/favorites
pub async fn list(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Json<Vec<FavoriteEntry>>, ApiError> {
    let auth = session::auth_context(&session).await?;
    Ok(Json(ctx.favorites.favorites(&auth).await?))
}

/// GET /api/recipes/{id}/favorite
pub async fn status(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteStatus>, ApiError> {
    let auth = session::auth_context(&session).await?;
    let favorite = ctx.favorites.is_favorite(&auth, id).await?;
    Ok(Json(FavoriteStatus {
        recipe_id: id,
        favorite,
    }))
}

/// POST /api/recipes/{id}/favorite
pub async fn toggle(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<FavoriteStatus>, ApiError> {
    let auth = session::auth_context(&session).await?;
    let currently_favorite = match req.currently_favorite {
        Some(state) => state,
        None => ctx.favorites.is_favorite(&auth, id).await?,
    };
    Ok(Json(ctx.favorites.toggle(&auth, id, currently_favorite).await?))
}
