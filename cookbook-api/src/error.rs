use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use cookbook_app::infrastructure::security::RateLimitError;
use cookbook_errors::AppError;
use serde::Serialize;

/// Everything a handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    RateLimited(#[from] RateLimitError),
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::App(AppError::Internal(format!("session store: {err}")))
    }
}

#[derive(Serialize)]
struct RateLimitBody {
    message: String,
    retry_after_secs: u64,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::App(err) => {
                if err.status_code().is_server_error() {
                    tracing::error!("Request failed: {}", err);
                }
                err.into_response()
            }
            Self::RateLimited(err) => {
                let retry_after = err.retry_after_secs();
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after.to_string())],
                    Json(RateLimitBody {
                        message: err.user_message(),
                        retry_after_secs: retry_after,
                    }),
                )
                    .into_response()
            }
        }
    }
}
