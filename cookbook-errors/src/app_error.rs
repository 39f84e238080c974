use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Sign in required")]
    Unauthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Only the author can change this")]
    Forbidden,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found")]
    NotFound,

    #[error("Remote service failed: {0}")]
    RemoteFailure(String),

    #[error("Image upload failed: {0}")]
    ImageUploadFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn remote(err: impl std::fmt::Display) -> Self {
        Self::RemoteFailure(err.to_string())
    }

    pub fn user_message(&self) -> &str {
        match self {
            Self::Unauthenticated => "Please sign in first.",
            Self::InvalidCredentials => "Email or password is incorrect.",
            Self::Forbidden => "You can only change your own recipes and reviews.",
            Self::Validation(msg) => msg,
            Self::NotFound => "We couldn't find that.",
            Self::RemoteFailure(_) => "Something went wrong talking to the server. Try again.",
            Self::ImageUploadFailed(_) => "The image couldn't be uploaded. Try again.",
            Self::Internal(_) => "Something went wrong on our side. Try again later.",
        }
    }
}

#[cfg(feature = "http")]
mod http_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::Unauthenticated | AppError::InvalidCredentials => {
                    StatusCode::UNAUTHORIZED
                }
                AppError::Forbidden => StatusCode::FORBIDDEN,
                AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::RemoteFailure(_) | AppError::ImageUploadFailed(_) => {
                    StatusCode::BAD_GATEWAY
                }
                AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            let message = self.user_message().to_string();
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}
