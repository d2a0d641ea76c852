use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

use crate::templates;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Wiki(#[from] gitwiki::Error),

    #[error("background task failed: {0}")]
    Join(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // A missing page is edited into existence.
            AppError::Wiki(gitwiki::Error::NotFound(name)) => {
                Redirect::to(&format!("/{}/edit", templates::encode_segment(&name)))
                    .into_response()
            }
            AppError::Wiki(gitwiki::Error::InvalidPageName(msg)) => {
                (StatusCode::BAD_REQUEST, format!("invalid page name: {}", msg)).into_response()
            }
            AppError::Wiki(gitwiki::Error::IsADirectory(name)) => {
                (StatusCode::CONFLICT, format!("is a directory: {}", name)).into_response()
            }
            err => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
