use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

/// Request-fatal failures. Validation rejections and creator-name
/// mismatches are not errors — those branches re-render a view.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("wall not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound => (
                StatusCode::NOT_FOUND,
                Html("<h1>Wall not found</h1>".to_string()),
            )
                .into_response(),
            WebError::Internal(err) => {
                error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Internal server error</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}
