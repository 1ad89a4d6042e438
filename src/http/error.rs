use crate::libs::messages::Message;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Challenge sent with every 401.
pub const BASIC_AUTH_CHALLENGE: &str = r#"Basic realm="Login Required""#;

/// Errors returned by request handlers. Every variant renders as
/// `{"error": "..."}` with the matching status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: Message) -> Self {
        ApiError::Validation(message.to_string())
    }

    pub fn not_found(message: Message) -> Self {
        ApiError::NotFound(message.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::Validation(message) | ApiError::NotFound(message) => message.clone(),
            ApiError::Unauthorized => Message::AccessRestricted.to_string(),
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                Message::InternalServerError.to_string()
            }
        };

        let mut response = (status, Json(json!({ "error": message }))).into_response();
        if matches!(self, ApiError::Unauthorized) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_AUTH_CHALLENGE));
        }
        response
    }
}
