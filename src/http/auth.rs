use super::{error::ApiError, AppState};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Decodes an `Authorization: Basic <base64(user:password)>` value.
///
/// The password is everything after the first colon, so it may itself
/// contain colons.
pub fn parse_authorization_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

/// Rejects requests without matching basic credentials. A no-op when the
/// state carries no credentials.
pub async fn require_basic_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(expected) = state.credentials.as_deref() else {
        return next.run(req).await;
    };

    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_authorization_basic);

    match presented {
        Some((username, password)) if expected.matches(&username, &password) => next.run(req).await,
        presented => {
            let reason = if presented.is_none() { "missing_credentials" } else { "credentials_mismatch" };
            tracing::warn!(
                path = %req.uri().path(),
                method = %req.method(),
                reason,
                "Unauthorized request"
            );
            ApiError::Unauthorized.into_response()
        }
    }
}
