//! Login, token validation, and the bearer guard for protected routes.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use axum::{routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::state::AppState;
use crate::auth::AuthError;

/// POST /api/auth/login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Always `Bearer`.
    #[serde(rename = "type")]
    pub token_type: &'static str,
    pub username: String,
    pub email: String,
}

/// GET /api/auth/validate response body.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub username: String,
}

/// POST /api/auth/login
///
/// Password verification is deliberately slow (argon2), so it runs on the
/// blocking pool like every other non-async operation.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let auth = state.auth.clone();
    let session = super::blocking(move || auth.login(&body.username, &body.password)).await?;

    Ok(Json(LoginResponse {
        token: session.token,
        token_type: "Bearer",
        username: session.username,
        email: session.email,
    }))
}

/// GET /api/auth/validate
///
/// Validates the bearer token in the `Authorization` header without
/// touching the repository.
async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ValidateResponse>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Auth(AuthError::InvalidToken))?;
    let username = state.auth.validate(token)?;
    Ok(Json(ValidateResponse {
        valid: true,
        username,
    }))
}

/// Middleware guarding every repository-touching route.
pub(crate) async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or(ApiError::Auth(AuthError::InvalidToken))?;
    state.auth.validate(token)?;
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Returns the authentication router (public routes).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/validate", get(validate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn missing_header_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn non_bearer_scheme_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcg==".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
