use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates access tokens and adds the user to request extensions.
///
/// An expired token answers 401, the cue for clients to call the refresh
/// endpoint; a forged or malformed one answers 403.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state
        .token_issuer
        .verify_access_token(token)
        .map_err(|e| {
            tracing::warn!("Access token rejected: {}", e);
            match e {
                auth::JwtError::Expired => ApiError::unauthorized(),
                _ => ApiError::forbidden(),
            }
            .into_response()
        })?;

    let user_id = UserId::from_string(&claims.user_id).map_err(|e| {
        tracing::error!("Failed to parse user ID from token: {}", e);
        ApiError::forbidden().into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized().into_response())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized().into_response())?;

    auth_str
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::unauthorized().into_response())
}
