use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::AccessTokenResponseData;
use crate::inbound::http::cookies::session_token;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<ApiSuccess<AccessTokenResponseData>, ApiError> {
    let refresh_token = session_token(&jar);

    state
        .session_service
        .refresh(refresh_token.as_deref())
        .await
        .map_err(ApiError::from)
        .map(|access_token| {
            ApiSuccess::new(StatusCode::OK, AccessTokenResponseData { access_token })
        })
}
