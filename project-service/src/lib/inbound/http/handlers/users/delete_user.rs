use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::cookie::CookieJar;

use crate::inbound::http::cookies::cleared_session_cookie;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<MessageResponseData>), ApiError> {
    state.user_service.delete_user(&auth_user.user_id).await?;

    Ok((
        jar.add(cleared_session_cookie()),
        ApiSuccess::new(StatusCode::OK, MessageResponseData::new("User deleted")),
    ))
}
