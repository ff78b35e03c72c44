use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::session::models::LogoutOutcome;
use crate::inbound::http::cookies::cleared_session_cookie;
use crate::inbound::http::cookies::session_token;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageResponseData;
use crate::inbound::http::router::AppState;

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let refresh_token = session_token(&jar);

    match state.session_service.logout(refresh_token.as_deref()).await {
        LogoutOutcome::NoSession => StatusCode::NO_CONTENT.into_response(),
        LogoutOutcome::Ended => (
            jar.add(cleared_session_cookie()),
            ApiSuccess::new(StatusCode::OK, MessageResponseData::new("Cookie cleared")),
        )
            .into_response(),
    }
}
