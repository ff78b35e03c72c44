use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::AccessTokenResponseData;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::inbound::http::cookies::session_cookie;
use crate::inbound::http::handlers::required;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<AccessTokenResponseData>), ApiError> {
    let command = body.try_into_command()?;
    let session = state.session_service.login(command).await?;

    let jar = jar.add(session_cookie(
        session.refresh_token,
        state.token_issuer.refresh_lifetime(),
    ));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            AccessTokenResponseData {
                access_token: session.access_token,
            },
        ),
    ))
}

/// HTTP request body for logging in (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, SessionError> {
        match (required(self.email), required(self.password)) {
            (Some(email), Some(password)) => Ok(LoginCommand { email, password }),
            _ => Err(SessionError::MissingFields),
        }
    }
}
