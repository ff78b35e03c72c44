use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::AccessTokenResponseData;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::SignupCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Username;
use crate::inbound::http::cookies::session_cookie;
use crate::inbound::http::handlers::required;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(body): JsonBody<SignupRequest>,
) -> Result<(CookieJar, ApiSuccess<AccessTokenResponseData>), ApiError> {
    let command = body.try_into_command()?;
    let session = state.session_service.signup(command).await?;

    let jar = jar.add(session_cookie(
        session.refresh_token,
        state.token_issuer.refresh_lifetime(),
    ));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::CREATED,
            AccessTokenResponseData {
                access_token: session.access_token,
            },
        ),
    ))
}

/// HTTP request body for signing up (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    username: Option<String>,
    password: Option<String>,
    email: Option<String>,
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, SessionError> {
        let (Some(username), Some(password), Some(email)) = (
            required(self.username),
            required(self.password),
            required(self.email),
        ) else {
            return Err(SessionError::MissingFields);
        };

        let username = Username::new(username)
            .map_err(|e| SessionError::InvalidUserData(e.to_string()))?;
        let email =
            EmailAddress::new(email).map_err(|e| SessionError::InvalidUserData(e.to_string()))?;

        Ok(SignupCommand {
            username,
            email,
            password,
        })
    }
}
