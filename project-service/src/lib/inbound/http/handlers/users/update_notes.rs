use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::UserProfileData;
use crate::domain::user::models::Notes;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Notes may legitimately be emptied, so only an absent field is rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateNotesRequest {
    pub notes: Option<String>,
}

pub async fn update_notes(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    JsonBody(req): JsonBody<UpdateNotesRequest>,
) -> Result<ApiSuccess<UserProfileData>, ApiError> {
    let notes = req.notes.ok_or(UserError::NothingToUpdate)?;
    let notes = Notes::new(notes).map_err(UserError::from)?;

    state
        .user_service
        .update_notes(&auth_user.user_id, notes)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
