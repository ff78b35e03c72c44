use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::parse_project_id;
use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::ProjectName;
use crate::domain::session::errors::SessionError;
use crate::inbound::http::handlers::required;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenameProjectRequest {
    pub new_project_name: Option<String>,
}

pub async fn rename_project(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    JsonBody(req): JsonBody<RenameProjectRequest>,
) -> Result<StatusCode, ApiError> {
    let project_id = parse_project_id(&project_id)?;
    let name = required(req.new_project_name).ok_or(SessionError::MissingFields)?;
    let name = ProjectName::new(name).map_err(ProjectError::from)?;

    state
        .project_service
        .rename_project(&auth_user.user_id, &project_id, name)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
