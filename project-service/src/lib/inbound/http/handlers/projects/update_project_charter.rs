use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::parse_project_id;
use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::ProjectCharter;
use crate::inbound::http::handlers::required;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProjectCharterRequest {
    pub new_project_charter: Option<String>,
}

pub async fn update_project_charter(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    JsonBody(req): JsonBody<UpdateProjectCharterRequest>,
) -> Result<StatusCode, ApiError> {
    let project_id = parse_project_id(&project_id)?;
    let charter = required(req.new_project_charter)
        .ok_or(ProjectError::MissingValue("New project charter is missing."))?;
    let charter = ProjectCharter::new(charter).map_err(ProjectError::from)?;

    state
        .project_service
        .update_project_charter(&auth_user.user_id, &project_id, charter)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
