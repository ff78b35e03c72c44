use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::ProjectName;
use crate::domain::session::errors::SessionError;
use crate::inbound::http::handlers::required;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub project_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectResponseData {
    pub message: String,
    pub project_id: String,
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    JsonBody(req): JsonBody<CreateProjectRequest>,
) -> Result<ApiSuccess<CreateProjectResponseData>, ApiError> {
    let name = required(req.project_name).ok_or(SessionError::MissingFields)?;
    let name = ProjectName::new(name).map_err(ProjectError::from)?;

    state
        .project_service
        .create_project(&auth_user.user_id, name)
        .await
        .map_err(ApiError::from)
        .map(|project| {
            ApiSuccess::new(
                StatusCode::CREATED,
                CreateProjectResponseData {
                    message: format!("New project {} created.", project.name),
                    project_id: project.id.to_string(),
                },
            )
        })
}
