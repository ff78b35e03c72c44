use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::parse_project_id;
use super::ProjectData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetProjectResponseData {
    pub project: ProjectData,
}

pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
) -> Result<ApiSuccess<GetProjectResponseData>, ApiError> {
    let project_id = parse_project_id(&project_id)?;

    state
        .project_service
        .get_project(&auth_user.user_id, &project_id)
        .await
        .map_err(ApiError::from)
        .map(|ref project| {
            ApiSuccess::new(
                StatusCode::OK,
                GetProjectResponseData {
                    project: project.into(),
                },
            )
        })
}
