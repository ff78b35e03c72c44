use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_project_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let project_id = parse_project_id(&project_id)?;

    state
        .project_service
        .delete_project(&auth_user.user_id, &project_id)
        .await
        .map_err(ApiError::from)
        .map(|project| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageResponseData::new(format!(
                    "Project {} with ID {} deleted",
                    project.name, project.id
                )),
            )
        })
}
