use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;

use super::parse_project_id;
use crate::domain::project::errors::ProjectError;
use crate::inbound::http::handlers::required;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateEndDateRequest {
    pub new_end_date: Option<String>,
}

pub async fn update_end_date(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    JsonBody(req): JsonBody<UpdateEndDateRequest>,
) -> Result<StatusCode, ApiError> {
    let project_id = parse_project_id(&project_id)?;
    let end_date =
        required(req.new_end_date).ok_or(ProjectError::MissingValue("New end date is missing."))?;
    let end_date = parse_end_date(&end_date)?;

    state
        .project_service
        .update_end_date(&auth_user.user_id, &project_id, end_date)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
fn parse_end_date(raw: &str) -> Result<DateTime<Utc>, ProjectError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| ProjectError::InvalidEndDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_end_date_formats() {
        assert_eq!(
            parse_end_date("2024-06-30T17:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 30, 15, 0, 0).unwrap()
        );
        assert_eq!(
            parse_end_date("2024-06-30").unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()
        );
        assert!(matches!(
            parse_end_date("next tuesday"),
            Err(ProjectError::InvalidEndDate(_))
        ));
    }
}
