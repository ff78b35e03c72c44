use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;

pub mod create_project;
pub mod delete_project;
pub mod get_project;
pub mod rename_project;
pub mod update_end_date;
pub mod update_project_charter;

pub use create_project::create_project;
pub use delete_project::delete_project;
pub use get_project::get_project;
pub use rename_project::rename_project;
pub use update_end_date::update_end_date;
pub use update_project_charter::update_project_charter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub members: Vec<String>,
    pub managers: Vec<String>,
    pub project_charter: String,
    pub completed_percent: i16,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

impl From<&Project> for ProjectData {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name.as_str().to_string(),
            owner: project.owner.to_string(),
            members: project.members.iter().map(ToString::to_string).collect(),
            managers: project.managers.iter().map(ToString::to_string).collect(),
            project_charter: project.project_charter.clone(),
            completed_percent: project.completed_percent,
            start_date: project.start_date,
            end_date: project.end_date,
        }
    }
}

fn parse_project_id(raw: &str) -> Result<ProjectId, ProjectError> {
    Ok(ProjectId::from_string(raw)?)
}
