use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectCharter;
use crate::domain::project::models::ProjectId;
use crate::domain::project::models::ProjectName;
use crate::domain::user::models::UserId;

/// Port for project operations on behalf of an authenticated user.
#[async_trait]
pub trait ProjectServicePort: Send + Sync + 'static {
    /// Create a project owned and managed by `owner`.
    ///
    /// # Errors
    /// * `UnknownUser` - Owner no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn create_project(
        &self,
        owner: &UserId,
        name: ProjectName,
    ) -> Result<Project, ProjectError>;

    /// Retrieve a project the caller is a member of.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `Forbidden` - Caller is not a member
    /// * `DatabaseError` - Database operation failed
    async fn get_project(&self, caller: &UserId, id: &ProjectId) -> Result<Project, ProjectError>;

    /// Rename a project the caller manages.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `Forbidden` - Caller is not a manager
    /// * `DatabaseError` - Database operation failed
    async fn rename_project(
        &self,
        caller: &UserId,
        id: &ProjectId,
        name: ProjectName,
    ) -> Result<(), ProjectError>;

    /// Replace the charter of a project the caller manages.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `Forbidden` - Caller is not a manager
    /// * `DatabaseError` - Database operation failed
    async fn update_project_charter(
        &self,
        caller: &UserId,
        id: &ProjectId,
        charter: ProjectCharter,
    ) -> Result<(), ProjectError>;

    /// Set the end date of a project the caller manages.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `Forbidden` - Caller is not a manager
    /// * `EndBeforeStart` - `end_date` precedes the project's start date
    /// * `DatabaseError` - Database operation failed
    async fn update_end_date(
        &self,
        caller: &UserId,
        id: &ProjectId,
        end_date: DateTime<Utc>,
    ) -> Result<(), ProjectError>;

    /// Delete a project the caller owns, returning it as it was.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `Forbidden` - Caller is not the owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_project(&self, caller: &UserId, id: &ProjectId)
        -> Result<Project, ProjectError>;
}

/// Persistence operations for project aggregate, membership included.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    /// Persist a new project together with its initial members and managers.
    async fn create(&self, project: Project) -> Result<Project, ProjectError>;

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError>;

    /// # Errors
    /// * `NotFound` - Project does not exist
    async fn update_name(&self, id: &ProjectId, name: &ProjectName) -> Result<(), ProjectError>;

    /// # Errors
    /// * `NotFound` - Project does not exist
    async fn update_charter(
        &self,
        id: &ProjectId,
        charter: &ProjectCharter,
    ) -> Result<(), ProjectError>;

    /// # Errors
    /// * `NotFound` - Project does not exist
    async fn update_end_date(
        &self,
        id: &ProjectId,
        end_date: DateTime<Utc>,
    ) -> Result<(), ProjectError>;

    /// Remove a project; it disappears from every member's project list.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectError>;
}
