use std::sync::Arc;

use async_trait::async_trait;
use auth::Clock;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectCharter;
use crate::domain::project::models::ProjectId;
use crate::domain::project::models::ProjectName;
use crate::domain::project::ports::ProjectRepository;
use crate::domain::project::ports::ProjectServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for project operations.
///
/// Only membership-based authorization is enforced here: members may read,
/// managers may edit name, charter and end date, the owner may delete.
pub struct ProjectService<PR, UR>
where
    PR: ProjectRepository,
    UR: UserRepository,
{
    repository: Arc<PR>,
    users: Arc<UR>,
    clock: Arc<dyn Clock>,
}

impl<PR, UR> ProjectService<PR, UR>
where
    PR: ProjectRepository,
    UR: UserRepository,
{
    pub fn new(repository: Arc<PR>, users: Arc<UR>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            users,
            clock,
        }
    }

    async fn load(&self, id: &ProjectId) -> Result<Project, ProjectError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id.to_string()))
    }

    async fn load_managed(&self, caller: &UserId, id: &ProjectId) -> Result<Project, ProjectError> {
        let project = self.load(id).await?;

        if !project.is_manager(caller) {
            return Err(ProjectError::Forbidden);
        }

        Ok(project)
    }
}

#[async_trait]
impl<PR, UR> ProjectServicePort for ProjectService<PR, UR>
where
    PR: ProjectRepository,
    UR: UserRepository,
{
    async fn create_project(
        &self,
        owner: &UserId,
        name: ProjectName,
    ) -> Result<Project, ProjectError> {
        let exists = self
            .users
            .find_by_id(owner)
            .await
            .map_err(|e| ProjectError::DatabaseError(e.to_string()))?
            .is_some();

        if !exists {
            return Err(ProjectError::UnknownUser(owner.to_string()));
        }

        let project = Project::new(name, *owner, self.clock.now());
        let created = self.repository.create(project).await?;

        tracing::info!(
            project_id = %created.id,
            owner_id = %owner,
            "Project created"
        );

        Ok(created)
    }

    async fn get_project(&self, caller: &UserId, id: &ProjectId) -> Result<Project, ProjectError> {
        let project = self.load(id).await?;

        if !project.is_member(caller) {
            return Err(ProjectError::Forbidden);
        }

        Ok(project)
    }

    async fn rename_project(
        &self,
        caller: &UserId,
        id: &ProjectId,
        name: ProjectName,
    ) -> Result<(), ProjectError> {
        self.load_managed(caller, id).await?;
        self.repository.update_name(id, &name).await
    }

    async fn update_project_charter(
        &self,
        caller: &UserId,
        id: &ProjectId,
        charter: ProjectCharter,
    ) -> Result<(), ProjectError> {
        self.load_managed(caller, id).await?;
        self.repository.update_charter(id, &charter).await?;
        tracing::debug!(project_id = %id, "Project charter updated");

        Ok(())
    }

    async fn update_end_date(
        &self,
        caller: &UserId,
        id: &ProjectId,
        end_date: DateTime<Utc>,
    ) -> Result<(), ProjectError> {
        let project = self.load_managed(caller, id).await?;

        if end_date < project.start_date {
            return Err(ProjectError::EndBeforeStart);
        }

        self.repository.update_end_date(id, end_date).await?;
        tracing::debug!(project_id = %id, end_date = %end_date, "Project end date updated");

        Ok(())
    }

    async fn delete_project(
        &self,
        caller: &UserId,
        id: &ProjectId,
    ) -> Result<Project, ProjectError> {
        let project = self.load(id).await?;

        if !project.is_owner(caller) {
            return Err(ProjectError::Forbidden);
        }

        self.repository.delete(id).await?;
        tracing::info!(project_id = %id, "Project deleted");

        Ok(project)
    }
}
