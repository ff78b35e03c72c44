use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectCharter;
use crate::domain::project::models::ProjectId;
use crate::domain::project::models::ProjectName;
use crate::domain::project::ports::ProjectRepository;
use crate::domain::user::models::UserId;

#[derive(FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    owner_id: Uuid,
    project_charter: String,
    completed_percent: i16,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
}

#[derive(FromRow)]
struct MemberRow {
    user_id: Uuid,
    is_manager: bool,
}

fn database_error(e: sqlx::Error) -> ProjectError {
    ProjectError::DatabaseError(e.to_string())
}

pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, project: Project) -> Result<Project, ProjectError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO projects (
                id, name, owner_id, project_charter, completed_percent, start_date, end_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(project.id.0)
        .bind(project.name.as_str())
        .bind(project.owner.0)
        .bind(&project.project_charter)
        .bind(project.completed_percent)
        .bind(project.start_date)
        .bind(project.end_date)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        for member in &project.members {
            sqlx::query(
                r#"
                INSERT INTO project_members (project_id, user_id, is_manager, joined_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(project.id.0)
            .bind(member.0)
            .bind(project.is_manager(member))
            .bind(project.start_date)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;
        }

        tx.commit().await.map_err(database_error)?;

        Ok(project)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError> {
        let row: Option<ProjectRow> = sqlx::query_as(
            r#"
            SELECT id, name, owner_id, project_charter, completed_percent, start_date, end_date
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let members: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT user_id, is_manager
            FROM project_members
            WHERE project_id = $1
            ORDER BY position
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let managers = members
            .iter()
            .filter(|m| m.is_manager)
            .map(|m| UserId(m.user_id))
            .collect();

        Ok(Some(Project {
            id: ProjectId(row.id),
            name: ProjectName::new(row.name)?,
            owner: UserId(row.owner_id),
            members: members.iter().map(|m| UserId(m.user_id)).collect(),
            managers,
            project_charter: row.project_charter,
            completed_percent: row.completed_percent,
            start_date: row.start_date,
            end_date: row.end_date,
        }))
    }

    async fn update_name(&self, id: &ProjectId, name: &ProjectName) -> Result<(), ProjectError> {
        let result = sqlx::query("UPDATE projects SET name = $2 WHERE id = $1")
            .bind(id.0)
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProjectError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn update_charter(
        &self,
        id: &ProjectId,
        charter: &ProjectCharter,
    ) -> Result<(), ProjectError> {
        let result = sqlx::query("UPDATE projects SET project_charter = $2 WHERE id = $1")
            .bind(id.0)
            .bind(charter.as_str())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProjectError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn update_end_date(
        &self,
        id: &ProjectId,
        end_date: DateTime<Utc>,
    ) -> Result<(), ProjectError> {
        let result = sqlx::query("UPDATE projects SET end_date = $2 WHERE id = $1")
            .bind(id.0)
            .bind(end_date)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProjectError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectError> {
        // Membership rows go with the project (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProjectError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
