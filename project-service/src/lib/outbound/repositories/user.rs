use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::project::models::ProjectId;
use crate::domain::user::models::collation_key;
use crate::domain::user::models::Avatar;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Notes;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, username, email, password_hash, avatar, avatar_content_type, \
                            notes, sessions_revoked_at, created_at";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    avatar: Option<Vec<u8>>,
    avatar_content_type: Option<String>,
    notes: String,
    sessions_revoked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, projects: Vec<ProjectId>) -> Result<User, UserError> {
        let avatar = match (self.avatar, self.avatar_content_type) {
            (Some(data), Some(content_type)) => Some(Avatar { data, content_type }),
            _ => None,
        };

        Ok(User {
            id: UserId(self.id),
            username: Username::new(self.username)?,
            email: EmailAddress::new(self.email)?,
            password_hash: self.password_hash,
            avatar,
            notes: Notes::new(self.notes)?,
            projects,
            sessions_revoked_at: self.sessions_revoked_at,
            created_at: self.created_at,
        })
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn project_ids(&self, user: Uuid) -> Result<Vec<ProjectId>, UserError> {
        let ids: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT project_id
            FROM project_members
            WHERE user_id = $1
            ORDER BY position
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(ids.into_iter().map(|(id,)| ProjectId(id)).collect())
    }

    async fn hydrate(&self, row: Option<UserRow>) -> Result<Option<User>, UserError> {
        match row {
            Some(row) => {
                let projects = self.project_ids(row.id).await?;
                Ok(Some(row.into_user(projects)?))
            }
            None => Ok(None),
        }
    }
}

/// Translate a unique violation on the folded username or email column.
fn map_write_error(e: sqlx::Error, user: &User) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("users_username_key") {
                return UserError::UsernameAlreadyExists(user.username.as_str().to_string());
            }
            if db_err.constraint() == Some("users_email_key") {
                return UserError::EmailAlreadyExists(user.email.as_str().to_string());
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let (avatar, avatar_content_type) = match &user.avatar {
            Some(avatar) => (Some(avatar.data.as_slice()), Some(avatar.content_type.as_str())),
            None => (None, None),
        };

        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, username_key, email, email_key, password_hash,
                avatar, avatar_content_type, notes, sessions_revoked_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.username.collation_key())
        .bind(user.email.as_str())
        .bind(user.email.collation_key())
        .bind(&user.password_hash)
        .bind(avatar)
        .bind(avatar_content_type)
        .bind(user.notes.as_str())
        .bind(user.sessions_revoked_at)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        self.hydrate(row).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email_key = $1"
        ))
        .bind(collation_key(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        self.hydrate(row).await
    }

    async fn find_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username_key = $1 OR email_key = $2 LIMIT 1"
        ))
        .bind(username.collation_key())
        .bind(email.collation_key())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        self.hydrate(row).await
    }

    async fn update(&self, mut user: User) -> Result<User, UserError> {
        let stored: Option<(Option<DateTime<Utc>>,)> = sqlx::query_as(
            r#"
            UPDATE users
            SET username = $2, username_key = $3, email = $4, email_key = $5,
                password_hash = $6, notes = $7
            WHERE id = $1
            RETURNING sessions_revoked_at
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.username.collation_key())
        .bind(user.email.as_str())
        .bind(user.email.collation_key())
        .bind(&user.password_hash)
        .bind(user.notes.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user))?;

        let Some((sessions_revoked_at,)) = stored else {
            return Err(UserError::NotFound(user.id.to_string()));
        };
        user.sessions_revoked_at = sessions_revoked_at;

        Ok(user)
    }

    async fn revoke_sessions(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET sessions_revoked_at = GREATEST(sessions_revoked_at, $2)
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    /// Owned projects and memberships are removed by the `ON DELETE CASCADE`
    /// foreign keys within the same statement.
    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
