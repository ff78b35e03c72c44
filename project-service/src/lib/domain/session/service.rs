use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenIssuer;
use tokio::sync::OnceCell;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::IssuedSession;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LogoutOutcome;
use crate::domain::session::models::SignupCommand;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::credentials::Credentials;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Avatar;
use crate::domain::user::models::Notes;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Password verified when a login names an unknown email, so that both
/// failure paths cost one hash verification.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Session manager: signup, login, refresh and logout.
pub struct SessionService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    tokens: Arc<TokenIssuer>,
    credentials: Credentials,
    default_avatar: Avatar,
    decoy_hash: OnceCell<String>,
}

impl<UR> SessionService<UR>
where
    UR: UserRepository,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `tokens` - Access/refresh token issuer
    /// * `credentials` - Password hashing
    /// * `default_avatar` - Picture given to every new user
    pub fn new(
        repository: Arc<UR>,
        tokens: Arc<TokenIssuer>,
        credentials: Credentials,
        default_avatar: Avatar,
    ) -> Self {
        Self {
            repository,
            tokens,
            credentials,
            default_avatar,
            decoy_hash: OnceCell::new(),
        }
    }

    /// Issue a token pair for `user`.
    ///
    /// The refresh token is stamped past the user's revocation second, so a
    /// login in the same second as a logout still yields a usable session.
    fn open_session(&self, user: &User) -> Result<IssuedSession, SessionError> {
        let access_token = self.tokens.issue_access_token(user.id)?;
        let issued_at = user.session_issue_time(self.tokens.now());
        let refresh_token = self.tokens.issue_refresh_token_at(user.id, issued_at)?;

        Ok(IssuedSession {
            user_id: user.id,
            access_token,
            refresh_token,
        })
    }

    async fn decoy_hash(&self) -> Result<String, SessionError> {
        let hash = self
            .decoy_hash
            .get_or_try_init(|| self.credentials.hash(DECOY_PASSWORD.to_string()))
            .await?;

        Ok(hash.clone())
    }

    async fn revoke(&self, refresh_token: &str) {
        let claims = match self.tokens.verify_refresh_token(refresh_token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Logout with unusable refresh token");
                return;
            }
        };

        let Ok(user_id) = UserId::from_string(&claims.user_id) else {
            return;
        };

        let user = match self.repository.find_by_id(&user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to revoke sessions");
                return;
            }
        };

        // Covers refresh tokens stamped ahead of the clock by a recent login
        let at = user.session_issue_time(self.tokens.now());
        match self.repository.revoke_sessions(&user_id, at).await {
            Ok(()) => tracing::info!(user_id = %user_id, "Sessions revoked on logout"),
            Err(UserError::NotFound(_)) => {}
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to revoke sessions")
            }
        }
    }
}

#[async_trait]
impl<UR> SessionServicePort for SessionService<UR>
where
    UR: UserRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<IssuedSession, SessionError> {
        let existing = self
            .repository
            .find_by_username_or_email(&command.username, &command.email)
            .await?;

        if existing.is_some() {
            tracing::debug!(username = %command.username, "Signup rejected as duplicate");
            return Err(SessionError::Duplicate);
        }

        let password_hash = self.credentials.hash(command.password).await?;

        let user = User {
            id: UserId::new(),
            notes: Notes::welcome(&command.username),
            username: command.username,
            email: command.email,
            password_hash,
            avatar: Some(self.default_avatar.clone()),
            projects: Vec::new(),
            sessions_revoked_at: None,
            created_at: self.tokens.now(),
        };

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, "User signed up");

        self.open_session(&created)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedSession, SessionError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            let decoy = self.decoy_hash().await?;
            self.credentials.verify(command.password, decoy).await?;
            return Err(SessionError::Unauthorized);
        };

        let matches = self
            .credentials
            .verify(command.password, user.password_hash.clone())
            .await?;

        if !matches {
            return Err(SessionError::Unauthorized);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.open_session(&user)
    }

    async fn refresh(&self, refresh_token: Option<&str>) -> Result<String, SessionError> {
        let token = refresh_token
            .filter(|token| !token.is_empty())
            .ok_or(SessionError::Unauthorized)?;

        let claims = self.tokens.verify_refresh_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh token rejected");
            SessionError::Forbidden
        })?;

        let user_id = UserId::from_string(&claims.user_id).map_err(|_| SessionError::Forbidden)?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(SessionError::Unauthorized)?;

        let issued_at = claims.issued_at().ok_or(SessionError::Forbidden)?;
        if user.session_revoked(issued_at) {
            tracing::debug!(user_id = %user.id, "Refresh token revoked");
            return Err(SessionError::Forbidden);
        }

        Ok(self.tokens.issue_access_token(user.id)?)
    }

    async fn logout(&self, refresh_token: Option<&str>) -> LogoutOutcome {
        let Some(token) = refresh_token.filter(|token| !token.is_empty()) else {
            return LogoutOutcome::NoSession;
        };

        self.revoke(token).await;

        LogoutOutcome::Ended
    }
}
