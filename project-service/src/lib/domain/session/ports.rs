use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::IssuedSession;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LogoutOutcome;
use crate::domain::session::models::SignupCommand;

/// Port for the session lifecycle.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Register a user and open a session for them.
    ///
    /// # Errors
    /// * `Duplicate` - Username or email taken, ignoring case and accents
    /// * `InvalidUserData` - Store rejected the user data
    /// * `Password` / `Token` / `DatabaseError` - Infrastructure failure
    async fn signup(&self, command: SignupCommand) -> Result<IssuedSession, SessionError>;

    /// Open a session for existing credentials.
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown email or wrong password, indistinguishably
    /// * `Password` / `Token` / `DatabaseError` - Infrastructure failure
    async fn login(&self, command: LoginCommand) -> Result<IssuedSession, SessionError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `Unauthorized` - No refresh token, or its user no longer exists
    /// * `Forbidden` - Token invalid, expired or revoked
    /// * `Token` / `DatabaseError` - Infrastructure failure
    async fn refresh(&self, refresh_token: Option<&str>) -> Result<String, SessionError>;

    /// End the session carried by the refresh token, if any.
    ///
    /// Never fails on a bad or stale token; the cookie is cleared either way.
    async fn logout(&self, refresh_token: Option<&str>) -> LogoutOutcome;
}
