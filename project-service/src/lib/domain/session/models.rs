use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Validated signup input.
#[derive(Debug)]
pub struct SignupCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

/// Login input.
///
/// The email is not syntax-checked: an address that cannot exist simply
/// fails like any unknown one.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Token pair handed out on signup and login.
///
/// The refresh token only ever travels in the session cookie.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: String,
}

/// What logout found to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// No session cookie was presented
    NoSession,
    /// The session cookie should be cleared
    Ended,
}
