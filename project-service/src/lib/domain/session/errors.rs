use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Errors of the session lifecycle (signup, login, refresh, logout).
///
/// Display strings are the messages returned to clients.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Duplicate username or email")]
    Duplicate,

    /// Carries the validation detail for logs; clients only see the generic text.
    #[error("Invalid user data received")]
    InvalidUserData(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<UserError> for SessionError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                SessionError::Duplicate
            }
            UserError::InvalidUserId(_)
            | UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidNotes(_) => SessionError::InvalidUserData(err.to_string()),
            UserError::NothingToUpdate => SessionError::MissingFields,
            UserError::NotFound(_) => SessionError::Unauthorized,
            UserError::Password(e) => SessionError::Password(e),
            UserError::DatabaseError(msg) => SessionError::DatabaseError(msg),
        }
    }
}
