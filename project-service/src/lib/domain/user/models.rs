use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::domain::project::models::ProjectId;
use crate::user::errors::EmailError;
use crate::user::errors::NotesError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// `projects` lists the projects the user belongs to, in the order they
/// were joined. `sessions_revoked_at` invalidates every refresh token issued
/// during or before the second it names.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub avatar: Option<Avatar>,
    pub notes: Notes,
    pub projects: Vec<ProjectId>,
    pub sessions_revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether a refresh token issued at `issued_at` has been revoked.
    ///
    /// Compared at whole-second resolution, the resolution of `iat`. A token
    /// stamped in the same second as the revocation is revoked.
    pub fn session_revoked(&self, issued_at: DateTime<Utc>) -> bool {
        self.sessions_revoked_at
            .is_some_and(|revoked_at| issued_at.timestamp() <= revoked_at.timestamp())
    }

    /// Earliest issue time at or after `now` that a new refresh token can
    /// carry without being revoked already.
    pub fn session_issue_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.sessions_revoked_at {
            Some(revoked_at) if now.timestamp() <= revoked_at.timestamp() => {
                DateTime::from_timestamp(revoked_at.timestamp() + 1, 0).unwrap_or(now)
            }
            _ => now,
        }
    }
}

/// Key under which usernames and emails are compared for uniqueness.
///
/// Case-insensitive and accent-insensitive: the input is decomposed (NFD),
/// combining marks are dropped and the rest is lowercased, so "Zoé", "ZOE"
/// and "zoe" share a key.
pub fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// 3 to 40 characters, no whitespace or control characters. Accented and
/// non-Latin letters are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 40;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 40 characters
    /// * `InvalidCharacters` - Contains whitespace or control characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            Err(UsernameError::InvalidCharacters)
        } else {
            Ok(username)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn collation_key(&self) -> String {
        collation_key(&self.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. The address is
/// stored as entered; comparisons go through [`collation_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn collation_key(&self) -> String {
        collation_key(&self.0)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free-form personal notes, at most 2000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notes(String);

impl Notes {
    const MAX_LENGTH: usize = 2000;

    /// # Errors
    /// * `TooLong` - More than 2000 characters
    pub fn new(notes: String) -> Result<Self, NotesError> {
        let length = notes.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(NotesError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(notes))
    }

    /// Greeting placed in the notes of a freshly registered user.
    pub fn welcome(username: &Username) -> Self {
        Self(format!(
            "{}, these are your notes, you can write anything here!",
            username
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Profile picture bytes and their media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub data: Vec<u8>,
    pub content_type: String,
}

impl Avatar {
    pub fn png(data: Vec<u8>) -> Self {
        Self {
            data,
            content_type: "image/png".to_string(),
        }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields are updated; a new password also revokes every
/// refresh token issued so far.
#[derive(Debug)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<String>,
}

impl UpdateUserCommand {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collation_key_folds_case_and_accents() {
        assert_eq!(collation_key("Alice"), "alice");
        assert_eq!(collation_key("ZOÉ"), "zoe");
        assert_eq!(collation_key("Zoé"), collation_key("zoe"));
        assert_eq!(collation_key("Bob@X.com"), "bob@x.com");
    }

    #[test]
    fn test_collation_key_keeps_distinct_letters() {
        assert_ne!(collation_key("alice"), collation_key("alicia"));
    }

    #[test]
    fn test_username_length_bounds() {
        assert!(matches!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        ));
        assert!(Username::new("abc".to_string()).is_ok());
        assert!(Username::new("a".repeat(40)).is_ok());
        assert!(matches!(
            Username::new("a".repeat(41)),
            Err(UsernameError::TooLong { max: 40, actual: 41 })
        ));
    }

    #[test]
    fn test_username_counts_characters_not_bytes() {
        assert!(Username::new("éé".to_string()).is_err());
        assert!(Username::new("éèê".to_string()).is_ok());
    }

    #[test]
    fn test_username_rejects_whitespace() {
        assert_eq!(
            Username::new("bob smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
        assert_eq!(
            Username::new("bob\n".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("bob@x.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_notes_limit() {
        assert!(Notes::new("n".repeat(2000)).is_ok());
        assert!(matches!(
            Notes::new("n".repeat(2001)),
            Err(NotesError::TooLong { .. })
        ));
    }

    #[test]
    fn test_welcome_notes() {
        let username = Username::new("bob".to_string()).unwrap();
        assert_eq!(
            Notes::welcome(&username).as_str(),
            "bob, these are your notes, you can write anything here!"
        );
    }

    #[test]
    fn test_session_revoked() {
        let issued = DateTime::from_timestamp(1_000, 0).unwrap();
        let mut user = User {
            id: UserId::new(),
            username: Username::new("bob".to_string()).unwrap(),
            email: EmailAddress::new("bob@x.com".to_string()).unwrap(),
            password_hash: String::new(),
            avatar: None,
            notes: Notes::new(String::new()).unwrap(),
            projects: Vec::new(),
            sessions_revoked_at: None,
            created_at: issued,
        };

        assert!(!user.session_revoked(issued));

        user.sessions_revoked_at = DateTime::from_timestamp(1_001, 0);
        assert!(user.session_revoked(issued));

        user.sessions_revoked_at = DateTime::from_timestamp(1_000, 0);
        assert!(user.session_revoked(issued));

        user.sessions_revoked_at = DateTime::from_timestamp_millis(999_999);
        assert!(!user.session_revoked(issued));
    }

    #[test]
    fn test_session_issue_time_skips_revoked_second() {
        let now = DateTime::from_timestamp(1_000, 250_000_000).unwrap();
        let mut user = User {
            id: UserId::new(),
            username: Username::new("bob".to_string()).unwrap(),
            email: EmailAddress::new("bob@x.com".to_string()).unwrap(),
            password_hash: String::new(),
            avatar: None,
            notes: Notes::new(String::new()).unwrap(),
            projects: Vec::new(),
            sessions_revoked_at: None,
            created_at: now,
        };

        assert_eq!(user.session_issue_time(now), now);

        // Revoked earlier in the same second
        user.sessions_revoked_at = DateTime::from_timestamp(1_000, 100_000_000);
        let issued = user.session_issue_time(now);
        assert_eq!(issued, DateTime::from_timestamp(1_001, 0).unwrap());
        assert!(!user.session_revoked(issued));

        user.sessions_revoked_at = DateTime::from_timestamp(999, 0);
        assert_eq!(user.session_issue_time(now), now);
    }
}
