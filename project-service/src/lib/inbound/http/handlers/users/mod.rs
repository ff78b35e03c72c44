use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::User;

pub mod delete_user;
pub mod get_user;
pub mod update_notes;
pub mod update_user;

pub use delete_user::delete_user;
pub use get_user::get_user;
pub use update_notes::update_notes;
pub use update_user::update_user;

/// Profile of the authenticated user. Never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub notes: String,
    pub projects: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfileData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            notes: user.notes.as_str().to_string(),
            projects: user.projects.iter().map(ToString::to_string).collect(),
            created_at: user.created_at,
        }
    }
}
