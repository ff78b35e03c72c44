use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::project::errors::ProjectCharterError;
use crate::domain::project::errors::ProjectIdError;
use crate::domain::project::errors::ProjectNameError;
use crate::domain::user::models::UserId;

/// Project aggregate.
///
/// The owner is always a member and a manager. Members are kept in join
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: ProjectName,
    pub owner: UserId,
    pub members: Vec<UserId>,
    pub managers: Vec<UserId>,
    pub project_charter: String,
    pub completed_percent: i16,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

impl Project {
    /// Fresh project started at `now`, with its owner as sole member and manager.
    pub fn new(name: ProjectName, owner: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: ProjectId::new(),
            name,
            owner,
            members: vec![owner],
            managers: vec![owner],
            project_charter: String::new(),
            completed_percent: 0,
            start_date: now,
            end_date: None,
        }
    }

    pub fn is_member(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }

    pub fn is_manager(&self, user: &UserId) -> bool {
        self.managers.contains(user)
    }

    pub fn is_owner(&self, user: &UserId) -> bool {
        self.owner == *user
    }
}

/// Project unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProjectIdError> {
        Uuid::parse_str(s)
            .map(ProjectId)
            .map_err(|e| ProjectIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Project name, 1 to 100 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, ProjectNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();

        if length == 0 {
            return Err(ProjectNameError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(ProjectNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free-form statement of a project's purpose and scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCharter(String);

impl ProjectCharter {
    const MAX_LENGTH: usize = 5000;

    pub fn new(charter: String) -> Result<Self, ProjectCharterError> {
        let length = charter.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ProjectCharterError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(charter))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_owner_is_member_and_manager() {
        let owner = UserId::new();
        let other = UserId::new();
        let project = Project::new(
            ProjectName::new("Apollo".to_string()).unwrap(),
            owner,
            Utc::now(),
        );

        assert!(project.is_owner(&owner));
        assert!(project.is_member(&owner));
        assert!(project.is_manager(&owner));
        assert!(!project.is_member(&other));
        assert_eq!(project.completed_percent, 0);
        assert!(project.project_charter.is_empty());
        assert!(project.end_date.is_none());
    }

    #[test]
    fn test_project_name_validation() {
        assert_eq!(
            ProjectName::new("   ".to_string()),
            Err(ProjectNameError::Empty)
        );
        assert!(matches!(
            ProjectName::new("x".repeat(101)),
            Err(ProjectNameError::TooLong { max: 100, .. })
        ));
        assert_eq!(
            ProjectName::new("  Apollo ".to_string()).unwrap().as_str(),
            "Apollo"
        );
    }

    #[test]
    fn test_project_id_parsing() {
        assert!(ProjectId::from_string("not-a-uuid").is_err());

        let id = ProjectId::new();
        assert_eq!(ProjectId::from_string(&id.to_string()), Ok(id));
    }

    #[test]
    fn test_project_charter_length() {
        assert!(ProjectCharter::new("x".repeat(5000)).is_ok());
        assert_eq!(
            ProjectCharter::new("x".repeat(5001)),
            Err(ProjectCharterError::TooLong {
                max: 5000,
                actual: 5001
            })
        );
    }
}
