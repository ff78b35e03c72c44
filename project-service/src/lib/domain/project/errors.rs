use thiserror::Error;

/// Error for ProjectId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for ProjectName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectNameError {
    #[error("Project name must not be empty")]
    Empty,

    #[error("Project name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for ProjectCharter validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectCharterError {
    #[error("Project charter too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for project operations
#[derive(Debug, Clone, Error)]
pub enum ProjectError {
    #[error("Invalid project ID: {0}")]
    InvalidProjectId(#[from] ProjectIdError),

    #[error("Invalid project name: {0}")]
    InvalidProjectName(#[from] ProjectNameError),

    #[error("Invalid project charter: {0}")]
    InvalidProjectCharter(#[from] ProjectCharterError),

    /// A required request value was absent; carries the client-facing message.
    #[error("{0}")]
    MissingValue(&'static str),

    #[error("Invalid end date: {0}")]
    InvalidEndDate(String),

    #[error("Project end date cannot be before its start date")]
    EndBeforeStart,

    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Unauthorized")]
    UnknownUser(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
